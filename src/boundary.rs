//! Marshalling boundary between the VM and native functions.
//!
//! Every call is validated against the method's [`Signature`] before native
//! code runs. A call with the wrong argument count or tags never reaches the
//! native function. [`try_invoke`] reports the failure as a [`BindingError`];
//! [`invoke`] neutralizes it to [`Value::Nil`], which is what scripts observe.

use crate::value::{Tag, Value};

/// Errors detected while crossing the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindingError {
    /// Wrong number of arguments.
    ArityMismatch {
        /// Arguments the method declares.
        expected: usize,
        /// Arguments supplied by the caller.
        actual: usize,
    },

    /// An argument carries the wrong tag.
    TagMismatch {
        /// Zero-based argument position (receiver excluded).
        index: usize,
        /// Tag the method declares at this position.
        expected: Tag,
        /// Tag the caller supplied.
        actual: Tag,
    },

    /// The native function produced a value of an undeclared tag.
    ReturnMismatch {
        /// Tag the method declares.
        expected: Tag,
        /// Tag actually returned.
        actual: Tag,
    },
}

impl core::fmt::Display for BindingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BindingError::ArityMismatch { expected, actual } => {
                write!(
                    f,
                    "wrong number of arguments (given {}, expected {})",
                    actual, expected
                )
            }
            BindingError::TagMismatch {
                index,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "argument {} must be {}, got {}",
                    index, expected, actual
                )
            }
            BindingError::ReturnMismatch { expected, actual } => {
                write!(
                    f,
                    "native function returned {}, declared {}",
                    actual, expected
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BindingError {}

/// Static description of a bound method's calling convention.
///
/// The receiver is implicit and not counted in `params`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    params: &'static [Tag],
    returns: Tag,
}

impl Signature {
    /// Creates a signature from parameter tags and return tag.
    pub const fn new(params: &'static [Tag], returns: Tag) -> Self {
        Self { params, returns }
    }

    /// Signature of a method taking no arguments.
    pub const fn nullary(returns: Tag) -> Self {
        Self::new(&[], returns)
    }

    /// Expected argument count.
    #[inline]
    pub const fn arity(&self) -> usize {
        self.params.len()
    }

    /// Expected argument tags.
    #[inline]
    pub fn params(&self) -> &'static [Tag] {
        self.params
    }

    /// Declared return tag.
    #[inline]
    pub fn returns(&self) -> Tag {
        self.returns
    }

    /// Checks argument count and tags.
    ///
    /// # Errors
    /// * `ArityMismatch` - `args.len()` differs from the declared arity
    /// * `TagMismatch` - the first argument whose tag differs
    pub fn validate(&self, args: &[Value<'_>]) -> Result<(), BindingError> {
        if args.len() != self.params.len() {
            return Err(BindingError::ArityMismatch {
                expected: self.params.len(),
                actual: args.len(),
            });
        }

        for (index, (arg, expected)) in args.iter().zip(self.params).enumerate() {
            if arg.tag() != *expected {
                return Err(BindingError::TagMismatch {
                    index,
                    expected: *expected,
                    actual: arg.tag(),
                });
            }
        }

        Ok(())
    }
}

/// Native function bound to a script method.
///
/// Receives the target object and the already-validated arguments.
pub type NativeFn<T> = for<'v> fn(&mut T, &[Value<'v>]) -> Result<Value<'v>, BindingError>;

/// A named native function with its signature.
pub struct NativeMethod<T> {
    /// Script-visible method name.
    pub name: &'static str,
    /// Calling convention.
    pub signature: Signature,
    /// Native entry point.
    pub call: NativeFn<T>,
}

impl<T> NativeMethod<T> {
    /// Creates a method binding.
    pub const fn new(name: &'static str, signature: Signature, call: NativeFn<T>) -> Self {
        Self {
            name,
            signature,
            call,
        }
    }
}

impl<T> Clone for NativeMethod<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NativeMethod<T> {}

impl<T> core::fmt::Debug for NativeMethod<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NativeMethod")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish()
    }
}

/// Validates `args`, invokes the native function, and checks its result.
///
/// # Errors
/// Returns a [`BindingError`] without calling native code when the arguments
/// do not match the signature, or after the call if the returned tag is not
/// the declared one.
pub fn try_invoke<'v, T>(
    target: &mut T,
    args: &[Value<'v>],
    method: &NativeMethod<T>,
) -> Result<Value<'v>, BindingError> {
    method.signature.validate(args)?;

    let result = (method.call)(target, args)?;

    if result.tag() != method.signature.returns {
        return Err(BindingError::ReturnMismatch {
            expected: method.signature.returns,
            actual: result.tag(),
        });
    }

    Ok(result)
}

/// Invokes a method, turning any boundary error into [`Value::Nil`].
pub fn invoke<'v, T>(target: &mut T, args: &[Value<'v>], method: &NativeMethod<T>) -> Value<'v> {
    match try_invoke(target, args, method) {
        Ok(value) => value,
        Err(_err) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("{}: call neutralized: {}", method.name, _err);
            Value::Nil
        }
    }
}
