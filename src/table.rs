use crate::boundary::{BindingError, NativeFn, NativeMethod, Signature, invoke, try_invoke};
use crate::value::Value;
use heapless::Vec;

/// An identifier for a method within a [`MethodTable`].
///
/// Resolved once from a name by [`MethodTable::lookup`], then used for every
/// dispatch. IDs are only meaningful for the table that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MethodId(pub usize);

impl From<usize> for MethodId {
    fn from(id: usize) -> Self {
        MethodId(id)
    }
}

impl From<MethodId> for usize {
    fn from(id: MethodId) -> Self {
        id.0
    }
}

/// How a table reports calls that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CallPolicy {
    /// Malformed calls return `Nil`, as scripts expect.
    #[default]
    Lenient,
    /// Malformed calls return the [`BindingError`].
    Strict,
}

/// Errors that can occur during table operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// The method ID does not exist in the table.
    UnknownMethod(MethodId),

    /// No method is registered under the given name.
    UnknownName,

    /// Attempted to register a name that already exists.
    DuplicateName,

    /// The table is full and cannot accept more methods.
    TableFull,

    /// A call failed at the marshalling boundary (strict policy only).
    Binding(BindingError),
}

impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TableError::UnknownMethod(id) => {
                write!(f, "method ID {} does not exist in table", id.0)
            }
            TableError::UnknownName => {
                write!(f, "no method registered under that name")
            }
            TableError::DuplicateName => {
                write!(f, "method name already registered")
            }
            TableError::TableFull => {
                write!(f, "method table is full, cannot add more methods")
            }
            TableError::Binding(err) => {
                write!(f, "binding error: {}", err)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TableError {}

impl From<BindingError> for TableError {
    fn from(err: BindingError) -> Self {
        TableError::Binding(err)
    }
}

/// A dispatch request coming from the VM.
///
/// The argument count is the slice length, so count and sequence always agree.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a, 'v> {
    /// Method resolved by the VM's dispatch.
    pub method: MethodId,
    /// Arguments, receiver excluded.
    pub args: &'a [Value<'v>],
}

impl<'a, 'v> Request<'a, 'v> {
    /// Creates a request.
    pub fn new(method: MethodId, args: &'a [Value<'v>]) -> Self {
        Self { method, args }
    }

    /// Number of supplied arguments.
    #[inline]
    pub fn argument_count(&self) -> usize {
        self.args.len()
    }
}

/// Registration-time table mapping method names to native bindings.
///
/// Filled once at startup and read-only afterwards. Holds up to `N` methods
/// for target type `T` without heap allocation.
///
/// # Type Parameters
/// * `T` - Native object the methods operate on
/// * `N` - Maximum number of methods
pub struct MethodTable<T, const N: usize> {
    methods: Vec<NativeMethod<T>, N>,
    policy: CallPolicy,
}

impl<T, const N: usize> MethodTable<T, N> {
    /// Creates an empty table with the lenient policy.
    pub fn new() -> Self {
        Self::with_policy(CallPolicy::Lenient)
    }

    /// Creates an empty table with the given policy.
    pub fn with_policy(policy: CallPolicy) -> Self {
        Self {
            methods: Vec::new(),
            policy,
        }
    }

    /// Changes how validation failures are reported.
    pub fn set_policy(&mut self, policy: CallPolicy) {
        self.policy = policy;
    }

    /// Returns the current policy.
    #[inline]
    pub fn policy(&self) -> CallPolicy {
        self.policy
    }

    /// Registers a native function under `name`.
    ///
    /// # Errors
    /// * `DuplicateName` - A method with this name already exists
    /// * `TableFull` - The table already holds `N` methods
    pub fn define(
        &mut self,
        name: &'static str,
        signature: Signature,
        call: NativeFn<T>,
    ) -> Result<MethodId, TableError> {
        if self.lookup(name).is_some() {
            return Err(TableError::DuplicateName);
        }

        let id = MethodId(self.methods.len());
        self.methods
            .push(NativeMethod::new(name, signature, call))
            .map_err(|_| TableError::TableFull)?;
        Ok(id)
    }

    /// Resolves a method name to its ID.
    pub fn lookup(&self, name: &str) -> Option<MethodId> {
        self.methods
            .iter()
            .position(|m| m.name == name)
            .map(MethodId)
    }

    /// Returns the binding for `id`.
    pub fn get(&self, id: MethodId) -> Option<&NativeMethod<T>> {
        self.methods.get(id.0)
    }

    /// Iterates over all registered methods in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &NativeMethod<T>> {
        self.methods.iter()
    }

    /// Number of registered methods.
    #[inline]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if no methods are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Dispatches a request to its native function.
    ///
    /// # Returns
    /// * `Ok(value)` - The native result, or `Nil` for a malformed call under
    ///   the lenient policy
    /// * `Err(UnknownMethod)` - The request names no method in this table
    /// * `Err(Binding)` - A malformed call under the strict policy
    pub fn dispatch<'v>(
        &self,
        target: &mut T,
        request: Request<'_, 'v>,
    ) -> Result<Value<'v>, TableError> {
        let method = self
            .get(request.method)
            .ok_or(TableError::UnknownMethod(request.method))?;

        match self.policy {
            CallPolicy::Lenient => Ok(invoke(target, request.args, method)),
            CallPolicy::Strict => Ok(try_invoke(target, request.args, method)?),
        }
    }

    /// Calls a method by ID.
    pub fn call<'v>(
        &self,
        target: &mut T,
        id: MethodId,
        args: &[Value<'v>],
    ) -> Result<Value<'v>, TableError> {
        self.dispatch(target, Request::new(id, args))
    }

    /// Resolves `name` and calls it.
    ///
    /// # Errors
    /// * `UnknownName` - No method is registered under `name`
    /// * `Binding` - A malformed call under the strict policy
    pub fn call_by_name<'v>(
        &self,
        target: &mut T,
        name: &str,
        args: &[Value<'v>],
    ) -> Result<Value<'v>, TableError> {
        let id = self.lookup(name).ok_or(TableError::UnknownName)?;
        self.call(target, id, args)
    }
}

impl<T, const N: usize> Default for MethodTable<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
