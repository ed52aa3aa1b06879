//! Conversions between VM values and native Rust types.
//!
//! Integers convert with plain width casts: a script passing `300` to a
//! `u8` parameter receives `44`, the same as an implicit C conversion.

use crate::boundary::BindingError;
use crate::value::{Tag, Value};
use core::ffi::CStr;

/// A native type that can be extracted from a VM value.
pub trait FromValue<'v>: Sized {
    /// Tag a value must carry to convert into this type.
    const TAG: Tag;

    /// Converts the value, or returns `None` if the tag does not match.
    fn from_value(value: Value<'v>) -> Option<Self>;
}

/// A native type that can be returned to the VM.
pub trait IntoValue<'v> {
    /// Tag of the produced value.
    const TAG: Tag;

    /// Wraps the native value.
    fn into_value(self) -> Value<'v>;
}

/// Boolean result in the native 0/1 convention.
///
/// Any non-zero value marshals to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Truthy(pub i32);

impl<'v> IntoValue<'v> for Truthy {
    const TAG: Tag = Tag::Bool;

    #[inline]
    fn into_value(self) -> Value<'v> {
        Value::Bool(self.0 != 0)
    }
}

impl<'v> IntoValue<'v> for () {
    const TAG: Tag = Tag::Nil;

    #[inline]
    fn into_value(self) -> Value<'v> {
        Value::Nil
    }
}

impl<'v> FromValue<'v> for bool {
    const TAG: Tag = Tag::Bool;

    fn from_value(value: Value<'v>) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl<'v> IntoValue<'v> for bool {
    const TAG: Tag = Tag::Bool;

    #[inline]
    fn into_value(self) -> Value<'v> {
        Value::Bool(self)
    }
}

impl<'v> FromValue<'v> for &'v CStr {
    const TAG: Tag = Tag::Str;

    fn from_value(value: Value<'v>) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl<'v> IntoValue<'v> for &'v CStr {
    const TAG: Tag = Tag::Str;

    #[inline]
    fn into_value(self) -> Value<'v> {
        Value::Str(self)
    }
}

macro_rules! integer_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'v> FromValue<'v> for $ty {
                const TAG: Tag = Tag::Integer;

                fn from_value(value: Value<'v>) -> Option<Self> {
                    match value {
                        Value::Integer(i) => Some(i as $ty),
                        _ => None,
                    }
                }
            }

            impl<'v> IntoValue<'v> for $ty {
                const TAG: Tag = Tag::Integer;

                #[inline]
                fn into_value(self) -> Value<'v> {
                    Value::Integer(self as i64)
                }
            }
        )*
    };
}

integer_conversions!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! float_conversions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'v> FromValue<'v> for $ty {
                const TAG: Tag = Tag::Float;

                fn from_value(value: Value<'v>) -> Option<Self> {
                    match value {
                        Value::Float(x) => Some(x as $ty),
                        _ => None,
                    }
                }
            }

            impl<'v> IntoValue<'v> for $ty {
                const TAG: Tag = Tag::Float;

                #[inline]
                fn into_value(self) -> Value<'v> {
                    Value::Float(self as f64)
                }
            }
        )*
    };
}

float_conversions!(f32, f64);

/// Extracts argument `index` as type `A`.
///
/// # Errors
/// * `ArityMismatch` - fewer than `index + 1` arguments were supplied
/// * `TagMismatch` - the argument carries a different tag than `A` expects
pub fn arg<'v, A: FromValue<'v>>(args: &[Value<'v>], index: usize) -> Result<A, BindingError> {
    let value = *args.get(index).ok_or(BindingError::ArityMismatch {
        expected: index + 1,
        actual: args.len(),
    })?;

    A::from_value(value).ok_or(BindingError::TagMismatch {
        index,
        expected: A::TAG,
        actual: value.tag(),
    })
}

/// Wraps a native result for the VM.
#[inline]
pub fn ret<'v, R: IntoValue<'v>>(result: R) -> Value<'v> {
    result.into_value()
}
