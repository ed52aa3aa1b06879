//! Tagged values as seen by the scripting VM.

use core::ffi::CStr;

/// Type discriminator of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tag {
    /// No value.
    Nil,
    /// `true` or `false`.
    Bool,
    /// Signed integer.
    Integer,
    /// Floating point number.
    Float,
    /// Null-terminated string owned by the VM.
    Str,
}

impl core::fmt::Display for Tag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Tag::Nil => "Nil",
            Tag::Bool => "Boolean",
            Tag::Integer => "Integer",
            Tag::Float => "Float",
            Tag::Str => "String",
        };
        f.write_str(name)
    }
}

/// A VM value crossing the native boundary.
///
/// The `'v` lifetime ties borrowed payloads to the call that supplied them.
/// String buffers stay owned by the VM and cannot outlive the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Value<'v> {
    /// No value.
    #[default]
    Nil,

    /// Boolean value.
    Bool(bool),

    /// Integer value.
    Integer(i64),

    /// Floating point value.
    Float(f64),

    /// Borrowed string buffer.
    Str(&'v CStr),
}

impl<'v> Value<'v> {
    /// Returns the discriminator for this value.
    #[inline]
    pub fn tag(&self) -> Tag {
        match self {
            Value::Nil => Tag::Nil,
            Value::Bool(_) => Tag::Bool,
            Value::Integer(_) => Tag::Integer,
            Value::Float(_) => Tag::Float,
            Value::Str(_) => Tag::Str,
        }
    }

    /// Returns `true` for [`Value::Nil`].
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value<'_> {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl<'v> From<&'v CStr> for Value<'v> {
    fn from(value: &'v CStr) -> Self {
        Value::Str(value)
    }
}
