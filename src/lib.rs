#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Value`**: A tagged VM value (`Nil`, `Bool`, `Integer`, `Float`, borrowed `Str`)
//! - **`Signature`**: Expected argument tags and return tag of a bound method
//! - **`NativeMethod`**: A named native function plus its signature
//! - **`MethodTable`**: Registration-time dispatch table for one native object type
//! - **`CallPolicy`**: Whether malformed calls return `Nil` (`Lenient`) or an error (`Strict`)
//! - **`InputChannel`**: Debounce state machine for one input pin
//! - **`Button`**: A pin, a time source and an `InputChannel`, with script bindings
//! - **`Board`**: Three buttons and a `TextDisplay`, with script bindings
//! - **`InputPin`**: Trait to implement for your GPIO input
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`TextDisplay`**: Trait to implement for your display
//!
//! Malformed calls never reach native code. Under the default lenient policy
//! scripts observe `Nil`; the underlying [`BindingError`] is still available
//! through [`try_invoke`] or a [`CallPolicy::Strict`] table.

// Re-export Srgb from palette for display implementations
pub use palette::Srgb;

pub mod time;
pub mod value;
pub mod marshal;
pub mod boundary;
pub mod table;
pub mod input;
pub mod button;
pub mod board;
pub mod colors;

pub use value::{Tag, Value};
pub use marshal::{FromValue, IntoValue, Truthy, arg, ret};
pub use boundary::{BindingError, NativeFn, NativeMethod, Signature, invoke, try_invoke};
pub use table::{CallPolicy, MethodId, MethodTable, Request, TableError};
pub use input::{DEFAULT_DEBOUNCE_MS, DebounceConfig, InputChannel, InputPin, Level};
pub use button::{BUTTON_METHODS, Button};
pub use board::{BOARD_METHODS, Board, ButtonId, TextDisplay};
pub use time::{TickDuration, TickInstant, TimeDuration, TimeInstant, TimeSource};
