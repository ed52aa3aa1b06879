//! Three-button board with a text display.
//!
//! Groups buttons A, B and C with a [`TextDisplay`] and exposes them to
//! scripts as `begin`, `update`, `BtnA.wasPressed?`, `Display.print` and so
//! on. Buttons are serviced together by [`Board::update`].

use crate::boundary::{BindingError, Signature};
use crate::button::Button;
use crate::colors::{BLACK, rgb888};
use crate::input::InputPin;
use crate::marshal::{arg, ret};
use crate::table::{MethodTable, TableError};
use crate::time::{TimeInstant, TimeSource};
use crate::value::{Tag, Value};
use core::ffi::CStr;
use palette::Srgb;

/// Number of script methods a [`Board`] registers.
pub const BOARD_METHODS: usize = 12;

/// Trait for abstracting a text display.
///
/// Rendering is up to the implementation. Text is borrowed for the duration
/// of the call only.
pub trait TextDisplay {
    /// Appends text at the cursor without a line break.
    fn print(&mut self, text: &CStr);

    /// Appends text followed by a line break.
    fn println(&mut self, text: &CStr);

    /// Clears the screen to black.
    ///
    /// Implementations that track a cursor should also home it.
    fn clear(&mut self) {
        self.fill(BLACK);
    }

    /// Fills the whole screen with a color.
    fn fill(&mut self, color: Srgb);
}

/// Identifies one of the board's buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Button A.
    A,
    /// Button B.
    B,
    /// Button C.
    C,
}

/// A board with three debounced buttons and a display.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `P` - Input pin implementation type (same for all buttons)
/// * `T` - Time source implementation type
/// * `D` - Display implementation type
pub struct Board<'t, I: TimeInstant, P: InputPin, T: TimeSource<I>, D: TextDisplay> {
    btn_a: Button<'t, I, P, T>,
    btn_b: Button<'t, I, P, T>,
    btn_c: Button<'t, I, P, T>,
    display: D,
}

impl<'t, I, P, T, D> Board<'t, I, P, T, D>
where
    I: TimeInstant,
    P: InputPin,
    T: TimeSource<I>,
    D: TextDisplay,
{
    /// Creates a board from its buttons and display.
    pub fn new(
        btn_a: Button<'t, I, P, T>,
        btn_b: Button<'t, I, P, T>,
        btn_c: Button<'t, I, P, T>,
        display: D,
    ) -> Self {
        Self {
            btn_a,
            btn_b,
            btn_c,
            display,
        }
    }

    /// Initializes all buttons and clears the display.
    pub fn begin(&mut self) {
        self.btn_a.init();
        self.btn_b.init();
        self.btn_c.init();
        self.display.clear();
    }

    /// Services all buttons.
    pub fn update(&mut self) {
        self.btn_a.update();
        self.btn_b.update();
        self.btn_c.update();
    }

    /// Returns a button by ID.
    pub fn button(&self, id: ButtonId) -> &Button<'t, I, P, T> {
        match id {
            ButtonId::A => &self.btn_a,
            ButtonId::B => &self.btn_b,
            ButtonId::C => &self.btn_c,
        }
    }

    /// Returns a mutable button by ID.
    pub fn button_mut(&mut self, id: ButtonId) -> &mut Button<'t, I, P, T> {
        match id {
            ButtonId::A => &mut self.btn_a,
            ButtonId::B => &mut self.btn_b,
            ButtonId::C => &mut self.btn_c,
        }
    }

    /// Returns the display.
    #[inline]
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Returns the display mutably.
    #[inline]
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Builds the script method table for the board.
    ///
    /// # Errors
    /// Never fails for the built-in method set; the `Result` comes from
    /// [`MethodTable::define`].
    pub fn methods() -> Result<MethodTable<Self, BOARD_METHODS>, TableError> {
        const PREDICATE: Signature = Signature::nullary(Tag::Bool);
        const TEXT: Signature = Signature::new(&[Tag::Str], Tag::Nil);

        let mut table = MethodTable::new();
        table.define("begin", Signature::nullary(Tag::Nil), Self::script_begin)?;
        table.define("update", Signature::nullary(Tag::Nil), Self::script_update)?;
        table.define("BtnA.wasPressed?", PREDICATE, Self::script_a_was_pressed)?;
        table.define("BtnA.isPressed?", PREDICATE, Self::script_a_is_pressed)?;
        table.define("BtnB.wasPressed?", PREDICATE, Self::script_b_was_pressed)?;
        table.define("BtnB.isPressed?", PREDICATE, Self::script_b_is_pressed)?;
        table.define("BtnC.wasPressed?", PREDICATE, Self::script_c_was_pressed)?;
        table.define("BtnC.isPressed?", PREDICATE, Self::script_c_is_pressed)?;
        table.define("Display.print", TEXT, Self::script_print)?;
        table.define("Display.println", TEXT, Self::script_println)?;
        table.define("Display.clear", Signature::nullary(Tag::Nil), Self::script_clear)?;
        table.define(
            "Display.fillScreen",
            Signature::new(&[Tag::Integer], Tag::Nil),
            Self::script_fill_screen,
        )?;
        Ok(table)
    }

    fn script_begin<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        self.begin();
        Ok(ret(()))
    }

    fn script_update<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        self.update();
        Ok(ret(()))
    }

    fn was_pressed<'v>(&mut self, id: ButtonId) -> Result<Value<'v>, BindingError> {
        Ok(ret(self.button_mut(id).was_pressed()))
    }

    fn is_pressed<'v>(&mut self, id: ButtonId) -> Result<Value<'v>, BindingError> {
        Ok(ret(self.button_mut(id).is_pressed()))
    }

    fn script_a_was_pressed<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        self.was_pressed(ButtonId::A)
    }

    fn script_a_is_pressed<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        self.is_pressed(ButtonId::A)
    }

    fn script_b_was_pressed<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        self.was_pressed(ButtonId::B)
    }

    fn script_b_is_pressed<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        self.is_pressed(ButtonId::B)
    }

    fn script_c_was_pressed<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        self.was_pressed(ButtonId::C)
    }

    fn script_c_is_pressed<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        self.is_pressed(ButtonId::C)
    }

    fn script_print<'v>(&mut self, args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        let text: &CStr = arg(args, 0)?;
        self.display.print(text);
        Ok(ret(()))
    }

    fn script_println<'v>(&mut self, args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        let text: &CStr = arg(args, 0)?;
        self.display.println(text);
        Ok(ret(()))
    }

    fn script_clear<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        self.display.clear();
        Ok(ret(()))
    }

    fn script_fill_screen<'v>(&mut self, args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        let packed: u32 = arg(args, 0)?;
        self.display.fill(rgb888(packed));
        Ok(ret(()))
    }
}
