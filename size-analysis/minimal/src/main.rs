#![no_std]
#![no_main]

use core::ffi::CStr;
use cortex_m_rt::entry;
use panic_halt as _;
use script_peripherals::{
    Board, Button, InputPin, Level, Srgb, TextDisplay, TickInstant, TimeSource, Value,
};

// ============================================================================
// Minimal Hardware
// ============================================================================

/// Zero-size pin that always reads released
pub struct MinimalPin;

impl InputPin for MinimalPin {
    fn configure_pull_up(&mut self) {
        core::hint::black_box(());
    }

    fn level(&mut self) -> Level {
        core::hint::black_box(Level::High)
    }
}

/// Zero-size display that discards everything
pub struct MinimalDisplay;

impl TextDisplay for MinimalDisplay {
    fn print(&mut self, text: &CStr) {
        core::hint::black_box(text);
    }

    fn println(&mut self, text: &CStr) {
        core::hint::black_box(text);
    }

    fn fill(&mut self, color: Srgb) {
        core::hint::black_box(color);
    }
}

pub struct MinimalTimeSource;

impl TimeSource<TickInstant> for MinimalTimeSource {
    fn now(&self) -> TickInstant {
        core::hint::black_box(TickInstant(0))
    }
}

type MinimalButton<'t> = Button<'t, TickInstant, MinimalPin, MinimalTimeSource>;
type MinimalBoard<'t> = Board<'t, TickInstant, MinimalPin, MinimalTimeSource, MinimalDisplay>;

// This function uses the library to prevent optimizer from removing code
#[inline(never)]
fn exercise_bindings() {
    let time_source = MinimalTimeSource;

    // Single button through its script table
    let mut button: MinimalButton = Button::new(MinimalPin, &time_source);
    if let Ok(methods) = MinimalButton::methods() {
        for name in ["init", "update", "was_pressed?", "is_pressed?"] {
            let _ = core::hint::black_box(methods.call_by_name(&mut button, name, &[]));
        }
        core::hint::black_box(methods);
    }
    core::hint::black_box(button);

    // Full board, including a string argument
    let mut board: MinimalBoard = Board::new(
        Button::new(MinimalPin, &time_source),
        Button::new(MinimalPin, &time_source),
        Button::new(MinimalPin, &time_source),
        MinimalDisplay,
    );
    if let Ok(methods) = MinimalBoard::methods() {
        let _ = methods.call_by_name(&mut board, "begin", &[]);
        let _ = methods.call_by_name(&mut board, "update", &[]);
        let _ = methods.call_by_name(&mut board, "BtnB.wasPressed?", &[]);
        let _ = methods.call_by_name(&mut board, "Display.println", &[Value::Str(c"ok")]);
        let _ = methods.call_by_name(&mut board, "Display.fillScreen", &[Value::Integer(0xFF)]);
        core::hint::black_box(methods);
    }
    core::hint::black_box(board);
}

#[entry]
fn main() -> ! {
    // Call test function to ensure all code is included
    exercise_bindings();

    // Halt - this is a size analysis binary, not meant to run
    loop {
        cortex_m::asm::nop();
    }
}
