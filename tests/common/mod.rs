//! Shared test infrastructure for script-peripherals integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use core::ffi::CStr;
use script_peripherals::colors::to_rgb888;
use script_peripherals::{
    Board, Button, InputPin, Level, Srgb, TextDisplay, TickDuration, TickInstant, TimeSource,
};

// ============================================================================
// Mock GPIO
// ============================================================================

/// Electrical state of a button line, shared between the test and its pin.
pub struct MockLine {
    level: Cell<Level>,
    reads: Cell<u32>,
    configured: Cell<bool>,
}

impl MockLine {
    /// A released pull-up button.
    pub fn new() -> Self {
        Self::at(Level::High)
    }

    pub fn at(level: Level) -> Self {
        Self {
            level: Cell::new(level),
            reads: Cell::new(0),
            configured: Cell::new(false),
        }
    }

    pub fn set(&self, level: Level) {
        self.level.set(level);
    }

    pub fn press(&self) {
        self.set(Level::Low);
    }

    pub fn release(&self) {
        self.set(Level::High);
    }

    pub fn reads(&self) -> u32 {
        self.reads.get()
    }

    pub fn is_configured(&self) -> bool {
        self.configured.get()
    }

    pub fn pin(&self) -> MockPin<'_> {
        MockPin { line: self }
    }
}

/// Input pin reading a [`MockLine`].
pub struct MockPin<'a> {
    line: &'a MockLine,
}

impl InputPin for MockPin<'_> {
    fn configure_pull_up(&mut self) {
        self.line.configured.set(true);
    }

    fn level(&mut self) -> Level {
        self.line.reads.set(self.line.reads.get() + 1);
        self.line.level.get()
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TickInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(millis: u32) -> Self {
        Self {
            current_time: Cell::new(TickInstant(millis)),
        }
    }

    /// Advance time by the given number of milliseconds, wrapping like a tick counter
    pub fn advance(&self, millis: u32) {
        let current = self.current_time.get();
        self.current_time.set(TickInstant(current.0.wrapping_add(millis)));
    }

    pub fn set_time(&self, millis: u32) {
        self.current_time.set(TickInstant(millis));
    }
}

impl TimeSource<TickInstant> for MockTimeSource {
    fn now(&self) -> TickInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Display
// ============================================================================

/// Mock display that records everything drawn on it
pub struct MockDisplay {
    text: heapless::String<256>,
    fills: heapless::Vec<u32, 16>,
    clears: u32,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            text: heapless::String::new(),
            fills: heapless::Vec::new(),
            clears: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fill colors as packed 0xRRGGBB
    pub fn fills(&self) -> &[u32] {
        &self.fills
    }

    pub fn clears(&self) -> u32 {
        self.clears
    }
}

impl TextDisplay for MockDisplay {
    fn print(&mut self, text: &CStr) {
        let _ = self.text.push_str(text.to_str().unwrap());
    }

    fn println(&mut self, text: &CStr) {
        self.print(text);
        let _ = self.text.push('\n');
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.text.clear();
    }

    fn fill(&mut self, color: Srgb) {
        let _ = self.fills.push(to_rgb888(color));
    }
}

// ============================================================================
// Type aliases
// ============================================================================

pub type TestButton<'t, 'a> = Button<'t, TickInstant, MockPin<'a>, MockTimeSource>;

pub type TestBoard<'t, 'a> = Board<'t, TickInstant, MockPin<'a>, MockTimeSource, MockDisplay>;

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Debounce window used by default configs
pub const WINDOW: TickDuration = TickDuration(50);

/// Creates and initializes a button on `line`
pub fn ready_button<'t, 'a>(line: &'a MockLine, clock: &'t MockTimeSource) -> TestButton<'t, 'a> {
    let mut button = Button::new(line.pin(), clock);
    button.init();
    button
}
