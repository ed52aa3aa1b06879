//! Integration tests for Button and its script bindings

mod common;
use common::*;

use script_peripherals::{
    BindingError, Button, CallPolicy, DebounceConfig, Level, TableError, TickDuration,
    TickInstant, TimeSource, Value,
};

#[test]
fn init_configures_pin_and_captures_level() {
    let line = MockLine::new();
    let clock = MockTimeSource::starting_at(1234);
    let button = ready_button(&line, &clock);

    assert!(line.is_configured());
    assert!(button.is_initialized());
    let channel = button.channel().unwrap();
    assert_eq!(channel.last_level(), Level::High);
    assert_eq!(channel.last_change(), TickInstant(1234));
    assert!(!channel.peek_pressed());
}

#[test]
fn update_before_init_is_a_noop() {
    let line = MockLine::new();
    let clock = MockTimeSource::new();
    let mut button: TestButton = Button::new(line.pin(), &clock);

    line.press();
    clock.advance(100);
    button.update();

    assert!(!line.is_configured());
    assert_eq!(line.reads(), 0);
    assert!(!button.was_pressed());
}

#[test]
fn press_and_release_cycle() {
    let line = MockLine::new();
    let clock = MockTimeSource::new();
    let mut button = ready_button(&line, &clock);

    clock.advance(100);
    line.press();
    button.update();
    assert!(button.is_pressed());
    assert!(button.was_pressed());
    assert!(!button.was_pressed());

    clock.advance(100);
    line.release();
    button.update();
    assert!(!button.is_pressed());
    assert!(!button.was_pressed());

    clock.advance(100);
    line.press();
    button.update();
    assert!(button.was_pressed());
}

#[test]
fn bounce_inside_window_is_suppressed() {
    let line = MockLine::new();
    let clock = MockTimeSource::new();
    let mut button = ready_button(&line, &clock);

    clock.advance(60);
    line.press();
    button.update();
    assert!(button.was_pressed());

    // Contact bounce: release and press again within 50 ms of the accepted edge
    for _ in 0..2 {
        clock.advance(10);
        line.release();
        button.update();
        clock.advance(10);
        line.press();
        button.update();
    }

    assert!(!button.was_pressed());
}

#[test]
fn fast_toggle_inside_window_is_invisible() {
    let line = MockLine::new();
    let clock = MockTimeSource::new();
    let mut button = ready_button(&line, &clock);

    clock.advance(60);
    line.press();
    button.update();
    assert!(button.was_pressed());

    // A full release/press cycle that ends before the window closes is never
    // recorded, so the line still looks held once the window has passed
    clock.advance(20);
    line.release();
    button.update();
    clock.advance(20);
    line.press();
    button.update();
    clock.advance(20);
    button.update();

    assert!(!button.was_pressed());
    assert_eq!(button.channel().unwrap().last_level(), Level::Low);
}

#[test]
fn is_pressed_reads_the_pin_and_leaves_the_latch() {
    let line = MockLine::new();
    let clock = MockTimeSource::new();
    let mut button = ready_button(&line, &clock);

    clock.advance(100);
    line.press();
    button.update();

    for _ in 0..5 {
        assert!(button.is_pressed());
    }
    assert!(button.channel().unwrap().peek_pressed());
    assert!(button.was_pressed());

    // Live read with no intervening update
    line.release();
    assert!(!button.is_pressed());
}

#[test]
fn wraparound_between_samples_uses_small_delta() {
    let line = MockLine::new();
    let clock = MockTimeSource::starting_at(u32::MAX - 5);
    let mut button = ready_button(&line, &clock);

    // 9 ms after init across the wrap: still inside the window
    clock.advance(9);
    assert_eq!(clock.now(), TickInstant(3));
    line.press();
    button.update();
    assert!(!button.was_pressed());

    // 60 ms after init: outside the window
    clock.advance(51);
    button.update();
    assert!(button.was_pressed());
}

#[test]
fn scenario_press_at_first_tick() {
    let line = MockLine::at(Level::High);
    let clock = MockTimeSource::new();
    let mut button = ready_button(&line, &clock);

    // Same tick as init: elapsed 0 is inside the window
    line.press();
    button.update();
    assert!(!button.was_pressed());
    assert!(button.is_pressed());

    clock.advance(51);
    button.update();
    assert!(button.was_pressed());
    assert!(!button.was_pressed());
    assert!(button.is_pressed());
}

#[test]
fn custom_window_and_active_high() {
    let line = MockLine::at(Level::Low);
    let clock = MockTimeSource::new();
    let config = DebounceConfig::new(TickDuration(5), Level::High);
    let mut button: TestButton = Button::with_config(line.pin(), &clock, config);
    button.init();

    clock.advance(6);
    line.set(Level::High);
    button.update();
    assert!(button.is_pressed());
    assert!(button.was_pressed());
}

#[test]
fn independent_buttons_do_not_share_state() {
    let line_a = MockLine::new();
    let line_b = MockLine::new();
    let clock = MockTimeSource::new();
    let mut a = ready_button(&line_a, &clock);
    let mut b = ready_button(&line_b, &clock);

    clock.advance(100);
    line_a.press();
    a.update();
    b.update();

    assert!(a.was_pressed());
    assert!(!b.was_pressed());
}

#[test]
fn reinit_keeps_pending_press() {
    let line = MockLine::new();
    let clock = MockTimeSource::new();
    let mut button = ready_button(&line, &clock);

    clock.advance(100);
    line.press();
    button.update();
    clock.advance(10);
    button.init();

    let channel = button.channel().unwrap();
    assert_eq!(channel.last_level(), Level::Low);
    assert_eq!(channel.last_change(), TickInstant(100));
    assert!(button.was_pressed());
    assert!(!button.was_pressed());
}

#[test]
fn latched_press_survives_later_updates() {
    let line = MockLine::new();
    let clock = MockTimeSource::new();
    let mut button = ready_button(&line, &clock);

    clock.advance(100);
    line.press();
    button.update();

    // Held well past the window, then released
    for _ in 0..3 {
        clock.advance(100);
        button.update();
    }
    clock.advance(100);
    line.release();
    button.update();
    clock.advance(100);
    button.update();

    assert!(button.was_pressed());
    assert!(!button.was_pressed());
}

#[test]
fn is_pressed_between_updates_keeps_the_latch() {
    let line = MockLine::new();
    let clock = MockTimeSource::new();
    let mut button = ready_button(&line, &clock);

    clock.advance(100);
    line.press();
    button.update();
    assert!(button.is_pressed());

    clock.advance(100);
    button.update();
    assert!(button.is_pressed());

    clock.advance(100);
    line.release();
    button.update();
    assert!(!button.is_pressed());

    assert!(button.was_pressed());
    assert!(!button.was_pressed());
}

// ============================================================================
// Script bindings
// ============================================================================

#[test]
fn script_methods_are_registered() {
    let methods = TestButton::methods().unwrap();
    assert_eq!(methods.len(), 4);
    for name in ["init", "update", "was_pressed?", "is_pressed?"] {
        let id = methods.lookup(name).unwrap();
        assert_eq!(methods.get(id).unwrap().signature.arity(), 0);
    }
}

#[test]
fn script_loop_reports_press_once() {
    let line = MockLine::new();
    let clock = MockTimeSource::new();
    let mut button: TestButton = Button::new(line.pin(), &clock);
    let methods = TestButton::methods().unwrap();

    assert_eq!(methods.call_by_name(&mut button, "init", &[]), Ok(Value::Nil));

    clock.advance(100);
    line.press();
    assert_eq!(methods.call_by_name(&mut button, "update", &[]), Ok(Value::Nil));

    assert_eq!(
        methods.call_by_name(&mut button, "was_pressed?", &[]),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        methods.call_by_name(&mut button, "was_pressed?", &[]),
        Ok(Value::Bool(false))
    );
    assert_eq!(
        methods.call_by_name(&mut button, "is_pressed?", &[]),
        Ok(Value::Bool(true))
    );
}

#[test]
fn script_reinit_keeps_pending_press() {
    let line = MockLine::new();
    let clock = MockTimeSource::new();
    let mut button: TestButton = Button::new(line.pin(), &clock);
    let methods = TestButton::methods().unwrap();

    methods.call_by_name(&mut button, "init", &[]).unwrap();
    clock.advance(100);
    line.press();
    methods.call_by_name(&mut button, "update", &[]).unwrap();
    methods.call_by_name(&mut button, "init", &[]).unwrap();

    assert_eq!(
        methods.call_by_name(&mut button, "was_pressed?", &[]),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        methods.call_by_name(&mut button, "was_pressed?", &[]),
        Ok(Value::Bool(false))
    );
}

#[test]
fn script_call_with_argument_is_neutralized() {
    let line = MockLine::new();
    let clock = MockTimeSource::new();
    let mut button = ready_button(&line, &clock);
    let methods = TestButton::methods().unwrap();

    clock.advance(100);
    line.press();
    button.update();
    let reads = line.reads();

    // Neither predicate touches the button when called with an argument
    assert_eq!(
        methods.call_by_name(&mut button, "was_pressed?", &[Value::Integer(1)]),
        Ok(Value::Nil)
    );
    assert_eq!(
        methods.call_by_name(&mut button, "is_pressed?", &[Value::Str(c"x")]),
        Ok(Value::Nil)
    );
    assert_eq!(line.reads(), reads);
    assert!(button.was_pressed());
}

#[test]
fn strict_table_surfaces_arity_error() {
    let line = MockLine::new();
    let clock = MockTimeSource::new();
    let mut button = ready_button(&line, &clock);
    let mut methods = TestButton::methods().unwrap();
    methods.set_policy(CallPolicy::Strict);

    assert_eq!(
        methods.call_by_name(&mut button, "update", &[Value::Nil]),
        Err(TableError::Binding(BindingError::ArityMismatch {
            expected: 0,
            actual: 1
        }))
    );
}

#[test]
fn window_constant_matches_default_config() {
    let config: DebounceConfig<TickDuration> = DebounceConfig::default();
    assert_eq!(config.window, WINDOW);
    assert_eq!(config.active_level, Level::Low);
}
