//! Debounced push button exposed to scripts.
//!
//! Provides [`Button`], which owns an input pin and drives an
//! [`InputChannel`] from a time source, and its script binding table
//! (`init`, `update`, `was_pressed?`, `is_pressed?`).

use crate::boundary::{BindingError, Signature};
use crate::input::{DebounceConfig, InputChannel, InputPin};
use crate::marshal::ret;
use crate::table::{MethodTable, TableError};
use crate::time::{TimeInstant, TimeSource};
use crate::value::{Tag, Value};

/// Number of script methods a [`Button`] registers.
pub const BUTTON_METHODS: usize = 4;

/// A debounced button on one input pin.
///
/// The host calls [`update`](Self::update) once per polling cycle. Between
/// updates, [`was_pressed`](Self::was_pressed) reports each press exactly once
/// and [`is_pressed`](Self::is_pressed) reports the live pin state.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `P` - Input pin implementation type
/// * `T` - Time source implementation type
pub struct Button<'t, I: TimeInstant, P: InputPin, T: TimeSource<I>> {
    pin: P,
    time_source: &'t T,
    config: DebounceConfig<I::Duration>,
    channel: Option<InputChannel<I>>,
}

impl<'t, I: TimeInstant, P: InputPin, T: TimeSource<I>> Button<'t, I, P, T> {
    /// Creates an uninitialized button with the default debounce config.
    ///
    /// The pin is not touched until [`init`](Self::init).
    pub fn new(pin: P, time_source: &'t T) -> Self {
        Self::with_config(pin, time_source, DebounceConfig::default())
    }

    /// Creates an uninitialized button with a custom debounce config.
    pub fn with_config(pin: P, time_source: &'t T, config: DebounceConfig<I::Duration>) -> Self {
        Self {
            pin,
            time_source,
            config,
            channel: None,
        }
    }

    /// Configures the pin and captures its initial level.
    ///
    /// Calling it again reconfigures the pin and re-reads its level only. A
    /// pending press and the debounce window start survive.
    pub fn init(&mut self) {
        self.pin.configure_pull_up();
        let level = self.pin.level();
        match self.channel.as_mut() {
            Some(channel) => channel.recapture(level),
            None => {
                let now = self.time_source.now();
                self.channel = Some(InputChannel::new(level, now, self.config));
            }
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("button init, level {}", level);
    }

    /// Samples the pin and advances the debounce state machine.
    ///
    /// No-op before [`init`](Self::init).
    pub fn update(&mut self) {
        if let Some(channel) = self.channel.as_mut() {
            let now = self.time_source.now();
            let level = self.pin.level();
            channel.tick(level, now);
        }
    }

    /// Returns `true` once per press latched by [`update`](Self::update).
    pub fn was_pressed(&mut self) -> bool {
        self.channel
            .as_mut()
            .is_some_and(|channel| channel.take_pressed())
    }

    /// Returns `true` while the pin reads the active level.
    ///
    /// Reads the pin directly and leaves the press latch alone.
    pub fn is_pressed(&mut self) -> bool {
        let level = self.pin.level();
        level == self.config.active_level
    }

    /// Returns `true` once [`init`](Self::init) has run.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.channel.is_some()
    }

    /// Debounce state, if initialized.
    #[inline]
    pub fn channel(&self) -> Option<&InputChannel<I>> {
        self.channel.as_ref()
    }

    /// Debounce configuration.
    #[inline]
    pub fn config(&self) -> &DebounceConfig<I::Duration> {
        &self.config
    }

    /// Returns a mutable reference to the pin.
    #[inline]
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Consumes the button and returns its pin.
    pub fn into_pin(self) -> P {
        self.pin
    }

    /// Builds the script method table for buttons.
    ///
    /// # Errors
    /// Never fails for the built-in method set; the `Result` comes from
    /// [`MethodTable::define`].
    pub fn methods() -> Result<MethodTable<Self, BUTTON_METHODS>, TableError> {
        let mut table = MethodTable::new();
        table.define("init", Signature::nullary(Tag::Nil), Self::script_init)?;
        table.define("update", Signature::nullary(Tag::Nil), Self::script_update)?;
        table.define(
            "was_pressed?",
            Signature::nullary(Tag::Bool),
            Self::script_was_pressed,
        )?;
        table.define(
            "is_pressed?",
            Signature::nullary(Tag::Bool),
            Self::script_is_pressed,
        )?;
        Ok(table)
    }

    fn script_init<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        self.init();
        Ok(ret(()))
    }

    fn script_update<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        self.update();
        Ok(ret(()))
    }

    fn script_was_pressed<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        Ok(ret(self.was_pressed()))
    }

    fn script_is_pressed<'v>(&mut self, _args: &[Value<'v>]) -> Result<Value<'v>, BindingError> {
        Ok(ret(self.is_pressed()))
    }
}
