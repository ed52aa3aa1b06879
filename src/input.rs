//! Debounced digital input.
//!
//! [`InputChannel`] turns a polled, noisy pin level into press events. It is
//! driven by [`InputChannel::tick`] once per polling cycle and read through a
//! consuming query ([`InputChannel::take_pressed`]). The non-consuming
//! "is pressed" query re-reads the pin and lives on [`crate::Button`].

use crate::time::{TimeDuration, TimeInstant};

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Logic level of a digital input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Pin reads 0.
    Low,
    /// Pin reads 1.
    High,
}

impl Level {
    /// The other level.
    #[inline]
    pub fn inverted(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// Trait for abstracting a GPIO input pin.
///
/// Implement this for your hardware. Reads are expected to succeed; handle
/// any driver errors internally.
pub trait InputPin {
    /// Configures the pin as an input with the internal pull-up enabled.
    fn configure_pull_up(&mut self);

    /// Reads the current level.
    fn level(&mut self) -> Level;
}

/// Debounce parameters for one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceConfig<D: TimeDuration> {
    /// Minimum time after an accepted press before another edge is considered.
    pub window: D,

    /// Level that means "pressed". `Low` for a pull-up button wired to ground.
    pub active_level: Level,
}

impl<D: TimeDuration> DebounceConfig<D> {
    /// Creates a config.
    #[inline]
    pub fn new(window: D, active_level: Level) -> Self {
        Self {
            window,
            active_level,
        }
    }
}

impl<D: TimeDuration> Default for DebounceConfig<D> {
    fn default() -> Self {
        Self {
            window: D::from_millis(DEFAULT_DEBOUNCE_MS),
            active_level: Level::Low,
        }
    }
}

/// Press-detection state for one input pin.
///
/// The pending latch is set only by [`tick`](Self::tick) and cleared only by
/// [`take_pressed`](Self::take_pressed).
#[derive(Debug, Clone, Copy)]
pub struct InputChannel<I: TimeInstant> {
    config: DebounceConfig<I::Duration>,
    last_level: Level,
    last_change: I,
    pending: bool,
}

impl<I: TimeInstant> InputChannel<I> {
    /// Creates a channel from the level sampled at initialization.
    pub fn new(level: Level, now: I, config: DebounceConfig<I::Duration>) -> Self {
        Self {
            config,
            last_level: level,
            last_change: now,
            pending: false,
        }
    }

    /// Feeds one polled sample.
    ///
    /// Within the debounce window the sample is ignored entirely, including
    /// for `last_level`. After it, a transition into the active level latches
    /// a press and restarts the window; every sample is then recorded as the
    /// last observed level.
    ///
    /// # Returns
    /// `true` if this sample latched a press.
    pub fn tick(&mut self, level: Level, now: I) -> bool {
        let elapsed = now.duration_since(self.last_change);
        if elapsed.as_millis() <= self.config.window.as_millis() {
            return false;
        }

        let active = self.config.active_level;
        let pressed = self.last_level != active && level == active;
        if pressed {
            self.pending = true;
            self.last_change = now;
            #[cfg(feature = "defmt")]
            defmt::debug!("press latched after {=u64} ms", elapsed.as_millis());
        }
        self.last_level = level;
        pressed
    }

    /// Replaces the last observed level after the pin is re-initialized.
    ///
    /// The latch and the window start are left untouched.
    #[inline]
    pub fn recapture(&mut self, level: Level) {
        self.last_level = level;
    }

    /// Returns whether a press was latched since the last call, and clears it.
    #[inline]
    pub fn take_pressed(&mut self) -> bool {
        core::mem::replace(&mut self.pending, false)
    }

    /// Returns the latch without clearing it.
    #[inline]
    pub fn peek_pressed(&self) -> bool {
        self.pending
    }

    /// Whether `level` is the pressed level for this channel.
    #[inline]
    pub fn is_active(&self, level: Level) -> bool {
        level == self.config.active_level
    }

    /// Last level accepted by [`tick`](Self::tick).
    #[inline]
    pub fn last_level(&self) -> Level {
        self.last_level
    }

    /// Instant of the last accepted press, or of initialization.
    #[inline]
    pub fn last_change(&self) -> I {
        self.last_change
    }

    /// Debounce configuration.
    #[inline]
    pub fn config(&self) -> &DebounceConfig<I::Duration> {
        &self.config
    }
}
