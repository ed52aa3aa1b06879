//! Time abstraction traits for platform-agnostic timing.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Counters that overflow must wrap here, so that an instant taken just
    /// after the wrap still yields a small delta from one taken just before it.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Millisecond duration matching [`TickInstant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickDuration(pub u32);

impl TimeDuration for TickDuration {
    #[inline]
    fn as_millis(&self) -> u64 {
        self.0 as u64
    }

    #[inline]
    fn from_millis(millis: u64) -> Self {
        TickDuration(millis as u32)
    }
}

/// A 32-bit millisecond tick count, as produced by an RTOS tick counter
/// multiplied by its tick period.
///
/// Wraps after roughly 49.7 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInstant(pub u32);

impl TimeInstant for TickInstant {
    type Duration = TickDuration;

    #[inline]
    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TickDuration(self.0.wrapping_sub(earlier.0))
    }
}
