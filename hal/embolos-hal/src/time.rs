//! Monotonic time abstraction
//!
//! The pulse generator gates steps on elapsed microseconds and busy-waits
//! the (microsecond-scale) pulse width, so the time source is injected
//! rather than read from a platform global. Tests substitute a manually
//! advanced clock.

/// Monotonic clock with microsecond resolution
///
/// `now_us` must be monotonic and must not wrap within the lifetime of the
/// process (u64 microseconds is ~585k years).
pub trait Clock {
    /// Microseconds since an arbitrary epoch (typically boot)
    fn now_us(&self) -> u64;

    /// Milliseconds since the same epoch
    fn now_ms(&self) -> u32 {
        (self.now_us() / 1000) as u32
    }

    /// Block for the given number of microseconds
    ///
    /// Only ever called with single-digit values (the step pulse width);
    /// implementations may spin.
    fn delay_us(&mut self, us: u32);
}
