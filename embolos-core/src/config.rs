//! Timing and capacity configuration
//!
//! The dispenser has a handful of load-bearing constants; they live here so
//! the scheduler, actuator and router agree on them.

/// How often the scheduler polls the RFID reader (ms)
pub const RFID_POLL_INTERVAL_MS: u32 = 200;

/// Upper bound on keys returned by a base-list enumeration
pub const MAX_BASE_LIST: usize = 64;

/// HTTP requests serviced per loop iteration
///
/// Keeps a chatty client from starving pulse timing.
pub const HTTP_BATCH_PER_ITERATION: usize = 4;

/// Step pulse generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseConfig {
    /// Minimum interval between step pulses (us)
    pub step_interval_us: u32,
    /// Time the step line is held high per pulse (us)
    pub pulse_width_us: u32,
    /// Level of the direction pin that selects Withdraw
    pub withdraw_dir_high: bool,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            step_interval_us: 800, // ~1250 steps/sec
            pulse_width_us: 3,
            withdraw_dir_high: true,
        }
    }
}
