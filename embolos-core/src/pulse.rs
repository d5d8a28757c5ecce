//! Step pulse actuator
//!
//! Two states, `Idle` and `Moving`. While moving, `update` emits at most
//! one pulse per call, gated on the minimum interval since the previous
//! pulse - so the step rate is constant for any caller frequency above
//! the interval, and a single call never blocks longer than the pulse
//! width. The interval check is an explicit elapsed-time comparison, not
//! a sleep; the loop keeps running between pulses.

use embolos_hal::gpio::OutputPin;
use embolos_hal::time::Clock;

use crate::config::PulseConfig;

/// Plunger travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Pull solution into the syringe
    Withdraw,
    /// Push solution out of the syringe
    Dispense,
}

/// Evenly spaced step pulse generator for the plunger stepper
#[derive(Debug)]
pub struct PulseActuator<S: OutputPin, D: OutputPin> {
    step_pin: S,
    dir_pin: D,
    config: PulseConfig,
    moving: bool,
    last_step_us: u64,
}

impl<S: OutputPin, D: OutputPin> PulseActuator<S, D> {
    /// Create an idle actuator with both outputs driven low
    pub fn new(mut step_pin: S, mut dir_pin: D, config: PulseConfig) -> Self {
        step_pin.set_low();
        dir_pin.set_low();
        Self {
            step_pin,
            dir_pin,
            config,
            moving: false,
            last_step_us: 0,
        }
    }

    /// Set the direction output level
    ///
    /// Safe to call while idle or moving; takes effect on the next pulse.
    pub fn set_direction(&mut self, direction: Direction) {
        let level = match direction {
            Direction::Withdraw => self.config.withdraw_dir_high,
            Direction::Dispense => !self.config.withdraw_dir_high,
        };
        self.dir_pin.set_state(level);
    }

    /// Start or stop pulse emission
    ///
    /// Stopping takes effect immediately; no completion of an interval is
    /// guaranteed (this is not a safety-rated machine).
    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Emit one pulse if moving and the minimum interval has elapsed
    ///
    /// Must be invoked at least once per scheduler iteration. Blocks only
    /// for the pulse width (microseconds) when a pulse fires.
    pub fn update<C: Clock>(&mut self, clock: &mut C) {
        if !self.moving {
            return;
        }
        let now = clock.now_us();
        if now.wrapping_sub(self.last_step_us) < u64::from(self.config.step_interval_us) {
            return;
        }
        self.last_step_us = now;
        self.step_pin.set_high();
        clock.delay_us(self.config.pulse_width_us);
        self.step_pin.set_low();
    }
}
