//! Button arbitration
//!
//! Two momentary buttons, one plunger. Arbitration is a pure function of
//! the two pressed states, re-evaluated every iteration with no memory:
//! simultaneous press is a conflict and resolves to `Stop`. There is no
//! software debounce - the pull-up wiring is expected to keep edges sane,
//! and rapid toggling simply produces rapid command changes.

use embolos_hal::gpio::InputPin;

use crate::pulse::Direction;

/// Motion intent derived from the current button state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionCommand {
    Withdraw,
    Dispense,
    Stop,
}

impl MotionCommand {
    /// The travel direction this command selects, if it moves at all
    pub fn direction(self) -> Option<Direction> {
        match self {
            MotionCommand::Withdraw => Some(Direction::Withdraw),
            MotionCommand::Dispense => Some(Direction::Dispense),
            MotionCommand::Stop => None,
        }
    }
}

/// Resolve two pressed states into a single motion command
pub fn arbitrate(withdraw_pressed: bool, dispense_pressed: bool) -> MotionCommand {
    match (withdraw_pressed, dispense_pressed) {
        (true, false) => MotionCommand::Withdraw,
        (false, true) => MotionCommand::Dispense,
        // Both or neither: stop
        _ => MotionCommand::Stop,
    }
}

/// Samples the two active-low buttons
#[derive(Debug)]
pub struct InputArbiter<W: InputPin, D: InputPin> {
    withdraw: W,
    dispense: D,
}

impl<W: InputPin, D: InputPin> InputArbiter<W, D> {
    pub fn new(withdraw: W, dispense: D) -> Self {
        Self { withdraw, dispense }
    }

    /// Read both buttons and arbitrate
    ///
    /// Buttons are wired active-low with internal pull-ups, so "pressed"
    /// is a low read.
    pub fn sample(&self) -> MotionCommand {
        arbitrate(self.withdraw.is_low(), self.dispense.is_low())
    }
}
