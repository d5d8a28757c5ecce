//! GPIO pin abstractions
//!
//! Digital input and output pins as the dispenser uses them: a step and a
//! direction output for the plunger driver, two active-low button inputs.

/// Digital output pin
///
/// Implementations handle the actual register (or simulated state)
/// manipulation for their platform.
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check the last level the pin was driven to
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
///
/// Button inputs are wired active-low with pull-ups; callers that care
/// about "pressed" rather than "level" invert at the sampling site.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
