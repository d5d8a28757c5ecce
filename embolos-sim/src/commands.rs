//! Console commands for driving the simulated hardware
//!
//! Typed on stdin as `cmd [args]`, answered with the structured JSON
//! envelope the core console emits. These stand in for physically
//! presenting a card or holding a button.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use embolos_core::console::{CommandHandler, Reply};

use crate::rfid::PresentedTag;

const HELP: &str = "tag.set <hex8|none> | btn.withdraw 0|1 | btn.dispense 0|1 | help";

pub struct SimCommands {
    presented: PresentedTag,
    withdraw: Arc<AtomicBool>,
    dispense: Arc<AtomicBool>,
}

impl SimCommands {
    pub fn new(presented: PresentedTag, withdraw: Arc<AtomicBool>, dispense: Arc<AtomicBool>) -> Self {
        Self {
            presented,
            withdraw,
            dispense,
        }
    }

    fn set_tag(&mut self, args: &str) -> Reply {
        let args = args.trim();
        let slot = if args.is_empty() || args.eq_ignore_ascii_case("none") || args == "0" {
            None
        } else {
            match u32::from_str_radix(args, 16) {
                Ok(tag) if tag != 0 => Some(tag),
                _ => return Reply::error("expected an 8-digit hex tag or 'none'"),
            }
        };
        let Ok(mut presented) = self.presented.lock() else {
            return Reply::error("tag state unavailable");
        };
        *presented = slot;
        match *presented {
            Some(_) => Reply::ok_with("tag presented"),
            None => Reply::ok_with("tag removed"),
        }
    }

    fn set_button(button: &AtomicBool, args: &str) -> Reply {
        match args.trim() {
            "1" => {
                button.store(true, Ordering::Relaxed);
                Reply::ok_with("pressed")
            }
            "0" => {
                button.store(false, Ordering::Relaxed);
                Reply::ok_with("released")
            }
            _ => Reply::error("expected 0 or 1"),
        }
    }
}

impl CommandHandler for SimCommands {
    fn handle(&mut self, cmd: &str, args: &str) -> Reply {
        match cmd {
            "tag.set" => self.set_tag(args),
            "btn.withdraw" => Self::set_button(&self.withdraw, args),
            "btn.dispense" => Self::set_button(&self.dispense, args),
            "help" => Reply::ok_with(HELP),
            _ => Reply::error("unknown command"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn commands() -> (SimCommands, PresentedTag, Arc<AtomicBool>) {
        let presented: PresentedTag = Arc::new(Mutex::new(None));
        let withdraw = Arc::new(AtomicBool::new(false));
        let dispense = Arc::new(AtomicBool::new(false));
        let handler = SimCommands::new(presented.clone(), withdraw.clone(), dispense);
        (handler, presented, withdraw)
    }

    #[test]
    fn test_tag_set_and_clear() {
        let (mut handler, presented, _) = commands();

        assert!(handler.handle("tag.set", "AB54").ok);
        assert_eq!(*presented.lock().unwrap(), Some(0xAB54));

        assert!(handler.handle("tag.set", "none").ok);
        assert_eq!(*presented.lock().unwrap(), None);

        assert!(!handler.handle("tag.set", "not-hex").ok);

        // Zero is the null tag value, treated as removal
        assert!(handler.handle("tag.set", "0").ok);
        assert_eq!(*presented.lock().unwrap(), None);
    }

    #[test]
    fn test_buttons_toggle_shared_state() {
        let (mut handler, _, withdraw) = commands();

        assert!(handler.handle("btn.withdraw", "1").ok);
        assert!(withdraw.load(Ordering::Relaxed));
        assert!(handler.handle("btn.withdraw", "0").ok);
        assert!(!withdraw.load(Ordering::Relaxed));
        assert!(!handler.handle("btn.withdraw", "2").ok);
    }

    #[test]
    fn test_unknown_command() {
        let (mut handler, _, _) = commands();
        let reply = handler.handle("frobnicate", "");
        assert!(!reply.ok);
    }
}
