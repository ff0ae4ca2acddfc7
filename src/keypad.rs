//! Key classification and the debounce gate.
//!
//! The keypad has four lines. A transition on any of them closes the
//! gate until the debounce companion re-arms it, so contact bounce can
//! never produce a second event for the same press.

use crate::event::DisplayEvent;

/// Event produced by each key line, indexed by line number.
pub const KEY_LINES: [DisplayEvent; 4] = [
    DisplayEvent::KeyUp,
    DisplayEvent::KeyDown,
    DisplayEvent::KeyEnter,
    DisplayEvent::KeyEsc,
];

/// Map a line number to its event. Unknown lines yield nothing.
pub fn classify(line: usize) -> Option<DisplayEvent> {
    KEY_LINES.get(line).copied()
}

/// Open/closed state of the raw-input notifications.
#[derive(Debug)]
pub struct DebounceGate {
    armed: bool,
}

impl DebounceGate {
    pub const fn new() -> Self {
        Self { armed: true }
    }

    /// Handle a raw transition. Any transition while armed closes the
    /// gate, even one that maps to no key.
    pub fn on_transition(&mut self, line: usize) -> Option<DisplayEvent> {
        if !self.armed {
            return None;
        }
        self.armed = false;
        classify(line)
    }

    /// Called once the quiescence interval has elapsed.
    pub fn rearm(&mut self) {
        self.armed = true;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_map_in_order() {
        assert_eq!(classify(0), Some(DisplayEvent::KeyUp));
        assert_eq!(classify(3), Some(DisplayEvent::KeyEsc));
        assert_eq!(classify(4), None);
    }

    #[test]
    fn bounce_yields_single_event() {
        let mut gate = DebounceGate::new();
        assert_eq!(gate.on_transition(2), Some(DisplayEvent::KeyEnter));
        assert_eq!(gate.on_transition(2), None);
        assert_eq!(gate.on_transition(2), None);
        gate.rearm();
        assert_eq!(gate.on_transition(2), Some(DisplayEvent::KeyEnter));
    }

    #[test]
    fn unmatched_line_still_closes_gate() {
        let mut gate = DebounceGate::new();
        assert_eq!(gate.on_transition(9), None);
        assert!(!gate.is_armed());
        assert_eq!(gate.on_transition(0), None);
    }
}
