//! Events consumed by the menu and the queue they travel through.

use crate::error::Error;
use heapless::Deque;

/// Everything the menu reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayEvent {
    KeyUp,
    KeyDown,
    KeyEnter,
    KeyEsc,
    /// Periodic or self-injected request to redraw the current screen.
    RefreshTick,
}

impl DisplayEvent {
    pub const fn is_key(self) -> bool {
        !matches!(self, DisplayEvent::RefreshTick)
    }

    /// Small integer identifying a key in a password sequence.
    pub const fn key_code(self) -> Option<u8> {
        match self {
            DisplayEvent::KeyUp => Some(1),
            DisplayEvent::KeyDown => Some(2),
            DisplayEvent::KeyEnter => Some(3),
            DisplayEvent::KeyEsc => Some(4),
            DisplayEvent::RefreshTick => None,
        }
    }
}

/// Producer side of the single ordered event channel, as seen by the
/// menu when it needs to inject or discard events.
pub trait EventQueue {
    /// Enqueue without blocking. A full queue drops the event.
    fn post(&mut self, event: DisplayEvent) -> Result<(), Error>;

    /// Discard everything still waiting.
    fn purge(&mut self);
}

impl<const N: usize> EventQueue for Deque<DisplayEvent, N> {
    fn post(&mut self, event: DisplayEvent) -> Result<(), Error> {
        self.push_back(event).map_err(|_| Error::ChannelFull)
    }

    fn purge(&mut self) {
        self.clear();
    }
}
