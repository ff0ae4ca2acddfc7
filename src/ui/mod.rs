//! User interface tasks - keypad producer and menu consumer.
//!
//! ## Components
//!
//! - **Keypad**: four active-low keys, one debounce gate for all of them
//! - **Runner**: owns the menu and the LCD, drains [`EVENTS`] and
//!   synthesises a refresh tick whenever the channel stays quiet
//!
//! Both sides meet at a single bounded channel, so events are handled
//! one at a time and in arrival order.

pub mod keypad;
pub mod runner;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use flowmeter_ui::config::EVENT_QUEUE_DEPTH;
use flowmeter_ui::{DisplayEvent, Error, EventQueue};

/// The one ordered event channel.
pub static EVENTS: Channel<CriticalSectionRawMutex, DisplayEvent, EVENT_QUEUE_DEPTH> = Channel::new();

/// Menu-side handle on [`EVENTS`], for injected refreshes and purges.
pub struct ChannelQueue {
    channel: &'static Channel<CriticalSectionRawMutex, DisplayEvent, EVENT_QUEUE_DEPTH>,
}

impl ChannelQueue {
    pub fn new() -> Self {
        Self { channel: &EVENTS }
    }
}

impl EventQueue for ChannelQueue {
    fn post(&mut self, event: DisplayEvent) -> Result<(), Error> {
        self.channel.try_send(event).map_err(|_| Error::ChannelFull)
    }

    fn purge(&mut self) {
        while self.channel.try_receive().is_ok() {}
    }
}
