//! Display and menu core of a battery flow meter.
//!
//! Everything here is hardware-independent and builds for the host, so
//! `cargo test` exercises the full menu against a mock display bus.
//!
//! ## Layers
//!
//! - [`lcd`]: PCF8553 segment engine (characters, points, icons, flush)
//! - [`menu`]: screen state machine driven by [`event::DisplayEvent`]s
//! - [`keypad`]: key-line classification and the debounce gate
//! - [`params`], [`calendar`]: collaborators the menu reads and edits
//!
//! The embedded binary (`src/main.rs`, feature `embedded`) wires these to
//! nRF52840 GPIO, SPIM and Embassy tasks.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod calendar;
pub mod config;
pub mod error;
pub mod event;
pub mod fixed_point;
pub mod keypad;
pub mod lcd;
pub mod menu;
pub mod params;
pub mod units;

pub use error::Error;
pub use event::{DisplayEvent, EventQueue};
pub use lcd::{Lcd, Transport};
pub use menu::{Env, Menu, Screen};
