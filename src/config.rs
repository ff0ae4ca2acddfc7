//! Application-wide constants and compile-time configuration.
//!
//! Timing parameters, keypad and display wiring, and menu constants
//! live here so they can be tuned in one place.

// Timing

/// Quiescence interval after a key transition before the keypad is
/// re-armed (ms).
pub const KEY_DEBOUNCE_MS: u64 = 200;

/// The consumer synthesises a `RefreshTick` when no event arrives within
/// this period (ms). Also sets the blink rate of edited fields.
pub const REFRESH_PERIOD_MS: u64 = 500;

/// Spacing between the timed refreshes of the splash and version
/// screens (ms).
pub const SPLASH_STEP_MS: u32 = 100;

/// Number of timed refreshes before the splash/version screens advance
/// on their own. 30 x 100 ms = 3 s.
pub const SPLASH_STEPS: u8 = 30;

// Event channel

/// Capacity of the event channel between keypad and menu.
pub const EVENT_QUEUE_DEPTH: usize = 8;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the concrete `embassy_nrf::peripherals::*`
// pins are picked in `main.rs`.  Adjust for your custom PCB.
//
//   Key UP         → P0.11
//   Key DOWN       → P0.12
//   Key ENTER      → P0.24
//   Key ESC        → P0.25
//   LCD SCK        → P0.19
//   LCD MOSI       → P0.20
//   LCD CE (CS)    → P0.21
//   LCD RST        → P0.22

// Display controller (PCF8553)

/// SPI clock for the PCF8553. The part tolerates up to 5 MHz.
pub const LCD_SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// How long RST is held low during a controller reset (ms).
pub const LCD_RESET_PULSE_MS: u32 = 20;

// Menu

/// Reference password: DOWN, UP, UP, ENTER encoded as key codes.
pub const PASSWORD: [u8; 4] = [2, 1, 1, 3];

/// Firmware version shown on the version screen (major, minor, patch).
pub const FIRMWARE_VERSION: (u8, u8, u8) = (1, 1, 2);
