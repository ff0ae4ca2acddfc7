//! GPIO keypad with a shared debounce gate.
//!
//! Four keys (active-low with internal pull-up):
//!   - UP / DOWN - navigate screens, change the selected digit or unit
//!   - ENTER     - move the edit cursor, skip the splash screen
//!   - ESC       - enter the password prompt, advance through settings
//!
//! The first falling edge on any line posts its event and closes the
//! gate. [`debounce_task`] re-opens it once the lines have been quiet for
//! `KEY_DEBOUNCE_MS`; edges seen in between are swallowed.

use super::EVENTS;
use defmt::{info, warn};
use embassy_futures::select::{select, select4, Either, Either4};
use embassy_nrf::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use flowmeter_ui::config::KEY_DEBOUNCE_MS;
use flowmeter_ui::keypad::DebounceGate;

/// Raised by the keypad when it closes the gate.
static QUIESCE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Raised by the debounce companion when the gate may open again.
static REARM: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Lines in [`flowmeter_ui::keypad::KEY_LINES`] order: Up, Down, Enter, Esc.
pub type KeyLines = [Input<'static>; 4];

/// Wait for a press on any line and return its index.
async fn any_press(lines: &mut KeyLines) -> usize {
    let [up, down, enter, esc] = lines;
    match select4(
        up.wait_for_falling_edge(),
        down.wait_for_falling_edge(),
        enter.wait_for_falling_edge(),
        esc.wait_for_falling_edge(),
    )
    .await
    {
        Either4::First(()) => 0,
        Either4::Second(()) => 1,
        Either4::Third(()) => 2,
        Either4::Fourth(()) => 3,
    }
}

#[embassy_executor::task]
pub async fn keypad_task(mut lines: KeyLines) -> ! {
    let mut gate = DebounceGate::new();

    loop {
        match select(any_press(&mut lines), REARM.wait()).await {
            Either::First(line) => {
                let was_armed = gate.is_armed();
                if let Some(event) = gate.on_transition(line) {
                    info!("Keypad: {}", event);
                    // try_send never blocks the keypad; a full channel loses the key.
                    if EVENTS.try_send(event).is_err() {
                        warn!("Keypad: event channel full - dropping {}", event);
                    }
                }
                if was_armed {
                    QUIESCE.signal(());
                }
            }
            Either::Second(()) => gate.rearm(),
        }
    }
}

/// Debounce companion: one quiescence interval per closed gate.
#[embassy_executor::task]
pub async fn debounce_task() -> ! {
    loop {
        QUIESCE.wait().await;
        Timer::after(Duration::from_millis(KEY_DEBOUNCE_MS)).await;
        REARM.signal(());
    }
}
