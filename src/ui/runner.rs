//! Menu consumer task.
//!
//! Receives one event at a time. When the channel stays empty for a
//! refresh period the task feeds the menu a `RefreshTick` instead, which
//! keeps live values current and drives the edit-cursor blink.

use super::EVENTS;
use crate::board::{Board, LcdBus};
use defmt::{debug, warn};
use embassy_time::{with_timeout, Duration, Timer};
use flowmeter_ui::config::REFRESH_PERIOD_MS;
use flowmeter_ui::{DisplayEvent, EventQueue, Menu};

#[embassy_executor::task]
pub async fn menu_task(mut menu: Menu<LcdBus>, mut board: Board) -> ! {
    let period = Duration::from_millis(REFRESH_PERIOD_MS);

    loop {
        let event = match with_timeout(period, EVENTS.receive()).await {
            Ok(event) => event,
            Err(_) => DisplayEvent::RefreshTick,
        };

        board.sample().await;
        let pause = menu.dispatch(event, &mut board.env());

        if let Some(pause) = pause {
            debug!("Menu: pause {} ms", pause.ms);
            Timer::after(Duration::from_millis(pause.ms as u64)).await;
            if board.env().queue.post(pause.then).is_err() {
                warn!("Menu: event channel full - dropping timed {}", pause.then);
            }
        }
    }
}
