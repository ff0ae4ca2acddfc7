//! Start-up screens and the read-only viewers.

use super::{screens, Env, Menu, Pause, Reaction, Screen};
use crate::config::{SPLASH_STEPS, SPLASH_STEP_MS};
use crate::event::DisplayEvent;
use crate::lcd::{Symbol, Transport};
use crate::params::Counter;

const STEP: Pause = Pause {
    ms: SPLASH_STEP_MS,
    then: DisplayEvent::RefreshTick,
};

impl<T: Transport> Menu<T> {
    pub(super) fn render_viewer(&mut self, screen: Screen, env: &mut Env<'_>) {
        let lcd = &mut self.lcd;
        match screen {
            Screen::Splash => screens::splash(lcd),
            Screen::Version => screens::version(lcd),
            Screen::AcmRate => {
                let volume = env.params.counter(Counter::Acm);
                let rate = env.params.counter(Counter::Rate);
                screens::volume_rate(lcd, Symbol::Acm, &volume, &rate);
            }
            Screen::TtlRate => {
                let volume = env.params.counter(Counter::Ttl);
                let rate = env.params.counter(Counter::Rate);
                screens::volume_rate(lcd, Symbol::Ttl, &volume, &rate);
            }
            Screen::AcmTemp => {
                let volume = env.params.counter(Counter::Acm);
                let celsius = env.temperature.read_celsius();
                screens::volume_temperature(lcd, &volume, celsius);
            }
            Screen::DateHour => {
                let now = env.calendar.read_now();
                screens::date_hour(lcd, &now, None);
            }
            Screen::Password => screens::password(lcd, self.locals.password.len()),
            _ => {}
        }
    }

    /// Lamp test. Ends after [`SPLASH_STEPS`] pauses, or at once on Enter.
    pub(super) fn react_splash(&mut self, event: DisplayEvent) -> Reaction {
        match event {
            DisplayEvent::KeyEnter => Reaction::Restart(Screen::Version),
            DisplayEvent::RefreshTick if self.locals.splash_steps < SPLASH_STEPS => {
                self.locals.splash_steps += 1;
                Reaction::Wait(STEP)
            }
            DisplayEvent::RefreshTick => Reaction::Restart(Screen::Version),
            _ => Reaction::Stay,
        }
    }

    pub(super) fn react_version(&mut self, event: DisplayEvent) -> Reaction {
        match event {
            DisplayEvent::KeyEnter => Reaction::Go(Screen::TtlRate),
            DisplayEvent::RefreshTick if self.locals.version_steps < SPLASH_STEPS => {
                self.locals.version_steps += 1;
                Reaction::Wait(STEP)
            }
            DisplayEvent::RefreshTick => Reaction::Go(Screen::TtlRate),
            _ => Reaction::Stay,
        }
    }
}

/// Viewer navigation. Esc from any viewer opens the password prompt.
pub(super) fn navigate(screen: Screen, event: DisplayEvent) -> Reaction {
    let to = match (screen, event) {
        (_, DisplayEvent::KeyEsc) => Screen::Password,
        (Screen::AcmRate, DisplayEvent::KeyUp) => Screen::TtlRate,
        (Screen::AcmRate, DisplayEvent::KeyDown) => Screen::AcmTemp,
        (Screen::TtlRate, DisplayEvent::KeyDown) => Screen::AcmRate,
        (Screen::AcmTemp, DisplayEvent::KeyUp) => Screen::AcmRate,
        (Screen::AcmTemp, DisplayEvent::KeyDown) => Screen::DateHour,
        (Screen::DateHour, DisplayEvent::KeyUp) => Screen::AcmTemp,
        _ => return Reaction::Stay,
    };
    Reaction::Go(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn esc_opens_password_from_every_viewer() {
        for s in [Screen::AcmRate, Screen::TtlRate, Screen::AcmTemp, Screen::DateHour] {
            assert_eq!(navigate(s, DisplayEvent::KeyEsc), Reaction::Go(Screen::Password));
        }
    }

    #[test]
    fn dead_ends_stay() {
        assert_eq!(navigate(Screen::TtlRate, DisplayEvent::KeyUp), Reaction::Stay);
        assert_eq!(navigate(Screen::DateHour, DisplayEvent::KeyDown), Reaction::Stay);
        assert_eq!(navigate(Screen::AcmRate, DisplayEvent::KeyEnter), Reaction::Stay);
        assert_eq!(navigate(Screen::AcmTemp, DisplayEvent::RefreshTick), Reaction::Stay);
    }
}
