//! Password-gated configuration chain.
//!
//! Password → K factor → linearisation B1..B5 → volume units → time units
//! → calendar → splash. Any four keys leave the password prompt; only the
//! right four let the editors change anything. Esc always moves on.

use super::{screens, Env, Menu, Reaction, Screen};
use crate::config::PASSWORD;
use crate::event::DisplayEvent;
use crate::lcd::Transport;
use crate::params::Breakpoint;

/// Cursor positions on a linearisation screen: eight factor digits, then
/// four frequency digits.
const LIN_CURSORS: u8 = 12;
const FACTOR_DIGITS: u8 = 8;

/// Up for increment, Down for decrement, anything else is not an edit.
fn direction(event: DisplayEvent) -> Option<bool> {
    match event {
        DisplayEvent::KeyUp => Some(true),
        DisplayEvent::KeyDown => Some(false),
        _ => None,
    }
}

impl<T: Transport> Menu<T> {
    pub(super) fn enter_password(&mut self) {
        self.locals.password.clear();
        self.context.in_configuration = true;
        self.context.password_accepted = false;
    }

    pub(super) fn enter_calendar(&mut self, env: &mut Env<'_>) {
        self.locals.draft = Some(env.calendar.read_now());
        self.locals.field = Default::default();
    }

    pub(super) fn render_editor(&mut self, screen: Screen, visible: bool, env: &mut Env<'_>) {
        let lcd = &mut self.lcd;
        match screen {
            Screen::KFactor => {
                screens::k_factor(lcd, env.params.k_factor(), self.locals.k_digit, visible);
            }
            Screen::Linearization(point) => {
                let value = env.params.lin_point(point);
                let cursor = self.locals.lin_cursor[point.index()];
                screens::linearization(lcd, point, &value, cursor, visible);
            }
            Screen::VolumeUnits => {
                let units = env.params.display_units();
                screens::volume_units(lcd, units.volume, units.volume_resolution, visible);
            }
            Screen::TimeUnits => {
                let units = env.params.display_units();
                screens::time_units(lcd, units.time, units.rate_resolution, visible);
            }
            Screen::DateHourEdit => {
                let draft = match self.locals.draft {
                    Some(draft) => draft,
                    None => env.calendar.read_now(),
                };
                screens::date_hour(lcd, &draft, Some((self.locals.field, visible)));
            }
            _ => {}
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Password
    // ═══════════════════════════════════════════════════════════════════════

    pub(super) fn react_password(&mut self, event: DisplayEvent) -> Reaction {
        let Some(code) = event.key_code() else {
            return Reaction::Stay;
        };
        if self.locals.password.push(code).is_err() {
            return Reaction::Stay;
        }
        if !self.locals.password.is_full() {
            return Reaction::Redraw;
        }

        let accepted = self.locals.password.as_slice() == PASSWORD.as_slice();
        self.context.password_accepted = accepted;
        if accepted {
            info!("menu: password accepted");
        } else {
            info!("menu: wrong password, editors read-only");
        }
        Reaction::Go(Screen::KFactor)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Calibration
    // ═══════════════════════════════════════════════════════════════════════

    pub(super) fn react_k_factor(&mut self, event: DisplayEvent, env: &mut Env<'_>) -> Reaction {
        if event == DisplayEvent::KeyEsc {
            return Reaction::Go(Screen::Linearization(Breakpoint::B1));
        }
        if !self.context.password_accepted {
            return Reaction::Stay;
        }

        let digit = self.locals.k_digit;
        if let Some(up) = direction(event) {
            let k = env.params.k_factor().step_digit(digit as u32, up, 9);
            env.params.set_k_factor(k);
            return Reaction::Redraw;
        }
        if event == DisplayEvent::KeyEnter {
            self.locals.k_digit = (digit + 1) % FACTOR_DIGITS;
            return Reaction::Redraw;
        }
        Reaction::Stay
    }

    pub(super) fn react_linearization(
        &mut self,
        point: Breakpoint,
        event: DisplayEvent,
        env: &mut Env<'_>,
    ) -> Reaction {
        if event == DisplayEvent::KeyEsc {
            return Reaction::Go(match point.next() {
                Some(next) => Screen::Linearization(next),
                None => Screen::VolumeUnits,
            });
        }
        if !self.context.password_accepted {
            return Reaction::Stay;
        }

        let cursor = self.locals.lin_cursor[point.index()];
        if let Some(up) = direction(event) {
            let mut value = env.params.lin_point(point);
            if cursor < FACTOR_DIGITS {
                value.factor = value.factor.step_digit(cursor as u32, up, 9);
            } else {
                // Frequencies stop at 1999 Hz: the thousands digit is 0 or 1.
                let place = (cursor - FACTOR_DIGITS) as u32;
                let max = if place == 3 { 1 } else { 9 };
                value.frequency = value.frequency.step_digit(place, up, max);
            }
            env.params.set_lin_point(point, value);
            return Reaction::Redraw;
        }
        if event == DisplayEvent::KeyEnter {
            self.locals.lin_cursor[point.index()] = (cursor + 1) % LIN_CURSORS;
            return Reaction::Redraw;
        }
        Reaction::Stay
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Units
    // ═══════════════════════════════════════════════════════════════════════

    pub(super) fn react_volume_units(&mut self, event: DisplayEvent, env: &mut Env<'_>) -> Reaction {
        if event == DisplayEvent::KeyEsc {
            return Reaction::Go(Screen::TimeUnits);
        }
        if !self.context.password_accepted {
            return Reaction::Stay;
        }

        let units = env.params.display_units();
        if let Some(up) = direction(event) {
            let unit = if up { units.volume.next() } else { units.volume.prev() };
            env.params.apply_volume_unit(unit);
            // Unit labels overlap; drop the old one before drawing.
            self.lcd.clear_all();
            return Reaction::Redraw;
        }
        if event == DisplayEvent::KeyEnter {
            env.params.apply_volume_resolution(units.volume_resolution.next());
            return Reaction::Redraw;
        }
        Reaction::Stay
    }

    pub(super) fn react_time_units(&mut self, event: DisplayEvent, env: &mut Env<'_>) -> Reaction {
        if event == DisplayEvent::KeyEsc {
            return Reaction::Go(Screen::DateHourEdit);
        }
        if !self.context.password_accepted {
            return Reaction::Stay;
        }

        let units = env.params.display_units();
        if let Some(up) = direction(event) {
            let unit = if up { units.time.next() } else { units.time.prev() };
            env.params.apply_time_unit(unit);
            self.lcd.clear_all();
            return Reaction::Redraw;
        }
        if event == DisplayEvent::KeyEnter {
            env.params.apply_rate_resolution(units.rate_resolution.next());
            return Reaction::Redraw;
        }
        Reaction::Stay
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Calendar
    // ═══════════════════════════════════════════════════════════════════════

    /// Esc writes the draft back (when the password was right) and leaves
    /// the configuration chain through the splash screen.
    pub(super) fn react_calendar(&mut self, event: DisplayEvent, env: &mut Env<'_>) -> Reaction {
        if event == DisplayEvent::KeyEsc {
            if self.context.password_accepted {
                if let Some(draft) = self.locals.draft {
                    match env.calendar.commit(draft) {
                        Ok(()) => info!("menu: calendar set"),
                        Err(e) => warn!("menu: calendar write failed: {}", e),
                    }
                }
            }
            self.context = Default::default();
            self.lcd.set_shadow_suppressed(false);
            return Reaction::Go(Screen::Splash);
        }
        if !self.context.password_accepted {
            return Reaction::Stay;
        }

        if let Some(up) = direction(event) {
            if let Some(draft) = self.locals.draft.as_mut() {
                draft.step(self.locals.field, up);
            }
            return Reaction::Redraw;
        }
        if event == DisplayEvent::KeyEnter {
            self.locals.field = self.locals.field.next();
            return Reaction::Redraw;
        }
        Reaction::Stay
    }
}
