//! Menu state machine.
//!
//! One [`Menu`] owns the LCD and consumes [`DisplayEvent`]s one at a
//! time. Every dispatch runs the same pipeline on the current screen:
//!
//! 1. on the first event after a transition, the screen's entry step
//!    (blank the glass, load editor drafts);
//! 2. render the screen into the buffer and flush it;
//! 3. react to the event, which may edit a parameter, ask for a redraw,
//!    move to another screen or ask the caller to wait.
//!
//! A transition posts a [`DisplayEvent::RefreshTick`] so the new screen
//! draws itself without waiting for the periodic tick.
//!
//! Screens are grouped into viewers (`user`) and the password-gated
//! configuration chain (`config`).

mod config;
pub mod screens;
mod user;


use crate::calendar::{Calendar, DateTime, Field};
use crate::event::{DisplayEvent, EventQueue};
use crate::lcd::{Lcd, Transport};
use crate::params::{Breakpoint, ParameterStore, TemperatureSensor};
use heapless::Vec;

// ═══════════════════════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════════════════════

/// Every screen the menu can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    Splash,
    Version,
    AcmRate,
    TtlRate,
    AcmTemp,
    DateHour,
    Password,
    KFactor,
    Linearization(Breakpoint),
    VolumeUnits,
    TimeUnits,
    DateHourEdit,
}

impl Screen {
    /// Screens reached through the password prompt.
    pub const fn is_configuration(self) -> bool {
        matches!(
            self,
            Screen::Password
                | Screen::KFactor
                | Screen::Linearization(_)
                | Screen::VolumeUnits
                | Screen::TimeUnits
                | Screen::DateHourEdit
        )
    }
}

/// State of one pass through the configuration chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationContext {
    /// The last password entry matched. Editors ignore changes otherwise.
    pub password_accepted: bool,
    pub in_configuration: bool,
}

/// Request to post `then` once `ms` milliseconds have elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pause {
    pub ms: u32,
    pub then: DisplayEvent,
}

/// Collaborators borrowed for the duration of one dispatch.
pub struct Env<'a> {
    pub calendar: &'a mut dyn Calendar,
    pub temperature: &'a mut dyn TemperatureSensor,
    pub params: &'a mut dyn ParameterStore,
    pub queue: &'a mut dyn EventQueue,
}

/// Outcome of a screen's reaction to one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Reaction {
    Stay,
    /// Stay and draw again right away.
    Redraw,
    Go(Screen),
    /// Discard pending events, then go.
    Restart(Screen),
    Wait(Pause),
}

/// Two-phase blink of the field under edit.
#[derive(Debug)]
struct Blink {
    visible: bool,
}

impl Blink {
    /// A key press, or the redraw right after one, shows the field so
    /// the user sees the new value. Any other tick flips the phase.
    fn advance(&mut self, event: DisplayEvent, previous: Option<DisplayEvent>) -> bool {
        let after_key = event.is_key() || previous.is_some_and(DisplayEvent::is_key);
        self.visible = after_key || !self.visible;
        self.visible
    }
}

/// Per-screen working state.
#[derive(Debug, Default)]
struct Locals {
    splash_steps: u8,
    version_steps: u8,
    password: Vec<u8, 4>,
    k_digit: u8,
    lin_cursor: [u8; 5],
    field: Field,
    draft: Option<DateTime>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Menu
// ═══════════════════════════════════════════════════════════════════════════

pub struct Menu<T: Transport> {
    lcd: Lcd<T>,
    current: Screen,
    entering: bool,
    context: ConfigurationContext,
    blink: Blink,
    previous: Option<DisplayEvent>,
    locals: Locals,
}

impl<T: Transport> Menu<T> {
    /// Menu that starts at the splash screen.
    pub fn new(lcd: Lcd<T>) -> Self {
        Self::starting_at(lcd, Screen::Splash)
    }

    pub fn starting_at(lcd: Lcd<T>, screen: Screen) -> Self {
        Self {
            lcd,
            current: screen,
            entering: true,
            context: ConfigurationContext::default(),
            blink: Blink { visible: true },
            previous: None,
            locals: Locals::default(),
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn context(&self) -> ConfigurationContext {
        self.context
    }

    pub fn lcd(&self) -> &Lcd<T> {
        &self.lcd
    }

    pub fn lcd_mut(&mut self) -> &mut Lcd<T> {
        &mut self.lcd
    }

    /// Run one event through the current screen. A returned [`Pause`]
    /// must be honoured by the caller: sleep, then post its event.
    pub fn dispatch(&mut self, event: DisplayEvent, env: &mut Env<'_>) -> Option<Pause> {
        let screen = self.current;

        if self.entering {
            self.entering = false;
            self.enter(screen, env);
        }

        self.lcd.set_shadow_suppressed(self.context.in_configuration);
        self.render(screen, event, env);
        if let Err(e) = self.lcd.flush() {
            warn!("menu: lcd flush failed: {}", e);
        }

        let reaction = self.react(screen, event, env);
        self.previous = Some(event);
        self.apply(screen, reaction, env)
    }

    fn enter(&mut self, screen: Screen, env: &mut Env<'_>) {
        debug!("menu: enter {}", screen);
        self.lcd.clear_all();
        match screen {
            Screen::Splash => {
                if let Err(e) = self.lcd.init() {
                    warn!("menu: lcd init failed: {}", e);
                }
                self.locals.splash_steps = 0;
            }
            Screen::Version => self.locals.version_steps = 0,
            Screen::Password => self.enter_password(),
            Screen::DateHourEdit => self.enter_calendar(env),
            _ => {}
        }
    }

    fn leave(&mut self, screen: Screen) {
        match screen {
            Screen::KFactor => self.locals.k_digit = 0,
            Screen::Linearization(point) => self.locals.lin_cursor[point.index()] = 0,
            Screen::DateHourEdit => {
                self.locals.draft = None;
                self.locals.field = Field::default();
            }
            _ => {}
        }
    }

    fn render(&mut self, screen: Screen, event: DisplayEvent, env: &mut Env<'_>) {
        if screen.is_configuration() && screen != Screen::Password {
            let visible = self.blink.advance(event, self.previous);
            self.render_editor(screen, visible, env);
        } else {
            self.render_viewer(screen, env);
        }
    }

    fn react(&mut self, screen: Screen, event: DisplayEvent, env: &mut Env<'_>) -> Reaction {
        match screen {
            Screen::Splash => self.react_splash(event),
            Screen::Version => self.react_version(event),
            Screen::AcmRate | Screen::TtlRate | Screen::AcmTemp | Screen::DateHour => {
                user::navigate(screen, event)
            }
            Screen::Password => self.react_password(event),
            Screen::KFactor => self.react_k_factor(event, env),
            Screen::Linearization(point) => self.react_linearization(point, event, env),
            Screen::VolumeUnits => self.react_volume_units(event, env),
            Screen::TimeUnits => self.react_time_units(event, env),
            Screen::DateHourEdit => self.react_calendar(event, env),
        }
    }

    fn apply(&mut self, from: Screen, reaction: Reaction, env: &mut Env<'_>) -> Option<Pause> {
        match reaction {
            Reaction::Stay => None,
            Reaction::Redraw => {
                refresh(env);
                None
            }
            Reaction::Go(to) => {
                self.switch(from, to);
                refresh(env);
                None
            }
            Reaction::Restart(to) => {
                env.queue.purge();
                self.switch(from, to);
                refresh(env);
                None
            }
            Reaction::Wait(pause) => Some(pause),
        }
    }

    fn switch(&mut self, from: Screen, to: Screen) {
        self.leave(from);
        info!("menu: {} -> {}", from, to);
        self.current = to;
        self.entering = true;
    }
}

fn refresh(env: &mut Env<'_>) {
    if env.queue.post(DisplayEvent::RefreshTick).is_err() {
        warn!("menu: event queue full, redraw dropped");
    }
}
