//! Calendar records and field arithmetic.
//!
//! The clock hardware keeps a two-digit year (2000..=2099), so the
//! leap-year rule is plain divisibility by four.

use crate::error::Error;
use crate::fixed_point::FixedPoint;

/// Complete date and time record. `year` is 0..=99 (20YY).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub day: u8,
    pub month: u8,
    pub year: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Field selected in the calendar editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    #[default]
    Day,
    Month,
    Year,
    Hour,
    Minute,
    Second,
}

impl Field {
    /// Editor order, wrapping from seconds back to the day.
    pub const fn next(self) -> Self {
        match self {
            Field::Day => Field::Month,
            Field::Month => Field::Year,
            Field::Year => Field::Hour,
            Field::Hour => Field::Minute,
            Field::Minute => Field::Second,
            Field::Second => Field::Day,
        }
    }
}

pub const fn is_leap(year: u8) -> bool {
    year % 4 == 0
}

pub const fn days_in_month(month: u8, year: u8) -> u8 {
    match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

const fn wrap_up(value: u8, min: u8, max: u8) -> u8 {
    if value >= max {
        min
    } else {
        value + 1
    }
}

const fn wrap_down(value: u8, min: u8, max: u8) -> u8 {
    if value <= min {
        max
    } else {
        value - 1
    }
}

impl DateTime {
    pub const fn new(day: u8, month: u8, year: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            day,
            month,
            year,
            hour,
            minute,
            second,
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.month >= 1
            && self.month <= 12
            && self.day >= 1
            && self.day <= days_in_month(self.month, self.year)
            && self.year <= 99
            && self.hour <= 23
            && self.minute <= 59
            && self.second <= 59
    }

    /// Increment (`up`) or decrement one field, wrapping inside its range.
    /// Moving the month or the year clamps the day to the new month length.
    pub fn step(&mut self, field: Field, up: bool) {
        let step = if up { wrap_up } else { wrap_down };
        match field {
            Field::Day => {
                self.day = step(self.day, 1, days_in_month(self.month, self.year));
            }
            Field::Month => {
                self.month = step(self.month, 1, 12);
                self.clamp_day();
            }
            Field::Year => {
                self.year = step(self.year, 0, 99);
                self.clamp_day();
            }
            Field::Hour => self.hour = step(self.hour, 0, 23),
            Field::Minute => self.minute = step(self.minute, 0, 59),
            Field::Second => self.second = step(self.second, 0, 59),
        }
    }

    fn clamp_day(&mut self) {
        self.day = self.day.min(days_in_month(self.month, self.year));
    }

    /// Move the clock forward with full carry into every field.
    pub fn advance(&mut self, seconds: u32) {
        let total = self.second as u32 + seconds;
        self.second = (total % 60) as u8;
        let total = self.minute as u32 + total / 60;
        self.minute = (total % 60) as u8;
        let total = self.hour as u32 + total / 60;
        self.hour = (total % 24) as u8;

        for _ in 0..total / 24 {
            if self.day < days_in_month(self.month, self.year) {
                self.day += 1;
            } else if self.month < 12 {
                self.day = 1;
                self.month += 1;
            } else {
                self.day = 1;
                self.month = 1;
                self.year = (self.year + 1) % 100;
            }
        }
    }

    /// `ddmmyyyy` as one number, for an 8-cell row.
    pub const fn packed_date(&self) -> FixedPoint {
        FixedPoint::integer(
            self.day as u64 * 1_000_000 + self.month as u64 * 10_000 + 2000 + self.year as u64,
        )
    }

    /// `hhmmss` as one number.
    pub const fn packed_time(&self) -> FixedPoint {
        FixedPoint::integer(self.hour as u64 * 10_000 + self.minute as u64 * 100 + self.second as u64)
    }
}

/// Real-time clock collaborator. Writes are whole records only.
pub trait Calendar {
    fn read_now(&mut self) -> DateTime;

    fn commit(&mut self, now: DateTime) -> Result<(), Error>;
}

/// Clock kept in RAM and advanced by the caller from a monotonic timer.
pub struct SoftClock {
    now: DateTime,
}

impl SoftClock {
    pub const fn new(start: DateTime) -> Self {
        Self { now: start }
    }

    pub fn advance(&mut self, seconds: u32) {
        self.now.advance(seconds);
    }
}

impl Calendar for SoftClock {
    fn read_now(&mut self) -> DateTime {
        self.now
    }

    fn commit(&mut self, now: DateTime) -> Result<(), Error> {
        if !now.is_valid() {
            return Err(Error::Calendar);
        }
        self.now = now;
        Ok(())
    }
}
