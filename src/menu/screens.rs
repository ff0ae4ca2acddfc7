//! Screen layouts.
//!
//! Each function draws one screen into the LCD buffer from plain values.
//! Editing screens also receive the active field and whether it is in
//! the visible half of its blink cycle.

use crate::calendar::{DateTime, Field};
use crate::config::FIRMWARE_VERSION;
use crate::fixed_point::{FixedPoint, Resolution};
use crate::lcd::{BlinkSpeed, Lcd, Row, Symbol, Transport};
use crate::params::{Breakpoint, LinPoint, Totalizer};
use crate::units::{TimeUnit, VolumeUnit};
use heapless::String;

type Line = String<16>;

const OFF: BlinkSpeed = BlinkSpeed::Off;

fn put_value<T: Transport>(lcd: &mut Lcd<T>, value: FixedPoint, pad: char, row: Row) {
    let line: Line = value.to_cells(pad, row.cells());
    lcd.puts(&line, row);
}

/// Decimal point that marks `resolution` on a row of zeros. None for
/// whole numbers.
fn resolution_point(row: Row, resolution: Resolution) -> Option<usize> {
    match resolution {
        Resolution::R0 => None,
        r => Some(row.cells() - 1 - r.decimals() as usize),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Viewers
// ═══════════════════════════════════════════════════════════════════════════

/// Lamp test: every segment on.
pub fn splash<T: Transport>(lcd: &mut Lcd<T>) {
    lcd.fill(0xFF);
}

pub fn version<T: Transport>(lcd: &mut Lcd<T>) {
    let (major, minor, patch) = FIRMWARE_VERSION;
    let packed = major as u64 * 100 + minor as u64 * 10 + patch as u64;
    put_value(lcd, FixedPoint::integer(packed), ' ', Row::Low);
    // Points after the major and minor digits: "1.1.2".
    let cells = Row::Low.cells();
    lcd.set_point(Row::Low, cells - 3);
    lcd.set_point(Row::Low, cells - 2);
    lcd.set_symbol(Symbol::Ve, OFF);
}

/// Totaliser on top, rate below, with both unit labels.
pub fn volume_rate<T: Transport>(lcd: &mut Lcd<T>, label: Symbol, volume: &Totalizer, rate: &Totalizer) {
    put_value(lcd, volume.volume(), ' ', Row::High);
    put_value(lcd, rate.volume(), ' ', Row::Low);
    lcd.set_symbol(label, OFF);
    lcd.set_symbol(Symbol::Rate, OFF);
    lcd.set_volume_unit(volume.volume_unit, OFF);
    lcd.set_symbol(Symbol::Backslash, OFF);
    lcd.set_time_unit(rate.time_unit, OFF);
}

/// Accumulated volume on top, temperature below. Readings below zero
/// show as zero; the glass has no minus sign.
pub fn volume_temperature<T: Transport>(lcd: &mut Lcd<T>, volume: &Totalizer, celsius: i32) {
    put_value(lcd, volume.volume(), ' ', Row::High);
    put_value(lcd, FixedPoint::integer(celsius.max(0) as u64), ' ', Row::Low);
    lcd.set_symbol(Symbol::Acm, OFF);
    lcd.set_symbol(Symbol::Celsius, OFF);
}

/// `dd.mm.yyyy` on top, `hh.mm.ss` below. With `editing`, the selected
/// field is blanked during the hidden half of the blink.
pub fn date_hour<T: Transport>(lcd: &mut Lcd<T>, now: &DateTime, editing: Option<(Field, bool)>) {
    put_value(lcd, now.packed_date(), '0', Row::High);
    lcd.set_point(Row::High, 1);
    lcd.set_point(Row::High, 3);

    put_value(lcd, now.packed_time(), '0', Row::Low);
    lcd.clear_digit(0, Row::Low);
    lcd.set_point(Row::Low, 2);
    lcd.set_point(Row::Low, 4);

    if let Some((field, false)) = editing {
        let (row, cells) = field_cells(field);
        for &column in cells {
            lcd.clear_digit(column, row);
        }
    }
}

/// Cells occupied by a calendar field.
pub fn field_cells(field: Field) -> (Row, &'static [usize]) {
    match field {
        Field::Day => (Row::High, &[0, 1]),
        Field::Month => (Row::High, &[2, 3]),
        Field::Year => (Row::High, &[4, 5, 6, 7]),
        Field::Hour => (Row::Low, &[1, 2]),
        Field::Minute => (Row::Low, &[3, 4]),
        Field::Second => (Row::Low, &[5, 6]),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Editors
// ═══════════════════════════════════════════════════════════════════════════

/// "PASS" plus one marker per key already taken (up to three).
pub fn password<T: Transport>(lcd: &mut Lcd<T>, taken: usize) {
    lcd.set_symbol(Symbol::Pass, OFF);
    for marker in [Symbol::Pass1, Symbol::Pass2, Symbol::Pass3].iter().take(taken) {
        lcd.set_symbol(*marker, OFF);
    }
}

/// High-row cell of K factor digit `digit` (0 is the units digit).
pub const fn factor_cell(digit: u8) -> usize {
    7 - digit as usize
}

/// Low-row cell of breakpoint frequency digit `digit` (0 is units).
pub const fn frequency_cell(digit: u8) -> usize {
    6 - digit as usize
}

pub fn k_factor<T: Transport>(lcd: &mut Lcd<T>, k: FixedPoint, digit: u8, visible: bool) {
    put_value(lcd, k, '0', Row::High);
    if !visible {
        lcd.clear_digit(factor_cell(digit), Row::High);
    }
    lcd.set_symbol(Symbol::K, OFF);
}

/// Factor on top, 4-digit breakpoint frequency on the right of the low
/// row. Cursor 0..=7 selects a factor digit, 8..=11 a frequency digit.
pub fn linearization<T: Transport>(
    lcd: &mut Lcd<T>,
    point: Breakpoint,
    value: &LinPoint,
    cursor: u8,
    visible: bool,
) {
    put_value(lcd, value.factor, '0', Row::High);
    put_value(lcd, value.frequency, '0', Row::Low);
    for column in 0..3 {
        lcd.clear_digit(column, Row::Low);
    }

    if !visible {
        if cursor < 8 {
            lcd.clear_digit(factor_cell(cursor), Row::High);
        } else {
            lcd.clear_digit(frequency_cell(cursor - 8), Row::Low);
        }
    }

    lcd.set_symbol(Symbol::F, OFF);
    if let Some(label) = Symbol::lin(point.number()) {
        lcd.set_symbol(label, OFF);
    }
}

/// Row of zeros showing the totaliser resolution, plus the volume unit.
/// Both the resolution point and the unit blink.
pub fn volume_units<T: Transport>(lcd: &mut Lcd<T>, unit: VolumeUnit, resolution: Resolution, visible: bool) {
    put_value(lcd, FixedPoint::new(0, resolution), '0', Row::High);
    if visible {
        lcd.set_volume_unit(unit, OFF);
    } else {
        if let Some(point) = resolution_point(Row::High, resolution) {
            lcd.clear_point(Row::High, point);
        }
        lcd.clear_volume_unit(unit, OFF);
    }
    lcd.set_symbol(Symbol::Acm, OFF);
    lcd.set_symbol(Symbol::Ttl, OFF);
}

/// Row of zeros showing the rate resolution, plus the time unit.
pub fn time_units<T: Transport>(lcd: &mut Lcd<T>, unit: TimeUnit, resolution: Resolution, visible: bool) {
    put_value(lcd, FixedPoint::new(0, resolution), '0', Row::Low);
    if visible {
        lcd.set_time_unit(unit, OFF);
    } else {
        if let Some(point) = resolution_point(Row::Low, resolution) {
            lcd.clear_point(Row::Low, point);
        }
        lcd.clear_time_unit(unit, OFF);
    }
    lcd.set_symbol(Symbol::Rate, OFF);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::lcd::cell_point;

    struct NullTransport;

    impl Transport for NullTransport {
        fn send(&mut self, _frame: &[u8]) -> Result<(), Error> {
            Ok(())
        }
    }

    fn lcd() -> Lcd<NullTransport> {
        Lcd::new(NullTransport)
    }

    #[test]
    fn version_reads_one_one_two() {
        let mut lcd = lcd();
        version(&mut lcd);
        assert!(lcd.is_lit(cell_point(Row::Low, 4)));
        assert!(lcd.is_lit(cell_point(Row::Low, 5)));
        assert!(!lcd.cell_visible(3, Row::Low));
        assert!(lcd.cell_visible(6, Row::Low));
    }

    #[test]
    fn resolution_points_follow_width() {
        assert_eq!(resolution_point(Row::High, Resolution::R1), Some(6));
        assert_eq!(resolution_point(Row::High, Resolution::R3), Some(4));
        assert_eq!(resolution_point(Row::Low, Resolution::R2), Some(4));
        assert_eq!(resolution_point(Row::Low, Resolution::R0), None);
    }

    #[test]
    fn date_hour_blanks_selected_field_only() {
        let mut lcd = lcd();
        lcd.set_shadow_suppressed(true);
        let now = DateTime::new(17, 4, 23, 17, 4, 20);
        date_hour(&mut lcd, &now, Some((Field::Year, false)));
        for c in 0..4 {
            assert!(lcd.cell_visible(c, Row::High));
        }
        for c in 4..8 {
            assert!(!lcd.cell_visible(c, Row::High));
        }
        date_hour(&mut lcd, &now, Some((Field::Year, true)));
        for c in 4..8 {
            assert!(lcd.cell_visible(c, Row::High));
        }
    }

    #[test]
    fn date_hour_hides_leading_time_cell() {
        let mut lcd = lcd();
        date_hour(&mut lcd, &DateTime::new(1, 1, 0, 0, 0, 0), None);
        assert!(!lcd.cell_visible(0, Row::Low));
        assert!(lcd.cell_visible(1, Row::Low));
        assert!(lcd.is_lit(cell_point(Row::High, 1)));
        assert!(lcd.is_lit(cell_point(Row::Low, 4)));
    }

    #[test]
    fn password_markers_accumulate() {
        let mut lcd = lcd();
        password(&mut lcd, 2);
        assert!(Symbol::Pass1.segments().iter().all(|s| lcd.is_lit(*s)));
        assert!(Symbol::Pass2.segments().iter().all(|s| lcd.is_lit(*s)));
        assert!(!Symbol::Pass3.segments().iter().all(|s| lcd.is_lit(*s)));
    }

    #[test]
    fn linearization_cursor_selects_row() {
        let mut lcd = lcd();
        lcd.set_shadow_suppressed(true);
        let value = LinPoint {
            factor: FixedPoint::new(14170, Resolution::R2),
            frequency: FixedPoint::integer(1500),
        };
        linearization(&mut lcd, Breakpoint::B1, &value, 11, false);
        assert!(!lcd.cell_visible(3, Row::Low));
        assert!(lcd.cell_visible(4, Row::Low));
        assert!(!lcd.cell_visible(2, Row::Low));
        linearization(&mut lcd, Breakpoint::B1, &value, 0, false);
        assert!(lcd.cell_visible(3, Row::Low));
        assert!(!lcd.cell_visible(7, Row::High));
    }
}
