//! Segment display engine.
//!
//! Renders characters, decimal points, symbols and unit labels into a
//! 160-bit output buffer and pushes that buffer to the PCF8553. Only
//! [`Lcd::flush`] and [`Lcd::init`] perform I/O; everything else edits
//! the buffer in RAM.
//!
//! A shadow grid remembers the last character drawn in every cell so
//! that re-rendering an unchanged screen leaves the buffer untouched.
//! Editing screens disable that comparison with
//! [`Lcd::set_shadow_suppressed`], otherwise a digit blanked for the
//! blink cursor would never be redrawn.

pub mod pcf8553;
pub mod segments;
pub mod symbols;

pub use segments::{Glyph, Row, Seg, REGISTERS};
pub use symbols::Symbol;

use crate::error::Error;
use crate::units::{TimeUnit, VolumeUnit};
use segments::{cell_segments, point_segment, STROKES};

/// Whole-display blink rate of the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkSpeed {
    #[default]
    Off = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

/// Byte sink towards the display controller.
pub trait Transport {
    /// Send one framed transfer (address byte followed by payload).
    fn send(&mut self, frame: &[u8]) -> Result<(), Error>;

    /// Hardware reset of the controller.
    fn reset(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// Shadow cell that holds nothing known.
const UNKNOWN: u8 = 0;

pub struct Lcd<T> {
    transport: T,
    buffer: [u8; REGISTERS],
    shadow: [[u8; 8]; 2],
    shadow_suppressed: bool,
    blink: BlinkSpeed,
    /// Last frame the controller acknowledged; `None` forces a send.
    sent: Option<[u8; REGISTERS]>,
    sent_blink: Option<BlinkSpeed>,
}

impl<T: Transport> Lcd<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            buffer: [0; REGISTERS],
            shadow: [[UNKNOWN; 8]; 2],
            shadow_suppressed: false,
            blink: BlinkSpeed::Off,
            sent: None,
            sent_blink: None,
        }
    }

    /// Reset the controller and program its control registers. The
    /// buffer is sent again on the next flush.
    pub fn init(&mut self) -> Result<(), Error> {
        self.transport.reset()?;
        self.transport.send(&pcf8553::setup_frame(self.blink))?;
        self.sent_blink = Some(self.blink);
        self.sent = None;
        info!("lcd: controller initialised");
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Characters
    // ═══════════════════════════════════════════════════════════════════════

    /// Draw `c` in cell `column` of `row`.
    ///
    /// `'.'` only sets the cell's decimal point. Digits and `' '` redraw
    /// the seven strokes and clear the point.
    pub fn put_char(&mut self, c: char, column: usize, row: Row) {
        debug_assert!(column < row.cells(), "column out of range");
        if column >= row.cells() {
            return;
        }
        let Some(glyph) = Glyph::parse(c) else {
            debug_assert!(false, "character has no glyph");
            return;
        };

        let cell = &mut self.shadow[row.index()][column];
        if !self.shadow_suppressed && *cell == c as u8 {
            return;
        }
        *cell = c as u8;

        let segs = cell_segments(row, column);
        match glyph {
            Glyph::Point => self.write(segs[7], true),
            Glyph::Cell(mask) => {
                for (stroke, s) in segs.iter().enumerate() {
                    self.write(*s, mask & (1 << stroke) != 0);
                }
            }
        }
    }

    /// Draw a line of text from the left edge of `row`.
    ///
    /// A `'.'` lands on the cell of the character before it and does not
    /// advance the column. Text past the row width is dropped.
    pub fn puts(&mut self, text: &str, row: Row) {
        let mut column = 0;
        for c in text.chars() {
            if c == '.' {
                if column > 0 {
                    self.put_char('.', column - 1, row);
                }
                continue;
            }
            if column >= row.cells() {
                break;
            }
            self.put_char(c, column, row);
            column += 1;
        }
    }

    /// Blank the seven strokes of one cell. The cell's point and the
    /// shadow are left alone.
    pub fn clear_digit(&mut self, column: usize, row: Row) {
        debug_assert!(column < row.cells(), "column out of range");
        if column >= row.cells() {
            return;
        }
        let segs = cell_segments(row, column);
        for (stroke, s) in segs.iter().enumerate() {
            if STROKES & (1 << stroke) != 0 {
                self.write(*s, false);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Points, symbols, units
    // ═══════════════════════════════════════════════════════════════════════

    pub fn set_point(&mut self, row: Row, point: usize) {
        self.write_point(row, point, true);
    }

    pub fn clear_point(&mut self, row: Row, point: usize) {
        self.write_point(row, point, false);
    }

    fn write_point(&mut self, row: Row, point: usize, on: bool) {
        debug_assert!(point < row.points(), "point out of range");
        if point >= row.points() {
            return;
        }
        self.write(point_segment(row, point), on);
    }

    pub fn set_symbol(&mut self, symbol: Symbol, blink: BlinkSpeed) {
        self.write_group(symbol.segments(), true, blink);
    }

    pub fn clear_symbol(&mut self, symbol: Symbol, blink: BlinkSpeed) {
        self.write_group(symbol.segments(), false, blink);
    }

    pub fn set_volume_unit(&mut self, unit: VolumeUnit, blink: BlinkSpeed) {
        self.write_group(symbols::volume_unit_segments(unit), true, blink);
    }

    pub fn clear_volume_unit(&mut self, unit: VolumeUnit, blink: BlinkSpeed) {
        self.write_group(symbols::volume_unit_segments(unit), false, blink);
    }

    pub fn set_time_unit(&mut self, unit: TimeUnit, blink: BlinkSpeed) {
        self.write_group(symbols::time_unit_segments(unit), true, blink);
    }

    pub fn clear_time_unit(&mut self, unit: TimeUnit, blink: BlinkSpeed) {
        self.write_group(symbols::time_unit_segments(unit), false, blink);
    }

    /// The controller blinks the whole glass; the last icon call wins.
    fn write_group(&mut self, group: &[Seg], on: bool, blink: BlinkSpeed) {
        for s in group {
            self.write(*s, on);
        }
        self.blink = blink;
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Whole buffer
    // ═══════════════════════════════════════════════════════════════════════

    /// Zero the output buffer and forget the shadow.
    pub fn clear_all(&mut self) {
        self.fill(0x00);
    }

    /// Set every register to `pattern` (0xFF lights the whole glass).
    pub fn fill(&mut self, pattern: u8) {
        self.buffer = [pattern; REGISTERS];
        self.shadow = [[UNKNOWN; 8]; 2];
    }

    /// Push pending changes to the controller.
    ///
    /// The blink register is written when the requested mode changed, and
    /// the segment registers when the buffer differs from the last frame
    /// the controller accepted. On failure the buffer is kept and the
    /// same content goes out on the next call.
    pub fn flush(&mut self) -> Result<(), Error> {
        if self.sent_blink != Some(self.blink) {
            self.transport.send(&pcf8553::blink_frame(self.blink))?;
            self.sent_blink = Some(self.blink);
        }
        if self.sent != Some(self.buffer) {
            self.transport.send(&pcf8553::data_frame(&self.buffer))?;
            self.sent = Some(self.buffer);
        }
        Ok(())
    }

    /// Disable (or re-enable) redundant-write elision.
    pub fn set_shadow_suppressed(&mut self, suppressed: bool) {
        self.shadow_suppressed = suppressed;
    }

    pub fn buffer(&self) -> &[u8; REGISTERS] {
        &self.buffer
    }

    pub fn blink(&self) -> BlinkSpeed {
        self.blink
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Is segment `s` lit in the buffer?
    pub fn is_lit(&self, s: Seg) -> bool {
        self.buffer[s.register as usize] & (1 << s.bit) != 0
    }

    /// Are any of the seven strokes of the cell lit?
    pub fn cell_visible(&self, column: usize, row: Row) -> bool {
        cell_segments(row, column)
            .iter()
            .take(7)
            .any(|s| self.is_lit(*s))
    }

    fn write(&mut self, s: Seg, on: bool) {
        let reg = &mut self.buffer[s.register as usize];
        if on {
            *reg |= 1 << s.bit;
        } else {
            *reg &= !(1 << s.bit);
        }
    }
}

/// The point segment of a cell, as seen by callers that track the dot.
pub const fn cell_point(row: Row, column: usize) -> Seg {
    segments::cell_segment(row, column, 7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockTransport {
        frames: std::vec::Vec<std::vec::Vec<u8>>,
        resets: usize,
        fail: bool,
    }

    impl Transport for MockTransport {
        fn send(&mut self, frame: &[u8]) -> Result<(), Error> {
            if self.fail {
                return Err(Error::Transport);
            }
            self.frames.push(frame.to_vec());
            Ok(())
        }

        fn reset(&mut self) -> Result<(), Error> {
            self.resets += 1;
            Ok(())
        }
    }

    fn lcd() -> Lcd<MockTransport> {
        Lcd::new(MockTransport::default())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Characters
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn eight_lights_exactly_seven_strokes() {
        let mut lcd = lcd();
        lcd.put_char('8', 3, Row::High);
        let lit: u32 = lcd.buffer().iter().map(|b| b.count_ones()).sum();
        assert_eq!(lit, 7);
        assert!(lcd.cell_visible(3, Row::High));
        assert!(!lcd.cell_visible(2, Row::High));
    }

    #[test]
    fn put_char_twice_is_idempotent() {
        let mut lcd = lcd();
        lcd.put_char('4', 2, Row::Low);
        let once = *lcd.buffer();
        lcd.put_char('4', 2, Row::Low);
        assert_eq!(*lcd.buffer(), once);
    }

    #[test]
    fn unchanged_redraw_issues_no_io() {
        let mut lcd = lcd();
        lcd.put_char('7', 0, Row::High);
        lcd.flush().unwrap();
        let sent = lcd.transport().frames.len();
        lcd.put_char('7', 0, Row::High);
        lcd.flush().unwrap();
        assert_eq!(lcd.transport().frames.len(), sent);
    }

    #[test]
    fn shadow_skips_redraw_of_same_character() {
        let mut lcd = lcd();
        lcd.put_char('5', 1, Row::High);
        lcd.clear_digit(1, Row::High);
        // Shadow still says '5': nothing is redrawn.
        lcd.put_char('5', 1, Row::High);
        assert!(!lcd.cell_visible(1, Row::High));
    }

    #[test]
    fn suppressed_shadow_redraws_blanked_cell() {
        let mut lcd = lcd();
        lcd.set_shadow_suppressed(true);
        lcd.put_char('5', 1, Row::High);
        lcd.clear_digit(1, Row::High);
        lcd.put_char('5', 1, Row::High);
        assert!(lcd.cell_visible(1, Row::High));
    }

    #[test]
    fn point_glyph_only_touches_decimal_point() {
        let mut lcd = lcd();
        lcd.put_char('3', 4, Row::Low);
        lcd.put_char('.', 4, Row::Low);
        assert!(lcd.is_lit(cell_point(Row::Low, 4)));
        assert!(lcd.cell_visible(4, Row::Low));
        // A digit redraw clears the point again.
        lcd.put_char('1', 4, Row::Low);
        assert!(!lcd.is_lit(cell_point(Row::Low, 4)));
    }

    #[test]
    fn puts_merges_point_onto_previous_cell() {
        let mut lcd = lcd();
        lcd.puts("   141.71", Row::High);
        assert!(lcd.is_lit(cell_point(Row::High, 5)));
        assert!(lcd.cell_visible(7, Row::High));
        assert!(!lcd.cell_visible(0, Row::High));
        for c in 0..8 {
            if c != 5 {
                assert!(!lcd.is_lit(cell_point(Row::High, c)), "cell {}", c);
            }
        }
    }

    #[test]
    fn puts_moving_point_clears_old_one() {
        let mut lcd = lcd();
        lcd.puts("1.25", Row::Low);
        lcd.puts("12.5", Row::Low);
        assert!(!lcd.is_lit(cell_point(Row::Low, 0)));
        assert!(lcd.is_lit(cell_point(Row::Low, 1)));
    }

    #[test]
    fn puts_stops_at_row_width() {
        let mut lcd = lcd();
        lcd.puts("888888888", Row::Low);
        let lit: u32 = lcd.buffer().iter().map(|b| b.count_ones()).sum();
        assert_eq!(lit, 7 * 7);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "column out of range"))]
    fn put_char_past_row_width_is_rejected() {
        let mut lcd = lcd();
        lcd.put_char('8', 7, Row::Low);
        assert_eq!(*lcd.buffer(), [0; REGISTERS]);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "point out of range"))]
    fn point_past_row_is_rejected() {
        let mut lcd = lcd();
        lcd.set_point(Row::Low, 6);
        assert_eq!(*lcd.buffer(), [0; REGISTERS]);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Symbols
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn symbol_set_then_clear_restores_buffer() {
        for symbol in Symbol::ALL {
            let mut lcd = lcd();
            lcd.put_char('8', 0, Row::High);
            let before = *lcd.buffer();
            lcd.set_symbol(symbol, BlinkSpeed::Off);
            lcd.clear_symbol(symbol, BlinkSpeed::Off);
            // Composite icons may overlap the test digit; compare only the
            // bits the icon does not own.
            for (reg, (&a, &b)) in before.iter().zip(lcd.buffer().iter()).enumerate() {
                let owned = symbol
                    .segments()
                    .iter()
                    .filter(|s| s.register as usize == reg)
                    .fold(0u8, |m, s| m | (1 << s.bit));
                assert_eq!(a & !owned, b & !owned, "{:?} register {}", symbol, reg);
                assert_eq!(b & owned, 0);
            }
        }
    }

    #[test]
    fn units_set_then_clear_restores_empty_buffer() {
        let mut lcd = lcd();
        for unit in VolumeUnit::ALL {
            lcd.set_volume_unit(unit, BlinkSpeed::Off);
            lcd.clear_volume_unit(unit, BlinkSpeed::Off);
            assert_eq!(*lcd.buffer(), [0; REGISTERS], "{:?}", unit);
        }
        for unit in TimeUnit::ALL {
            lcd.set_time_unit(unit, BlinkSpeed::Off);
            assert_ne!(*lcd.buffer(), [0; REGISTERS]);
            lcd.clear_time_unit(unit, BlinkSpeed::Off);
            assert_eq!(*lcd.buffer(), [0; REGISTERS], "{:?}", unit);
        }
    }

    #[test]
    fn symbol_blink_goes_out_on_flush() {
        let mut lcd = lcd();
        lcd.flush().unwrap();
        lcd.transport_mut().frames.clear();
        lcd.set_symbol(Symbol::Battery, BlinkSpeed::Medium);
        lcd.flush().unwrap();
        let frames = &lcd.transport().frames;
        assert_eq!(frames[0], [pcf8553::DISPLAY_CTRL_2, 0b100]);
        assert_eq!(frames[1][0], pcf8553::DATA_START);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Flush & init
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn failed_flush_is_retried_with_same_buffer() {
        let mut lcd = lcd();
        lcd.put_char('2', 0, Row::High);
        lcd.transport_mut().fail = true;
        assert_eq!(lcd.flush(), Err(Error::Transport));
        let kept = *lcd.buffer();
        lcd.transport_mut().fail = false;
        lcd.flush().unwrap();
        let last = lcd.transport().frames.last().unwrap();
        assert_eq!(&last[1..], &kept[..]);
    }

    #[test]
    fn clear_all_zeroes_buffer_and_shadow() {
        let mut lcd = lcd();
        lcd.put_char('9', 5, Row::High);
        lcd.clear_all();
        assert_eq!(*lcd.buffer(), [0; REGISTERS]);
        // Shadow was forgotten, so the same character is drawn again.
        lcd.put_char('9', 5, Row::High);
        assert!(lcd.cell_visible(5, Row::High));
    }

    #[test]
    fn init_resets_and_forces_resend() {
        let mut lcd = lcd();
        lcd.flush().unwrap();
        lcd.init().unwrap();
        assert_eq!(lcd.transport().resets, 1);
        let before = lcd.transport().frames.len();
        lcd.flush().unwrap();
        assert_eq!(lcd.transport().frames.len(), before + 1);
    }

    #[test]
    fn clear_digit_keeps_point_and_neighbours() {
        let mut lcd = lcd();
        lcd.puts("88.8", Row::High);
        lcd.clear_digit(1, Row::High);
        assert!(lcd.cell_visible(0, Row::High));
        assert!(!lcd.cell_visible(1, Row::High));
        assert!(lcd.cell_visible(2, Row::High));
        assert!(lcd.is_lit(cell_point(Row::High, 1)));
    }
}
