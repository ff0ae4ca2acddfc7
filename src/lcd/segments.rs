//! Logical-to-physical segment addressing.
//!
//! The PCF8553 interleaves the strokes of neighbouring character cells
//! across its 20 data registers. Each row has one base table giving the
//! (bit, register) pair of every stroke of the cell closest to the row's
//! serialisation origin. Every other cell sits two bits further along,
//! carrying into the next register every four cells:
//!
//! ```txt
//! pos      = base.bit + 2 * g
//! register = base.register + pos / 8
//! bit      = pos % 8
//! ```
//!
//! `g` is the column on the high row. The low row is serialised from its
//! right-hand end, so there `g = 6 - column`.

/// Number of data registers in the controller (20 x 8 = 160 segments).
pub const REGISTERS: usize = 20;

/// One segment bit of the output buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Seg {
    pub register: u8,
    pub bit: u8,
}

/// Shorthand for table literals.
pub const fn seg(register: u8, bit: u8) -> Seg {
    Seg { register, bit }
}

/// Text row of the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Row {
    /// Upper row, 8 cells.
    High,
    /// Lower row, 7 cells.
    Low,
}

impl Row {
    /// Printable character cells.
    pub const fn cells(self) -> usize {
        match self {
            Row::High => 8,
            Row::Low => 7,
        }
    }

    /// Independent decimal points.
    pub const fn points(self) -> usize {
        match self {
            Row::High => 7,
            Row::Low => 6,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Row::High => 0,
            Row::Low => 1,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Strokes
// ═══════════════════════════════════════════════════════════════════════════

pub const SEG_A: u8 = 1 << 0;
pub const SEG_B: u8 = 1 << 1;
pub const SEG_C: u8 = 1 << 2;
pub const SEG_D: u8 = 1 << 3;
pub const SEG_E: u8 = 1 << 4;
pub const SEG_F: u8 = 1 << 5;
pub const SEG_G: u8 = 1 << 6;
/// Decimal point owned by the cell.
pub const SEG_H: u8 = 1 << 7;

/// The seven strokes that draw a character.
pub const STROKES: u8 = 0x7F;

/// (bit, register) of strokes A..H for the base cell of each row.
const BASE_HIGH: [(u8, u8); 8] = [
    (6, 7),
    (6, 2),
    (7, 2),
    (6, 17),
    (6, 12),
    (7, 17),
    (7, 12),
    (7, 7),
];

const BASE_LOW: [(u8, u8); 8] = [
    (7, 5),
    (7, 0),
    (6, 0),
    (7, 15),
    (7, 10),
    (6, 15),
    (6, 10),
    (6, 5),
];

/// Address of `stroke` (0 = A .. 7 = H) in the cell at `column`.
///
/// Callers must pass a column inside the row; see [`Row::cells`].
pub const fn cell_segment(row: Row, column: usize, stroke: usize) -> Seg {
    let (base, group) = match row {
        Row::High => (BASE_HIGH[stroke], column as u8),
        Row::Low => (BASE_LOW[stroke], 6 - column as u8),
    };
    let pos = base.0 + group * 2;
    seg(base.1 + pos / 8, pos % 8)
}

/// All eight strokes of one cell, A first.
pub fn cell_segments(row: Row, column: usize) -> [Seg; 8] {
    let mut out = [seg(0, 0); 8];
    for (stroke, slot) in out.iter_mut().enumerate() {
        *slot = cell_segment(row, column, stroke);
    }
    out
}

/// Address of decimal point `point` on `row`. Point `n` is the point
/// segment of cell `n`.
pub const fn point_segment(row: Row, point: usize) -> Seg {
    cell_segment(row, point, 7)
}

// ═══════════════════════════════════════════════════════════════════════════
// Glyphs
// ═══════════════════════════════════════════════════════════════════════════

/// What a character does to its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// Strokes A..G from the mask; the point is cleared.
    Cell(u8),
    /// Only the cell's point is set.
    Point,
}

impl Glyph {
    pub const fn parse(c: char) -> Option<Glyph> {
        let mask = match c {
            '.' => return Some(Glyph::Point),
            ' ' => 0,
            '0' => SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,
            '1' => SEG_C | SEG_F,
            '2' => SEG_A | SEG_B | SEG_D | SEG_F | SEG_G,
            '3' => SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
            '4' => SEG_C | SEG_D | SEG_E | SEG_F,
            '5' => SEG_A | SEG_C | SEG_D | SEG_E | SEG_G,
            '6' => SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_G,
            '7' => SEG_C | SEG_F | SEG_G,
            '8' => STROKES,
            '9' => SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
            _ => return None,
        };
        Some(Glyph::Cell(mask))
    }
}
