//! Scaled-integer decimal values.
//!
//! Every quantity shown on the LCD (volumes, rates, calibration factors,
//! packed dates) is carried as an unsigned magnitude plus the number of
//! decimal places it is scaled by.

use heapless::String;

/// Number of decimal places of a [`FixedPoint`]. Closed set 0..=3.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    #[default]
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
}

impl Resolution {
    pub const ALL: [Resolution; 4] = [Self::R0, Self::R1, Self::R2, Self::R3];

    pub const fn decimals(self) -> u32 {
        self as u32
    }

    /// `10^decimals`.
    pub const fn scale(self) -> u64 {
        10u64.pow(self as u32)
    }

    pub const fn from_decimals(decimals: u8) -> Option<Self> {
        match decimals {
            0 => Some(Self::R0),
            1 => Some(Self::R1),
            2 => Some(Self::R2),
            3 => Some(Self::R3),
            _ => None,
        }
    }

    /// Cycle 0 → 1 → 2 → 3 → 0.
    pub const fn next(self) -> Self {
        match self {
            Self::R0 => Self::R1,
            Self::R1 => Self::R2,
            Self::R2 => Self::R3,
            Self::R3 => Self::R0,
        }
    }

    /// Cycle 3 → 2 → 1 → 0 → 3.
    pub const fn prev(self) -> Self {
        match self {
            Self::R0 => Self::R3,
            Self::R1 => Self::R0,
            Self::R2 => Self::R1,
            Self::R3 => Self::R2,
        }
    }
}

/// `magnitude / 10^resolution`, unsigned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedPoint {
    pub magnitude: u64,
    pub resolution: Resolution,
}

impl FixedPoint {
    pub const fn new(magnitude: u64, resolution: Resolution) -> Self {
        Self {
            magnitude,
            resolution,
        }
    }

    /// Whole number, no decimals.
    pub const fn integer(value: u64) -> Self {
        Self::new(value, Resolution::R0)
    }

    /// Decimal digit of the magnitude at `10^place`.
    pub const fn digit(&self, place: u32) -> u8 {
        ((self.magnitude / 10u64.pow(place)) % 10) as u8
    }

    /// Replace the digit at `10^place`, leaving the others untouched.
    pub const fn with_digit(self, place: u32, value: u8) -> Self {
        let weight = 10u64.pow(place);
        let cleared = self.magnitude - self.digit(place) as u64 * weight;
        Self::new(cleared + value as u64 * weight, self.resolution)
    }

    /// Step the digit at `10^place` by one, wrapping inside `0..=max`.
    pub const fn step_digit(self, place: u32, up: bool, max: u8) -> Self {
        let current = self.digit(place);
        let next = if up {
            if current >= max {
                0
            } else {
                current + 1
            }
        } else if current == 0 || current > max {
            max
        } else {
            current - 1
        };
        self.with_digit(place, next)
    }

    /// Format for a display row of `cells` character cells.
    ///
    /// The result is right-aligned and left-padded with `pad`. A value
    /// always shows at least `resolution + 1` digits so that a leading
    /// zero precedes the decimal point. The point itself does not use a
    /// cell. When the number is wider than the row, the most significant
    /// digits are dropped.
    pub fn to_cells<const N: usize>(&self, pad: char, cells: usize) -> String<N> {
        // Least significant digit first.
        let mut digits = [0u8; 20];
        let mut len = 0;
        let mut rest = self.magnitude;
        loop {
            digits[len] = b'0' + (rest % 10) as u8;
            len += 1;
            rest /= 10;
            if rest == 0 {
                break;
            }
        }

        let decimals = self.resolution.decimals() as usize;
        while len < decimals + 1 {
            digits[len] = b'0';
            len += 1;
        }

        let shown = len.min(cells);
        let mut out = String::new();
        for _ in shown..cells {
            let _ = out.push(pad);
        }
        for place in (0..shown).rev() {
            let _ = out.push(digits[place] as char);
            if decimals > 0 && place == decimals {
                let _ = out.push('.');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(fp: FixedPoint, pad: char, width: usize) -> String<24> {
        fp.to_cells(pad, width)
    }

    #[test]
    fn resolution_cycles_both_ways() {
        let mut r = Resolution::R0;
        for _ in 0..4 {
            r = r.next();
        }
        assert_eq!(r, Resolution::R0);
        assert_eq!(Resolution::R0.prev(), Resolution::R3);
        assert_eq!(Resolution::R3.next(), Resolution::R0);
        assert_eq!(Resolution::from_decimals(4), None);
        assert_eq!(Resolution::R2.scale(), 100);
    }

    #[test]
    fn digit_access() {
        let k = FixedPoint::new(14171, Resolution::R2);
        assert_eq!(k.digit(0), 1);
        assert_eq!(k.digit(1), 7);
        assert_eq!(k.digit(4), 1);
        assert_eq!(k.digit(7), 0);
        assert_eq!(k.with_digit(7, 9).magnitude, 90_014_171);
    }

    #[test]
    fn step_digit_wraps() {
        let v = FixedPoint::integer(1900);
        assert_eq!(v.step_digit(2, true, 9).magnitude, 1000);
        assert_eq!(v.step_digit(0, false, 9).magnitude, 1909);
        // Thousands place limited to 0..=1.
        assert_eq!(v.step_digit(3, true, 1).magnitude, 900);
        assert_eq!(FixedPoint::integer(900).step_digit(3, false, 1).magnitude, 1900);
    }

    #[test]
    fn format_pads_and_places_point() {
        assert_eq!(cells(FixedPoint::new(14171, Resolution::R2), ' ', 8).as_str(), "   141.71");
        assert_eq!(cells(FixedPoint::new(0, Resolution::R2), ' ', 7).as_str(), "    0.00");
        assert_eq!(cells(FixedPoint::new(5, Resolution::R3), ' ', 4).as_str(), "0.005");
        assert_eq!(cells(FixedPoint::integer(20), ' ', 7).as_str(), "     20");
    }

    #[test]
    fn format_zero_padding_for_dates() {
        assert_eq!(cells(FixedPoint::integer(5_042_023), '0', 8).as_str(), "05042023");
        assert_eq!(cells(FixedPoint::integer(170_420), '0', 7).as_str(), "0170420");
    }

    #[test]
    fn format_drops_most_significant_overflow() {
        assert_eq!(cells(FixedPoint::integer(123_456_789), ' ', 8).as_str(), "23456789");
    }
}
