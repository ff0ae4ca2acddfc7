//! Iconography segments: symbols and unit labels.
//!
//! Several icons are composite, drawn from bits scattered over many
//! registers. Setting and clearing use the same table so that a clear
//! removes exactly what a set asserted.

use super::segments::{seg, Seg};
use crate::units::{TimeUnit, VolumeUnit};

/// Named icons of the flow-meter glass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    Power,
    Battery,
    Batch,
    Rate,
    /// Exponent marker.
    E,
    Point,
    /// Accumulated (resettable) totaliser.
    Acm,
    /// Grand total totaliser.
    Ttl,
    /// Separator between volume and time units.
    Backslash,
    /// "VE" label of the version screen.
    Ve,
    /// "PASS" label of the password screen.
    Pass,
    /// Password progress markers.
    Pass1,
    Pass2,
    Pass3,
    /// "K" label of the calibration factor screen.
    K,
    /// "KO" label.
    Ko,
    /// Frequency marker of the linearisation screens.
    F,
    /// Linearisation point numbers.
    Lin1,
    Lin2,
    Lin3,
    Lin4,
    Lin5,
    /// Degrees Celsius, shown with the temperature.
    Celsius,
}

const POWER: &[Seg] = &[seg(2, 5)];
const BATTERY: &[Seg] = &[seg(7, 5)];
const BATCH: &[Seg] = &[seg(12, 5)];
const RATE: &[Seg] = &[seg(17, 5)];
const E: &[Seg] = &[seg(2, 4)];
const POINT: &[Seg] = &[seg(7, 4)];
const ACM: &[Seg] = &[seg(12, 4)];
const TTL: &[Seg] = &[seg(17, 4)];
const BACKSLASH: &[Seg] = &[seg(10, 1)];

const VE: &[Seg] = &[
    seg(15, 5),
    seg(15, 4),
    seg(0, 5),
    seg(0, 2),
    seg(14, 7),
    seg(15, 1),
    seg(19, 6),
    seg(0, 0),
    seg(0, 1),
    seg(5, 1),
];

const PASS: &[Seg] = &[
    // P
    seg(13, 1),
    seg(13, 0),
    seg(18, 1),
    seg(18, 0),
    seg(3, 0),
    // A
    seg(13, 3),
    seg(13, 2),
    seg(18, 3),
    seg(18, 2),
    seg(3, 2),
    seg(3, 3),
    // S
    seg(13, 5),
    seg(13, 4),
    seg(18, 4),
    seg(3, 5),
    seg(8, 4),
    // S
    seg(13, 7),
    seg(13, 6),
    seg(18, 6),
    seg(3, 7),
    seg(8, 6),
];

const PASS1: &[Seg] = &[
    seg(12, 0),
    seg(12, 1),
    seg(17, 0),
    seg(17, 1),
    seg(2, 1),
    seg(2, 0),
    seg(7, 1),
];

const PASS2: &[Seg] = &[
    seg(11, 6),
    seg(11, 7),
    seg(16, 6),
    seg(16, 7),
    seg(1, 7),
    seg(1, 6),
    seg(6, 7),
];

const PASS3: &[Seg] = &[
    seg(11, 4),
    seg(11, 5),
    seg(16, 4),
    seg(16, 5),
    seg(1, 5),
    seg(1, 4),
    seg(6, 5),
];

const K: &[Seg] = &[seg(15, 5), seg(15, 4), seg(15, 2), seg(0, 5), seg(5, 4)];

const KO: &[Seg] = &[
    seg(15, 5),
    seg(15, 4),
    seg(15, 2),
    seg(0, 5),
    seg(5, 4),
    seg(19, 6),
    seg(0, 0),
    seg(0, 1),
    seg(4, 7),
    seg(5, 1),
];

const F: &[Seg] = &[seg(10, 3), seg(15, 5), seg(15, 2), seg(0, 5)];

const LIN_1: &[Seg] = &[seg(15, 1), seg(0, 1)];
const LIN_2: &[Seg] = &[
    seg(14, 7),
    seg(19, 7),
    seg(0, 0),
    seg(19, 6),
    seg(0, 1),
    seg(5, 1),
];
const LIN_3: &[Seg] = &[
    seg(14, 7),
    seg(19, 7),
    seg(0, 0),
    seg(19, 6),
    seg(4, 7),
    seg(5, 1),
];
const LIN_4: &[Seg] = &[seg(15, 1), seg(19, 7), seg(0, 0), seg(19, 6), seg(4, 7)];
const LIN_5: &[Seg] = &[
    seg(14, 7),
    seg(15, 1),
    seg(0, 0),
    seg(19, 6),
    seg(4, 7),
    seg(5, 1),
];

const CELSIUS: &[Seg] = &[
    seg(10, 3),
    seg(15, 5),
    seg(15, 3),
    seg(15, 2),
    seg(0, 4),
    seg(14, 7),
    seg(15, 1),
    seg(0, 1),
    seg(5, 1),
];

impl Symbol {
    /// Every bit the icon lights.
    pub const fn segments(self) -> &'static [Seg] {
        match self {
            Symbol::Power => POWER,
            Symbol::Battery => BATTERY,
            Symbol::Batch => BATCH,
            Symbol::Rate => RATE,
            Symbol::E => E,
            Symbol::Point => POINT,
            Symbol::Acm => ACM,
            Symbol::Ttl => TTL,
            Symbol::Backslash => BACKSLASH,
            Symbol::Ve => VE,
            Symbol::Pass => PASS,
            Symbol::Pass1 => PASS1,
            Symbol::Pass2 => PASS2,
            Symbol::Pass3 => PASS3,
            Symbol::K => K,
            Symbol::Ko => KO,
            Symbol::F => F,
            Symbol::Lin1 => LIN_1,
            Symbol::Lin2 => LIN_2,
            Symbol::Lin3 => LIN_3,
            Symbol::Lin4 => LIN_4,
            Symbol::Lin5 => LIN_5,
            Symbol::Celsius => CELSIUS,
        }
    }

    /// Label of linearisation point `n` (1..=5).
    pub const fn lin(n: u8) -> Option<Symbol> {
        match n {
            1 => Some(Symbol::Lin1),
            2 => Some(Symbol::Lin2),
            3 => Some(Symbol::Lin3),
            4 => Some(Symbol::Lin4),
            5 => Some(Symbol::Lin5),
            _ => None,
        }
    }

    pub const ALL: [Symbol; 23] = [
        Symbol::Power,
        Symbol::Battery,
        Symbol::Batch,
        Symbol::Rate,
        Symbol::E,
        Symbol::Point,
        Symbol::Acm,
        Symbol::Ttl,
        Symbol::Backslash,
        Symbol::Ve,
        Symbol::Pass,
        Symbol::Pass1,
        Symbol::Pass2,
        Symbol::Pass3,
        Symbol::K,
        Symbol::Ko,
        Symbol::F,
        Symbol::Lin1,
        Symbol::Lin2,
        Symbol::Lin3,
        Symbol::Lin4,
        Symbol::Lin5,
        Symbol::Celsius,
    ];
}

// Units

const LT: &[Seg] = &[
    seg(15, 5),
    seg(0, 5),
    seg(5, 5),
    seg(14, 7),
    seg(10, 0),
    seg(9, 6),
];

const KG: &[Seg] = &[
    seg(15, 5),
    seg(15, 4),
    seg(15, 2),
    seg(0, 5),
    seg(5, 4),
    seg(14, 7),
    seg(15, 1),
    seg(0, 0),
    seg(0, 1),
    seg(4, 7),
    seg(5, 1),
];

const M3: &[Seg] = &[
    seg(15, 5),
    seg(10, 2),
    seg(15, 4),
    seg(15, 3),
    seg(0, 5),
    seg(0, 3),
    seg(14, 7),
    seg(19, 7),
    seg(19, 6),
    seg(0, 0),
    seg(4, 7),
    seg(5, 1),
];

const BR: &[Seg] = &[
    seg(10, 3),
    seg(10, 4),
    seg(15, 3),
    seg(0, 4),
    seg(5, 2),
    seg(0, 3),
    seg(5, 5),
    seg(14, 7),
    seg(15, 1),
    seg(19, 7),
    seg(19, 6),
    seg(0, 0),
    seg(0, 1),
    seg(5, 0),
];

const GL: &[Seg] = &[
    seg(10, 3),
    seg(15, 5),
    seg(0, 4),
    seg(0, 5),
    seg(0, 3),
    seg(5, 5),
    seg(15, 1),
    seg(0, 1),
    seg(5, 1),
];

const NOTHING: &[Seg] = &[seg(15, 2), seg(0, 4), seg(19, 6), seg(0, 0)];

/// Label bits of a volume unit.
pub const fn volume_unit_segments(unit: VolumeUnit) -> &'static [Seg] {
    match unit {
        VolumeUnit::Lt => LT,
        VolumeUnit::M3 => M3,
        VolumeUnit::Kg => KG,
        VolumeUnit::Gl => GL,
        VolumeUnit::Br => BR,
        VolumeUnit::Nothing => NOTHING,
    }
}

const HOUR: &[Seg] = &[seg(5, 6)];
const DAY: &[Seg] = &[seg(9, 5)];
const SECOND: &[Seg] = &[seg(10, 5)];
const MINUTE: &[Seg] = &[seg(9, 7)];

/// Label bit of a time unit.
pub const fn time_unit_segments(unit: TimeUnit) -> &'static [Seg] {
    match unit {
        TimeUnit::Hour => HOUR,
        TimeUnit::Day => DAY,
        TimeUnit::Second => SECOND,
        TimeUnit::Minute => MINUTE,
    }
}
