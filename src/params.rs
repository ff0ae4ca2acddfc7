//! Measurement and calibration parameters.
//!
//! The menu reads and edits these through [`ParameterStore`]; where they
//! are persisted is up to the implementation. [`FactoryStore`] keeps the
//! factory set in RAM.

use crate::fixed_point::{FixedPoint, Resolution};
use crate::units::{TimeUnit, VolumeUnit};

/// Which pulse counter a reading comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Counter {
    /// Resettable accumulated volume.
    Acm,
    /// Grand total.
    Ttl,
    /// Flow rate.
    Rate,
}

/// Raw pulse count plus everything needed to show it as a volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Totalizer {
    pub pulses: u64,
    /// Pulses per volume unit.
    pub factor: FixedPoint,
    pub volume_resolution: Resolution,
    pub volume_unit: VolumeUnit,
    pub time_unit: TimeUnit,
}

impl Totalizer {
    /// `pulses * 10^(factor.res + volume.res) / factor`, at the volume
    /// resolution. A zero factor reads as zero.
    pub fn volume(&self) -> FixedPoint {
        if self.factor.magnitude == 0 {
            return FixedPoint::new(0, self.volume_resolution);
        }
        let scale = self.factor.resolution.scale() as u128 * self.volume_resolution.scale() as u128;
        let value = self.pulses as u128 * scale / self.factor.magnitude as u128;
        FixedPoint::new(value.min(u64::MAX as u128) as u64, self.volume_resolution)
    }
}

/// One of the five linearisation breakpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Breakpoint {
    B1,
    B2,
    B3,
    B4,
    B5,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 5] = [Self::B1, Self::B2, Self::B3, Self::B4, Self::B5];

    /// 1-based number shown on the glass.
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::B1 => Some(Self::B2),
            Self::B2 => Some(Self::B3),
            Self::B3 => Some(Self::B4),
            Self::B4 => Some(Self::B5),
            Self::B5 => None,
        }
    }
}

/// Calibration factor that applies up to a flow frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinPoint {
    pub factor: FixedPoint,
    /// Breakpoint frequency in Hz, 0..=1999.
    pub frequency: FixedPoint,
}

/// Unit and resolution choices of the configuration menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayUnits {
    pub volume: VolumeUnit,
    pub volume_resolution: Resolution,
    pub time: TimeUnit,
    pub rate_resolution: Resolution,
}

/// Parameter storage collaborator.
pub trait ParameterStore {
    fn counter(&self, which: Counter) -> Totalizer;
    fn set_counter(&mut self, which: Counter, value: Totalizer);

    fn k_factor(&self) -> FixedPoint;
    fn set_k_factor(&mut self, value: FixedPoint);

    fn lin_point(&self, point: Breakpoint) -> LinPoint;
    fn set_lin_point(&mut self, point: Breakpoint, value: LinPoint);

    fn display_units(&self) -> DisplayUnits;
    fn set_display_units(&mut self, units: DisplayUnits);

    /// Volume unit for every counter.
    fn apply_volume_unit(&mut self, unit: VolumeUnit) {
        let mut units = self.display_units();
        units.volume = unit;
        self.set_display_units(units);
        for which in [Counter::Acm, Counter::Ttl, Counter::Rate] {
            let mut c = self.counter(which);
            c.volume_unit = unit;
            self.set_counter(which, c);
        }
    }

    /// Time base for every counter.
    fn apply_time_unit(&mut self, unit: TimeUnit) {
        let mut units = self.display_units();
        units.time = unit;
        self.set_display_units(units);
        for which in [Counter::Acm, Counter::Ttl, Counter::Rate] {
            let mut c = self.counter(which);
            c.time_unit = unit;
            self.set_counter(which, c);
        }
    }

    /// Shown decimals of the two totalisers.
    fn apply_volume_resolution(&mut self, resolution: Resolution) {
        let mut units = self.display_units();
        units.volume_resolution = resolution;
        self.set_display_units(units);
        for which in [Counter::Acm, Counter::Ttl] {
            let mut c = self.counter(which);
            c.volume_resolution = resolution;
            self.set_counter(which, c);
        }
    }

    /// Shown decimals of the rate.
    fn apply_rate_resolution(&mut self, resolution: Resolution) {
        let mut units = self.display_units();
        units.rate_resolution = resolution;
        self.set_display_units(units);
        let mut c = self.counter(Counter::Rate);
        c.volume_resolution = resolution;
        self.set_counter(Counter::Rate, c);
    }
}

/// On-die or external temperature probe.
pub trait TemperatureSensor {
    fn read_celsius(&mut self) -> i32;
}

// ═══════════════════════════════════════════════════════════════════════════
// Factory set
// ═══════════════════════════════════════════════════════════════════════════

/// RAM-backed store initialised with the factory parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryStore {
    acm: Totalizer,
    ttl: Totalizer,
    rate: Totalizer,
    k_factor: FixedPoint,
    lin: [LinPoint; 5],
    units: DisplayUnits,
}

impl FactoryStore {
    pub fn new() -> Self {
        let totalizer = Totalizer {
            pulses: 0,
            factor: FixedPoint::new(3000, Resolution::R1),
            volume_resolution: Resolution::R2,
            volume_unit: VolumeUnit::Lt,
            time_unit: TimeUnit::Second,
        };
        let breakpoint = |hz| LinPoint {
            factor: FixedPoint::new(14170, Resolution::R2),
            frequency: FixedPoint::integer(hz),
        };

        Self {
            acm: Totalizer {
                pulses: 6000,
                ..totalizer
            },
            ttl: Totalizer {
                pulses: 12000,
                ..totalizer
            },
            rate: Totalizer {
                pulses: 123_500,
                factor: FixedPoint::new(125_000, Resolution::R3),
                volume_resolution: Resolution::R0,
                ..totalizer
            },
            k_factor: FixedPoint::new(14171, Resolution::R2),
            lin: [
                breakpoint(100),
                breakpoint(200),
                breakpoint(500),
                breakpoint(1000),
                breakpoint(1500),
            ],
            units: DisplayUnits {
                volume: VolumeUnit::Lt,
                volume_resolution: Resolution::R2,
                time: TimeUnit::Second,
                rate_resolution: Resolution::R2,
            },
        }
    }
}

impl Default for FactoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterStore for FactoryStore {
    fn counter(&self, which: Counter) -> Totalizer {
        match which {
            Counter::Acm => self.acm,
            Counter::Ttl => self.ttl,
            Counter::Rate => self.rate,
        }
    }

    fn set_counter(&mut self, which: Counter, value: Totalizer) {
        match which {
            Counter::Acm => self.acm = value,
            Counter::Ttl => self.ttl = value,
            Counter::Rate => self.rate = value,
        }
    }

    fn k_factor(&self) -> FixedPoint {
        self.k_factor
    }

    fn set_k_factor(&mut self, value: FixedPoint) {
        self.k_factor = value;
    }

    fn lin_point(&self, point: Breakpoint) -> LinPoint {
        self.lin[point.index()]
    }

    fn set_lin_point(&mut self, point: Breakpoint, value: LinPoint) {
        self.lin[point.index()] = value;
    }

    fn display_units(&self) -> DisplayUnits {
        self.units
    }

    fn set_display_units(&mut self, units: DisplayUnits) {
        self.units = units;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_volumes() {
        let store = FactoryStore::new();
        assert_eq!(store.counter(Counter::Acm).volume(), FixedPoint::new(2000, Resolution::R2));
        assert_eq!(store.counter(Counter::Ttl).volume(), FixedPoint::new(4000, Resolution::R2));
        assert_eq!(store.counter(Counter::Rate).volume(), FixedPoint::integer(988));
    }

    #[test]
    fn zero_factor_reads_zero() {
        let mut t = FactoryStore::new().counter(Counter::Acm);
        t.factor = FixedPoint::integer(0);
        assert_eq!(t.volume().magnitude, 0);
    }

    #[test]
    fn huge_pulse_count_saturates() {
        let mut t = FactoryStore::new().counter(Counter::Acm);
        t.pulses = u64::MAX;
        t.factor = FixedPoint::new(1, Resolution::R3);
        t.volume_resolution = Resolution::R3;
        assert_eq!(t.volume().magnitude, u64::MAX);
    }

    #[test]
    fn volume_unit_applies_to_all_counters() {
        let mut store = FactoryStore::new();
        store.apply_volume_unit(VolumeUnit::M3);
        assert_eq!(store.display_units().volume, VolumeUnit::M3);
        for c in [Counter::Acm, Counter::Ttl, Counter::Rate] {
            assert_eq!(store.counter(c).volume_unit, VolumeUnit::M3);
        }
    }

    #[test]
    fn volume_resolution_skips_rate() {
        let mut store = FactoryStore::new();
        store.apply_volume_resolution(Resolution::R3);
        assert_eq!(store.counter(Counter::Acm).volume_resolution, Resolution::R3);
        assert_eq!(store.counter(Counter::Ttl).volume_resolution, Resolution::R3);
        assert_eq!(store.counter(Counter::Rate).volume_resolution, Resolution::R0);
        store.apply_rate_resolution(Resolution::R1);
        assert_eq!(store.counter(Counter::Rate).volume_resolution, Resolution::R1);
        assert_eq!(store.display_units().rate_resolution, Resolution::R1);
    }

    #[test]
    fn breakpoints_in_order() {
        let store = FactoryStore::new();
        let hz: [u64; 5] = Breakpoint::ALL.map(|b| store.lin_point(b).frequency.magnitude);
        assert_eq!(hz, [100, 200, 500, 1000, 1500]);
        assert_eq!(Breakpoint::B5.next(), None);
        assert_eq!(Breakpoint::B1.number(), 1);
    }
}
