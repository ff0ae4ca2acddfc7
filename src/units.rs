//! Measurement units selectable from the configuration menu.

/// Volume unit of the totalisers and of the rate numerator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VolumeUnit {
    /// Litres.
    #[default]
    Lt,
    /// Cubic metres.
    M3,
    /// Kilograms.
    Kg,
    /// Gallons.
    Gl,
    /// Barrels.
    Br,
    /// Bare number, no unit label.
    Nothing,
}

impl VolumeUnit {
    pub const ALL: [VolumeUnit; 6] = [
        Self::Lt,
        Self::M3,
        Self::Kg,
        Self::Gl,
        Self::Br,
        Self::Nothing,
    ];

    /// Menu order: LT → M3 → KG → GL → BR → none → LT.
    pub const fn next(self) -> Self {
        match self {
            Self::Lt => Self::M3,
            Self::M3 => Self::Kg,
            Self::Kg => Self::Gl,
            Self::Gl => Self::Br,
            Self::Br => Self::Nothing,
            Self::Nothing => Self::Lt,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Lt => Self::Nothing,
            Self::M3 => Self::Lt,
            Self::Kg => Self::M3,
            Self::Gl => Self::Kg,
            Self::Br => Self::Gl,
            Self::Nothing => Self::Br,
        }
    }
}

/// Time base of the rate display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeUnit {
    Hour,
    Day,
    #[default]
    Second,
    Minute,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [Self::Hour, Self::Day, Self::Second, Self::Minute];

    /// Menu order: H → D → S → M → H.
    pub const fn next(self) -> Self {
        match self {
            Self::Hour => Self::Day,
            Self::Day => Self::Second,
            Self::Second => Self::Minute,
            Self::Minute => Self::Hour,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Hour => Self::Minute,
            Self::Day => Self::Hour,
            Self::Second => Self::Day,
            Self::Minute => Self::Second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_cycle_visits_every_unit() {
        let mut u = VolumeUnit::Lt;
        for expected in [
            VolumeUnit::M3,
            VolumeUnit::Kg,
            VolumeUnit::Gl,
            VolumeUnit::Br,
            VolumeUnit::Nothing,
            VolumeUnit::Lt,
        ] {
            u = u.next();
            assert_eq!(u, expected);
        }
    }

    #[test]
    fn prev_undoes_next() {
        for u in VolumeUnit::ALL {
            assert_eq!(u.next().prev(), u);
        }
        for t in TimeUnit::ALL {
            assert_eq!(t.next().prev(), t);
        }
    }
}
