use std::f64::consts::TAU;
use std::fmt;

use chrono::{DateTime, TimeZone};

/// Mean length of the synodic month (new moon to new moon), in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588853;

/// Julian Day of the reference new moon of 6 January 2000.
pub const REFERENCE_NEW_MOON_JD: f64 = 2_451_550.1;

/// Julian Day of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Where the moon is within one synodic cycle at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseReading {
    /// Position in the cycle, `[0, 1)`. 0 is new moon, 0.5 is full moon.
    pub phase_fraction: f64,
    /// Days elapsed since the preceding new moon.
    pub age_days: f64,
    /// Lit fraction of the visible disc, `[0, 1]`.
    pub illuminated_fraction: f64,
}

impl PhaseReading {
    /// Derives age and illumination from a phase fraction already in `[0, 1)`.
    pub fn from_fraction(phase_fraction: f64) -> Self {
        Self {
            phase_fraction,
            age_days: phase_fraction * SYNODIC_MONTH_DAYS,
            illuminated_fraction: 0.5 * (1.0 - (TAU * phase_fraction).cos()),
        }
    }

    pub fn name(&self) -> PhaseName {
        classify_phase(self.phase_fraction)
    }

    /// Days until the phase fraction next reaches 0.5.
    pub fn days_until_full(&self) -> f64 {
        (0.5 - self.phase_fraction).rem_euclid(1.0) * SYNODIC_MONTH_DAYS
    }

    /// Days until the cycle next wraps back to new moon.
    pub fn days_until_new(&self) -> f64 {
        (1.0 - self.phase_fraction).rem_euclid(1.0) * SYNODIC_MONTH_DAYS
    }
}

/// The eight named phases, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    pub const ALL: [PhaseName; 8] = [
        PhaseName::NewMoon,
        PhaseName::WaxingCrescent,
        PhaseName::FirstQuarter,
        PhaseName::WaxingGibbous,
        PhaseName::FullMoon,
        PhaseName::WaningGibbous,
        PhaseName::LastQuarter,
        PhaseName::WaningCrescent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::FullMoon => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            PhaseName::NewMoon => "🌑",
            PhaseName::WaxingCrescent => "🌒",
            PhaseName::FirstQuarter => "🌓",
            PhaseName::WaxingGibbous => "🌔",
            PhaseName::FullMoon => "🌕",
            PhaseName::WaningGibbous => "🌖",
            PhaseName::LastQuarter => "🌗",
            PhaseName::WaningCrescent => "🌘",
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Continuous Julian Day for an instant, with millisecond resolution.
pub fn julian_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> f64 {
    instant.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// Compute the Moon Phase
///
/// Cycles elapsed since the reference new moon; the fractional part wraps
/// forward for instants before the reference, so the result is always in
/// `[0, 1)`.
pub fn compute_phase<Tz: TimeZone>(instant: &DateTime<Tz>) -> PhaseReading {
    let cycles = (julian_day(instant) - REFERENCE_NEW_MOON_JD) / SYNODIC_MONTH_DAYS;
    let mut phase_fraction = cycles.rem_euclid(1.0);
    // rem_euclid may round up to the divisor for tiny negative inputs
    if phase_fraction >= 1.0 {
        phase_fraction = 0.0;
    }
    PhaseReading::from_fraction(phase_fraction)
}

/// Bucket a phase fraction into one of the eight named phases.
///
/// New Moon straddles the wrap point: anything below 0.03 or above 0.97.
/// Each other bucket is closed below and open above.
pub fn classify_phase(phase_fraction: f64) -> PhaseName {
    let p = phase_fraction;
    if p < 0.03 || p > 0.97 {
        PhaseName::NewMoon
    } else if p < 0.22 {
        PhaseName::WaxingCrescent
    } else if p < 0.28 {
        PhaseName::FirstQuarter
    } else if p < 0.47 {
        PhaseName::WaxingGibbous
    } else if p < 0.53 {
        PhaseName::FullMoon
    } else if p < 0.72 {
        PhaseName::WaningGibbous
    } else if p < 0.78 {
        PhaseName::LastQuarter
    } else {
        PhaseName::WaningCrescent
    }
}
