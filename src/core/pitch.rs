//! Thread pitches, the leadscrew, and the gear ratio that links them.
//!
//! With the driver gear on the spindle side and the driven gear on the
//! leadscrew side, one spindle turn moves the carriage by
//! `leadscrew_pitch / ratio`. Cutting a pitch `p` therefore needs
//! `ratio = leadscrew_pitch / p`, both pitches in millimetres.

use serde::{Deserialize, Serialize};

use crate::core::types::{Ratio, ThreadSystem};
use crate::utils::validation::ratio_to_f64;

/// Millimetres per inch, exactly
#[must_use]
pub fn mm_per_inch() -> Ratio {
    Ratio::new(127, 5)
}

/// A thread pitch in either unit system, stored exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pitch {
    /// Millimetres per thread
    Metric(Ratio),
    /// Threads per inch
    Imperial(Ratio),
}

impl Pitch {
    pub fn system(&self) -> ThreadSystem {
        match self {
            Self::Metric(_) => ThreadSystem::Metric,
            Self::Imperial(_) => ThreadSystem::Imperial,
        }
    }

    /// The value in its own unit (mm or TPI)
    pub fn value(&self) -> Ratio {
        match self {
            Self::Metric(v) | Self::Imperial(v) => *v,
        }
    }

    /// Distance between threads in millimetres
    pub fn pitch_mm(&self) -> Ratio {
        match self {
            Self::Metric(mm) => *mm,
            Self::Imperial(tpi) => mm_per_inch() / tpi,
        }
    }

    /// Express a pitch given in millimetres in this pitch's unit system
    pub fn in_same_unit(&self, mm: &Ratio) -> Ratio {
        match self {
            Self::Metric(_) => *mm,
            Self::Imperial(_) => mm_per_inch() / mm,
        }
    }
}

impl std::fmt::Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.3} {}",
            ratio_to_f64(&self.value()),
            self.system().unit()
        )
    }
}

/// The lathe leadscrew, described the way its maker does
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadscrewSpec {
    Tpi(f64),
    Mm(f64),
}

impl LeadscrewSpec {
    /// Convert to an exact leadscrew
    ///
    /// # Errors
    ///
    /// Returns a `DecimalError` if the value is negative, zero, or not a
    /// representable decimal.
    pub fn to_leadscrew(&self) -> Result<Leadscrew, crate::utils::validation::DecimalError> {
        use crate::utils::validation::{decimal_from_f64, DecimalError};
        let (value, raw) = match self {
            Self::Tpi(v) | Self::Mm(v) => (decimal_from_f64(*v)?, *v),
        };
        if value == Ratio::from_integer(0) {
            return Err(DecimalError::OutOfRange(raw.to_string()));
        }
        Ok(match self {
            Self::Tpi(_) => Leadscrew(Pitch::Imperial(value)),
            Self::Mm(_) => Leadscrew(Pitch::Metric(value)),
        })
    }
}

/// Exact leadscrew pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leadscrew(pub Pitch);

impl Leadscrew {
    pub fn pitch_mm(&self) -> Ratio {
        self.0.pitch_mm()
    }

    /// Gear ratio needed to cut `target`
    pub fn ratio_for(&self, target: &Pitch) -> Ratio {
        self.pitch_mm() / target.pitch_mm()
    }

    /// Pitch, in millimetres, cut with a train of the given ratio
    pub fn pitch_cut_mm(&self, ratio: &Ratio) -> Ratio {
        self.pitch_mm() / ratio
    }
}

impl std::fmt::Display for Leadscrew {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A requested pitch together with the ratio that cuts it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    pub pitch: Pitch,
    pub ratio: Ratio,
}

impl TargetSpec {
    pub fn new(pitch: Pitch, leadscrew: &Leadscrew) -> Self {
        Self {
            pitch,
            ratio: leadscrew.ratio_for(&pitch),
        }
    }
}
