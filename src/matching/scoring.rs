use crate::core::pitch::{Leadscrew, TargetSpec};
use crate::core::train::GearTrain;
use crate::core::types::{Fit, Ratio};
use crate::utils::validation::{ratio_to_f64, relative_deviation};

/// How far a train's ratio is from the requested one
#[derive(Debug, Clone, PartialEq)]
pub struct MatchAccuracy {
    /// Exact ratio of the train
    pub ratio: Ratio,

    /// Signed `(ratio - target) / target`
    pub relative_error: f64,

    /// Classification of the match
    pub fit: Fit,
}

impl MatchAccuracy {
    #[must_use]
    pub fn calculate(train: &GearTrain, target: &Ratio, within_tolerance: bool) -> Self {
        Self {
            ratio: *train.ratio(),
            relative_error: relative_deviation(train.ratio(), target),
            fit: Fit::classify(train.ratio(), target, within_tolerance),
        }
    }

    /// Relative error in parts per million
    #[must_use]
    pub fn parts_per_million(&self) -> f64 {
        self.relative_error * 1_000_000.0
    }
}

/// The thread a train actually cuts
#[derive(Debug, Clone, PartialEq)]
pub struct PitchCut {
    /// Pitch cut, in the unit of the requested pitch (mm or TPI)
    pub pitch: f64,

    /// Signed relative error of the thread spacing, `(cut - wanted) / wanted`
    pub relative_error: f64,
}

impl PitchCut {
    #[must_use]
    pub fn calculate(train: &GearTrain, target: &TargetSpec, leadscrew: &Leadscrew) -> Self {
        let cut_mm = leadscrew.pitch_cut_mm(train.ratio());
        Self {
            pitch: ratio_to_f64(&target.pitch.in_same_unit(&cut_mm)),
            relative_error: relative_deviation(&cut_mm, &target.pitch.pitch_mm()),
        }
    }
}
