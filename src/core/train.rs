use std::cmp::Ordering;

use thiserror::Error;

use crate::core::types::{Ratio, Stage, Teeth};
use crate::utils::validation::{is_valid_teeth, ratio_to_f64, MAX_TRAIN_GEARS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrainError {
    #[error("Invalid train length {length}: {reason}")]
    InvalidTrainLength { length: usize, reason: String },

    #[error("Invalid gear with {0} teeth in train")]
    InvalidTeeth(Teeth),
}

impl TrainError {
    fn length(length: usize, reason: impl Into<String>) -> Self {
        Self::InvalidTrainLength {
            length,
            reason: reason.into(),
        }
    }
}

/// Check a requested train length (in physical gears) and return its stage count.
///
/// # Errors
///
/// Returns `TrainError::InvalidTrainLength` when the length is zero, odd,
/// above `MAX_TRAIN_GEARS`, or larger than the number of gears available.
pub fn stages_for_length(length: usize, available: usize) -> Result<usize, TrainError> {
    if length == 0 {
        return Err(TrainError::length(length, "a train needs at least one gear pair"));
    }
    if length % 2 != 0 {
        return Err(TrainError::length(length, "gears are mounted in driver/driven pairs"));
    }
    if length > MAX_TRAIN_GEARS {
        return Err(TrainError::length(
            length,
            format!("at most {MAX_TRAIN_GEARS} gears are supported"),
        ));
    }
    if length > available {
        return Err(TrainError::length(
            length,
            format!("the inventory holds only {available} gears"),
        ));
    }
    Ok(length / 2)
}

/// A series of driver/driven stages and the exact ratio they produce.
///
/// Stages are kept in ascending order: swapping the shafts two stages sit on
/// changes neither the gears used nor the ratio, so every permutation of the
/// same stages is the same train. Equality and hashing use the stages; use
/// [`GearTrain::cmp_ratio`] to order trains for searching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GearTrain {
    stages: Vec<Stage>,
    ratio: Ratio,
}

impl GearTrain {
    /// Build a train from its stages, in any order
    ///
    /// # Errors
    ///
    /// Returns `TrainError` if the stage count is not 1 to 3 or a gear has an
    /// invalid tooth count.
    pub fn new(mut stages: Vec<Stage>) -> Result<Self, TrainError> {
        let length = stages.len() * 2;
        if stages.is_empty() || length > MAX_TRAIN_GEARS {
            return Err(TrainError::length(
                length,
                format!("a train has between 1 and {} stages", MAX_TRAIN_GEARS / 2),
            ));
        }
        for stage in &stages {
            for teeth in [stage.driver, stage.driven] {
                if !is_valid_teeth(teeth) {
                    return Err(TrainError::InvalidTeeth(teeth));
                }
            }
        }
        stages.sort_unstable();
        Ok(Self::from_sorted(stages))
    }

    /// Build a train from `(driver, driven)` tuples
    ///
    /// # Errors
    ///
    /// Same as [`GearTrain::new`].
    pub fn from_pairs(pairs: &[(Teeth, Teeth)]) -> Result<Self, TrainError> {
        Self::new(pairs.iter().copied().map(Stage::from).collect())
    }

    /// Stages must already be sorted and validated
    pub(crate) fn from_sorted(stages: Vec<Stage>) -> Self {
        let (driven, driver) = stages.iter().fold((1u64, 1u64), |(n, d), stage| {
            (n * u64::from(stage.driven), d * u64::from(stage.driver))
        });
        Self {
            stages,
            ratio: Ratio::new(driven, driver),
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Exact `product(driven) / product(driver)`
    pub fn ratio(&self) -> &Ratio {
        &self.ratio
    }

    pub fn ratio_f64(&self) -> f64 {
        ratio_to_f64(&self.ratio)
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Number of physical gears mounted
    pub fn gear_count(&self) -> usize {
        self.stages.len() * 2
    }

    pub fn drivers(&self) -> impl Iterator<Item = Teeth> + '_ {
        self.stages.iter().map(|s| s.driver)
    }

    pub fn driven(&self) -> impl Iterator<Item = Teeth> + '_ {
        self.stages.iter().map(|s| s.driven)
    }

    /// Does any stage use a gear with `teeth` teeth as its driver?
    pub fn uses_driver(&self, teeth: Teeth) -> bool {
        self.drivers().any(|t| t == teeth)
    }

    /// Does any stage use a gear with `teeth` teeth as its driven gear?
    pub fn uses_driven(&self, teeth: Teeth) -> bool {
        self.driven().any(|t| t == teeth)
    }

    /// Order by ratio only, ignoring which gears produce it
    pub fn cmp_ratio(&self, other: &Self) -> Ordering {
        self.ratio.cmp(&other.ratio)
    }

    /// Total order used for storage: ratio first, then stages
    pub fn cmp_for_search(&self, other: &Self) -> Ordering {
        self.cmp_ratio(other)
            .then_with(|| self.stages.cmp(&other.stages))
    }
}

impl std::fmt::Display for GearTrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stages: Vec<String> = self.stages.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", stages.join(", "))
    }
}
