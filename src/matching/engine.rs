use num_traits::Zero;
use thiserror::Error;
use tracing::debug;

use crate::catalog::index::RatioFinder;
use crate::catalog::store::GearTrainCollection;
use crate::core::train::GearTrain;
use crate::core::types::{Fit, Ratio, Selection, Teeth};
use crate::matching::preference::{apply_preferences, shortest_trains};
use crate::matching::scoring::MatchAccuracy;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("No gear trains to match against: the collection is empty")]
    EmptyCollection,

    #[error("Target ratio must be positive")]
    InvalidTarget,

    #[error("Tolerance {0} must be below 1")]
    InvalidTolerance(Ratio),

    #[error("Tolerance band around {0} is too large to compute exactly")]
    Overflow(Ratio),
}

/// Default relative tolerance: 1/1000
pub fn default_tolerance() -> Ratio {
    Ratio::new(1, 1000)
}

/// Configuration for the ratio matcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Relative tolerance around the target ratio
    pub tolerance: Ratio,
    /// Gear to favour as a driver when breaking ties
    pub preferred_driver: Option<Teeth>,
    /// Gear to favour as a driven gear when breaking ties
    pub preferred_driven: Option<Teeth>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            preferred_driver: None,
            preferred_driven: None,
        }
    }
}

/// The equally best trains for one target ratio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMatch {
    /// The ratio that was asked for
    pub target: Ratio,

    /// Selected trains, ascending by ratio then stages
    pub trains: Vec<GearTrain>,

    /// False when nothing was inside the tolerance band and the nearest
    /// trains were used instead
    pub within_tolerance: bool,

    /// Number of trains considered before the shortest-train filter
    pub candidates: usize,

    /// The tie-break rule that produced `trains`
    pub selection: Selection,
}

impl BestMatch {
    /// Physical gears in each selected train
    pub fn gear_count(&self) -> usize {
        self.trains.first().map_or(0, GearTrain::gear_count)
    }

    pub fn accuracy(&self, train: &GearTrain) -> MatchAccuracy {
        MatchAccuracy::calculate(train, &self.target, self.within_tolerance)
    }

    /// Best fit among the selected trains
    pub fn fit(&self) -> Fit {
        self.trains
            .iter()
            .map(|t| Fit::classify(t.ratio(), &self.target, self.within_tolerance))
            .max()
            .unwrap_or(Fit::Approximate)
    }
}

/// Picks the best gear trains for target ratios from a fixed collection
pub struct RatioMatcher<'a> {
    collection: &'a GearTrainCollection,
    config: MatcherConfig,
}

impl<'a> RatioMatcher<'a> {
    /// Create a matcher with default configuration
    pub fn new(collection: &'a GearTrainCollection) -> Self {
        Self {
            collection,
            config: MatcherConfig::default(),
        }
    }

    /// Create a matcher with custom configuration
    pub fn with_config(collection: &'a GearTrainCollection, config: MatcherConfig) -> Self {
        Self { collection, config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Find the best trains for `target`.
    ///
    /// Trains within the tolerance band are candidates; if there are none,
    /// the trains nearest to the target are. The candidates with the fewest
    /// gears are kept and then narrowed by the preferred gears.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::EmptyCollection` when there is nothing to match,
    /// `MatchError::InvalidTarget` for a zero target,
    /// `MatchError::InvalidTolerance` for a tolerance of 1 or more and
    /// `MatchError::Overflow` when the band bounds do not fit in 128-bit terms.
    pub fn best_match(&self, target: &Ratio) -> Result<BestMatch, MatchError> {
        if self.collection.is_empty() {
            return Err(MatchError::EmptyCollection);
        }
        if target.is_zero() {
            return Err(MatchError::InvalidTarget);
        }
        if self.config.tolerance >= Ratio::from_integer(1) {
            return Err(MatchError::InvalidTolerance(self.config.tolerance));
        }

        let finder = RatioFinder::new(self.collection);
        let in_band = finder
            .find_within_band(target, &self.config.tolerance)
            .ok_or(MatchError::Overflow(*target))?;
        let within_tolerance = !in_band.is_empty();
        let candidates = if within_tolerance {
            in_band
        } else {
            finder.find_nearest(target)
        };

        let (selection, chosen) = apply_preferences(
            shortest_trains(candidates),
            self.config.preferred_driver,
            self.config.preferred_driven,
        );

        debug!(
            target = %target,
            candidates = candidates.len(),
            selected = chosen.len(),
            within_tolerance,
            %selection,
            "Matched target ratio"
        );

        Ok(BestMatch {
            target: *target,
            trains: chosen.into_iter().cloned().collect(),
            within_tolerance,
            candidates: candidates.len(),
            selection,
        })
    }
}

/// Find the best trains for `target_ratio` in `collection`
///
/// # Errors
///
/// See [`RatioMatcher::best_match`].
pub fn best_match(
    collection: &GearTrainCollection,
    target_ratio: Ratio,
    tolerance: Ratio,
    preferred_driver: Option<Teeth>,
    preferred_driven: Option<Teeth>,
) -> Result<BestMatch, MatchError> {
    let config = MatcherConfig {
        tolerance,
        preferred_driver,
        preferred_driven,
    };
    RatioMatcher::with_config(collection, config).best_match(&target_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builder::generate;
    use crate::core::inventory::GearInventory;
    use crate::utils::validation::parse_decimal;

    fn collection(gears: &[u32], lengths: &[usize]) -> GearTrainCollection {
        generate(&GearInventory::new(gears).unwrap(), lengths)
    }

    #[test]
    fn test_single_exact_train() {
        let c = collection(&[20, 40], &[2]);
        let result = best_match(&c, Ratio::from_integer(2), Ratio::new(1, 100), None, None).unwrap();
        assert_eq!(result.trains.len(), 1);
        assert_eq!(result.trains[0].to_string(), "[20:40]");
        assert_eq!(*result.trains[0].ratio(), Ratio::from_integer(2));
        assert!(result.within_tolerance);
        assert_eq!(result.fit(), Fit::Exact);
    }

    #[test]
    fn test_shorter_train_preferred() {
        // 20:40 alone, or 20:40 + 30:30, or 20:30 + 30:40 all give exactly 2
        let c = collection(&[20, 30, 30, 40], &[2, 4]);
        let result = best_match(&c, Ratio::from_integer(2), Ratio::new(1, 1000), None, None).unwrap();
        assert_eq!(result.candidates, 3);
        assert_eq!(result.trains.len(), 1);
        assert_eq!(result.trains[0].to_string(), "[20:40]");
        assert_eq!(result.gear_count(), 2);
    }

    #[test]
    fn test_preferred_driver_breaks_tie() {
        let c = collection(&[20, 25, 40, 50], &[2]);
        let result = best_match(&c, Ratio::from_integer(2), Ratio::new(1, 1000), Some(25), None).unwrap();
        assert_eq!(result.selection, Selection::PreferredDriver);
        assert_eq!(result.trains.len(), 1);
        assert_eq!(result.trains[0].to_string(), "[25:50]");
    }

    #[test]
    fn test_fallback_to_nearest() {
        let c = collection(&[20, 30, 40], &[2]);
        // Closest ratio to 1.9 is 2 (20:40)
        let result = best_match(&c, Ratio::new(19, 10), Ratio::new(1, 1000), None, None).unwrap();
        assert!(!result.within_tolerance);
        assert_eq!(result.trains[0].to_string(), "[20:40]");
        assert_eq!(result.fit(), Fit::Approximate);
    }

    #[test]
    fn test_errors() {
        let empty = GearTrainCollection::new();
        assert_eq!(
            best_match(&empty, Ratio::from_integer(2), default_tolerance(), None, None),
            Err(MatchError::EmptyCollection)
        );

        let c = collection(&[20, 40], &[2]);
        assert_eq!(
            best_match(&c, Ratio::from_integer(0), default_tolerance(), None, None),
            Err(MatchError::InvalidTarget)
        );
        assert_eq!(
            best_match(&c, Ratio::from_integer(2), Ratio::from_integer(1), None, None),
            Err(MatchError::InvalidTolerance(Ratio::from_integer(1)))
        );
    }

    #[test]
    fn test_twelve_place_target_and_tolerance() {
        let c = collection(&[20, 22, 30, 38, 50, 73], &[2, 4, 6]);
        let target = parse_decimal("1.234567890123").unwrap();
        let tolerance = parse_decimal("0.000000000001").unwrap();

        let result = best_match(&c, target, tolerance, None, None).unwrap();
        assert!(!result.trains.is_empty());
        assert!(!result.within_tolerance);
        for train in &result.trains {
            assert!(result.accuracy(train).relative_error.is_finite());
        }

        // Same target with a usable tolerance stays exact
        let loose = best_match(&c, target, Ratio::new(1, 10), None, None).unwrap();
        assert!(loose.within_tolerance);
    }

    #[test]
    fn test_band_overflow_is_an_error() {
        let c = collection(&[20, 40], &[2]);
        let target = Ratio::from_integer(u64::MAX - 1);
        let tolerance = Ratio::new(u64::MAX - 1, u64::MAX);
        assert_eq!(
            best_match(&c, target, tolerance, None, None),
            Err(MatchError::Overflow(target))
        );
    }

    #[test]
    fn test_idempotent() {
        let c = collection(&[20, 20, 22, 28, 30, 32, 38, 38, 40, 50, 50, 55, 73], &[2, 4]);
        let matcher = RatioMatcher::with_config(
            &c,
            MatcherConfig {
                tolerance: default_tolerance(),
                preferred_driver: Some(20),
                preferred_driven: Some(73),
            },
        );
        let target = Ratio::new(127, 60);
        assert_eq!(matcher.best_match(&target), matcher.best_match(&target));
    }
}
