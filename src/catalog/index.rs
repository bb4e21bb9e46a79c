use num_traits::{CheckedAdd, CheckedMul, CheckedSub, One, Zero};

use crate::core::train::GearTrain;
use crate::core::types::Ratio;
use crate::utils::validation::{widen, WideRatio};

use super::store::GearTrainCollection;

/// Binary-search lookups over a collection sorted by ratio
pub struct RatioFinder<'a> {
    collection: &'a GearTrainCollection,
}

impl<'a> RatioFinder<'a> {
    pub fn new(collection: &'a GearTrainCollection) -> Self {
        Self { collection }
    }

    /// Index of the first train whose ratio is not below `ratio`
    fn lower_bound(&self, ratio: &WideRatio) -> usize {
        self.collection
            .trains()
            .partition_point(|t| widen(t.ratio()) < *ratio)
    }

    /// Index one past the last train whose ratio does not exceed `ratio`
    fn upper_bound(&self, ratio: &WideRatio) -> usize {
        self.collection
            .trains()
            .partition_point(|t| widen(t.ratio()) <= *ratio)
    }

    fn find_in_wide_range(&self, low: &WideRatio, high: &WideRatio) -> &'a [GearTrain] {
        if low > high {
            return &[];
        }
        let start = self.lower_bound(low);
        let end = self.upper_bound(high);
        &self.collection.trains()[start..end.max(start)]
    }

    /// Trains whose ratio lies in `[low, high]`
    pub fn find_in_range(&self, low: &Ratio, high: &Ratio) -> &'a [GearTrain] {
        self.find_in_wide_range(&widen(low), &widen(high))
    }

    /// Trains whose ratio equals `ratio` exactly
    pub fn find_exact(&self, ratio: &Ratio) -> &'a [GearTrain] {
        self.find_in_range(ratio, ratio)
    }

    /// Trains within a relative `tolerance` of `target`:
    /// `[target * (1 - tolerance), target * (1 + tolerance)]`.
    ///
    /// The bounds are computed exactly with 128-bit terms. Returns `None`
    /// when a bound does not fit even then.
    pub fn find_within_band(&self, target: &Ratio, tolerance: &Ratio) -> Option<&'a [GearTrain]> {
        let (target, tolerance) = (widen(target), widen(tolerance));
        let one = WideRatio::one();
        let high = target.checked_mul(&one.checked_add(&tolerance)?)?;
        let low = match one.checked_sub(&tolerance) {
            Some(below) if !below.is_zero() => target.checked_mul(&below)?,
            _ => WideRatio::zero(),
        };
        Some(self.find_in_wide_range(&low, &high))
    }

    /// Trains whose ratio is closest to `target`.
    ///
    /// Every train sharing the closest ratio is returned. When the nearest
    /// ratios below and above are equally far, both groups are returned.
    pub fn find_nearest(&self, target: &Ratio) -> &'a [GearTrain] {
        let trains = self.collection.trains();
        if trains.is_empty() {
            return &[];
        }

        let split = self.lower_bound(&widen(target));
        let above = trains.get(split).map(|t| *t.ratio());
        let below = split.checked_sub(1).map(|i| *trains[i].ratio());

        match (below, above) {
            (None, Some(a)) => self.find_exact(&a),
            (Some(b), None) => self.find_exact(&b),
            (Some(b), Some(a)) => {
                // Differences of two u64 ratios always fit in 128-bit terms
                let target = widen(target);
                let below_distance = target - widen(&b);
                let above_distance = widen(&a) - target;
                if below_distance < above_distance {
                    self.find_exact(&b)
                } else if above_distance < below_distance {
                    self.find_exact(&a)
                } else {
                    self.find_in_range(&b, &a)
                }
            }
            (None, None) => &[],
        }
    }
}
