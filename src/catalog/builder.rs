//! Enumerate every gear train an inventory can build.

use itertools::Itertools;
use tracing::{debug, warn};

use crate::core::inventory::GearInventory;
use crate::core::train::{stages_for_length, GearTrain, TrainError};
use crate::core::types::Stage;

use super::store::GearTrainCollection;

/// Builds gear trains from a fixed inventory
pub struct TrainGenerator<'a> {
    inventory: &'a GearInventory,
}

impl<'a> TrainGenerator<'a> {
    pub fn new(inventory: &'a GearInventory) -> Self {
        Self { inventory }
    }

    /// Every stage the inventory can mount on its own, ascending.
    ///
    /// A stage may pair two gears with the same tooth count only when the
    /// inventory holds at least two of them.
    pub fn stage_candidates(&self) -> Vec<Stage> {
        let distinct: Vec<_> = self.inventory.distinct().collect();
        distinct
            .iter()
            .cartesian_product(distinct.iter())
            .filter(|&(&driver, &driven)| driver != driven || self.inventory.count(driver) >= 2)
            .map(|(&driver, &driven)| Stage::new(driver, driven))
            .collect()
    }

    /// Every distinct train with exactly `length` gears.
    ///
    /// Stage multisets are drawn in ascending order, which is the canonical
    /// form of a train, so each train is produced once. Multisets needing
    /// more copies of a tooth count than the inventory holds are skipped.
    ///
    /// # Errors
    ///
    /// Returns `TrainError::InvalidTrainLength` if `length` is not an even
    /// number of gears between 2 and 6 that the inventory can supply.
    pub fn generate_length(&self, length: usize) -> Result<Vec<GearTrain>, TrainError> {
        let stage_count = stages_for_length(length, self.inventory.len())?;

        let trains: Vec<GearTrain> = self
            .stage_candidates()
            .into_iter()
            .combinations_with_replacement(stage_count)
            .filter(|stages| self.inventory.can_supply(stages))
            .map(GearTrain::from_sorted)
            .collect();

        debug!(length, trains = trains.len(), "Generated gear trains");
        Ok(trains)
    }

    /// Trains for all requested lengths, sorted by ratio.
    ///
    /// Invalid lengths are logged and recorded on the collection; they never
    /// stop the remaining lengths from being generated.
    pub fn generate(&self, lengths: &[usize]) -> GearTrainCollection {
        let mut requested = lengths.to_vec();
        requested.sort_unstable();
        requested.dedup();

        let mut trains = Vec::new();
        let mut generated = Vec::new();
        let mut rejected = Vec::new();

        for length in requested {
            match self.generate_length(length) {
                Ok(mut batch) => {
                    trains.append(&mut batch);
                    generated.push(length);
                }
                Err(e) => {
                    warn!(length, error = %e, "Skipping train length");
                    rejected.push(e);
                }
            }
        }

        let collection = GearTrainCollection::from_trains(trains).with_lengths(generated, rejected);
        debug!(
            inventory = %self.inventory,
            trains = collection.len(),
            "Built gear train collection"
        );
        collection
    }
}

/// Generate every train of the allowed lengths from `inventory`
pub fn generate(inventory: &GearInventory, lengths: &[usize]) -> GearTrainCollection {
    TrainGenerator::new(inventory).generate(lengths)
}
