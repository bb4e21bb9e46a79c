use crate::core::train::{GearTrain, TrainError};

/// Every generated gear train, sorted by ratio and then by stages
#[derive(Debug, Clone, Default)]
pub struct GearTrainCollection {
    /// All trains, ascending by (ratio, stages), no structural duplicates
    trains: Vec<GearTrain>,

    /// Train lengths (in gears) that were generated
    lengths: Vec<usize>,

    /// Train lengths that were requested but rejected
    rejected: Vec<TrainError>,
}

impl GearTrainCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from arbitrary trains.
    ///
    /// Trains with identical stages are kept once; trains with equal ratio
    /// but different stages are all kept.
    pub fn from_trains(mut trains: Vec<GearTrain>) -> Self {
        trains.sort_by(GearTrain::cmp_for_search);
        // Identical stages imply identical ratio, so duplicates are adjacent
        trains.dedup();

        let mut lengths: Vec<usize> = trains.iter().map(GearTrain::gear_count).collect();
        lengths.sort_unstable();
        lengths.dedup();

        Self {
            trains,
            lengths,
            rejected: Vec::new(),
        }
    }

    pub(crate) fn with_lengths(mut self, lengths: Vec<usize>, rejected: Vec<TrainError>) -> Self {
        self.lengths = lengths;
        self.rejected = rejected;
        self
    }

    pub fn trains(&self) -> &[GearTrain] {
        &self.trains
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GearTrain> {
        self.trains.iter()
    }

    pub fn get(&self, index: usize) -> Option<&GearTrain> {
        self.trains.get(index)
    }

    /// Train lengths (in gears) that were generated
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Requested train lengths that produced no trains because they were invalid
    pub fn rejected_lengths(&self) -> &[TrainError] {
        &self.rejected
    }

    /// Trains with exactly `gears` physical gears
    pub fn with_gear_count(&self, gears: usize) -> impl Iterator<Item = &GearTrain> + '_ {
        self.trains.iter().filter(move |t| t.gear_count() == gears)
    }

    /// Number of trains in collection
    pub fn len(&self) -> usize {
        self.trains.len()
    }

    /// Check if collection is empty
    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }
}

impl<'a> IntoIterator for &'a GearTrainCollection {
    type Item = &'a GearTrain;
    type IntoIter = std::slice::Iter<'a, GearTrain>;

    fn into_iter(self) -> Self::IntoIter {
        self.trains.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Ratio;

    fn train(pairs: &[(u32, u32)]) -> GearTrain {
        GearTrain::from_pairs(pairs).unwrap()
    }

    #[test]
    fn test_sorted_by_ratio() {
        let collection = GearTrainCollection::from_trains(vec![
            train(&[(20, 40)]),
            train(&[(40, 20)]),
            train(&[(20, 30)]),
        ]);
        let ratios: Vec<Ratio> = collection.iter().map(|t| *t.ratio()).collect();
        assert_eq!(
            ratios,
            vec![Ratio::new(1, 2), Ratio::new(3, 2), Ratio::from_integer(2)]
        );
        assert_eq!(collection.lengths(), &[2]);
    }

    #[test]
    fn test_dedup_keeps_equal_ratio_trains() {
        let collection = GearTrainCollection::from_trains(vec![
            train(&[(20, 40), (30, 50)]),
            train(&[(30, 50), (20, 40)]),
            train(&[(20, 50), (30, 40)]),
        ]);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.trains()[0].ratio(), collection.trains()[1].ratio());
    }

    #[test]
    fn test_empty_collection() {
        let collection = GearTrainCollection::new();
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
        assert!(collection.get(0).is_none());
    }

    #[test]
    fn test_with_gear_count() {
        let collection = GearTrainCollection::from_trains(vec![
            train(&[(20, 40)]),
            train(&[(20, 40), (30, 30)]),
        ]);
        assert_eq!(collection.with_gear_count(2).count(), 1);
        assert_eq!(collection.with_gear_count(4).count(), 1);
        assert_eq!(collection.with_gear_count(6).count(), 0);
        assert_eq!(collection.lengths(), &[2, 4]);
    }
}
