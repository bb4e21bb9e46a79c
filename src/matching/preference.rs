//! Tie-breaking among trains that match a target equally well.

use crate::core::train::GearTrain;
use crate::core::types::{Selection, Teeth};

/// Keep the candidates with the fewest stages, in their original order
pub fn shortest_trains(candidates: &[GearTrain]) -> Vec<&GearTrain> {
    let Some(min_stages) = candidates.iter().map(GearTrain::stage_count).min() else {
        return Vec::new();
    };
    candidates
        .iter()
        .filter(|t| t.stage_count() == min_stages)
        .collect()
}

/// Narrow `trains` by the preferred gears. The first rule that keeps at least
/// one train wins:
///
/// 1. uses the preferred driver and the preferred driven gear
/// 2. uses the preferred driver gear
/// 3. uses the preferred driven gear
/// 4. all of `trains`
///
/// A missing preference never matches.
pub fn apply_preferences<'a>(
    trains: Vec<&'a GearTrain>,
    driver: Option<Teeth>,
    driven: Option<Teeth>,
) -> (Selection, Vec<&'a GearTrain>) {
    let uses_driver = |t: &GearTrain| driver.is_some_and(|d| t.uses_driver(d));
    let uses_driven = |t: &GearTrain| driven.is_some_and(|d| t.uses_driven(d));
    let uses_both = |t: &GearTrain| uses_driver(t) && uses_driven(t);

    let rules: [(Selection, &dyn Fn(&GearTrain) -> bool); 3] = [
        (Selection::BothPreferred, &uses_both),
        (Selection::PreferredDriver, &uses_driver),
        (Selection::PreferredDriven, &uses_driven),
    ];

    for (selection, rule) in rules {
        let kept: Vec<&GearTrain> = trains.iter().copied().filter(|&t| rule(t)).collect();
        if !kept.is_empty() {
            return (selection, kept);
        }
    }

    (Selection::Shortest, trains)
}
