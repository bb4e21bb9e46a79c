//! Train generation and matching tests against the public library API
//!
//! These cover the properties a lathe setup relies on: exact ratios, trains
//! that respect the gear drawer, complete enumeration, in-band range search,
//! and deterministic selection.

use std::collections::BTreeMap;

use gear_solver::catalog::index::RatioFinder;
use gear_solver::{
    best_match, generate, GearInventory, GearTrain, LatheProfile, MatchError, MatcherConfig,
    Ratio, RatioMatcher, Selection, Stage,
};

fn inventory(gears: &[u32]) -> GearInventory {
    GearInventory::new(gears).unwrap()
}

fn tolerance() -> Ratio {
    Ratio::new(1, 1000)
}

#[test]
fn test_ratio_is_exact_product() {
    let collection = generate(&inventory(&[20, 22, 30, 38, 50, 73]), &[2, 4, 6]);
    assert!(!collection.is_empty());

    for train in &collection {
        let driven: u64 = train.driven().map(u64::from).product();
        let driver: u64 = train.drivers().map(u64::from).product();
        assert_eq!(*train.ratio(), Ratio::new(driven, driver), "{train}");
    }
}

#[test]
fn test_trains_respect_inventory() {
    let gears = [20, 20, 22, 28, 30, 38, 38, 50];
    let drawer = inventory(&gears);
    let collection = generate(&drawer, &[2, 4, 6]);

    for train in &collection {
        let mut used: BTreeMap<u32, usize> = BTreeMap::new();
        for teeth in train.drivers().chain(train.driven()) {
            *used.entry(teeth).or_default() += 1;
        }
        for (teeth, count) in used {
            assert!(
                drawer.count(teeth) >= count,
                "{train} uses {count} x {teeth}"
            );
        }
    }
}

#[test]
fn test_two_gear_completeness() {
    // Both 20s together make 20:20; everything else is a pair of distinct counts
    let collection = generate(&inventory(&[20, 20, 30, 40]), &[2]);
    let mut actual: Vec<String> = collection.iter().map(ToString::to_string).collect();
    actual.sort();

    let mut expected = vec![
        "[20:20]", "[20:30]", "[20:40]", "[30:20]", "[30:40]", "[40:20]", "[40:30]",
    ];
    expected.sort_unstable();
    assert_eq!(actual, expected);
}

#[test]
fn test_collection_sorted_by_ratio() {
    let collection = generate(&inventory(&[20, 25, 30, 40, 50, 60]), &[2, 4]);
    assert!(collection
        .trains()
        .windows(2)
        .all(|pair| pair[0].ratio() <= pair[1].ratio()));
}

#[test]
fn test_equal_ratio_trains_are_all_kept() {
    // 20:40 + 30:30 and 20:30 + 30:40 both give 2 with four gears
    let collection = generate(&inventory(&[20, 30, 30, 40]), &[4]);
    let finder = RatioFinder::new(&collection);
    let exact: Vec<String> = finder
        .find_exact(&Ratio::from_integer(2))
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(exact, vec!["[20:30, 30:40]", "[20:40, 30:30]"]);
}

#[test]
fn test_stage_order_does_not_make_a_new_train() {
    let a = GearTrain::new(vec![Stage::new(30, 40), Stage::new(20, 30)]).unwrap();
    let b = GearTrain::new(vec![Stage::new(20, 30), Stage::new(30, 40)]).unwrap();
    assert_eq!(a, b);

    let collection = generate(&inventory(&[20, 30, 30, 40]), &[4]);
    assert_eq!(collection.iter().filter(|t| **t == a).count(), 1);
}

#[test]
fn test_odd_and_oversized_lengths_are_rejected() {
    let collection = generate(&inventory(&[20, 30, 40, 50]), &[2, 3, 6]);
    assert_eq!(collection.lengths(), &[2]);
    assert_eq!(collection.rejected_lengths().len(), 2);
    assert!(collection.iter().all(|t| t.gear_count() == 2));
}

#[test]
fn test_band_search_stays_in_band() {
    let collection = generate(&inventory(&[20, 20, 22, 28, 30, 32, 38, 40, 50, 55, 73]), &[2, 4]);
    let finder = RatioFinder::new(&collection);
    let tolerance = Ratio::new(1, 100);

    for target in [Ratio::new(127, 60), Ratio::new(3, 2), Ratio::new(8, 9)] {
        let found = finder.find_within_band(&target, &tolerance).unwrap();
        let slack = target * tolerance;
        for train in found {
            let diff = if *train.ratio() > target {
                train.ratio() - target
            } else {
                target - train.ratio()
            };
            assert!(diff <= slack, "{train} outside band for {target}");
        }

        // Nothing in band was missed
        let expected = collection
            .iter()
            .filter(|t| {
                let r = *t.ratio();
                r >= target - slack && r <= target + slack
            })
            .count();
        assert_eq!(found.len(), expected);
    }
}

#[test]
fn test_single_pair_scenario() {
    let collection = generate(&inventory(&[20, 40]), &[2]);
    let result = best_match(
        &collection,
        Ratio::from_integer(2),
        Ratio::new(1, 100),
        None,
        None,
    )
    .unwrap();

    assert_eq!(result.trains.len(), 1);
    assert_eq!(result.trains[0].stages(), &[Stage::new(20, 40)]);
    assert_eq!(*result.trains[0].ratio(), Ratio::from_integer(2));
}

#[test]
fn test_duplicate_gears_collapse_to_one_train() {
    let collection = generate(&inventory(&[20, 20, 40, 40]), &[2]);
    let result = best_match(&collection, Ratio::from_integer(2), tolerance(), None, None).unwrap();

    assert_eq!(result.trains.len(), 1);
    assert_eq!(result.trains[0].to_string(), "[20:40]");
}

#[test]
fn test_preferred_driver_wins_tie() {
    let collection = generate(&inventory(&[20, 25, 40, 50]), &[2]);

    let result = best_match(&collection, Ratio::from_integer(2), tolerance(), Some(20), None).unwrap();
    assert_eq!(result.selection, Selection::PreferredDriver);
    assert_eq!(result.trains.len(), 1);
    assert_eq!(result.trains[0].to_string(), "[20:40]");

    // Without a preference the whole tie is surfaced
    let result = best_match(&collection, Ratio::from_integer(2), tolerance(), None, None).unwrap();
    assert_eq!(result.selection, Selection::Shortest);
    assert_eq!(result.trains.len(), 2);
}

#[test]
fn test_both_preferences_beat_one() {
    // 20:40 uses both preferred gears; 25:50 uses neither
    let collection = generate(&inventory(&[20, 25, 40, 50]), &[2]);
    let result = best_match(
        &collection,
        Ratio::from_integer(2),
        tolerance(),
        Some(20),
        Some(40),
    )
    .unwrap();
    assert_eq!(result.selection, Selection::BothPreferred);
    assert_eq!(result.trains[0].to_string(), "[20:40]");
}

#[test]
fn test_fallback_returns_nearest() {
    let collection = generate(&inventory(&[20, 30, 40]), &[2]);
    let result = best_match(&collection, Ratio::new(5, 2), tolerance(), None, None).unwrap();

    // 20:40 = 2 is the closest ratio to 2.5
    assert!(!result.within_tolerance);
    assert_eq!(result.trains.len(), 1);
    assert_eq!(result.trains[0].to_string(), "[20:40]");
}

#[test]
fn test_matching_is_idempotent() {
    let profile = LatheProfile::load_embedded().unwrap();
    let collection = generate(&profile.inventory, &[2, 4]);
    let matcher = RatioMatcher::with_config(
        &collection,
        MatcherConfig {
            tolerance: profile.tolerance,
            preferred_driver: profile.preferred_driver,
            preferred_driven: profile.preferred_driven,
        },
    );

    for target in profile.targets() {
        let first = matcher.best_match(&target.ratio).unwrap();
        let second = matcher.best_match(&target.ratio).unwrap();
        assert_eq!(first, second);
        assert!(!first.trains.is_empty());
    }
}

#[test]
fn test_empty_collection_is_an_error() {
    let collection = generate(&inventory(&[20]), &[2]);
    assert!(collection.is_empty());
    assert_eq!(
        best_match(&collection, Ratio::from_integer(2), tolerance(), None, None),
        Err(MatchError::EmptyCollection)
    );
}
