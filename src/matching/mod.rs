//! Gear train matching engine and tie-breaking rules.
//!
//! This module provides the core matching functionality:
//!
//! - [`RatioMatcher`]: Main entry point for finding the best trains for a ratio
//! - [`MatchAccuracy`], [`PitchCut`]: How closely a train reproduces the target
//!
//! ## Matching Algorithm
//!
//! For every target ratio:
//!
//! 1. **Range search**: Binary search for trains within the relative tolerance band
//! 2. **Nearest fallback**: When the band is empty, the closest trains are used
//! 3. **Shortest filter**: Only trains with the fewest gears are kept
//! 4. **Preferences**: Trains using the preferred driver and/or driven gear win
//!
//! Every ratio comparison is exact. Ties are never broken arbitrarily: all
//! trains that survive the rules are returned.
//!
//! ## Example
//!
//! ```rust
//! use gear_solver::catalog::builder::generate;
//! use gear_solver::{GearInventory, MatcherConfig, Ratio, RatioMatcher};
//!
//! let inventory = GearInventory::new(&[20, 20, 30, 40, 50]).unwrap();
//! let collection = generate(&inventory, &[2, 4]);
//!
//! let config = MatcherConfig {
//!     preferred_driver: Some(20),
//!     ..MatcherConfig::default()
//! };
//! let matcher = RatioMatcher::with_config(&collection, config);
//! let best = matcher.best_match(&Ratio::new(5, 2)).unwrap();
//!
//! assert_eq!(best.trains[0].to_string(), "[20:50]");
//! ```
//!
//! [`RatioMatcher`]: engine::RatioMatcher
//! [`MatchAccuracy`]: scoring::MatchAccuracy
//! [`PitchCut`]: scoring::PitchCut

pub mod engine;
pub mod preference;
pub mod scoring;
