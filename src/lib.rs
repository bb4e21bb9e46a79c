//! # gear-solver
//!
//! A library for choosing lathe change gears that cut a wanted thread pitch.
//!
//! A screw-cutting lathe links its spindle to the leadscrew through a train of
//! interchangeable gears. The pitch it cuts is the leadscrew pitch divided by
//! the train's ratio, so every thread needs a ratio, and most ratios can only
//! be approximated with the gears in the drawer.
//!
//! `gear-solver` enumerates every 2, 4 and 6 gear train an inventory can build,
//! indexes them by exact ratio, and picks the best trains for each target.
//!
//! ## Features
//!
//! - **Exact ratios**: Every ratio is a fraction of integers, never a float
//! - **Duplicate gears**: Inventories may hold several gears with the same tooth count
//! - **Tolerance search**: Binary search for every train within a relative tolerance
//! - **Nearest fallback**: Always returns a usable train, flagged when out of tolerance
//! - **Shortest trains**: Fewer gears win over more gears
//! - **Preferred gears**: Ties are narrowed by a preferred driver and driven gear
//!
//! ## Example
//!
//! ```rust
//! use gear_solver::{LatheProfile, RatioMatcher, MatcherConfig};
//! use gear_solver::catalog::builder::generate;
//!
//! // Load the embedded lathe profile
//! let profile = LatheProfile::load_embedded().unwrap();
//!
//! // Build every train the profile's gears allow
//! let collection = generate(&profile.inventory, &[2, 4]);
//!
//! // Find the best trains for each pitch
//! let matcher = RatioMatcher::with_config(&collection, MatcherConfig {
//!     tolerance: profile.tolerance,
//!     preferred_driver: profile.preferred_driver,
//!     preferred_driven: profile.preferred_driven,
//! });
//!
//! for target in profile.targets() {
//!     let best = matcher.best_match(&target.ratio).unwrap();
//!     println!("{}: {}", target.pitch, best.trains[0]);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Lathe profiles, train generation, storage and ratio lookup
//! - [`core`]: Core data types for gears, trains and pitches
//! - [`matching`]: Matching engine and tie-breaking rules
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::builder::{generate, TrainGenerator};
pub use catalog::profile::LatheProfile;
pub use catalog::store::GearTrainCollection;
pub use core::inventory::GearInventory;
pub use core::pitch::{Leadscrew, Pitch, TargetSpec};
pub use core::train::GearTrain;
pub use core::types::*;
pub use matching::engine::{best_match, BestMatch, MatchError, MatcherConfig, RatioMatcher};
