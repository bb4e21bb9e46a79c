//! Gear train generation, storage, and lookup.
//!
//! A lathe profile lists the change gears on hand. From it the generator
//! builds every 2, 4 and 6 gear train the inventory can mount, and the
//! collection keeps them sorted by exact ratio for binary-search lookups.
//!
//! ## Embedded Profile
//!
//! The default profile describes a lathe with an 8 TPI leadscrew and
//! thirteen change gears:
//!
//! - **Gears**: 20, 20, 22, 28, 30, 32, 38, 38, 40, 50, 50, 55, 73
//! - **Metric pitches**: 0.15 mm to 6 mm
//! - **Imperial pitches**: 180 TPI to 2.5 TPI
//!
//! ## Example
//!
//! ```rust
//! use gear_solver::catalog::builder::generate;
//! use gear_solver::catalog::index::RatioFinder;
//! use gear_solver::{GearInventory, Ratio};
//!
//! let inventory = GearInventory::new(&[20, 30, 40]).unwrap();
//! let collection = generate(&inventory, &[2]);
//!
//! let finder = RatioFinder::new(&collection);
//! let doubles = finder.find_exact(&Ratio::from_integer(2));
//! assert_eq!(doubles[0].to_string(), "[20:40]");
//! ```
//!
//! ## Custom Profiles
//!
//! Custom profiles are JSON files with the same layout as the embedded one:
//!
//! ```rust,no_run
//! use gear_solver::LatheProfile;
//! use std::path::Path;
//!
//! // Export to JSON
//! let profile = LatheProfile::load_embedded().unwrap();
//! let json = profile.to_json().unwrap();
//!
//! // Load from custom file
//! let custom = LatheProfile::load_from_file(Path::new("my_lathe.json")).unwrap();
//! ```

pub mod builder;
pub mod index;
pub mod profile;
pub mod store;
