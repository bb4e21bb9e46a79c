//! Core data types for change-gear selection.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`GearInventory`]: The multiset of change gears available on the lathe
//! - [`Stage`]: One driver/driven pair of meshing gears
//! - [`GearTrain`]: One to three stages in series with their exact ratio
//! - [`Pitch`], [`Leadscrew`], [`TargetSpec`]: Thread pitches and the ratio needed to cut them
//! - [`Selection`], [`Fit`]: Result classification types
//!
//! ## Ratios
//!
//! Every ratio is an exact fraction of 64-bit integers. A train's ratio is
//! the product of its driven tooth counts over the product of its driver
//! tooth counts:
//!
//! | Train | Ratio |
//! |-------|-------|
//! | `[20:40]` | 2 |
//! | `[20:40, 30:50]` | 10/3 |
//! | `[38:20, 50:73]` | 73/95 |
//!
//! [`GearInventory`]: inventory::GearInventory
//! [`Stage`]: types::Stage
//! [`GearTrain`]: train::GearTrain
//! [`Pitch`]: pitch::Pitch
//! [`Leadscrew`]: pitch::Leadscrew
//! [`TargetSpec`]: pitch::TargetSpec
//! [`Selection`]: types::Selection
//! [`Fit`]: types::Fit

pub mod inventory;
pub mod pitch;
pub mod train;
pub mod types;
