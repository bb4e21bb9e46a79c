//! Command-line interface for gear-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **table**: Best gear trains for every pitch in the lathe profile
//! - **find**: Best gear trains for a single pitch or ratio
//! - **trains**: List the gear trains the inventory can build
//! - **profile**: Show or export the lathe profile
//!
//! ## Usage
//!
//! ```text
//! # Threading chart for the embedded profile
//! gear-solver table
//!
//! # Gears for a 1.25 mm thread, only 2 and 4 gear trains
//! gear-solver find --mm 1.25 --lengths 2,4
//!
//! # JSON output for scripting
//! gear-solver table --format json
//!
//! # Use your own lathe
//! gear-solver profile export my_lathe.json
//! gear-solver table --profile my_lathe.json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::builder::TrainGenerator;
use crate::catalog::profile::LatheProfile;
use crate::catalog::store::GearTrainCollection;
use crate::core::types::{Ratio, Teeth};
use crate::matching::engine::MatcherConfig;
use crate::utils::validation::{parse_decimal, ratio_to_f64};

pub mod find;
pub mod profile;
pub mod report;
pub mod table;
pub mod trains;

#[derive(Parser)]
#[command(name = "gear-solver")]
#[command(author)]
#[command(version)]
#[command(about = "Find lathe change-gear trains for metric and imperial threads")]
#[command(
    long_about = "gear-solver works out which change gears to mount on a screw-cutting lathe.\n\nIt builds every 2, 4 and 6 gear train your gears allow and, for each thread pitch:\n- Finds the trains within a relative tolerance of the exact ratio\n- Falls back to the nearest trains when none are close enough\n- Prefers the fewest gears, then your preferred driver and driven gears"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Best gear trains for every pitch in the lathe profile
    Table(table::TableArgs),

    /// Best gear trains for one pitch or ratio
    Find(find::FindArgs),

    /// List the gear trains the inventory can build
    Trains(trains::TrainsArgs),

    /// Show or export the lathe profile
    Profile(profile::ProfileArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Options shared by every command that matches pitches
#[derive(Args, Debug, Clone)]
pub struct TuningArgs {
    /// Path to a custom lathe profile (JSON)
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Relative tolerance, e.g. 0.001 for 0.1% (defaults to the profile's)
    #[arg(long, value_parser = parse_tolerance)]
    pub tolerance: Option<Ratio>,

    /// Allowed train lengths in gears, comma separated (defaults to the profile's)
    #[arg(long, value_delimiter = ',')]
    pub lengths: Option<Vec<usize>>,

    /// Preferred driver gear for breaking ties (defaults to the profile's)
    #[arg(long)]
    pub prefer_driver: Option<Teeth>,

    /// Preferred driven gear for breaking ties (defaults to the profile's)
    #[arg(long)]
    pub prefer_driven: Option<Teeth>,

    /// Ignore preferred gears and report every shortest train
    #[arg(long, conflicts_with_all = ["prefer_driver", "prefer_driven"])]
    pub no_preference: bool,

    /// Number of tied trains to show per target, 0 for all
    /// [default: 5 for text, all for json and tsv]
    #[arg(short = 'n', long)]
    pub max_trains: Option<usize>,
}

impl TuningArgs {
    /// Tied trains to print per target in `format`; 0 means all
    pub fn trains_shown(&self, format: OutputFormat) -> usize {
        self.max_trains.unwrap_or(match format {
            OutputFormat::Text => 5,
            OutputFormat::Json | OutputFormat::Tsv => 0,
        })
    }
}

/// Parse a relative tolerance in `[0, 1)`
fn parse_tolerance(text: &str) -> Result<Ratio, String> {
    let tolerance = parse_decimal(text).map_err(|e| e.to_string())?;
    if tolerance >= Ratio::from_integer(1) {
        return Err(format!("tolerance must be below 1, got {text}"));
    }
    Ok(tolerance)
}

/// Parse a strictly positive decimal (pitch or ratio)
pub(crate) fn parse_positive(text: &str) -> Result<Ratio, String> {
    let value = parse_decimal(text).map_err(|e| e.to_string())?;
    if value == Ratio::from_integer(0) {
        return Err(format!("value must be positive, got {text}"));
    }
    Ok(value)
}

/// Load the lathe profile named on the command line, or the embedded one
///
/// # Errors
///
/// Returns an error if the profile cannot be read or is invalid.
pub fn load_profile(path: Option<&PathBuf>) -> anyhow::Result<LatheProfile> {
    Ok(match path {
        Some(path) => LatheProfile::load_from_file(path)?,
        None => LatheProfile::load_embedded()?,
    })
}

/// A loaded profile with its generated trains and matcher configuration
pub struct Setup {
    pub profile: LatheProfile,
    pub collection: GearTrainCollection,
    pub config: MatcherConfig,
}

impl Setup {
    /// Load the profile, apply command-line overrides and generate trains
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid or no gear trains can be
    /// built from it.
    pub fn from_args(args: &TuningArgs, verbose: bool) -> anyhow::Result<Self> {
        let profile = load_profile(args.profile.as_ref())?;

        if verbose {
            eprintln!(
                "Loaded profile '{}': {} gears ({}), leadscrew {}",
                profile.name,
                profile.inventory.len(),
                profile.inventory,
                profile.leadscrew
            );
        }

        let lengths = args
            .lengths
            .clone()
            .unwrap_or_else(|| profile.train_lengths.clone());
        let collection = TrainGenerator::new(&profile.inventory).generate(&lengths);

        if collection.is_empty() {
            anyhow::bail!(
                "No gear trains can be built from profile '{}' with train lengths {:?}",
                profile.name,
                lengths
            );
        }

        let config = if args.no_preference {
            MatcherConfig {
                tolerance: args.tolerance.unwrap_or(profile.tolerance),
                preferred_driver: None,
                preferred_driven: None,
            }
        } else {
            MatcherConfig {
                tolerance: args.tolerance.unwrap_or(profile.tolerance),
                preferred_driver: args.prefer_driver.or(profile.preferred_driver),
                preferred_driven: args.prefer_driven.or(profile.preferred_driven),
            }
        };

        if verbose {
            eprintln!(
                "Generated {} gear trains (lengths {:?}), tolerance {:.4}%",
                collection.len(),
                collection.lengths(),
                ratio_to_f64(&config.tolerance) * 100.0
            );
        }

        Ok(Self {
            profile,
            collection,
            config,
        })
    }
}
