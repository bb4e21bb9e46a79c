//! Trains command - list the gear trains an inventory can build.

use std::path::PathBuf;

use clap::Args;

use crate::catalog::builder::TrainGenerator;
use crate::catalog::index::RatioFinder;
use crate::cli::{load_profile, parse_positive, OutputFormat};
use crate::core::train::GearTrain;
use crate::core::types::Ratio;

/// Arguments for the trains command
#[derive(Args)]
pub struct TrainsArgs {
    /// Path to a custom lathe profile (JSON)
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Train lengths to generate, comma separated (defaults to the profile's)
    #[arg(long, value_delimiter = ',')]
    pub lengths: Option<Vec<usize>>,

    /// Only list trains with this many gears
    #[arg(long)]
    pub gears: Option<usize>,

    /// Smallest ratio to list
    #[arg(long, value_parser = parse_positive)]
    pub min: Option<Ratio>,

    /// Largest ratio to list
    #[arg(long, value_parser = parse_positive)]
    pub max: Option<Ratio>,

    /// Number of trains to list (0 for all)
    #[arg(short = 'n', long, default_value = "0")]
    pub limit: usize,
}

/// Execute the trains command
///
/// # Errors
///
/// Returns an error if the profile is invalid or `--min` exceeds `--max`.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: TrainsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    if let (Some(min), Some(max)) = (args.min, args.max) {
        if min > max {
            anyhow::bail!("--min ({min}) must not exceed --max ({max})");
        }
    }

    let profile = load_profile(args.profile.as_ref())?;
    let lengths = args
        .lengths
        .clone()
        .unwrap_or_else(|| profile.train_lengths.clone());

    let collection = TrainGenerator::new(&profile.inventory).generate(&lengths);

    let finder = RatioFinder::new(&collection);
    let in_range = match (args.min, args.max) {
        (None, None) => collection.trains(),
        (min, max) => {
            let low = min.unwrap_or_else(|| Ratio::from_integer(0));
            let high = max.unwrap_or_else(|| {
                collection
                    .trains()
                    .last()
                    .map_or_else(|| Ratio::from_integer(0), |t| *t.ratio())
            });
            finder.find_in_range(&low, &high)
        }
    };

    let limit = if args.limit == 0 { usize::MAX } else { args.limit };
    let trains: Vec<&GearTrain> = in_range
        .iter()
        .filter(|t| args.gears.map_or(true, |g| t.gear_count() == g))
        .take(limit)
        .collect();

    if verbose {
        eprintln!(
            "Inventory {}: {} trains generated for lengths {:?}",
            profile.inventory,
            collection.len(),
            collection.lengths()
        );
        for &length in collection.lengths() {
            eprintln!(
                "  {length} gears: {} trains",
                collection.with_gear_count(length).count()
            );
        }
    }

    match format {
        OutputFormat::Text => print_text_trains(&trains),
        OutputFormat::Json => print_json_trains(&trains)?,
        OutputFormat::Tsv => print_tsv_trains(&trains),
    }

    Ok(())
}

fn print_text_trains(trains: &[&GearTrain]) {
    if trains.is_empty() {
        println!("No gear trains match");
        return;
    }

    println!("{:>12}  {:>12}  {:>5}  Train", "Ratio", "Exact", "Gears");
    for train in trains {
        println!(
            "{:>12.6}  {:>12}  {:>5}  {}",
            train.ratio_f64(),
            train.ratio().to_string(),
            train.gear_count(),
            train
        );
    }
    println!("\n{} trains", trains.len());
}

fn print_json_trains(trains: &[&GearTrain]) -> anyhow::Result<()> {
    let output: Vec<_> = trains
        .iter()
        .map(|train| {
            serde_json::json!({
                "train": train.to_string(),
                "stages": train.stages(),
                "gears": train.gear_count(),
                "ratio": train.ratio().to_string(),
                "ratio_value": train.ratio_f64(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_trains(trains: &[&GearTrain]) {
    println!("train\tgears\tratio\tratio_value\tdrivers\tdriven");
    for train in trains {
        let join = |teeth: Vec<String>| teeth.join(",");
        println!(
            "{}\t{}\t{}\t{:.6}\t{}\t{}",
            train,
            train.gear_count(),
            train.ratio(),
            train.ratio_f64(),
            join(train.drivers().map(|t| t.to_string()).collect()),
            join(train.driven().map(|t| t.to_string()).collect()),
        );
    }
}
