//! Table command - best gear trains for every pitch in the lathe profile.

use clap::Args;

use crate::cli::report::{print_matches, MatchRow};
use crate::cli::{OutputFormat, Setup, TuningArgs};
use crate::core::types::ThreadSystem;
use crate::matching::engine::RatioMatcher;

/// Arguments for the table command
#[derive(Args)]
pub struct TableArgs {
    #[command(flatten)]
    pub tuning: TuningArgs,

    /// Only list metric pitches
    #[arg(long, conflicts_with = "imperial_only")]
    pub metric_only: bool,

    /// Only list imperial pitches
    #[arg(long)]
    pub imperial_only: bool,
}

impl TableArgs {
    fn includes(&self, system: ThreadSystem) -> bool {
        match system {
            ThreadSystem::Metric => !self.imperial_only,
            ThreadSystem::Imperial => !self.metric_only,
        }
    }
}

/// Execute the table command
///
/// # Errors
///
/// Returns an error if the profile is invalid or no gear trains can be built.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: TableArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let setup = Setup::from_args(&args.tuning, verbose)?;
    let matcher = RatioMatcher::with_config(&setup.collection, setup.config.clone());

    let rows = setup
        .profile
        .targets()
        .into_iter()
        .filter(|target| args.includes(target.pitch.system()))
        .map(|target| {
            Ok(MatchRow {
                target: Some(target),
                best: matcher.best_match(&target.ratio)?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if rows.is_empty() {
        eprintln!(
            "Profile '{}' lists no pitches to solve for",
            setup.profile.name
        );
        return Ok(());
    }

    if verbose {
        let outside = rows.iter().filter(|r| !r.best.within_tolerance).count();
        eprintln!(
            "Solved {} pitches, {} outside tolerance",
            rows.len(),
            outside
        );
    }

    print_matches(
        &rows,
        &setup.profile.leadscrew,
        format,
        args.tuning.trains_shown(format),
    )
}
