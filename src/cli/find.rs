//! Find command - best gear trains for a single pitch or ratio.

use clap::{ArgGroup, Args};

use crate::cli::report::{print_matches, MatchRow};
use crate::cli::{parse_positive, OutputFormat, Setup, TuningArgs};
use crate::core::pitch::{Pitch, TargetSpec};
use crate::core::types::Ratio;
use crate::matching::engine::RatioMatcher;
use crate::utils::validation::ratio_to_f64;

/// Arguments for the find command
#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["mm", "tpi", "ratio"])))]
pub struct FindArgs {
    #[command(flatten)]
    pub tuning: TuningArgs,

    /// Metric pitch in millimetres per thread
    #[arg(long, value_parser = parse_positive)]
    pub mm: Option<Ratio>,

    /// Imperial pitch in threads per inch
    #[arg(long, value_parser = parse_positive)]
    pub tpi: Option<Ratio>,

    /// Gear ratio (driven over driver), e.g. 2.5 or 127/60
    #[arg(long, value_parser = parse_positive)]
    pub ratio: Option<Ratio>,
}

impl FindArgs {
    fn pitch(&self) -> Option<Pitch> {
        self.mm
            .map(Pitch::Metric)
            .or_else(|| self.tpi.map(Pitch::Imperial))
    }
}

/// Execute the find command
///
/// # Errors
///
/// Returns an error if no target was given, the profile is invalid, or no
/// gear trains can be built.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: FindArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let setup = Setup::from_args(&args.tuning, verbose)?;
    let matcher = RatioMatcher::with_config(&setup.collection, setup.config.clone());

    let (target, ratio) = match (args.pitch(), args.ratio) {
        (Some(pitch), _) => {
            let target = TargetSpec::new(pitch, &setup.profile.leadscrew);
            (Some(target), target.ratio)
        }
        (None, Some(ratio)) => (None, ratio),
        (None, None) => anyhow::bail!("One of --mm, --tpi or --ratio is required"),
    };

    if verbose {
        eprintln!("Target ratio: {ratio} ({:.6})", ratio_to_f64(&ratio));
    }

    let best = matcher.best_match(&ratio)?;
    if !best.within_tolerance {
        eprintln!("Warning: no gear train within tolerance, showing the nearest");
    }

    print_matches(
        &[MatchRow { target, best }],
        &setup.profile.leadscrew,
        format,
        args.tuning.trains_shown(format),
    )
}
