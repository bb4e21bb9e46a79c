//! Profile command - show or export the lathe profile.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::profile::LatheProfile;
use crate::cli::{load_profile, OutputFormat};
use crate::utils::validation::ratio_to_f64;

#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommands,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the gears, leadscrew and pitches of a profile
    Show {
        /// Path to a custom lathe profile (defaults to embedded)
        #[arg(long)]
        profile: Option<PathBuf>,
    },

    /// Export a profile to a file, as a starting point for your own lathe
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to a custom lathe profile to export (defaults to embedded)
        #[arg(long)]
        profile: Option<PathBuf>,
    },
}

/// Execute the profile command
///
/// # Errors
///
/// Returns an error if the profile is invalid or the export cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ProfileArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        ProfileCommands::Show { profile } => {
            let profile = load_profile(profile.as_ref())?;
            match format {
                OutputFormat::Json => println!("{}", profile.to_json()?),
                OutputFormat::Text | OutputFormat::Tsv => print_profile(&profile, verbose),
            }
        }
        ProfileCommands::Export { output, profile } => {
            let profile = load_profile(profile.as_ref())?;
            std::fs::write(&output, profile.to_json()?)?;
            println!(
                "Exported profile '{}' ({} gears) to {}",
                profile.name,
                profile.inventory.len(),
                output.display()
            );
        }
    }
    Ok(())
}

fn print_profile(profile: &LatheProfile, verbose: bool) {
    let show = |teeth: Option<u32>| teeth.map_or_else(|| "none".to_string(), |t| t.to_string());

    println!("Profile: {}", profile.name);
    println!("   Gears: {} ({})", profile.inventory.len(), profile.inventory);
    println!("   Leadscrew: {}", profile.leadscrew);
    println!("   Train lengths: {:?}", profile.train_lengths);
    println!("   Tolerance: {:.4}%", ratio_to_f64(&profile.tolerance) * 100.0);
    println!("   Preferred driver: {}", show(profile.preferred_driver));
    println!("   Preferred driven: {}", show(profile.preferred_driven));
    println!(
        "   Pitches: {} metric, {} imperial",
        profile.metric_pitches.len(),
        profile.imperial_pitches.len()
    );

    if verbose {
        let list = |pitches: &[crate::core::pitch::Pitch]| {
            pitches
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("\n   Metric: {}", list(profile.metric_pitches.as_slice()));
        println!("   Imperial: {}", list(profile.imperial_pitches.as_slice()));
    }
}
