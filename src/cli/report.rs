//! Rendering of match results in text, JSON and TSV.
//!
//! `table` and `find` both produce one [`MatchRow`] per target and hand the
//! rows to [`print_matches`].

use crate::cli::OutputFormat;
use crate::core::pitch::{Leadscrew, TargetSpec};
use crate::core::train::GearTrain;
use crate::core::types::{Fit, ThreadSystem};
use crate::matching::engine::BestMatch;
use crate::matching::scoring::PitchCut;
use crate::utils::validation::ratio_to_f64;

/// The best trains for one target
pub struct MatchRow {
    /// The pitch asked for, or `None` when a bare ratio was asked for
    pub target: Option<TargetSpec>,
    pub best: BestMatch,
}

impl MatchRow {
    fn system(&self) -> Option<ThreadSystem> {
        self.target.map(|t| t.pitch.system())
    }
}

/// One rendered train of a row
struct TrainLine<'a> {
    train: &'a GearTrain,
    error_ppm: f64,
    fit: Fit,
    /// Pitch cut in the target's unit, or in mm for a bare ratio
    cut: f64,
    cut_unit: &'static str,
    /// Thread spacing error in ppm, only for pitch targets
    cut_error_ppm: Option<f64>,
}

fn train_lines<'a>(row: &'a MatchRow, leadscrew: &Leadscrew, max_trains: usize) -> Vec<TrainLine<'a>> {
    let limit = if max_trains == 0 {
        row.best.trains.len()
    } else {
        max_trains
    };

    row.best
        .trains
        .iter()
        .take(limit)
        .map(|train| {
            let accuracy = row.best.accuracy(train);
            let (cut, cut_unit, cut_error_ppm) = match &row.target {
                Some(target) => {
                    let cut = PitchCut::calculate(train, target, leadscrew);
                    (
                        cut.pitch,
                        target.pitch.system().unit(),
                        Some(cut.relative_error * 1_000_000.0),
                    )
                }
                None => (
                    ratio_to_f64(&leadscrew.pitch_cut_mm(train.ratio())),
                    ThreadSystem::Metric.unit(),
                    None,
                ),
            };
            TrainLine {
                train,
                error_ppm: accuracy.parts_per_million(),
                fit: accuracy.fit,
                cut,
                cut_unit,
                cut_error_ppm,
            }
        })
        .collect()
}

/// Print match rows in the requested format
///
/// At most `max_trains` trains are shown per row; 0 shows them all.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_matches(
    rows: &[MatchRow],
    leadscrew: &Leadscrew,
    format: OutputFormat,
    max_trains: usize,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print_text_rows(rows, leadscrew, max_trains),
        OutputFormat::Json => print_json_rows(rows, leadscrew, max_trains)?,
        OutputFormat::Tsv => print_tsv_rows(rows, leadscrew, max_trains),
    }
    Ok(())
}

fn section_title(system: Option<ThreadSystem>) -> &'static str {
    match system {
        Some(ThreadSystem::Metric) => "Metric threads",
        Some(ThreadSystem::Imperial) => "Imperial threads",
        None => "Gear ratios",
    }
}

fn print_text_rows(rows: &[MatchRow], leadscrew: &Leadscrew, max_trains: usize) {
    let mut current: Option<Option<ThreadSystem>> = None;

    for row in rows {
        let system = row.system();
        if current != Some(system) {
            if current.is_some() {
                println!();
            }
            println!("{} (leadscrew {})", section_title(system), leadscrew);
            println!("{}", "─".repeat(86));
            println!(
                "{:>12}  {:>10}  {:>5}  {:<28}  {:>12}  {:>10}",
                "Target", "Ratio", "Gears", "Train", "Cuts", "Error"
            );
            current = Some(system);
        }

        let target_label = row
            .target
            .map_or_else(|| "-".to_string(), |t| t.pitch.to_string());
        let lines = train_lines(row, leadscrew, max_trains);

        for (i, line) in lines.iter().enumerate() {
            let (target_col, ratio_col, gears_col) = if i == 0 {
                (
                    target_label.clone(),
                    format!("{:.4}", ratio_to_f64(&row.best.target)),
                    row.best.gear_count().to_string(),
                )
            } else {
                (String::new(), String::new(), String::new())
            };

            let marker = match line.fit {
                Fit::Exact | Fit::InTolerance => "",
                Fit::Approximate => "  (nearest)",
            };

            println!(
                "{:>12}  {:>10}  {:>5}  {:<28}  {:>8.3} {:<3}  {:>+6.0} ppm{}",
                target_col,
                ratio_col,
                gears_col,
                line.train.to_string(),
                line.cut,
                line.cut_unit,
                line.error_ppm,
                marker
            );
        }

        let hidden = row.best.trains.len() - lines.len();
        if hidden > 0 {
            println!("{:>36}... {} more equally good", "", hidden);
        }
    }
}

fn print_json_rows(
    rows: &[MatchRow],
    leadscrew: &Leadscrew,
    max_trains: usize,
) -> anyhow::Result<()> {
    let results: Vec<_> = rows
        .iter()
        .map(|row| {
            let trains: Vec<_> = train_lines(row, leadscrew, max_trains)
                .iter()
                .map(|line| {
                    serde_json::json!({
                        "train": line.train.to_string(),
                        "stages": line.train.stages(),
                        "gears": line.train.gear_count(),
                        "ratio": line.train.ratio().to_string(),
                        "ratio_value": line.train.ratio_f64(),
                        "error_ppm": line.error_ppm,
                        "fit": line.fit,
                        "pitch_cut": line.cut,
                        "pitch_cut_unit": line.cut_unit,
                        "pitch_error_ppm": line.cut_error_ppm,
                    })
                })
                .collect();

            serde_json::json!({
                "system": row.system(),
                "pitch": row.target.map(|t| ratio_to_f64(&t.pitch.value())),
                "unit": row.target.map(|t| t.pitch.system().unit()),
                "target_ratio": row.best.target.to_string(),
                "target_ratio_value": ratio_to_f64(&row.best.target),
                "within_tolerance": row.best.within_tolerance,
                "fit": row.best.fit(),
                "selection": row.best.selection,
                "candidates": row.best.candidates,
                "total_trains": row.best.trains.len(),
                "trains": trains,
            })
        })
        .collect();

    let output = serde_json::json!({
        "leadscrew": {
            "pitch": ratio_to_f64(&leadscrew.0.value()),
            "unit": leadscrew.0.system().unit(),
        },
        "results": results,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_rows(rows: &[MatchRow], leadscrew: &Leadscrew, max_trains: usize) {
    println!(
        "system\tpitch\tunit\ttarget_ratio\trank\ttrain\tgears\tratio\terror_ppm\tpitch_cut\tpitch_error_ppm\tfit\tselection\twithin_tolerance"
    );

    for row in rows {
        let (system, pitch, unit) = match &row.target {
            Some(t) => (
                match t.pitch.system() {
                    ThreadSystem::Metric => "metric",
                    ThreadSystem::Imperial => "imperial",
                },
                format!("{:.4}", ratio_to_f64(&t.pitch.value())),
                t.pitch.system().unit(),
            ),
            None => ("ratio", "-".to_string(), "-"),
        };

        for (rank, line) in train_lines(row, leadscrew, max_trains).iter().enumerate() {
            println!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.1}\t{:.4}\t{}\t{}\t{}\t{}",
                system,
                pitch,
                unit,
                row.best.target,
                rank + 1,
                line.train,
                line.train.gear_count(),
                line.train.ratio(),
                line.error_ppm,
                line.cut,
                line.cut_error_ppm
                    .map_or_else(|| "-".to_string(), |ppm| format!("{ppm:.1}")),
                line.fit,
                row.best.selection,
                row.best.within_tolerance,
            );
        }
    }
}
