//! Generate command implementation

use std::path::Path;

use colored::Colorize;

use cfgbind_core::Severity;
use cfgbind_render::{DirectorySink, WriteOutcome};

use super::load_engine;
use crate::cli::InputArgs;
use crate::error::Result;

/// Run the generate command
///
/// Writes every materialized unit below the output directory. Returns
/// false when any unit failed to generate.
pub fn run_generate(config: &Path, input: &InputArgs, dry_run: bool, json: bool) -> Result<bool> {
    let (engine, records) = load_engine(config, input)?;
    let mut sink = DirectorySink::new(engine.output_dir()).dry_run(dry_run);
    let report = engine.generate(&records, &mut sink)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report.success);
    }

    let verb = if dry_run { "Previewing" } else { "Generating" };
    println!(
        "{} {} {} units into {}",
        "=>".blue().bold(),
        verb,
        engine.target(),
        engine.output_dir().as_str().cyan()
    );

    for unit in &report.units {
        let label = match unit.outcome {
            WriteOutcome::Written => "written".green(),
            WriteOutcome::Unchanged => "unchanged".dimmed(),
            WriteOutcome::WouldWrite => "would write".yellow(),
        };
        println!(
            "   {} {} ({} records)",
            label,
            unit.path.cyan(),
            unit.records.len()
        );
    }

    for diagnostic in &report.diagnostics {
        let label = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        println!("   {} {}: {}", label, diagnostic.unit, diagnostic.message);
    }

    println!();
    if report.success {
        println!(
            "{} {} units, {} written, {} unchanged",
            "OK".green().bold(),
            report.units.len(),
            report.count(WriteOutcome::Written) + report.count(WriteOutcome::WouldWrite),
            report.count(WriteOutcome::Unchanged)
        );
    } else {
        println!("{} Some units could not be generated.", "FAILED".red().bold());
    }

    Ok(report.success)
}
