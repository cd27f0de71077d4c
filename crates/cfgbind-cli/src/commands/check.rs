//! Check command implementation
//!
//! Compares the units on disk with what the current records render to.

use std::path::Path;

use colored::Colorize;
use similar::{ChangeTag, TextDiff};

use cfgbind_core::{CheckStatus, DriftItem};
use cfgbind_fs::{NormalizedPath, io};
use cfgbind_render::MemorySink;

use super::load_engine;
use crate::cli::InputArgs;
use crate::error::{CliError, Result};

/// Run the check command
///
/// Returns true only when every unit on disk is current.
pub fn run_check(config: &Path, input: &InputArgs, json: bool, diff: bool) -> Result<bool> {
    let (engine, records) = load_engine(config, input)?;
    let report = engine.check(&records, &engine.output_dir())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report.is_healthy());
    }

    println!(
        "{} Checking {} generated units...",
        "=>".blue().bold(),
        report.checked
    );

    match report.status {
        CheckStatus::Healthy => {
            println!("{} All generated units are up to date.", "OK".green().bold());
        }
        CheckStatus::Missing | CheckStatus::Drifted => {
            if !report.drifted.is_empty() {
                println!("{} Generated units have drifted:", "DRIFTED".red().bold());
                print_items(&report.drifted, "!");
            }
            if !report.missing.is_empty() {
                println!("{} Some units are missing:", "MISSING".yellow().bold());
                print_items(&report.missing, "-");
            }
            if diff && !report.drifted.is_empty() {
                let expected = engine.render(&records)?;
                for item in &report.drifted {
                    print_diff(&expected, item)?;
                }
            }
            println!();
            println!("Run {} to regenerate.", "cfgbind generate".cyan());
        }
    }

    Ok(report.is_healthy())
}

fn print_items(items: &[DriftItem], marker: &str) {
    for item in items {
        println!(
            "   {} {} ({}): {}",
            marker.yellow(),
            item.file.cyan(),
            item.unit.dimmed(),
            item.description
        );
    }
}

fn print_diff(expected: &MemorySink, item: &DriftItem) -> Result<()> {
    let rendered = expected
        .units()
        .find(|(unit, _)| unit.to_string() == item.unit)
        .map(|(_, content)| content)
        .ok_or_else(|| CliError::user(format!("No rendered content for {}", item.unit)))?;
    let on_disk = io::read_text(&NormalizedPath::new(&item.file))?;

    println!();
    println!("{} {}", "diff".bold(), item.file);
    let diff = TextDiff::from_lines(on_disk.as_str(), rendered);
    for change in diff.iter_all_changes() {
        let line = change.value().trim_end_matches('\n');
        match change.tag() {
            ChangeTag::Delete => println!("{}", format!("-{line}").red()),
            ChangeTag::Insert => println!("{}", format!("+{line}").green()),
            ChangeTag::Equal => {}
        }
    }
    Ok(())
}
