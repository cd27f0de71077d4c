//! Plan command implementation

use std::path::Path;

use colored::Colorize;

use super::load_engine;
use crate::cli::InputArgs;
use crate::error::Result;

/// Run the plan command
///
/// Lists every unit generate would write without touching the disk.
pub fn run_plan(config: &Path, input: &InputArgs, json: bool) -> Result<bool> {
    let (engine, records) = load_engine(config, input)?;
    let units = engine.plan(&records)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&units)?);
        return Ok(true);
    }

    println!(
        "{} {} {} units for {} records",
        "=>".blue().bold(),
        units.len(),
        engine.target(),
        records.len()
    );
    for unit in &units {
        println!();
        println!("{} {}", unit.unit.bold(), format!("({})", unit.path).dimmed());
        for include in &unit.includes {
            println!("   {} {}", "includes".dimmed(), include.cyan());
        }
        for record in &unit.records {
            println!("   {} {}", "-".green(), record);
        }
    }

    Ok(true)
}
