//! Command implementations for cfgbind-cli

pub mod check;
pub mod generate;
pub mod plan;

use std::path::Path;

use cfgbind_core::GenerationEngine;
use cfgbind_fs::NormalizedPath;
use cfgbind_meta::{ConfigRecord, GeneratorConfig};

use crate::cli::InputArgs;
use crate::error::Result;

pub use check::run_check;
pub use generate::run_generate;
pub use plan::run_plan;

/// Load the generator config, apply command-line overrides, and read the records.
///
/// Manifests and output directories given on the command line are taken
/// relative to the working directory, not the config file.
pub fn load_engine(config_path: &Path, input: &InputArgs) -> Result<(GenerationEngine, Vec<ConfigRecord>)> {
    let mut config = GeneratorConfig::load_or_default(&NormalizedPath::new(config_path))?;

    if !input.manifests.is_empty() {
        config.input.manifests = input
            .manifests
            .iter()
            .map(|p| NormalizedPath::new(p).as_str().to_string())
            .collect();
    }
    if let Some(target) = input.target {
        config.generator.target = target;
    }
    if let Some(out) = &input.out {
        config.generator.output_dir = NormalizedPath::new(out).as_str().to_string();
    }
    tracing::debug!(
        di_target = %config.generator.target,
        output_dir = %config.generator.output_dir,
        manifests = config.input.manifests.len(),
        "resolved generator config"
    );

    let engine = GenerationEngine::new(config);
    let records = engine.load_configured_records()?;
    Ok((engine, records))
}
