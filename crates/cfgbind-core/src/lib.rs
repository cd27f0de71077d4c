//! Generation engine for cfgbind
//!
//! Ties the layers together: records are loaded from manifests, arranged
//! and compacted in a [`cfgbind_tree::NamespaceTree`], planned into units,
//! rendered for the configured DI target and handed to a
//! [`cfgbind_render::UnitSink`].
//!
//! - **generate**: write every materialized unit, collecting per-unit failures
//! - **check**: compare freshly rendered units with the files on disk
//! - **plan**: list the units that would be generated

pub mod check;
pub mod engine;
pub mod error;
pub mod report;

pub use check::{CheckReport, CheckStatus, DriftItem};
pub use engine::GenerationEngine;
pub use error::{Error, Result};
pub use report::{Diagnostic, GenerationReport, PlannedUnit, Severity, UnitSummary};
