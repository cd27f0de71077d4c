//! Reports produced by generation and planning

use std::fmt;

use serde::{Deserialize, Serialize};

use cfgbind_render::WriteOutcome;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A problem found while generating, tied to the unit it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Qualified name of the unit concerned
    pub unit: String,
    pub message: String,
}

impl Diagnostic {
    pub fn error(unit: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            unit: unit.into(),
            message: message.into(),
        }
    }

    pub fn warning(unit: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            unit: unit.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.unit, self.message)
    }
}

/// One unit handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSummary {
    /// Qualified unit name, e.g. `x.things.ConfigDaggerModule`
    pub unit: String,
    pub namespace: String,
    /// Output path relative to the output directory
    pub path: String,
    /// Origins of the records bound by the unit
    pub records: Vec<String>,
    /// Namespaces of the included units
    pub includes: Vec<String>,
    pub outcome: WriteOutcome,
}

/// Report from a generate operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    /// False when any diagnostic is an error
    pub success: bool,
    /// Units that reached the sink, children before parents
    pub units: Vec<UnitSummary>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    pub fn new(units: Vec<UnitSummary>, diagnostics: Vec<Diagnostic>) -> Self {
        let success = diagnostics.iter().all(|d| d.severity != Severity::Error);
        Self {
            success,
            units,
            diagnostics,
        }
    }

    /// Number of units with the given outcome.
    pub fn count(&self, outcome: WriteOutcome) -> usize {
        self.units.iter().filter(|u| u.outcome == outcome).count()
    }
}

/// A unit the engine would generate, as listed by `plan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedUnit {
    pub unit: String,
    pub namespace: String,
    pub path: String,
    pub records: Vec<String>,
    pub includes: Vec<String>,
}
