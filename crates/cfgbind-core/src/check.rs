//! Drift check types
//!
//! Report whether the generated units on disk match what the current
//! records would render to.

use serde::{Deserialize, Serialize};

/// Status of a drift check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    /// Every unit on disk matches
    Healthy,
    /// Some units have not been generated
    Missing,
    /// Some units differ from their rendered content
    Drifted,
}

/// A unit that is missing or has drifted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftItem {
    /// Qualified unit name
    pub unit: String,
    /// The file path affected
    pub file: String,
    /// Human-readable description of the drift
    pub description: String,
}

/// Report from a drift check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub status: CheckStatus,
    pub drifted: Vec<DriftItem>,
    pub missing: Vec<DriftItem>,
    /// Units checked
    pub checked: usize,
}

impl CheckReport {
    /// Build a report, picking the worst status: Drifted > Missing > Healthy.
    pub fn new(checked: usize, missing: Vec<DriftItem>, drifted: Vec<DriftItem>) -> Self {
        let status = if !drifted.is_empty() {
            CheckStatus::Drifted
        } else if !missing.is_empty() {
            CheckStatus::Missing
        } else {
            CheckStatus::Healthy
        };
        Self {
            status,
            drifted,
            missing,
            checked,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Healthy
    }
}
