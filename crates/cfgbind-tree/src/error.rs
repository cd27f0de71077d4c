//! Error types for cfgbind-tree

use crate::conflict::NameConflict;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Duplicate config record {origin}")]
    DuplicateRecord { origin: String },

    #[error("Cannot insert {origin}: the tree has already been compacted")]
    InsertAfterCompaction { origin: String },

    #[error("{}", describe_conflicts(.0))]
    NameConflicts(Vec<NameConflict>),
}

fn describe_conflicts(conflicts: &[NameConflict]) -> String {
    let lines: Vec<String> = conflicts.iter().map(ToString::to_string).collect();
    format!(
        "{} duplicate config name(s) after compaction:\n  {}",
        conflicts.len(),
        lines.join("\n  ")
    )
}
