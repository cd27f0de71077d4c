//! Error types for cfgbind-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] cfgbind_fs::Error),

    #[error("Invalid origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("Malformed config record {origin}: {reason}")]
    MalformedRecord { origin: String, reason: String },

    #[error("Invalid accessibility: {value}")]
    InvalidAccessibility { value: String },

    #[error("Unknown DI target: {target}")]
    InvalidTarget { target: String },

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },
}
