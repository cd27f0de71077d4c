//! Filesystem layer for cfgbind
//!
//! Provides normalized paths, atomic writes for generated units,
//! content checksums for drift detection, and format-agnostic loading
//! of configuration and manifest files.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::NormalizedPath;
