//! Configuration records and generator configuration for cfgbind.
//!
//! This crate provides:
//!
//! - [`ConfigRecord`]: one discovered configuration declaration, tied to a
//!   [`QualifiedName`] origin and an [`Accessibility`] level
//! - [`RecordManifest`]: the file format the external scanner hands over,
//!   validated into records at load time
//! - [`GeneratorConfig`]: `cfgbind.toml`, selecting the [`DiTarget`] and
//!   where generated units land

pub mod config;
pub mod error;
pub mod manifest;
pub mod namespace;
pub mod record;
pub mod validation;

pub use config::{CONFIG_FILE_NAME, DiTarget, GeneratorConfig, GeneratorSection, InputSection};
pub use error::{Error, Result};
pub use manifest::{RecordEntry, RecordManifest};
pub use namespace::Namespace;
pub use record::{Accessibility, ConfigRecord, ConfigRecordBuilder, QualifiedName};
