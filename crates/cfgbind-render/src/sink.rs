//! Destinations for rendered units

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use cfgbind_fs::checksum::{compute_content_checksum, compute_file_checksum};
use cfgbind_fs::{NormalizedPath, io};
use cfgbind_meta::Namespace;

use crate::error::{Error, Result};

/// File extension of generated units.
pub const UNIT_EXTENSION: &str = "java";

/// Identifies one generated unit: the namespace it belongs to and its class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId {
    pub namespace: Namespace,
    pub name: String,
}

impl UnitId {
    pub fn new(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    /// `namespace.Name`, or `Name` for the root namespace.
    pub fn qualified_name(&self) -> String {
        self.namespace.qualify(&self.name)
    }

    /// Path of the unit's file relative to an output root: `a/b/Name.java`.
    pub fn relative_path(&self) -> String {
        let file = format!("{}.{}", self.name, UNIT_EXTENSION);
        self.namespace
            .segments()
            .chain(std::iter::once(file.as_str()))
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

/// What a sink did with a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    /// The unit was written.
    Written,
    /// Identical content was already present.
    Unchanged,
    /// Dry run: the unit would have been written.
    WouldWrite,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOutcome::Written => write!(f, "written"),
            WriteOutcome::Unchanged => write!(f, "unchanged"),
            WriteOutcome::WouldWrite => write!(f, "would write"),
        }
    }
}

/// Receives each materialized unit exactly once, children before parents.
pub trait UnitSink {
    fn write_unit(&mut self, unit: &UnitId, content: &str) -> Result<WriteOutcome>;
}

/// Writes units below a root directory, one file per unit.
///
/// Files whose checksum already matches the rendered text are left
/// untouched so build tools do not see spurious modifications.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: NormalizedPath,
    dry_run: bool,
}

impl DirectorySink {
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self {
            root: root.into(),
            dry_run: false,
        }
    }

    /// Report what would be written without touching the disk.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Where `unit` is written.
    pub fn path_for(&self, unit: &UnitId) -> NormalizedPath {
        self.root.join(&unit.relative_path())
    }

    fn is_current(&self, path: &NormalizedPath, content: &str) -> Result<bool> {
        if !path.is_file() {
            return Ok(false);
        }
        let on_disk = compute_file_checksum(&path.to_native()).map_err(|source| Error::Io {
            path: path.to_native(),
            source,
        })?;
        Ok(on_disk == compute_content_checksum(content))
    }
}

impl UnitSink for DirectorySink {
    fn write_unit(&mut self, unit: &UnitId, content: &str) -> Result<WriteOutcome> {
        let path = self.path_for(unit);
        if path.is_dir() {
            return Err(Error::SinkRejected {
                unit: unit.to_string(),
                message: format!("{path} is a directory"),
            });
        }

        if self.is_current(&path, content)? {
            tracing::debug!(unit = %unit, path = %path, "unit unchanged");
            return Ok(WriteOutcome::Unchanged);
        }
        if self.dry_run {
            tracing::debug!(unit = %unit, path = %path, "dry run, not writing unit");
            return Ok(WriteOutcome::WouldWrite);
        }

        io::write_text(&path, content)?;
        tracing::debug!(unit = %unit, path = %path, "wrote unit");
        Ok(WriteOutcome::Written)
    }
}

/// Keeps rendered units in memory, ordered by unit id.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    units: BTreeMap<UnitId, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, unit: &UnitId) -> Option<&str> {
        self.units.get(unit).map(String::as_str)
    }

    pub fn units(&self) -> impl Iterator<Item = (&UnitId, &str)> {
        self.units.iter().map(|(id, text)| (id, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn into_units(self) -> BTreeMap<UnitId, String> {
        self.units
    }
}

impl UnitSink for MemorySink {
    fn write_unit(&mut self, unit: &UnitId, content: &str) -> Result<WriteOutcome> {
        match self.units.insert(unit.clone(), content.to_string()) {
            Some(previous) if previous == content => Ok(WriteOutcome::Unchanged),
            _ => Ok(WriteOutcome::Written),
        }
    }
}
