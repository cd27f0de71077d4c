//! Record manifests handed over by the declaration scanner
//!
//! A manifest lists every discovered declaration. In TOML:
//!
//! ```toml
//! [[record]]
//! origin = "x.things.T1:flag1"
//! accessibility = "package_scoped"
//! type = "String"
//! name = "alternate_name"
//! description = "Shown in --help output"
//! ```
//!
//! Entries are validated when converted into [`ConfigRecord`]s, so a
//! malformed declaration never reaches the namespace tree.

use serde::{Deserialize, Serialize};

use cfgbind_fs::{ConfigStore, NormalizedPath};

use crate::error::{Error, Result};
use crate::record::{Accessibility, ConfigRecord, QualifiedName};
use crate::validation::is_identifier;

/// A file of scanned record entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordManifest {
    #[serde(default, rename = "record")]
    pub records: Vec<RecordEntry>,
}

/// One scanned declaration, as written in a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    /// `namespace.Container:member`
    pub origin: String,
    pub accessibility: Accessibility,
    #[serde(rename = "type")]
    pub declared_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    #[serde(default = "default_has_default")]
    pub has_default: bool,
}

fn default_has_default() -> bool {
    true
}

impl RecordManifest {
    /// Load a manifest from a TOML, JSON or YAML file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let manifest: Self = ConfigStore::new().load(path)?;
        tracing::debug!(path = %path, records = manifest.records.len(), "loaded record manifest");
        Ok(manifest)
    }

    /// Validate every entry and convert it into a record.
    ///
    /// Fails on the first malformed entry.
    pub fn into_records(self) -> Result<Vec<ConfigRecord>> {
        self.records
            .into_iter()
            .map(RecordEntry::into_record)
            .collect()
    }
}

impl RecordEntry {
    /// Validate this entry and convert it into a record.
    pub fn into_record(self) -> Result<ConfigRecord> {
        let malformed = |reason: String| Error::MalformedRecord {
            origin: self.origin.clone(),
            reason,
        };

        let name: QualifiedName = self.origin.parse().map_err(|e| match e {
            Error::InvalidOrigin { reason, .. } => malformed(reason),
            other => other,
        })?;

        if self.declared_type.trim().is_empty() {
            return Err(malformed("declared type is missing".to_string()));
        }
        if let Some(short_name) = &self.name
            && !is_identifier(short_name)
        {
            return Err(malformed(format!(
                "name '{short_name}' is not an identifier"
            )));
        }
        if self.qualifier.is_some() && self.binding.is_some() {
            return Err(malformed(
                "a value binding takes either a qualifier or a binding annotation, not both"
                    .to_string(),
            ));
        }

        let mut builder =
            ConfigRecord::builder(name, self.accessibility, self.declared_type.trim())
                .has_default(self.has_default);
        if let Some(short_name) = self.name {
            builder = builder.short_name(short_name);
        }
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        if let Some(qualifier) = self.qualifier {
            builder = builder.qualifier(qualifier);
        }
        if let Some(binding) = self.binding {
            builder = builder.binding(binding);
        }
        Ok(builder.build())
    }
}
