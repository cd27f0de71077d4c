//! Generator configuration (`cfgbind.toml`)
//!
//! ```toml
//! [generator]
//! target = "guice"
//! output_dir = "build/generated/cfgbind"
//!
//! [input]
//! manifests = ["records.toml"]
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use cfgbind_fs::{ConfigStore, NormalizedPath};

use crate::error::{Error, Result};

/// Default config file name looked up next to the build.
pub const CONFIG_FILE_NAME: &str = "cfgbind.toml";

/// The dependency-injection framework generated units are written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiTarget {
    /// Dagger `@Module` classes with `@Provides` methods.
    #[default]
    Dagger,
    /// Guice `AbstractModule` subclasses.
    Guice,
}

impl DiTarget {
    /// The class name used for a generated unit when none is configured.
    pub fn default_unit_name(&self) -> &'static str {
        match self {
            DiTarget::Dagger => "ConfigDaggerModule",
            DiTarget::Guice => "ConfigGuiceModule",
        }
    }
}

impl FromStr for DiTarget {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dagger" => Ok(DiTarget::Dagger),
            "guice" => Ok(DiTarget::Guice),
            _ => Err(Error::InvalidTarget {
                target: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DiTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiTarget::Dagger => write!(f, "dagger"),
            DiTarget::Guice => write!(f, "guice"),
        }
    }
}

/// `[generator]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSection {
    #[serde(default)]
    pub target: DiTarget,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Overrides [`DiTarget::default_unit_name`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
}

fn default_output_dir() -> String {
    "build/generated/cfgbind".to_string()
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            target: DiTarget::default(),
            output_dir: default_output_dir(),
            unit_name: None,
        }
    }
}

/// `[input]` section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSection {
    /// Record manifests, relative to the config file's directory.
    #[serde(default)]
    pub manifests: Vec<String>,
}

/// Complete generator configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub generator: GeneratorSection,
    #[serde(default)]
    pub input: InputSection,
}

impl GeneratorConfig {
    /// Load the config file, or the defaults when it does not exist.
    ///
    /// Relative `output_dir` and manifest paths are resolved against the
    /// directory holding the config file.
    pub fn load_or_default(path: &NormalizedPath) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path, "no generator config found, using defaults");
            return Ok(Self::default());
        }

        let mut config: Self = ConfigStore::new().load(path)?;
        config.validate(path)?;

        if let Some(base) = path.parent() {
            config.generator.output_dir = resolve(&base, &config.generator.output_dir);
            config.input.manifests = config
                .input
                .manifests
                .iter()
                .map(|m| resolve(&base, m))
                .collect();
        }
        Ok(config)
    }

    /// The configured unit name, or the target's default.
    pub fn unit_name(&self) -> &str {
        self.generator
            .unit_name
            .as_deref()
            .unwrap_or_else(|| self.generator.target.default_unit_name())
    }

    fn validate(&self, path: &NormalizedPath) -> Result<()> {
        if let Some(name) = &self.generator.unit_name
            && !crate::validation::is_identifier(name)
        {
            return Err(Error::InvalidConfig {
                path: path.to_native(),
                message: format!("unit_name '{name}' is not an identifier"),
            });
        }
        if self.generator.output_dir.trim().is_empty() {
            return Err(Error::InvalidConfig {
                path: path.to_native(),
                message: "output_dir is empty".to_string(),
            });
        }
        Ok(())
    }
}

fn resolve(base: &NormalizedPath, relative: &str) -> String {
    if std::path::Path::new(relative).is_absolute() {
        relative.to_string()
    } else {
        base.join(relative).as_str().to_string()
    }
}
