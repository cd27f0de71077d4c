//! Configuration records discovered by the scanner

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::namespace::Namespace;
use crate::validation::{is_dotted_path, is_identifier};

/// Accessibility of the original declaration.
///
/// Governs whether the generated binding may move away from the
/// declaration's namespace during compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    /// Reachable only through a reflective accessor.
    Private,
    /// Directly reachable from code in the same namespace only.
    #[serde(alias = "package")]
    PackageScoped,
    /// Directly reachable from anywhere.
    Public,
}

impl Accessibility {
    /// Whether a binding for this record may live outside its origin namespace.
    pub fn is_relocatable(&self) -> bool {
        matches!(self, Accessibility::Public | Accessibility::Private)
    }

    /// Whether generated code must go through a reflective accessor.
    pub fn needs_reflection(&self) -> bool {
        matches!(self, Accessibility::Private)
    }
}

impl FromStr for Accessibility {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "private" => Ok(Accessibility::Private),
            "package_scoped" | "package" | "package-scoped" => Ok(Accessibility::PackageScoped),
            "public" => Ok(Accessibility::Public),
            _ => Err(Error::InvalidAccessibility {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessibility::Private => write!(f, "private"),
            Accessibility::PackageScoped => write!(f, "package_scoped"),
            Accessibility::Public => write!(f, "public"),
        }
    }
}

/// Where a configuration declaration lives: `namespace.Container.member`.
///
/// The textual origin form is `<namespace>.<Container>:<member>`, e.g.
/// `x.things.T1:flag1`. `Display` renders the dotted fully qualified path
/// (`x.things.T1.flag1`), which is also the runtime lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: Namespace,
    pub container: String,
    pub member: String,
}

impl QualifiedName {
    pub fn new(namespace: Namespace, container: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            namespace,
            container: container.into(),
            member: member.into(),
        }
    }

    /// The local declaration name, `Container.member`.
    pub fn declaration_name(&self) -> String {
        format!("{}.{}", self.container, self.member)
    }

    /// The textual origin form, `namespace.Container:member`.
    pub fn origin(&self) -> String {
        format!("{}:{}", self.namespace.qualify(&self.container), self.member)
    }
}

impl FromStr for QualifiedName {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::InvalidOrigin {
            origin: s.to_string(),
            reason: reason.to_string(),
        };

        let (owner, member) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| invalid("expected '<namespace>.<Container>:<member>'"))?;
        if member.is_empty() {
            return Err(invalid("member name is empty"));
        }

        let (namespace, container) = match owner.rsplit_once('.') {
            Some((ns, container)) => (Namespace::parse(ns), container),
            None => (Namespace::root(), owner),
        };
        if container.is_empty() {
            return Err(invalid("container name is empty"));
        }
        if !is_dotted_path(namespace.as_str()) {
            return Err(invalid(&format!(
                "namespace '{}' is not a dotted identifier path",
                namespace.as_str()
            )));
        }
        if !is_identifier(container) {
            return Err(invalid(&format!("container '{container}' is not an identifier")));
        }
        if !is_identifier(member) {
            return Err(invalid(&format!("member '{member}' is not an identifier")));
        }

        Ok(Self::new(namespace, container, member))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}",
            self.namespace.qualify(&self.container),
            self.member
        )
    }
}

/// One discovered configuration declaration.
///
/// Records are identified by their qualified name: equality and hashing
/// use it alone, and ordering compares it case-insensitively (ties broken
/// by the exact text, then by the name's parts) so emitted bindings come
/// out in a stable order.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigRecord {
    #[serde(serialize_with = "serialize_display")]
    pub name: QualifiedName,
    pub accessibility: Accessibility,
    pub declared_type: String,
    /// Override for the external lookup name.
    pub short_name: Option<String>,
    pub description: Option<String>,
    /// Qualifier annotation text, forwarded verbatim.
    pub qualifier: Option<String>,
    /// Binding annotation text, forwarded verbatim.
    pub binding: Option<String>,
    /// Whether the declaration carries a default value.
    pub has_default: bool,
}

fn serialize_display<S: serde::Serializer>(
    name: &QualifiedName,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&name.origin())
}

impl ConfigRecord {
    pub fn builder(
        name: QualifiedName,
        accessibility: Accessibility,
        declared_type: impl Into<String>,
    ) -> ConfigRecordBuilder {
        ConfigRecordBuilder {
            record: ConfigRecord {
                name,
                accessibility,
                declared_type: declared_type.into(),
                short_name: None,
                description: None,
                qualifier: None,
                binding: None,
                has_default: true,
            },
        }
    }

    /// The namespace the declaration was found in.
    pub fn origin_namespace(&self) -> &Namespace {
        &self.name.namespace
    }

    /// The name used for external lookup: the short name override, or the member name.
    pub fn effective_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name.member)
    }

    /// The annotation that keys the value binding, if one was declared.
    pub fn value_key(&self) -> Option<&str> {
        self.qualifier.as_deref().or(self.binding.as_deref())
    }

    /// The dotted fully qualified path, used as the runtime lookup key.
    pub fn fully_qualified_name(&self) -> String {
        self.name.to_string()
    }
}

impl PartialEq for ConfigRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ConfigRecord {}

impl Hash for ConfigRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Ord for ConfigRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        let mine = self.fully_qualified_name();
        let theirs = other.fully_qualified_name();
        mine.to_lowercase()
            .cmp(&theirs.to_lowercase())
            .then_with(|| mine.cmp(&theirs))
            .then_with(|| self.name.namespace.cmp(&other.name.namespace))
            .then_with(|| self.name.container.cmp(&other.name.container))
            .then_with(|| self.name.member.cmp(&other.name.member))
    }
}

impl PartialOrd for ConfigRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Builder for [`ConfigRecord`].
#[derive(Debug, Clone)]
pub struct ConfigRecordBuilder {
    record: ConfigRecord,
}

impl ConfigRecordBuilder {
    pub fn short_name(mut self, name: impl Into<String>) -> Self {
        self.record.short_name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.record.description = Some(description.into());
        self
    }

    pub fn qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.record.qualifier = Some(qualifier.into());
        self
    }

    pub fn binding(mut self, binding: impl Into<String>) -> Self {
        self.record.binding = Some(binding.into());
        self
    }

    pub fn has_default(mut self, has_default: bool) -> Self {
        self.record.has_default = has_default;
        self
    }

    pub fn build(self) -> ConfigRecord {
        self.record
    }
}
