//! Duplicate effective-name detection
//!
//! Compaction can bring unrelated records into the same node. Two
//! records sharing an effective name there would produce clashing
//! bindings in one generated unit, so generation stops before emitting.

use std::collections::BTreeMap;
use std::fmt;

use cfgbind_meta::{ConfigRecord, Namespace};

/// Records co-located in one namespace that share an effective name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConflict {
    pub namespace: Namespace,
    pub name: String,
    /// Origins of every record using the name, sorted.
    pub origins: Vec<String>,
}

impl fmt::Display for NameConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "name '{}' in namespace {} is declared by {}",
            self.name,
            self.namespace,
            self.origins.join(", ")
        )
    }
}

/// Find every effective name used more than once among `records`.
pub(crate) fn find_conflicts<'a>(
    namespace: &Namespace,
    records: impl IntoIterator<Item = &'a ConfigRecord>,
) -> Vec<NameConflict> {
    let mut by_name: BTreeMap<&str, Vec<&ConfigRecord>> = BTreeMap::new();
    for record in records {
        by_name.entry(record.effective_name()).or_default().push(record);
    }

    by_name
        .into_iter()
        .filter(|(_, records)| records.len() > 1)
        .map(|(name, records)| {
            let mut origins: Vec<String> = records.iter().map(|r| r.name.origin()).collect();
            origins.sort();
            NameConflict {
                namespace: namespace.clone(),
                name: name.to_string(),
                origins,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfgbind_meta::Accessibility;

    fn record(origin: &str, short_name: Option<&str>) -> ConfigRecord {
        let builder = ConfigRecord::builder(origin.parse().unwrap(), Accessibility::Public, "String");
        match short_name {
            Some(name) => builder.short_name(name).build(),
            None => builder.build(),
        }
    }

    #[test]
    fn test_no_conflict_for_distinct_names() {
        let records = [record("x.a.A:one", None), record("x.b.B:two", None)];
        assert!(find_conflicts(&Namespace::parse("x"), &records).is_empty());
    }

    #[test]
    fn test_conflict_lists_every_origin() {
        let records = [
            record("x.b.B:flag", None),
            record("x.a.A:flag", None),
            record("x.c.C:other", Some("flag")),
        ];
        let conflicts = find_conflicts(&Namespace::parse("x"), &records);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].name, "flag");
        assert_eq!(
            conflicts[0].origins,
            vec!["x.a.A:flag", "x.b.B:flag", "x.c.C:other"]
        );
        assert_eq!(
            conflicts[0].to_string(),
            "name 'flag' in namespace x is declared by x.a.A:flag, x.b.B:flag, x.c.C:other"
        );
    }
}
