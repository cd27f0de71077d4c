//! The namespace tree and its pull-up compaction

use std::collections::{BTreeMap, BTreeSet};

use cfgbind_meta::{ConfigRecord, Namespace};

use crate::conflict::{NameConflict, find_conflicts};
use crate::error::{Error, Result};

/// One namespace segment. Owned exclusively by its parent's `children`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) children: BTreeMap<String, Node>,
    pub(crate) records: BTreeSet<ConfigRecord>,
}

impl Node {
    fn descend(&self, namespace: &Namespace) -> Option<&Node> {
        namespace
            .segments()
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    fn descend_or_create(&mut self, namespace: &Namespace) -> &mut Node {
        namespace.segments().fold(self, |node, segment| {
            node.children.entry(segment.to_string()).or_default()
        })
    }

    fn walk<'a>(&'a self, namespace: Namespace, visit: &mut impl FnMut(&Namespace, &'a Node)) {
        visit(&namespace, self);
        for (segment, child) in &self.children {
            child.walk(namespace.child(segment), visit);
        }
    }
}

/// What a [`NamespaceTree::compact`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactionSummary {
    /// The node relocatable records were pulled up to.
    pub ancestor: Namespace,
    /// Number of records moved to the ancestor.
    pub relocated: usize,
    /// Namespaces removed from the tree, sorted.
    pub pruned: Vec<Namespace>,
}

/// Records arranged by origin namespace.
///
/// Built empty, filled with [`insert`](Self::insert), compacted once,
/// then read during unit planning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceTree {
    pub(crate) root: Node,
    /// Chosen by the first compaction and reused afterwards.
    ancestor: Option<Namespace>,
    len: usize,
}

impl NamespaceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree holding all `records`, not yet compacted.
    pub fn from_records(records: impl IntoIterator<Item = ConfigRecord>) -> Result<Self> {
        let mut tree = Self::new();
        for record in records {
            tree.insert(record)?;
        }
        Ok(tree)
    }

    /// Place a record at the node of its origin namespace, creating nodes on the way.
    pub fn insert(&mut self, record: ConfigRecord) -> Result<()> {
        if self.ancestor.is_some() {
            return Err(Error::InsertAfterCompaction {
                origin: record.name.origin(),
            });
        }

        let node = self.root.descend_or_create(record.origin_namespace());
        if node.records.contains(&record) {
            return Err(Error::DuplicateRecord {
                origin: record.name.origin(),
            });
        }

        tracing::debug!(
            origin = %record.name.origin(),
            accessibility = %record.accessibility,
            namespace = %record.origin_namespace(),
            "adding config record"
        );
        node.records.insert(record);
        self.len += 1;
        Ok(())
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The deepest node reached from the root through single-child nodes.
    ///
    /// Once the tree is compacted this is the ancestor the compaction used.
    pub fn common_ancestor(&self) -> Namespace {
        if let Some(ancestor) = &self.ancestor {
            return ancestor.clone();
        }

        let mut namespace = Namespace::root();
        let mut node = &self.root;
        while node.children.len() == 1 {
            let Some((segment, child)) = node.children.first_key_value() else {
                break;
            };
            namespace = namespace.child(segment);
            node = child;
        }
        namespace
    }

    /// Pull public and private records up to the common ancestor and
    /// prune every branch left without records.
    ///
    /// Package-scoped records stay where they were declared. Calling this
    /// again reuses the first call's ancestor and changes nothing.
    pub fn compact(&mut self) -> CompactionSummary {
        let ancestor = self.common_ancestor();
        let mut relocated = Vec::new();
        let mut pruned = Vec::new();

        pull_up(
            &mut self.root,
            &Namespace::root(),
            &ancestor,
            &mut relocated,
            &mut pruned,
        );

        let count = relocated.len();
        self.root
            .descend_or_create(&ancestor)
            .records
            .extend(relocated);
        self.ancestor = Some(ancestor.clone());

        pruned.sort();
        tracing::info!(
            ancestor = %ancestor,
            relocated = count,
            pruned = pruned.len(),
            "compacted namespace tree"
        );

        CompactionSummary {
            ancestor,
            relocated: count,
            pruned,
        }
    }

    /// Report every namespace where two records share an effective name.
    pub fn check_names(&self) -> Result<()> {
        let mut conflicts: Vec<NameConflict> = Vec::new();
        self.root.walk(Namespace::root(), &mut |namespace, node| {
            conflicts.extend(find_conflicts(namespace, &node.records));
        });

        if conflicts.is_empty() {
            Ok(())
        } else {
            for conflict in &conflicts {
                tracing::error!(%conflict, "duplicate config name");
            }
            Err(Error::NameConflicts(conflicts))
        }
    }

    /// Whether a node exists for `namespace`.
    pub fn contains_namespace(&self, namespace: &Namespace) -> bool {
        self.root.descend(namespace).is_some()
    }

    /// Records currently held at `namespace`, in record order.
    pub fn records_at(&self, namespace: &Namespace) -> Vec<&ConfigRecord> {
        self.root
            .descend(namespace)
            .map(|node| node.records.iter().collect())
            .unwrap_or_default()
    }

    /// Every node's namespace, parents before children, siblings sorted.
    pub fn namespaces(&self) -> Vec<Namespace> {
        let mut namespaces = Vec::new();
        self.root.walk(Namespace::root(), &mut |namespace, _| {
            namespaces.push(namespace.clone());
        });
        namespaces
    }

    /// Every record paired with the namespace holding it.
    pub fn placements(&self) -> Vec<(Namespace, &ConfigRecord)> {
        let mut placements = Vec::new();
        self.root.walk(Namespace::root(), &mut |namespace, node| {
            placements.extend(node.records.iter().map(|r| (namespace.clone(), r)));
        });
        placements
    }
}

/// Returns whether `node` can be removed from its parent.
fn pull_up(
    node: &mut Node,
    namespace: &Namespace,
    ancestor: &Namespace,
    relocated: &mut Vec<ConfigRecord>,
    pruned: &mut Vec<Namespace>,
) -> bool {
    let mut prunable = Vec::new();
    for (segment, child) in node.children.iter_mut() {
        let child_namespace = namespace.child(segment);
        if pull_up(child, &child_namespace, ancestor, relocated, pruned) {
            prunable.push(segment.clone());
            pruned.push(child_namespace);
        }
    }
    for segment in &prunable {
        node.children.remove(segment);
    }

    if namespace == ancestor {
        return false;
    }

    let (moving, staying): (BTreeSet<ConfigRecord>, BTreeSet<ConfigRecord>) =
        std::mem::take(&mut node.records)
            .into_iter()
            .partition(|record| record.accessibility.is_relocatable());
    node.records = staying;

    for record in moving {
        tracing::debug!(
            origin = %record.name.origin(),
            from = %namespace,
            to = %ancestor,
            "relocating config record"
        );
        relocated.push(record);
    }

    node.children.is_empty() && node.records.is_empty()
}
