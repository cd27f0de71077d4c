//! Bottom-up unit planning with join-node collapsing
//!
//! Every node is visited after all of its children. A node becomes a
//! generated unit when it holds records of its own, or when two or more
//! child units meet at it. Any other node forwards its children's units
//! to its parent unchanged.

use std::collections::BTreeSet;
use std::convert::Infallible;

use cfgbind_meta::{ConfigRecord, Namespace};

use crate::tree::{NamespaceTree, Node};

/// A unit the traversal decided to materialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPlan<'a> {
    pub namespace: Namespace,
    /// Units this one includes, sorted.
    pub includes: Vec<Namespace>,
    /// Records bound by this unit, in record order.
    pub records: Vec<&'a ConfigRecord>,
}

/// A unit whose materialization failed.
#[derive(Debug)]
pub struct UnitFailure<E> {
    pub namespace: Namespace,
    pub error: E,
}

/// Result of a full traversal.
#[derive(Debug)]
pub struct Traversal<E> {
    /// Units the root forwards to whoever consumes the tree.
    pub outputs: BTreeSet<Namespace>,
    /// Every materialized namespace, children before parents.
    pub materialized: Vec<Namespace>,
    pub failures: Vec<UnitFailure<E>>,
}

impl<E> Traversal<E> {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether `namespace` was materialized but failed.
    pub fn failed(&self, namespace: &Namespace) -> bool {
        self.failures.iter().any(|f| &f.namespace == namespace)
    }
}

impl NamespaceTree {
    /// Walk the tree post-order and call `materialize` once per unit.
    ///
    /// A failing call is recorded and the walk continues; the failed
    /// namespace is still reported upward, so a parent unit includes it.
    pub fn traverse<'a, E, F>(&'a self, mut materialize: F) -> Traversal<E>
    where
        F: FnMut(&UnitPlan<'a>) -> Result<(), E>,
    {
        let mut traversal = Traversal {
            outputs: BTreeSet::new(),
            materialized: Vec::new(),
            failures: Vec::new(),
        };
        traversal.outputs = visit(
            &self.root,
            Namespace::root(),
            &mut materialize,
            &mut traversal.materialized,
            &mut traversal.failures,
        );
        traversal
    }

    /// The units a traversal would materialize, children before parents.
    pub fn plan(&self) -> Vec<UnitPlan<'_>> {
        let mut plans = Vec::new();
        self.traverse(|plan| {
            plans.push(plan.clone());
            Ok::<(), Infallible>(())
        });
        plans
    }
}

fn visit<'a, E, F>(
    node: &'a Node,
    namespace: Namespace,
    materialize: &mut F,
    materialized: &mut Vec<Namespace>,
    failures: &mut Vec<UnitFailure<E>>,
) -> BTreeSet<Namespace>
where
    F: FnMut(&UnitPlan<'a>) -> Result<(), E>,
{
    let mut child_outputs = BTreeSet::new();
    for (segment, child) in &node.children {
        child_outputs.extend(visit(
            child,
            namespace.child(segment),
            materialize,
            materialized,
            failures,
        ));
    }

    if node.records.is_empty() && child_outputs.len() < 2 {
        tracing::trace!(namespace = %namespace, forwarded = child_outputs.len(), "collapsing node");
        return child_outputs;
    }

    let plan = UnitPlan {
        namespace: namespace.clone(),
        includes: child_outputs.into_iter().collect(),
        records: node.records.iter().collect(),
    };
    tracing::debug!(
        namespace = %namespace,
        records = plan.records.len(),
        includes = plan.includes.len(),
        "materializing unit"
    );
    if let Err(error) = materialize(&plan) {
        failures.push(UnitFailure {
            namespace: namespace.clone(),
            error,
        });
    }
    materialized.push(namespace.clone());

    BTreeSet::from([namespace])
}
