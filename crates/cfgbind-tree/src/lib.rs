//! Namespace aggregation tree for cfgbind.
//!
//! Records are inserted at the node matching their origin namespace,
//! then [`NamespaceTree::compact`] pulls every relocatable record up to
//! the common ancestor and prunes branches left empty. Finally
//! [`NamespaceTree::traverse`] walks the tree bottom-up and decides where
//! generated units are materialized:
//!
//! ```text
//! insert(record)*  ->  compact()  ->  check_names()  ->  traverse(materialize)
//! ```
//!
//! A node is materialized when it holds records or joins two or more
//! child outputs; every other node passes its child's output through.

pub mod conflict;
pub mod error;
pub mod traverse;
pub mod tree;

pub use conflict::NameConflict;
pub use error::{Error, Result};
pub use traverse::{Traversal, UnitFailure, UnitPlan};
pub use tree::{CompactionSummary, NamespaceTree};
