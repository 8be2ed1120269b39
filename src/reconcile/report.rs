//! Summary of what a reconciliation changed.

use crate::document::{KeyPath, NodeKind};
use serde::Serialize;

/// A key that is a section in one document and a leaf in the other.
///
/// The template's kind wins; the existing value is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralConflict {
    pub path: KeyPath,
    pub template: NodeKind,
    pub existing: NodeKind,
}

/// Key paths affected by a merge, each list in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Template-only keys inserted with their defaults.
    pub added: Vec<KeyPath>,
    /// Existing-only keys dropped because the template no longer has them.
    pub pruned: Vec<KeyPath>,
    /// Existing-only keys kept because they are excluded.
    pub retained: Vec<KeyPath>,
    pub conflicts: Vec<StructuralConflict>,
}

impl MergeReport {
    /// No keys were added, pruned, or replaced.
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.pruned.is_empty() && self.conflicts.is_empty()
    }

    /// One-line human summary, e.g. `2 added, 1 pruned`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.added.is_empty() {
            parts.push(format!("{} added", self.added.len()));
        }
        if !self.pruned.is_empty() {
            parts.push(format!("{} pruned", self.pruned.len()));
        }
        if !self.conflicts.is_empty() {
            parts.push(format!("{} replaced", self.conflicts.len()));
        }
        if !self.retained.is_empty() {
            parts.push(format!("{} retained", self.retained.len()));
        }
        if parts.is_empty() {
            "no key changes".to_string()
        } else {
            parts.join(", ")
        }
    }
}
