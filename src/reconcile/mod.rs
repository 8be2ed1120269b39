//! Template reconciliation.
//!
//! [`merge`] brings an existing document in line with a template, section by
//! section:
//!
//! 1. Template entries are walked in order. Keys present in both keep the
//!    existing value; keys only in the template are inserted verbatim with
//!    their comments.
//! 2. Existing entries missing from the template are pruned unless the
//!    exclusion set covers them, in which case they are appended after the
//!    template-ordered entries, keeping their relative order. Covered keys
//!    are likewise never inserted from the template.
//! 3. Comment blocks, trailing comments and the footer come from the
//!    existing document when it has them, otherwise from the template.
//!
//! A key that is a section on one side and a leaf on the other is a
//! structural conflict: the template's entry replaces the existing one and a
//! warning is logged.
//!
//! Merging is pure. The caller decides whether to write the result.

mod exclusions;
mod report;


pub use exclusions::ExclusionSet;
pub use report::{MergeReport, StructuralConflict};

use crate::document::{CommentBlock, Document, Entry, KeyPath, Mapping, Node};
use tracing::{debug, warn};

/// Result of [`merge`].
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    pub document: Document,
    /// Whether `document` differs from the existing document.
    pub changed: bool,
    pub report: MergeReport,
}

/// Reconcile `existing` against `template`.
///
/// # Example
///
/// ```
/// use confsync::parser::parse;
/// use confsync::reconcile::{merge, ExclusionSet};
/// use confsync::writer::serialize;
///
/// let template = parse("a: 1\nb: 2\n")?;
/// let existing = parse("# mine\na: 5\n")?;
///
/// let merged = merge(&template, &existing, &ExclusionSet::new());
/// assert!(merged.changed);
/// assert_eq!(serialize(&merged.document), "# mine\na: 5\nb: 2\n");
/// # Ok::<(), confsync::error::ConfsyncError>(())
/// ```
pub fn merge(template: &Document, existing: &Document, excluded: &ExclusionSet) -> Merged {
    let mut reconciler = Reconciler {
        excluded,
        report: MergeReport::default(),
    };

    let root = reconciler.merge_mapping(&KeyPath::root(), &template.root, &existing.root);
    let document = Document {
        root,
        footer: prefer_existing(&existing.footer, &template.footer),
    };
    let changed = document != *existing;

    Merged {
        document,
        changed,
        report: reconciler.report,
    }
}

struct Reconciler<'a> {
    excluded: &'a ExclusionSet,
    report: MergeReport,
}

impl Reconciler<'_> {
    fn merge_mapping(&mut self, parent: &KeyPath, template: &Mapping, existing: &Mapping) -> Mapping {
        let mut merged = Mapping::new();

        for t in template.entries() {
            let path = parent.child(&t.key);
            match existing.get(&t.key) {
                Some(e) => {
                    merged.insert(self.merge_entry(&path, t, e));
                }
                None if self.excluded.covers(&path) => {
                    debug!(key = %path, "excluded template key not added");
                }
                None => {
                    debug!(key = %path, "adding key from template");
                    merged.insert(self.without_excluded(&path, t));
                    self.report.added.push(path);
                }
            }
        }

        for e in existing.entries() {
            if template.contains_key(&e.key) {
                continue;
            }
            if let Some(kept) = self.keep_unmatched(parent.child(&e.key), e) {
                merged.insert(kept);
            }
        }

        merged
    }

    /// Decide the fate of an existing entry the template does not know.
    ///
    /// Covered entries are kept whole. A section holding covered descendants
    /// keeps just those, so an excluded nested key survives even when its
    /// parent section left the template. Everything else is pruned.
    fn keep_unmatched(&mut self, path: KeyPath, entry: &Entry) -> Option<Entry> {
        if self.excluded.covers(&path) {
            self.report.retained.push(path);
            return Some(entry.clone());
        }

        if let Node::Section(mapping) = &entry.node
            && self.excluded.covers_descendant_of(&path)
        {
            let pruned_before = self.report.pruned.len();
            let mut kept = Mapping::new();
            for child in mapping.entries() {
                if let Some(child) = self.keep_unmatched(path.child(&child.key), child) {
                    kept.insert(child);
                }
            }
            if !kept.is_empty() {
                return Some(Entry {
                    node: Node::Section(kept),
                    ..entry.clone()
                });
            }
            // Nothing survived: report the section once rather than each child.
            self.report.pruned.truncate(pruned_before);
        }

        debug!(key = %path, "pruning key absent from template");
        self.report.pruned.push(path);
        None
    }

    /// A template-only entry with covered descendants stripped out.
    fn without_excluded(&self, path: &KeyPath, entry: &Entry) -> Entry {
        let Node::Section(mapping) = &entry.node else {
            return entry.clone();
        };
        if !self.excluded.covers_descendant_of(path) {
            return entry.clone();
        }

        let mut stripped = Mapping::new();
        for child in mapping.entries() {
            let child_path = path.child(&child.key);
            if !self.excluded.covers(&child_path) {
                stripped.insert(self.without_excluded(&child_path, child));
            }
        }
        Entry {
            node: Node::Section(stripped),
            ..entry.clone()
        }
    }

    fn merge_entry(&mut self, path: &KeyPath, template: &Entry, existing: &Entry) -> Entry {
        let node = match (&template.node, &existing.node) {
            (Node::Section(t), Node::Section(e)) => Node::Section(self.merge_mapping(path, t, e)),
            (Node::Leaf(_), Node::Leaf(value)) => Node::Leaf(value.clone()),
            (t, e) => {
                warn!(
                    key = %path,
                    template = %t.kind(),
                    existing = %e.kind(),
                    "structural conflict, replacing existing value with template default"
                );
                self.report.conflicts.push(StructuralConflict {
                    path: path.clone(),
                    template: t.kind(),
                    existing: e.kind(),
                });
                return template.clone();
            }
        };

        Entry {
            key: existing.key.clone(),
            comments: prefer_existing(&existing.comments, &template.comments),
            node,
            trailing: existing
                .trailing
                .clone()
                .or_else(|| template.trailing.clone()),
        }
    }
}

fn prefer_existing(existing: &CommentBlock, template: &CommentBlock) -> CommentBlock {
    if existing.is_empty() {
        template.clone()
    } else {
        existing.clone()
    }
}
