//! Caller-supplied key paths that reconciliation must leave alone.

use crate::document::KeyPath;
use std::collections::BTreeSet;

/// Key paths that are never auto-added or pruned.
///
/// A path is covered when it, or any of its ancestors, is in the set, so
/// excluding a section hands its whole subtree to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    paths: BTreeSet<KeyPath>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: KeyPath) -> bool {
        self.paths.insert(path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyPath> {
        self.paths.iter()
    }

    /// Whether `path` or one of its ancestors is excluded.
    pub fn covers(&self, path: &KeyPath) -> bool {
        self.paths.iter().any(|excluded| path.starts_with(excluded))
    }

    /// Whether some excluded path lies strictly beneath `path`.
    pub fn covers_descendant_of(&self, path: &KeyPath) -> bool {
        self.paths
            .iter()
            .any(|excluded| excluded.len() > path.len() && excluded.starts_with(path))
    }
}

impl FromIterator<KeyPath> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = KeyPath>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(KeyPath::parse).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_exact_and_descendants() {
        let excluded: ExclusionSet = ["paths", "sql.server name"].into_iter().collect();

        assert!(excluded.covers(&KeyPath::parse("paths")));
        assert!(excluded.covers(&KeyPath::parse("paths.veteran.requirements")));
        assert!(excluded.covers(&KeyPath::parse("sql.server name")));
        assert!(!excluded.covers(&KeyPath::parse("sql")));
        assert!(!excluded.covers(&KeyPath::parse("sql.hostname")));
        assert!(!excluded.covers(&KeyPath::parse("paths2")));
    }

    #[test]
    fn test_covers_descendant_of() {
        let excluded: ExclusionSet = ["sql.server name"].into_iter().collect();

        assert!(excluded.covers_descendant_of(&KeyPath::parse("sql")));
        assert!(excluded.covers_descendant_of(&KeyPath::root()));
        assert!(!excluded.covers_descendant_of(&KeyPath::parse("sql.server name")));
        assert!(!excluded.covers_descendant_of(&KeyPath::parse("auto-updater")));
    }

    #[test]
    fn test_empty_set_covers_nothing() {
        let excluded = ExclusionSet::new();
        assert!(excluded.is_empty());
        assert!(!excluded.covers(&KeyPath::parse("anything")));
    }

    #[test]
    fn test_root_exclusion_covers_everything() {
        let excluded: ExclusionSet = [KeyPath::root()].into_iter().collect();
        assert!(excluded.covers(&KeyPath::parse("a.b")));
    }
}
