//! Comment-aware document model for configuration files.
//!
//! A [`Document`] is an ordered tree: a root [`Mapping`] of [`Entry`] values,
//! each either a nested section or a scalar leaf. Every entry owns the
//! comment lines that preceded it in the source, so comments move with their
//! key when documents are merged. Order is significant and determines the
//! on-disk layout.
//!
//! Documents are built fresh on every parse. They carry no identity between
//! reconciliation runs.

mod key_path;
mod scalar;


pub use key_path::KeyPath;
pub use scalar::{Scalar, ScalarValue};

pub(crate) use scalar::{double_quote, needs_quotes};

use serde::Serialize;
use std::fmt;

/// Comment and blank lines bound to the entry that follows them.
///
/// Lines are stored trimmed; a blank line is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentBlock {
    lines: Vec<String>,
}

impl CommentBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl<S: Into<String>> FromIterator<S> for CommentBlock {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Whether an entry is a section or a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Section,
    Leaf,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Section => write!(f, "section"),
            NodeKind::Leaf => write!(f, "leaf"),
        }
    }
}

/// The value side of an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Section(Mapping),
    Leaf(Scalar),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Section(_) => NodeKind::Section,
            Node::Leaf(_) => NodeKind::Leaf,
        }
    }

    pub fn as_section(&self) -> Option<&Mapping> {
        match self {
            Node::Section(mapping) => Some(mapping),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Leaf(scalar) => Some(scalar),
            Node::Section(_) => None,
        }
    }
}

/// One key of a mapping with its value and annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    /// Lines immediately preceding the entry.
    pub comments: CommentBlock,
    pub node: Node,
    /// Inline `# ...` comment on the entry's own line, including the `#`.
    pub trailing: Option<String>,
}

impl Entry {
    pub fn new(key: impl Into<String>, node: Node) -> Self {
        Self {
            key: key.into(),
            comments: CommentBlock::new(),
            node,
            trailing: None,
        }
    }

    pub fn leaf(key: impl Into<String>, scalar: impl Into<Scalar>) -> Self {
        Self::new(key, Node::Leaf(scalar.into()))
    }

    pub fn section(key: impl Into<String>, mapping: Mapping) -> Self {
        Self::new(key, Node::Section(mapping))
    }

    pub fn with_comments<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments = lines.into_iter().collect();
        self
    }

    pub fn with_trailing(mut self, comment: impl Into<String>) -> Self {
        self.trailing = Some(comment.into());
        self
    }
}

/// An ordered mapping with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<Entry>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert an entry, replacing (in place) any entry with the same key.
    ///
    /// Returns the replaced entry.
    pub fn insert(&mut self, entry: Entry) -> Option<Entry> {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(slot) => Some(std::mem::replace(slot, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    /// Builder-style [`Mapping::insert`].
    pub fn with(mut self, entry: Entry) -> Self {
        self.insert(entry);
        self
    }

    fn entry_at(&self, segments: &[String]) -> Option<&Entry> {
        let (first, rest) = segments.split_first()?;
        let entry = self.get(first)?;
        if rest.is_empty() {
            return Some(entry);
        }
        entry.node.as_section()?.entry_at(rest)
    }

    fn collect_paths(&self, parent: &KeyPath, leaves_only: bool, out: &mut Vec<KeyPath>) {
        for entry in &self.entries {
            let path = parent.child(&entry.key);
            match &entry.node {
                Node::Section(mapping) => {
                    if !leaves_only {
                        out.push(path.clone());
                    }
                    mapping.collect_paths(&path, leaves_only, out);
                }
                Node::Leaf(_) => out.push(path),
            }
        }
    }

    fn to_yaml(&self) -> serde_yaml::Mapping {
        let mut out = serde_yaml::Mapping::new();
        for entry in &self.entries {
            let value = match &entry.node {
                Node::Section(mapping) => serde_yaml::Value::Mapping(mapping.to_yaml()),
                Node::Leaf(scalar) => scalar_to_yaml(scalar),
            };
            out.insert(serde_yaml::Value::String(entry.key.clone()), value);
        }
        out
    }
}

fn scalar_to_yaml(scalar: &Scalar) -> serde_yaml::Value {
    use serde_yaml::{Number, Value};

    match scalar.value() {
        ScalarValue::Bool(b) => Value::Bool(*b),
        ScalarValue::Int(i) => Value::Number(Number::from(*i)),
        ScalarValue::Float(x) => Value::Number(Number::from(*x)),
        ScalarValue::Str(s) => Value::String(s.clone()),
    }
}

/// A whole configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub root: Mapping,
    /// Comment and blank lines after the last entry.
    pub footer: CommentBlock,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_root(root: Mapping) -> Self {
        Self {
            root,
            footer: CommentBlock::new(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        self.root.entries()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.footer.is_empty()
    }

    /// Look up the entry at `path`. The root path has no entry.
    pub fn get_entry(&self, path: &KeyPath) -> Option<&Entry> {
        self.root.entry_at(path.segments())
    }

    pub fn get(&self, path: &KeyPath) -> Option<&Node> {
        self.get_entry(path).map(|e| &e.node)
    }

    /// The scalar at `path`, if `path` names a leaf.
    pub fn get_scalar(&self, path: &KeyPath) -> Option<&Scalar> {
        self.get(path).and_then(Node::as_scalar)
    }

    pub fn contains(&self, path: &KeyPath) -> bool {
        self.get_entry(path).is_some()
    }

    /// Every key path, sections included, in document order.
    pub fn key_paths(&self) -> Vec<KeyPath> {
        let mut out = Vec::new();
        self.root.collect_paths(&KeyPath::root(), false, &mut out);
        out
    }

    /// Key paths of leaves only, in document order.
    pub fn leaf_paths(&self) -> Vec<KeyPath> {
        let mut out = Vec::new();
        self.root.collect_paths(&KeyPath::root(), true, &mut out);
        out
    }

    /// Convert to a generic YAML value (comments dropped) for serde consumers.
    pub fn to_yaml_value(&self) -> serde_yaml::Value {
        serde_yaml::Value::Mapping(self.root.to_yaml())
    }
}
