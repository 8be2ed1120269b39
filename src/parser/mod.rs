//! Parser for the indentation-based configuration format.
//!
//! The format is a strict subset of YAML:
//! - `# ...` comment lines and blank lines
//! - `key: value` leaves with plain, single- or double-quoted scalars
//! - `key:` section headers followed by a more-indented block
//! - `key: {}` for an explicitly empty section
//!
//! Every contiguous run of comment and blank lines is bound to the entry that
//! follows it, at whatever depth that entry sits. Lines after the last entry
//! become the document footer.
//!
//! Sequences, flow collections, block scalars, anchors and multi-document
//! streams are rejected with [`ConfsyncError::MalformedDocument`].

mod line;


use crate::document::{CommentBlock, Document, Entry, Mapping, Node};
use crate::error::{ConfsyncError, Result};
use line::{Line, LineKind, ValueToken};

/// Parse document text.
///
/// # Errors
///
/// Returns [`ConfsyncError::MalformedDocument`] with the offending line for
/// invalid indentation, duplicate keys, unterminated quotes, or unsupported
/// YAML constructs. No partial document is returned.
pub fn parse(text: &str) -> Result<Document> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let lines = text
        .lines()
        .enumerate()
        .map(|(i, raw)| line::classify(i + 1, raw))
        .collect::<Result<Vec<_>>>()?;

    let mut parser = Parser { lines, pos: 0 };

    let base = parser.next_entry().map_or(0, |l| l.indent);
    let root = parser.parse_mapping(base)?;
    let footer = parser.take_comments();

    if let Some(stray) = parser.next_entry() {
        return Err(ConfsyncError::malformed(
            stray.number,
            format!(
                "inconsistent indentation: found {} spaces, top level uses {}",
                stray.indent, base
            ),
        ));
    }

    Ok(Document { root, footer })
}

struct Parser {
    lines: Vec<Line>,
    pos: usize,
}

impl Parser {
    /// The next entry line at or after the cursor, skipping comments.
    fn next_entry(&self) -> Option<&Line> {
        self.lines[self.pos..]
            .iter()
            .find(|l| matches!(l.kind, LineKind::Entry(_)))
    }

    fn take_comments(&mut self) -> CommentBlock {
        let mut block = CommentBlock::new();
        while let Some(line) = self.lines.get(self.pos) {
            match &line.kind {
                LineKind::Blank => block.push(""),
                LineKind::Comment(text) => block.push(text.as_str()),
                LineKind::Entry(_) => break,
            }
            self.pos += 1;
        }
        block
    }

    fn parse_mapping(&mut self, indent: usize) -> Result<Mapping> {
        let mut mapping = Mapping::new();

        while let Some((next_indent, next_number)) =
            self.next_entry().map(|l| (l.indent, l.number))
        {
            if next_indent < indent {
                break;
            }
            if next_indent > indent {
                return Err(ConfsyncError::malformed(
                    next_number,
                    format!(
                        "unexpected indentation: found {} spaces, expected {}",
                        next_indent, indent
                    ),
                ));
            }

            let comments = self.take_comments();
            let line = &mut self.lines[self.pos];
            let number = line.number;
            let LineKind::Entry(entry) = std::mem::replace(&mut line.kind, LineKind::Blank)
            else {
                unreachable!("take_comments stops at an entry line");
            };
            self.pos += 1;

            if mapping.contains_key(&entry.key) {
                return Err(ConfsyncError::malformed(
                    number,
                    format!("duplicate key `{}`", entry.key),
                ));
            }

            let node = match entry.value {
                ValueToken::Scalar(scalar) => Node::Leaf(scalar),
                ValueToken::EmptyMapping => Node::Section(Mapping::new()),
                ValueToken::Empty => match self.next_entry().map(|l| l.indent) {
                    Some(child) if child > indent => Node::Section(self.parse_mapping(child)?),
                    _ => Node::Section(Mapping::new()),
                },
            };

            mapping.insert(Entry {
                key: entry.key,
                comments,
                node,
                trailing: entry.trailing,
            });
        }

        Ok(mapping)
    }
}
