//! Serialization of documents back to text.
//!
//! Output is deterministic: entries are written in model order, nested
//! blocks are indented by two spaces per level regardless of the source
//! file's indentation, and comments are re-indented to their entry's level.
//! Leaf literals are written exactly as stored, so untouched values keep
//! their original quoting and precision.
//!
//! Parsing the output yields a document equal to the input.

use crate::document::{CommentBlock, Document, Mapping, Node, double_quote, needs_quotes};

/// Spaces per nesting level.
pub const INDENT: usize = 2;

/// Serialize a document to text.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    write_mapping(&mut out, &doc.root, 0);
    write_comments(&mut out, &doc.footer, 0);
    out
}

fn write_mapping(out: &mut String, mapping: &Mapping, depth: usize) {
    let indent = " ".repeat(depth * INDENT);

    for entry in mapping.entries() {
        write_comments(out, &entry.comments, depth);

        out.push_str(&indent);
        out.push_str(&render_key(&entry.key));
        out.push(':');
        match &entry.node {
            Node::Leaf(scalar) => {
                out.push(' ');
                out.push_str(scalar.raw());
            }
            Node::Section(child) if child.is_empty() => out.push_str(" {}"),
            Node::Section(_) => {}
        }
        if let Some(trailing) = &entry.trailing {
            out.push(' ');
            out.push_str(trailing);
        }
        out.push('\n');

        if let Node::Section(child) = &entry.node {
            write_mapping(out, child, depth + 1);
        }
    }
}

fn write_comments(out: &mut String, comments: &CommentBlock, depth: usize) {
    for line in comments.lines() {
        if !line.is_empty() {
            out.push_str(&" ".repeat(depth * INDENT));
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn render_key(key: &str) -> String {
    if needs_quotes(key) && !is_plain_key(key) {
        double_quote(key)
    } else {
        key.to_string()
    }
}

/// Keys that look like numbers or booleans still read back as the same text,
/// since keys are never typed.
fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key == key.trim()
        && !key.starts_with(|c: char| "#'\"&*!|>%@`{}[],?:-".contains(c))
        && !key.contains(": ")
        && !key.ends_with(':')
        && !key.contains(" #")
        && !key.chars().any(char::is_control)
}
