//! Line classification and scalar lexing.

use crate::document::Scalar;
use crate::error::{ConfsyncError, Result};
use std::iter::Peekable;
use std::str::CharIndices;

/// One source line after classification.
#[derive(Debug)]
pub(super) struct Line {
    /// 1-based line number.
    pub number: usize,
    /// Leading spaces. Meaningless for blank lines.
    pub indent: usize,
    pub kind: LineKind,
}

#[derive(Debug)]
pub(super) enum LineKind {
    Blank,
    Comment(String),
    Entry(EntryLine),
}

#[derive(Debug)]
pub(super) struct EntryLine {
    pub key: String,
    pub value: ValueToken,
    pub trailing: Option<String>,
}

#[derive(Debug)]
pub(super) enum ValueToken {
    /// `key:` with nothing after it; a section header.
    Empty,
    /// `key: {}`
    EmptyMapping,
    Scalar(Scalar),
}

pub(super) fn classify(number: usize, text: &str) -> Result<Line> {
    let text = text.trim_end();
    let content = text.trim_start_matches([' ', '\t']);
    let indentation = &text[..text.len() - content.len()];

    if content.is_empty() {
        return Ok(Line {
            number,
            indent: 0,
            kind: LineKind::Blank,
        });
    }

    if content.starts_with('#') {
        return Ok(Line {
            number,
            indent: indentation.len(),
            kind: LineKind::Comment(content.to_string()),
        });
    }

    if indentation.contains('\t') {
        return Err(ConfsyncError::malformed(
            number,
            "tab characters are not allowed in indentation",
        ));
    }
    if content == "---" || content.starts_with("--- ") || content == "..." {
        return Err(ConfsyncError::malformed(
            number,
            "document markers are not supported; a file holds exactly one document",
        ));
    }
    if is_sequence_item(content) {
        return Err(ConfsyncError::malformed(number, "sequences are not supported"));
    }

    let (key, rest) = lex_key(number, content)?;
    let (value, trailing) = lex_value(number, rest)?;

    Ok(Line {
        number,
        indent: indentation.len(),
        kind: LineKind::Entry(EntryLine {
            key,
            value,
            trailing,
        }),
    })
}

fn is_sequence_item(text: &str) -> bool {
    text == "-" || text.starts_with("- ") || text.starts_with("-\t")
}

/// Split `content` into the key and the text after its `:`.
fn lex_key(number: usize, content: &str) -> Result<(String, &str)> {
    if content.starts_with('"') || content.starts_with('\'') {
        let (key, len) = lex_quoted(number, content)?;
        let rest = content[len..].trim_start_matches([' ', '\t']);
        return match rest.strip_prefix(':') {
            Some(after) if after.is_empty() || after.starts_with([' ', '\t']) => Ok((key, after)),
            _ => Err(ConfsyncError::malformed(
                number,
                "expected `:` after quoted key",
            )),
        };
    }

    let bytes = content.as_bytes();
    let colon = content.char_indices().find_map(|(i, c)| {
        let ends_key = c == ':' && matches!(bytes.get(i + 1), None | Some(b' ') | Some(b'\t'));
        ends_key.then_some(i)
    });

    let Some(colon) = colon else {
        return Err(ConfsyncError::malformed(
            number,
            "expected `key: value` or a `key:` section header",
        ));
    };

    let key = content[..colon].trim_end();
    if key.is_empty() {
        return Err(ConfsyncError::malformed(number, "empty key"));
    }
    Ok((key.to_string(), &content[colon + 1..]))
}

fn lex_value(number: usize, rest: &str) -> Result<(ValueToken, Option<String>)> {
    let text = rest.trim_start_matches([' ', '\t']);

    let Some(first) = text.chars().next() else {
        return Ok((ValueToken::Empty, None));
    };

    match first {
        '#' => Ok((ValueToken::Empty, Some(text.to_string()))),
        '"' | '\'' => {
            let (value, len) = lex_quoted(number, text)?;
            let raw = text[..len].to_string();
            let trailing = lex_trailing(number, &text[len..], "quoted value")?;
            Ok((ValueToken::Scalar(Scalar::quoted(value, raw)), trailing))
        }
        '{' if text.starts_with("{}") => {
            let trailing = lex_trailing(number, &text[2..], "`{}`")?;
            Ok((ValueToken::EmptyMapping, trailing))
        }
        '{' | '[' => Err(ConfsyncError::malformed(
            number,
            "flow collections are not supported (only `{}` for an empty section)",
        )),
        '|' | '>' => Err(ConfsyncError::malformed(
            number,
            "block scalars are not supported; use a quoted string",
        )),
        '&' | '*' | '!' => Err(ConfsyncError::malformed(
            number,
            "anchors, aliases and tags are not supported; quote the value",
        )),
        '%' | '@' | '`' => Err(ConfsyncError::malformed(
            number,
            format!("a plain value cannot start with `{}`; quote the value", first),
        )),
        _ if is_sequence_item(text) => {
            Err(ConfsyncError::malformed(number, "sequences are not supported"))
        }
        _ => {
            let (value, trailing) = split_plain_comment(text);
            if value.ends_with(':') || value.contains(": ") || value.contains(":\t") {
                return Err(ConfsyncError::malformed(
                    number,
                    "a plain value cannot contain `: ` or end with `:`; quote the value",
                ));
            }
            Ok((ValueToken::Scalar(Scalar::plain(value)), trailing))
        }
    }
}

/// A `#` preceded by whitespace starts a comment inside a plain value.
fn split_plain_comment(text: &str) -> (&str, Option<String>) {
    let bytes = text.as_bytes();
    let hash = text
        .char_indices()
        .find(|&(i, c)| c == '#' && i > 0 && matches!(bytes[i - 1], b' ' | b'\t'))
        .map(|(i, _)| i);

    match hash {
        Some(i) => (text[..i].trim_end(), Some(text[i..].to_string())),
        None => (text, None),
    }
}

/// Only whitespace and an optional comment may follow a closed value.
fn lex_trailing(number: usize, after: &str, what: &str) -> Result<Option<String>> {
    let trimmed = after.trim_start_matches([' ', '\t']);
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.starts_with('#') && trimmed.len() < after.len() {
        return Ok(Some(trimmed.to_string()));
    }
    Err(ConfsyncError::malformed(
        number,
        format!("unexpected text after {}", what),
    ))
}

/// Lex a single- or double-quoted scalar at the start of `text`.
///
/// Returns the unescaped value and the byte length of the literal.
fn lex_quoted(number: usize, text: &str) -> Result<(String, usize)> {
    let mut chars = text.char_indices().peekable();
    match chars.next() {
        Some((_, '"')) => lex_double(number, chars),
        Some((_, '\'')) => lex_single(number, chars),
        _ => Err(ConfsyncError::malformed(number, "expected a quoted string")),
    }
}

fn lex_single(number: usize, mut chars: Peekable<CharIndices<'_>>) -> Result<(String, usize)> {
    let mut value = String::new();
    while let Some((i, c)) = chars.next() {
        if c != '\'' {
            value.push(c);
            continue;
        }
        if matches!(chars.peek(), Some((_, '\''))) {
            chars.next();
            value.push('\'');
            continue;
        }
        return Ok((value, i + 1));
    }
    Err(ConfsyncError::malformed(
        number,
        "unterminated single-quoted string",
    ))
}

fn lex_double(number: usize, mut chars: Peekable<CharIndices<'_>>) -> Result<(String, usize)> {
    let mut value = String::new();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((value, i + 1)),
            '\\' => {
                let Some((_, escape)) = chars.next() else {
                    break;
                };
                let decoded = match escape {
                    '\\' => '\\',
                    '"' => '"',
                    '/' => '/',
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    'x' => lex_hex_escape(number, &mut chars, 2)?,
                    'u' => lex_hex_escape(number, &mut chars, 4)?,
                    other => {
                        return Err(ConfsyncError::malformed(
                            number,
                            format!("invalid escape sequence `\\{}`", other),
                        ));
                    }
                };
                value.push(decoded);
            }
            c => value.push(c),
        }
    }
    Err(ConfsyncError::malformed(
        number,
        "unterminated double-quoted string",
    ))
}

fn lex_hex_escape(
    number: usize,
    chars: &mut Peekable<CharIndices<'_>>,
    digits: usize,
) -> Result<char> {
    let hex: String = chars.by_ref().take(digits).map(|(_, c)| c).collect();
    u32::from_str_radix(&hex, 16)
        .ok()
        .filter(|_| hex.len() == digits)
        .and_then(char::from_u32)
        .ok_or_else(|| {
            ConfsyncError::malformed(number, format!("invalid hex escape `{}`", hex))
        })
}
