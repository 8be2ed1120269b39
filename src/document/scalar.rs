//! Leaf scalar values and their literal forms.
//!
//! A [`Scalar`] carries both the typed value and the literal text it was read
//! from, so an untouched leaf is written back exactly as the user typed it
//! (quoting style, numeric precision, `True` vs `true`).

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static INT_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+$").expect("Invalid integer literal regex"));

static FLOAT_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?$")
        .expect("Invalid float literal regex")
});

static RADIX_INT_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?0(x[0-9a-fA-F]+|o[0-7]+|b[01]+)$").expect("Invalid radix literal regex")
});

/// Characters that cannot start a plain (unquoted) scalar or key.
const INDICATORS: &[char] = &[
    '#', '\'', '"', '&', '*', '!', '|', '>', '%', '@', '`', '{', '}', '[', ']', ',', '?', ':',
];

/// Typed value of a leaf.
#[derive(Debug, Clone)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ScalarValue {
    /// Human readable kind, used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ScalarValue::Bool(_) => "boolean",
            ScalarValue::Int(_) => "integer",
            ScalarValue::Float(_) => "float",
            ScalarValue::Str(_) => "string",
        }
    }
}

/// YAML has a single NaN, so two NaN floats compare equal.
impl PartialEq for ScalarValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ScalarValue::Bool(a), ScalarValue::Bool(b)) => a == b,
            (ScalarValue::Int(a), ScalarValue::Int(b)) => a == b,
            (ScalarValue::Float(a), ScalarValue::Float(b)) => {
                a == b || (a.is_nan() && b.is_nan())
            }
            (ScalarValue::Str(a), ScalarValue::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Bool(b) => write!(f, "{}", b),
            ScalarValue::Int(i) => write!(f, "{}", i),
            ScalarValue::Float(x) => write!(f, "{}", x),
            ScalarValue::Str(s) => f.write_str(s),
        }
    }
}

/// A leaf value together with its literal text.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    value: ScalarValue,
    raw: String,
}

impl Scalar {
    /// Type an unquoted literal. `raw` must be a non-empty, trimmed plain
    /// scalar as accepted by the parser.
    pub(crate) fn plain(raw: &str) -> Self {
        Self {
            value: infer_plain(raw),
            raw: raw.to_string(),
        }
    }

    /// A quoted string literal: `value` is the unescaped text, `raw` the
    /// literal including its quotes.
    pub(crate) fn quoted(value: String, raw: String) -> Self {
        Self {
            value: ScalarValue::Str(value),
            raw,
        }
    }

    /// A string scalar with a canonical literal, quoted only when the plain
    /// form would read back differently.
    pub fn string(value: impl Into<String>) -> Self {
        let value = value.into();
        let raw = if needs_quotes(&value) {
            double_quote(&value)
        } else {
            value.clone()
        };
        Self {
            value: ScalarValue::Str(value),
            raw,
        }
    }

    pub fn value(&self) -> &ScalarValue {
        &self.value
    }

    /// Literal text as it appears in the file.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            ScalarValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            ScalarValue::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Floats, and integers widened to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self.value {
            ScalarValue::Float(x) => Some(x),
            ScalarValue::Int(i) => Some(i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            ScalarValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self {
            value: ScalarValue::Bool(b),
            raw: b.to_string(),
        }
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self {
            value: ScalarValue::Int(i),
            raw: i.to_string(),
        }
    }
}

impl From<f64> for Scalar {
    /// Non-finite values have no literal form and become strings.
    fn from(x: f64) -> Self {
        if !x.is_finite() {
            return Self::string(x.to_string());
        }
        // Debug keeps a `.0` or an exponent, so the literal never reads back as an integer.
        Self {
            value: ScalarValue::Float(x),
            raw: format!("{:?}", x),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::string(s)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

/// Infer the type of an unquoted literal the way serde_yaml resolves it.
pub(crate) fn infer_plain(raw: &str) -> ScalarValue {
    match raw {
        "true" | "True" | "TRUE" => return ScalarValue::Bool(true),
        "false" | "False" | "FALSE" => return ScalarValue::Bool(false),
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => {
            return ScalarValue::Float(f64::INFINITY);
        }
        "-.inf" | "-.Inf" | "-.INF" => return ScalarValue::Float(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => return ScalarValue::Float(f64::NAN),
        _ => {}
    }

    if RADIX_INT_LITERAL.is_match(raw) {
        return parse_radix_int(raw)
            .map_or_else(|| ScalarValue::Str(raw.to_string()), ScalarValue::Int);
    }

    // Leading zeros make a digit run a string, e.g. `007`.
    if leading_zero_digits(raw) {
        return ScalarValue::Str(raw.to_string());
    }

    if INT_LITERAL.is_match(raw)
        && let Ok(i) = raw.parse::<i64>()
    {
        return ScalarValue::Int(i);
    }

    if FLOAT_LITERAL.is_match(raw)
        && let Ok(x) = raw.parse::<f64>()
        && x.is_finite()
    {
        return ScalarValue::Float(x);
    }

    ScalarValue::Str(raw.to_string())
}

/// `0x1f`, `-0o17`, `+0b101`. `None` when the value does not fit an `i64`.
fn parse_radix_int(raw: &str) -> Option<i64> {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let radix = match unsigned.get(..2)? {
        "0x" => 16,
        "0o" => 8,
        _ => 2,
    };
    let magnitude = i128::from(u64::from_str_radix(&unsigned[2..], radix).ok()?);
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

fn leading_zero_digits(raw: &str) -> bool {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    digits.len() > 1 && digits.starts_with('0') && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Whether `text` must be quoted to survive as a plain string value or key.
pub(crate) fn needs_quotes(text: &str) -> bool {
    let Some(first) = text.chars().next() else {
        return true;
    };

    text != text.trim()
        || INDICATORS.contains(&first)
        || text == "-"
        || text.starts_with("- ")
        || text.contains(": ")
        || text.ends_with(':')
        || text.contains(" #")
        || text.chars().any(char::is_control)
        || matches!(text, "null" | "Null" | "NULL" | "~")
        || RADIX_INT_LITERAL.is_match(text)
        || !matches!(infer_plain(text), ScalarValue::Str(_))
}

/// Render `text` as a double-quoted literal.
pub(crate) fn double_quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_plain_types() {
        assert_eq!(infer_plain("true"), ScalarValue::Bool(true));
        assert_eq!(infer_plain("FALSE"), ScalarValue::Bool(false));
        assert_eq!(infer_plain("14"), ScalarValue::Int(14));
        assert_eq!(infer_plain("-3"), ScalarValue::Int(-3));
        assert_eq!(infer_plain("2.50"), ScalarValue::Float(2.5));
        assert_eq!(infer_plain(".5"), ScalarValue::Float(0.5));
        assert_eq!(infer_plain("1e3"), ScalarValue::Float(1000.0));
        assert_eq!(
            infer_plain("flatfile"),
            ScalarValue::Str("flatfile".to_string())
        );
        assert_eq!(infer_plain("yes"), ScalarValue::Str("yes".to_string()));
        assert_eq!(infer_plain("1.2.3"), ScalarValue::Str("1.2.3".to_string()));
    }

    #[test]
    fn test_infer_plain_follows_yaml_resolution() {
        assert_eq!(infer_plain("0x10"), ScalarValue::Int(16));
        assert_eq!(infer_plain("-0x10"), ScalarValue::Int(-16));
        assert_eq!(infer_plain("0o17"), ScalarValue::Int(15));
        assert_eq!(infer_plain("+0b101"), ScalarValue::Int(5));
        assert_eq!(infer_plain(".inf"), ScalarValue::Float(f64::INFINITY));
        assert_eq!(infer_plain("-.INF"), ScalarValue::Float(f64::NEG_INFINITY));
        assert_eq!(infer_plain(".NaN"), ScalarValue::Float(f64::NAN));
        assert_eq!(infer_plain("+.nan"), ScalarValue::Str("+.nan".to_string()));
        assert_eq!(infer_plain("007"), ScalarValue::Str("007".to_string()));
        assert_eq!(infer_plain("-00"), ScalarValue::Str("-00".to_string()));
        assert_eq!(infer_plain("0"), ScalarValue::Int(0));
        assert_eq!(infer_plain("007.5"), ScalarValue::Float(7.5));
        assert_eq!(infer_plain("0xZZ"), ScalarValue::Str("0xZZ".to_string()));
        assert_eq!(
            infer_plain("0xFFFFFFFFFFFFFFFF"),
            ScalarValue::Str("0xFFFFFFFFFFFFFFFF".to_string())
        );
    }

    #[test]
    fn test_string_constructor_quotes_resolver_typed_text() {
        let typed = [
            "0x10",
            "0o7",
            "-0b1",
            "0xFFFFFFFFFFFFFFFF",
            ".inf",
            "-.Inf",
            "+.INF",
            ".nan",
            ".NAN",
        ];
        for text in typed {
            assert_eq!(Scalar::string(text).raw(), format!("\"{}\"", text));
        }
        assert_eq!(Scalar::string("007").raw(), "007");
        assert_eq!(Scalar::string("0x").raw(), "0x");
        assert_eq!(Scalar::string("+.nan").raw(), "+.nan");
    }

    #[test]
    fn test_string_scalars_read_back_through_serde_yaml() {
        let cases = [
            "0x10", "0o7", ".inf", "-.inf", ".nan", "007", "+.nan", "a: b", "x:", "- a", "~",
        ];
        for text in cases {
            let literal = format!("k: {}\n", Scalar::string(text).raw());
            let value: serde_yaml::Value = serde_yaml::from_str(&literal).unwrap();
            assert_eq!(value["k"], serde_yaml::Value::String(text.to_string()), "{}", literal);
        }
    }

    #[test]
    fn test_nan_scalars_compare_equal() {
        assert_eq!(Scalar::plain(".nan"), Scalar::plain(".nan"));
        assert_ne!(Scalar::plain(".nan"), Scalar::plain(".inf"));
    }

    #[test]
    fn test_plain_keeps_literal_text() {
        let scalar = Scalar::plain("5.10");
        assert_eq!(scalar.raw(), "5.10");
        assert_eq!(scalar.as_float(), Some(5.1));
        assert_eq!(scalar.as_int(), None);
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        let scalar = Scalar::plain("99999999999999999999");
        assert_eq!(scalar.as_int(), None);
        assert!(scalar.as_float().is_some());
        assert_eq!(scalar.raw(), "99999999999999999999");
    }

    #[test]
    fn test_string_constructor_quotes_ambiguous_text() {
        assert_eq!(Scalar::string("flatfile").raw(), "flatfile");
        assert_eq!(Scalar::string("true").raw(), "\"true\"");
        assert_eq!(Scalar::string("10").raw(), "\"10\"");
        assert_eq!(Scalar::string("").raw(), "\"\"");
        assert_eq!(
            Scalar::string("&p has played").raw(),
            "\"&p has played\""
        );
        assert_eq!(Scalar::string("a: b").raw(), "\"a: b\"");
        assert_eq!(Scalar::string("a #b").raw(), "\"a #b\"");
        assert_eq!(Scalar::string(" padded").raw(), "\" padded\"");
        assert_eq!(Scalar::string("line\nbreak").raw(), "\"line\\nbreak\"");
        assert_eq!(Scalar::string("say \"hi\"").raw(), "say \"hi\"");
        assert_eq!(Scalar::string("\"hi\"").raw(), "\"\\\"hi\\\"\"");
    }

    #[test]
    fn test_float_constructor_never_looks_like_integer() {
        assert_eq!(Scalar::from(1.0).raw(), "1.0");
        assert_eq!(Scalar::from(1e20).raw(), "1e20");
        assert_eq!(Scalar::from(f64::NAN).as_str(), Some("NaN"));
    }

    #[test]
    fn test_accessors_reject_other_kinds() {
        let scalar = Scalar::from(true);
        assert_eq!(scalar.as_bool(), Some(true));
        assert_eq!(scalar.as_int(), None);
        assert_eq!(scalar.as_str(), None);
        assert_eq!(Scalar::from(7i64).as_float(), Some(7.0));
    }

    #[test]
    fn test_display_uses_value_not_literal() {
        assert_eq!(Scalar::string("a: b").to_string(), "a: b");
        assert_eq!(Scalar::plain("True").to_string(), "true");
    }
}
