//! Implementation of the `confsync get` command.

use crate::cli::GetArgs;
use crate::document::{Document, KeyPath, Node};
use crate::error::{ConfsyncError, Result};
use crate::update::load;

/// Execute the `confsync get` command.
pub fn cmd_get(args: GetArgs) -> Result<()> {
    let document = load(&args.config)?;
    println!("{}", lookup(&document, &args.key)?);
    Ok(())
}

/// The value at `key` as plain text.
fn lookup(document: &Document, key: &str) -> Result<String> {
    let path = KeyPath::parse(key);
    match document.get(&path) {
        Some(Node::Leaf(scalar)) => Ok(scalar.to_string()),
        Some(Node::Section(mapping)) => {
            let keys: Vec<&str> = mapping.entries().iter().map(|e| e.key.as_str()).collect();
            Err(ConfsyncError::UserError(format!(
                "'{}' is a section, not a value.\n\nKeys in this section: {}",
                path,
                if keys.is_empty() {
                    "(none)".to_string()
                } else {
                    keys.join(", ")
                }
            )))
        }
        None => Err(ConfsyncError::UserError(format!("key '{}' not found", path))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_lookup_leaf() {
        let doc = parse("sql:\n  table prefix: 'ar_'\n  usessl: false\n").unwrap();

        assert_eq!(lookup(&doc, "sql.table prefix").unwrap(), "ar_");
        assert_eq!(lookup(&doc, "sql.usessl").unwrap(), "false");
    }

    #[test]
    fn test_lookup_section_lists_keys() {
        let doc = parse("sql:\n  enabled: true\n  hostname: db\nempty: {}\n").unwrap();

        let err = lookup(&doc, "sql").unwrap_err().to_string();
        assert!(err.contains("is a section"));
        assert!(err.contains("enabled, hostname"));

        let err = lookup(&doc, "empty").unwrap_err().to_string();
        assert!(err.contains("(none)"));
    }

    #[test]
    fn test_lookup_missing_key() {
        let doc = parse("a: 1\n").unwrap();
        let err = lookup(&doc, "a.b").unwrap_err();
        assert!(matches!(err, ConfsyncError::UserError(_)));
        assert_eq!(err.to_string(), "key 'a.b' not found");
    }
}
