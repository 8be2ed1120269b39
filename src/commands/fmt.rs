//! Implementation of the `confsync fmt` command.
//!
//! Formatting is a parse followed by a serialize: keys, values and comments
//! are kept, indentation and spacing are normalized.

use crate::cli::FmtArgs;
use crate::error::{ConfsyncError, Result};
use crate::fs::atomic_write;
use crate::parser::parse;
use crate::writer::serialize;
use tracing::info;

/// Execute the `confsync fmt` command.
pub fn cmd_fmt(args: FmtArgs) -> Result<()> {
    let path = &args.config;
    let text = std::fs::read_to_string(path).map_err(|e| ConfsyncError::io("read", path, e))?;
    let formatted = serialize(&parse(&text)?);

    if formatted == text {
        println!("{}: already formatted", path.display());
        return Ok(());
    }

    if args.check {
        return Err(ConfsyncError::OutOfDate(format!(
            "'{}' is not formatted.\n\nRun `confsync fmt {}` to fix it.",
            path.display(),
            path.display()
        )));
    }

    atomic_write(path, &formatted)?;
    info!(path = %path.display(), "formatted configuration file");
    println!("{}: formatted", path.display());
    Ok(())
}
