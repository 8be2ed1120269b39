//! Implementation of the `confsync check` command.

use super::{exclusions, outcome_json, print_json, render_outcome, template_text};
use crate::cli::CheckArgs;
use crate::error::{ConfsyncError, Result};
use crate::update::check_file;

/// Execute the `confsync check` command.
///
/// Prints the plan and fails with [`ConfsyncError::OutOfDate`] when the file
/// would be created or rewritten.
pub fn cmd_check(args: CheckArgs) -> Result<()> {
    let template = template_text(&args.template)?;
    let outcome = check_file(&template, &args.config, &exclusions(&args.template))?;

    if args.json {
        print_json(&outcome_json(&args.config, &outcome, true))?;
    } else {
        print!("{}", render_outcome(&args.config, &outcome, true));
    }

    if outcome.is_change() {
        return Err(ConfsyncError::OutOfDate(format!(
            "'{}' is out of date with its template.\n\nRun `confsync update {}` to fix it.",
            args.config.display(),
            args.config.display()
        )));
    }
    Ok(())
}
