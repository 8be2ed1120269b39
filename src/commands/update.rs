//! Implementation of the `confsync update` command.

use super::{exclusions, outcome_json, print_json, render_outcome, template_text};
use crate::cli::UpdateArgs;
use crate::error::Result;
use crate::update::{check_file, reconcile_file};

/// Execute the `confsync update` command.
///
/// Reconciles the file against the template and prints what changed. With
/// `--dry-run` the plan is printed and nothing is written.
pub fn cmd_update(args: UpdateArgs) -> Result<()> {
    let template = template_text(&args.template)?;
    let excluded = exclusions(&args.template);

    let outcome = if args.dry_run {
        check_file(&template, &args.config, &excluded)?
    } else {
        reconcile_file(&template, &args.config, &excluded)?
    };

    if args.json {
        print_json(&outcome_json(&args.config, &outcome, args.dry_run))
    } else {
        print!("{}", render_outcome(&args.config, &outcome, args.dry_run));
        Ok(())
    }
}
