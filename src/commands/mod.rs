//! Command implementations for confsync.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the helpers the reconciling commands share.

mod check;
mod fmt;
mod get;
mod update;

#[cfg(test)]
mod tests;

use crate::cli::{Command, TemplateArgs};
use crate::error::{ConfsyncError, Result};
use crate::reconcile::{ExclusionSet, MergeReport};
use crate::settings::DEFAULT_TEMPLATE;
use crate::update::UpdateOutcome;
use serde_json::json;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Update(args) => update::cmd_update(args),
        Command::Check(args) => check::cmd_check(args),
        Command::Get(args) => get::cmd_get(args),
        Command::Fmt(args) => fmt::cmd_fmt(args),
    }
}

/// Template text from `--template`, or the bundled settings template.
fn template_text(args: &TemplateArgs) -> Result<String> {
    match &args.template {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|e| ConfsyncError::io("read template", path, e))
        }
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

fn exclusions(args: &TemplateArgs) -> ExclusionSet {
    args.exclude.iter().map(String::as_str).collect()
}

/// Human-readable description of an outcome, one line per affected key.
///
/// `dry_run` switches the wording to what would happen.
fn render_outcome(path: &Path, outcome: &UpdateOutcome, dry_run: bool) -> String {
    let path = path.display();
    let mut out = match (outcome, dry_run) {
        (UpdateOutcome::Created, false) => format!("{}: created from template\n", path),
        (UpdateOutcome::Created, true) => format!("{}: would be created from template\n", path),
        (UpdateOutcome::Updated(report), false) => {
            format!("{}: updated ({})\n", path, report.summary())
        }
        (UpdateOutcome::Updated(report), true) => {
            format!("{}: would be updated ({})\n", path, report.summary())
        }
        (UpdateOutcome::UpToDate(_), _) => format!("{}: up to date\n", path),
    };

    if let Some(report) = outcome.report() {
        render_report_lines(&mut out, report);
    }
    out
}

fn render_report_lines(out: &mut String, report: &MergeReport) {
    for path in &report.added {
        out.push_str(&format!("  + {}\n", path));
    }
    for path in &report.pruned {
        out.push_str(&format!("  - {}\n", path));
    }
    for conflict in &report.conflicts {
        out.push_str(&format!(
            "  ! {} ({} replaced by template {})\n",
            conflict.path, conflict.existing, conflict.template
        ));
    }
    for path in &report.retained {
        out.push_str(&format!("  = {} (excluded)\n", path));
    }
}

/// Machine-readable form of an outcome.
fn outcome_json(path: &Path, outcome: &UpdateOutcome, dry_run: bool) -> serde_json::Value {
    let status = match outcome {
        UpdateOutcome::Created => "created",
        UpdateOutcome::Updated(_) => "updated",
        UpdateOutcome::UpToDate(_) => "up_to_date",
    };
    json!({
        "path": path.display().to_string(),
        "status": status,
        "dry_run": dry_run,
        "report": outcome.report(),
    })
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ConfsyncError::UserError(format!("failed to serialize report: {}", e)))?;
    println!("{}", text);
    Ok(())
}
