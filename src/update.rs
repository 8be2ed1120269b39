//! File pipeline: read, reconcile and atomically rewrite a configuration file.
//!
//! The on-disk file is externally owned. It is read once per call and never
//! held open; when a rewrite is needed the merged document replaces the file
//! in a single rename, so a failure leaves the previous contents in place.
//! Callers must not run two updates against the same path concurrently.

use crate::document::Document;
use crate::error::{ConfsyncError, Result};
use crate::fs::atomic_write;
use crate::parser::parse;
use crate::reconcile::{ExclusionSet, MergeReport, merge};
use crate::writer::serialize;
use std::io;
use std::path::Path;
use tracing::{error, info};

/// What reconciling a file did (or, for [`check_file`], would do).
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The file did not exist and was created from the template text.
    Created,
    /// The file was rewritten with the merged document.
    Updated(MergeReport),
    /// The file already matched the template.
    UpToDate(MergeReport),
}

impl UpdateOutcome {
    /// Whether the file was (or would be) written.
    pub fn is_change(&self) -> bool {
        !matches!(self, UpdateOutcome::UpToDate(_))
    }

    pub fn report(&self) -> Option<&MergeReport> {
        match self {
            UpdateOutcome::Created => None,
            UpdateOutcome::Updated(report) | UpdateOutcome::UpToDate(report) => Some(report),
        }
    }
}

/// Parse the current on-disk state of `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let text =
        std::fs::read_to_string(path).map_err(|e| ConfsyncError::io("read", path, e))?;
    parse(&text)
}

/// Bring the file at `path` in line with `template_text`.
///
/// A missing file is created with the template text exactly as given, so
/// the bundled layout and comments land on disk untouched. When exclusions
/// cover template keys, the file is instead created from the merge against
/// an empty document, which leaves those keys out. An existing file is
/// merged and only rewritten when the merge changed it.
///
/// # Errors
///
/// * [`ConfsyncError::MalformedDocument`] if the template or the file does
///   not parse. The file is left untouched.
/// * [`ConfsyncError::IoFailure`] if reading or replacing the file fails.
pub fn reconcile_file<P: AsRef<Path>>(
    template_text: &str,
    path: P,
    excluded: &ExclusionSet,
) -> Result<UpdateOutcome> {
    let path = path.as_ref();
    match plan(template_text, path, excluded)? {
        Plan::Create(text) => {
            atomic_write(path, &text)?;
            info!(path = %path.display(), "created configuration file from template");
            Ok(UpdateOutcome::Created)
        }
        Plan::Rewrite(document, report) => {
            atomic_write(path, &serialize(&document))?;
            info!(path = %path.display(), changes = %report.summary(), "updated configuration file");
            Ok(UpdateOutcome::Updated(report))
        }
        Plan::Keep(report) => Ok(UpdateOutcome::UpToDate(report)),
    }
}

/// Like [`reconcile_file`], but never writes.
pub fn check_file<P: AsRef<Path>>(
    template_text: &str,
    path: P,
    excluded: &ExclusionSet,
) -> Result<UpdateOutcome> {
    Ok(match plan(template_text, path.as_ref(), excluded)? {
        Plan::Create(_) => UpdateOutcome::Created,
        Plan::Rewrite(_, report) => UpdateOutcome::Updated(report),
        Plan::Keep(report) => UpdateOutcome::UpToDate(report),
    })
}

/// Reconcile `path` against `template_text`, reporting I/O trouble as `false`.
///
/// Returns `Ok(true)` when the file is current afterwards, whether or not it
/// had to be written. Filesystem failures are logged and yield `Ok(false)`
/// so the caller can keep running on its last loaded state and retry later.
///
/// # Errors
///
/// [`ConfsyncError::MalformedDocument`] is not swallowed: a broken file or
/// template needs a human.
pub fn update<P: AsRef<Path>>(
    template_text: &str,
    path: P,
    excluded: &ExclusionSet,
) -> Result<bool> {
    let path = path.as_ref();
    match reconcile_file(template_text, path, excluded) {
        Ok(_) => Ok(true),
        Err(e) if e.is_io() => {
            error!(path = %path.display(), error = %e, "configuration update failed");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

enum Plan {
    /// Text for the new file.
    Create(String),
    Rewrite(Document, MergeReport),
    Keep(MergeReport),
}

fn plan(template_text: &str, path: &Path, excluded: &ExclusionSet) -> Result<Plan> {
    let template = parse(template_text)?;

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(Plan::Create(initial_text(template_text, &template, excluded)));
        }
        Err(e) => return Err(ConfsyncError::io("read", path, e)),
    };
    let existing = parse(&text)?;

    let merged = merge(&template, &existing, excluded);
    if merged.changed {
        Ok(Plan::Rewrite(merged.document, merged.report))
    } else {
        Ok(Plan::Keep(merged.report))
    }
}

fn initial_text(template_text: &str, template: &Document, excluded: &ExclusionSet) -> String {
    if excluded.is_empty() {
        return template_text.to_string();
    }
    serialize(&merge(template, &Document::new(), excluded).document)
}
