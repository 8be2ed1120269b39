//! Confsync: template-driven reconciliation of commented configuration files.
//!
//! A bundled template is the source of truth for which options exist. On
//! every run the file on disk is brought in line with it: new options are
//! added with their defaults and comments, retired options are removed, and
//! the values and comments a user wrote are kept.
//!
//! The pipeline is [`parse`] → [`merge`] → [`serialize`], wrapped by
//! [`update()`] for files on disk and by [`settings::SettingsStore`] for typed
//! access to the result.

pub mod cli;
pub mod commands;
pub mod document;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod logging;
pub mod parser;
pub mod reconcile;
pub mod settings;
pub mod update;
pub mod writer;

pub use document::{Document, KeyPath};
pub use error::{ConfsyncError, Result};
pub use parser::parse;
pub use reconcile::{ExclusionSet, MergeReport, Merged, merge};
pub use update::{UpdateOutcome, load, update};
pub use writer::serialize;
