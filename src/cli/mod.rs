//! CLI argument parsing for confsync.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::logging::LogFormat;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Confsync: keep a commented configuration file in line with its template.
///
/// New options from the template are added with their defaults and
/// comments, options the template no longer has are removed, and every
/// value and comment you wrote is kept.
#[derive(Parser, Debug)]
#[command(name = "confsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    ///
    /// Ignored when CONFSYNC_LOG is set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

/// Available commands for confsync.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconcile a configuration file with its template.
    ///
    /// Creates the file from the template when it does not exist. The file
    /// is only rewritten when something changed.
    Update(UpdateArgs),

    /// Report whether a configuration file is in line with its template.
    ///
    /// Never writes. Exits with status 2 when the file would change.
    Check(CheckArgs),

    /// Print the value stored at a dotted key.
    Get(GetArgs),

    /// Rewrite a configuration file in canonical layout.
    ///
    /// Normalizes indentation without changing keys, values or comments.
    Fmt(FmtArgs),
}

/// Template and exclusions shared by `update` and `check`.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Template file. Defaults to the bundled settings template.
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Dotted key path to leave alone (repeatable). Excluding a section
    /// covers everything below it.
    #[arg(short = 'x', long = "exclude", value_name = "KEY")]
    pub exclude: Vec<String>,
}

/// Arguments for the `update` command.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Configuration file to reconcile.
    pub config: PathBuf,

    #[command(flatten)]
    pub template: TemplateArgs,

    /// Show what would change without writing.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the change report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration file to check.
    pub config: PathBuf,

    #[command(flatten)]
    pub template: TemplateArgs,

    /// Print the change report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `get` command.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration file to read.
    pub config: PathBuf,

    /// Dotted key path, e.g. `sql.hostname`.
    pub key: String,
}

/// Arguments for the `fmt` command.
#[derive(Args, Debug)]
pub struct FmtArgs {
    /// Configuration file to format.
    pub config: PathBuf,

    /// Fail with status 2 instead of rewriting when the layout differs.
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
