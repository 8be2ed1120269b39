//! Tests for the command implementations.

use super::*;
use crate::cli::{CheckArgs, FmtArgs, GetArgs, UpdateArgs};
use crate::document::{KeyPath, NodeKind};
use crate::exit_codes;
use crate::reconcile::StructuralConflict;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const TEMPLATE: &str = "# Minutes between checks\ninterval check: 5\nsql:\n  enabled: false\n";

struct Fixture {
    _temp: TempDir,
    config: PathBuf,
    template: PathBuf,
}

fn fixture(existing: Option<&str>) -> Fixture {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("Settings.yml");
    let template = temp.path().join("template.yml");
    fs::write(&template, TEMPLATE).unwrap();
    if let Some(text) = existing {
        fs::write(&config, text).unwrap();
    }
    Fixture {
        _temp: temp,
        config,
        template,
    }
}

fn template_args(f: &Fixture, exclude: &[&str]) -> TemplateArgs {
    TemplateArgs {
        template: Some(f.template.clone()),
        exclude: exclude.iter().map(|s| s.to_string()).collect(),
    }
}

fn update_args(f: &Fixture, dry_run: bool) -> UpdateArgs {
    UpdateArgs {
        config: f.config.clone(),
        template: template_args(f, &[]),
        dry_run,
        json: false,
    }
}

#[test]
fn test_update_creates_and_reconciles() {
    let f = fixture(None);

    dispatch(Command::Update(update_args(&f, false))).unwrap();
    assert_eq!(fs::read_to_string(&f.config).unwrap(), TEMPLATE);

    fs::write(&f.config, "interval check: 10\nlegacy: 1\n").unwrap();
    dispatch(Command::Update(update_args(&f, false))).unwrap();
    assert_eq!(
        fs::read_to_string(&f.config).unwrap(),
        "# Minutes between checks\ninterval check: 10\nsql:\n  enabled: false\n"
    );
}

#[test]
fn test_update_dry_run_does_not_write() {
    let f = fixture(Some("interval check: 10\n"));

    dispatch(Command::Update(update_args(&f, true))).unwrap();

    assert_eq!(fs::read_to_string(&f.config).unwrap(), "interval check: 10\n");
}

#[test]
fn test_update_with_exclusion_keeps_custom_section() {
    let f = fixture(Some("interval check: 5\nsql:\n  enabled: false\ncustom:\n  a: 1\n"));

    dispatch(Command::Update(UpdateArgs {
        config: f.config.clone(),
        template: template_args(&f, &["custom"]),
        dry_run: false,
        json: true,
    }))
    .unwrap();

    assert!(
        fs::read_to_string(&f.config)
            .unwrap()
            .contains("custom:\n  a: 1\n")
    );
}

#[test]
fn test_check_reports_out_of_date() {
    let f = fixture(Some("interval check: 10\n"));

    let err = dispatch(Command::Check(CheckArgs {
        config: f.config.clone(),
        template: template_args(&f, &[]),
        json: false,
    }))
    .unwrap_err();

    assert!(matches!(err, ConfsyncError::OutOfDate(_)));
    assert_eq!(err.exit_code(), exit_codes::OUT_OF_DATE);
    assert_eq!(fs::read_to_string(&f.config).unwrap(), "interval check: 10\n");
}

#[test]
fn test_check_passes_when_current() {
    let f = fixture(Some(TEMPLATE));

    dispatch(Command::Check(CheckArgs {
        config: f.config.clone(),
        template: template_args(&f, &[]),
        json: true,
    }))
    .unwrap();
}

#[test]
fn test_check_malformed_file() {
    let f = fixture(Some("interval check: 5\n  nested: 1\n"));

    let err = dispatch(Command::Check(CheckArgs {
        config: f.config.clone(),
        template: template_args(&f, &[]),
        json: false,
    }))
    .unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::MALFORMED_DOCUMENT);
}

#[test]
fn test_missing_template_is_io_failure() {
    let f = fixture(None);
    let mut args = update_args(&f, false);
    args.template.template = Some(f.template.with_file_name("nope.yml"));

    let err = dispatch(Command::Update(args)).unwrap_err();

    assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
    assert!(err.to_string().contains("failed to read template"));
}

#[test]
fn test_bundled_template_is_default() {
    let args = TemplateArgs {
        template: None,
        exclude: vec![],
    };
    assert_eq!(template_text(&args).unwrap(), DEFAULT_TEMPLATE);
}

#[test]
fn test_get() {
    let f = fixture(Some(TEMPLATE));

    dispatch(Command::Get(GetArgs {
        config: f.config.clone(),
        key: "sql.enabled".to_string(),
    }))
    .unwrap();

    let err = dispatch(Command::Get(GetArgs {
        config: f.config.clone(),
        key: "sql.hostname".to_string(),
    }))
    .unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn test_fmt_normalizes_and_check_detects() {
    let f = fixture(Some("sql:\n    enabled: true   # on\n"));

    let err = dispatch(Command::Fmt(FmtArgs {
        config: f.config.clone(),
        check: true,
    }))
    .unwrap_err();
    assert_eq!(err.exit_code(), exit_codes::OUT_OF_DATE);

    dispatch(Command::Fmt(FmtArgs {
        config: f.config.clone(),
        check: false,
    }))
    .unwrap();
    assert_eq!(
        fs::read_to_string(&f.config).unwrap(),
        "sql:\n  enabled: true # on\n"
    );

    dispatch(Command::Fmt(FmtArgs {
        config: f.config.clone(),
        check: true,
    }))
    .unwrap();
}

#[test]
fn test_render_outcome() {
    let report = MergeReport {
        added: vec![KeyPath::parse("sql.usessl")],
        pruned: vec![KeyPath::parse("legacy")],
        retained: vec![KeyPath::parse("custom")],
        conflicts: vec![StructuralConflict {
            path: KeyPath::parse("sql"),
            template: NodeKind::Section,
            existing: NodeKind::Leaf,
        }],
    };
    let path = Path::new("Settings.yml");

    assert_eq!(
        render_outcome(path, &UpdateOutcome::Updated(report.clone()), false),
        "Settings.yml: updated (1 added, 1 pruned, 1 replaced, 1 retained)\n  + sql.usessl\n  - legacy\n  ! sql (leaf replaced by template section)\n  = custom (excluded)\n"
    );
    assert_eq!(
        render_outcome(path, &UpdateOutcome::Created, true),
        "Settings.yml: would be created from template\n"
    );
    assert_eq!(
        render_outcome(path, &UpdateOutcome::UpToDate(MergeReport::default()), false),
        "Settings.yml: up to date\n"
    );
}

#[test]
fn test_outcome_json() {
    let report = MergeReport {
        added: vec![KeyPath::parse("sql.usessl")],
        ..MergeReport::default()
    };

    let value = outcome_json(Path::new("s.yml"), &UpdateOutcome::Updated(report), false);
    assert_eq!(value["status"], "updated");
    assert_eq!(value["dry_run"], false);
    assert_eq!(value["report"]["added"][0], "sql.usessl");

    let value = outcome_json(Path::new("s.yml"), &UpdateOutcome::Created, true);
    assert_eq!(value["status"], "created");
    assert!(value["report"].is_null());
}
