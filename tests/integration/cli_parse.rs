use clap::Parser;
use envscope::tooling::cli::{Cli, CliContext, Commands};
use envscope::EnvironmentTarget;
use std::fs;
use tempfile::TempDir;

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["envscope", "show"],
        vec!["envscope", "show", "--format", "json"],
        vec!["envscope", "--target", "user", "get", "ConnectionStrings:main"],
        vec!["envscope", "--prefix", "APP_", "sections"],
        vec!["envscope", "sections", "ConnectionStrings"],
        vec!["envscope", "--store", "/tmp/vars.toml", "settings", "--no-process-env"],
        vec!["envscope", "settings", "--file", "appsettings.toml"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_target_defaults_to_machine() {
    let cli = Cli::try_parse_from(["envscope", "show"]).unwrap();
    assert_eq!(cli.target, EnvironmentTarget::Machine);

    let cli = Cli::try_parse_from(["envscope", "--target", "USER", "show"]).unwrap();
    assert_eq!(cli.target, EnvironmentTarget::User);
}

#[test]
fn parse_rejects_unknown_target() {
    assert!(Cli::try_parse_from(["envscope", "--target", "session", "show"]).is_err());
    assert!(Cli::try_parse_from(["envscope", "get"]).is_err());
}

#[test]
fn context_reads_snapshot_file() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = temp_dir.path().join("variables.toml");
    fs::write(
        &snapshot,
        "[user]\nAPP_NestedTest__NestedProperty1 = \"v\"\nOTHER_X = \"v2\"\n",
    )
    .unwrap();

    let cli = CliContext::new(
        Some(snapshot),
        EnvironmentTarget::User,
        Some("APP_".to_string()),
    )
    .unwrap();

    let value = cli
        .execute(&Commands::Get {
            key: "NestedTest:NestedProperty1".to_string(),
        })
        .unwrap();
    assert_eq!(value, "v");

    let sections = cli.execute(&Commands::Sections { parent: None }).unwrap();
    assert_eq!(sections, "NestedTest");
}

#[test]
fn context_reports_missing_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let cli = CliContext::new(
        Some(temp_dir.path().join("missing.toml")),
        EnvironmentTarget::User,
        None,
    )
    .unwrap();

    let err = cli
        .execute(&Commands::Show {
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(format!("{:#}", err).contains("User"));
}
