// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use clap::Parser;
use std::collections::HashMap;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["appshot"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn no_env(_: &str) -> Option<String> {
    None
}

fn resolve(args: &[&str], file: FileConfig) -> Result<Settings, ConfigError> {
    Settings::resolve(&cli(args), file, Path::new("/work"), no_env)
}

#[test]
fn defaults_without_config() {
    let settings = resolve(&["--backend", "grim"], FileConfig::default()).unwrap();
    assert_eq!(settings.app, "ParticleLife");
    assert_eq!(
        settings.output_dir,
        PathBuf::from("/work/ParticleLifeScreenshots")
    );
    assert_eq!(settings.backend, BackendKind::Grim);
    assert_eq!(settings.programs, Programs::default());
    assert_eq!(settings.summary, SummaryOptions::default());
    assert_eq!(settings.stages, default_stages());
}

#[test]
fn backend_defaults_to_platform() {
    let settings = resolve(&[], FileConfig::default()).unwrap();
    assert_eq!(settings.backend, BackendKind::platform_default());
}

#[test]
fn parses_full_file() {
    let text = r#"
app = "Boids"
output_dir = "shots"
backend = "screencapture"

[programs]
screencapture = "/opt/bin/screencapture"
hyprctl = "hyprctl-wrapper"

[summary]
file_name = "GALLERY.md"
limit = 3
heading = "Gallery"

[[stages]]
name = "start"
instruction = "Fresh launch"

[[stages]]
name = "swarm"
instruction = "Wait for the swarm to form"
"#;
    let file = FileConfig::parse(text, Path::new("appshot.toml")).unwrap();
    let settings = resolve(&[], file).unwrap();

    assert_eq!(settings.app, "Boids");
    assert_eq!(settings.output_dir, PathBuf::from("/work/shots"));
    assert_eq!(settings.backend, BackendKind::Screencapture);
    assert_eq!(settings.programs.screencapture, "/opt/bin/screencapture");
    assert_eq!(settings.programs.hyprctl, "hyprctl-wrapper");
    assert_eq!(settings.programs.grim, "grim");
    assert_eq!(settings.summary.file_name, "GALLERY.md");
    assert_eq!(settings.summary.limit, 3);
    assert_eq!(settings.summary.heading, "Gallery");
    assert_eq!(
        settings.stages,
        vec![
            Stage::new("start", "Fresh launch"),
            Stage::new("swarm", "Wait for the swarm to form"),
        ]
    );
}

#[test]
fn cli_overrides_file() {
    let file = FileConfig {
        app: Some("Boids".into()),
        output_dir: Some("shots".into()),
        backend: Some(BackendKind::Screencapture),
        ..Default::default()
    };
    let settings = resolve(
        &["--app", "Flock", "-o", "/tmp/out", "--backend", "grim"],
        file,
    )
    .unwrap();
    assert_eq!(settings.app, "Flock");
    assert_eq!(settings.output_dir, PathBuf::from("/tmp/out"));
    assert_eq!(settings.backend, BackendKind::Grim);
}

#[test]
fn program_env_overrides_file() {
    let file = FileConfig {
        programs: ProgramsConfig {
            grim: Some("from-file".into()),
            slurp: Some("slurp-file".into()),
            ..Default::default()
        },
        ..Default::default()
    };
    let env: HashMap<&str, &str> = [(env::APPSHOT_GRIM_BIN, "from-env")].into();
    let settings = Settings::resolve(&cli(&[]), file, Path::new("/work"), |name| {
        env.get(name).map(|v| v.to_string())
    })
    .unwrap();
    assert_eq!(settings.programs.grim, "from-env");
    assert_eq!(settings.programs.slurp, "slurp-file");
    assert_eq!(settings.programs.osascript, "osascript");
}

#[test]
fn unknown_field_rejected() {
    let err = FileConfig::parse("colour = true\n", Path::new("appshot.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("appshot.toml"));
}

#[test]
fn unknown_backend_rejected() {
    let err = FileConfig::parse("backend = \"x11\"\n", Path::new("a.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn zero_limit_rejected() {
    let file = FileConfig::parse("[summary]\nlimit = 0\n", Path::new("a.toml")).unwrap();
    let err = resolve(&[], file).unwrap_err();
    assert!(err.to_string().contains("summary.limit"));
}

#[test]
fn nested_summary_file_name_rejected() {
    let file = FileConfig::parse("[summary]\nfile_name = \"docs/X.md\"\n", Path::new("a.toml"))
        .unwrap();
    assert!(resolve(&[], file).is_err());
}

#[test]
fn stage_names_must_be_snake_case() {
    let file = FileConfig {
        stages: vec![Stage::new("Big Bang", "Start")],
        ..Default::default()
    };
    let err = resolve(&[], file).unwrap_err();
    assert!(err.to_string().contains("Big Bang"));
}

#[test]
fn empty_app_rejected() {
    assert!(resolve(&["--app", " "], FileConfig::default()).is_err());
}

#[test]
fn discover_without_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        FileConfig::discover(None, dir.path()).unwrap(),
        FileConfig::default()
    );
}

#[test]
fn discover_picks_up_implicit_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "app = \"Boids\"\n").unwrap();
    let file = FileConfig::discover(None, dir.path()).unwrap();
    assert_eq!(file.app.as_deref(), Some("Boids"));
}

#[test]
fn discover_explicit_is_relative_to_cwd() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("custom.toml"), "app = \"Flock\"\n").unwrap();
    let file = FileConfig::discover(Some(Path::new("custom.toml")), dir.path()).unwrap();
    assert_eq!(file.app.as_deref(), Some("Flock"));
}

#[test]
fn discover_missing_explicit_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = FileConfig::discover(Some(Path::new("nope.toml")), dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
