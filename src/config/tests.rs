use crate::config::{AnalyzerSource, Config, ConfigError, LogFormat};
use crate::memory::DEFAULT_WINDOW;
use clap::App;
use std::fs;
use std::path::PathBuf;

fn cli_config(base: Config, args: &[&str]) -> Result<Config, ConfigError> {
    let app = Config::configure_app(App::new("dumpview"));
    let matches = app.get_matches_from_safe(args.iter().cloned()).unwrap();

    let mut config = base;
    config.apply_arg_matches(&matches)?;
    Ok(config)
}

#[test]
fn missing_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::read(dir.path().join("dumpview.json")).unwrap();

    assert_eq!(config.window, DEFAULT_WINDOW);
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.source(), None);
    assert!(matches!(config.analyzer_source(), Err(ConfigError::NoAnalyzer)));
}

#[test]
fn file_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dumpview.json");
    fs::write(
        &path,
        r#"{
            "window": 32,
            "log_format": "JSON",
            "analyzer": { "program": "tools/analyze", "args": ["--json"] }
        }"#,
    )
    .unwrap();

    let config = Config::read(&path).unwrap();

    assert_eq!(config.source(), Some(path.as_path()));
    assert_eq!(config.window, 32);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(
        config.analyzer_source().unwrap(),
        AnalyzerSource::Program {
            program: dir.path().join("tools").join("analyze"),
            args: vec!["--json".to_string()],
        }
    );
}

#[test]
fn bare_program_name_is_not_resolved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dumpview.json");
    fs::write(&path, r#"{ "analyzer": { "program": "minidump-analyzer" } }"#).unwrap();

    let config = Config::read(&path).unwrap();

    assert_eq!(
        config.analyzer_source().unwrap(),
        AnalyzerSource::Program {
            program: PathBuf::from("minidump-analyzer"),
            args: vec![],
        }
    );
}

#[test]
fn report_beats_program() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dumpview.json");
    fs::write(
        &path,
        r#"{ "report": "crash.json", "analyzer": { "program": "minidump-analyzer" } }"#,
    )
    .unwrap();

    let config = Config::read(&path).unwrap();

    assert_eq!(
        config.analyzer_source().unwrap(),
        AnalyzerSource::Report(dir.path().join("crash.json"))
    );
}

#[test]
fn bad_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dumpview.json");

    fs::write(&path, r#"{ "log_format": "xml" }"#).unwrap();
    assert!(matches!(Config::read(&path), Err(ConfigError::Json(_))));

    fs::write(&path, r#"{ "colour": true }"#).unwrap();
    assert!(matches!(Config::read(&path), Err(ConfigError::Json(_))));
}

#[test]
fn command_line_overrides() {
    let config = cli_config(
        Config::default(),
        &[
            "dumpview",
            "--window",
            "8",
            "--log-format",
            "json",
            "--analyzer",
            "./analyze",
        ],
    )
    .unwrap();

    assert_eq!(config.window, 8);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(
        config.analyzer_source().unwrap(),
        AnalyzerSource::Program {
            program: PathBuf::from("./analyze"),
            args: vec![],
        }
    );

    let config = cli_config(config, &["dumpview", "--report", "saved.json"]).unwrap();

    assert_eq!(config.window, 8);
    assert_eq!(
        config.analyzer_source().unwrap(),
        AnalyzerSource::Report(PathBuf::from("saved.json"))
    );
}

#[test]
fn bad_command_line_values() {
    assert!(matches!(
        cli_config(Config::default(), &["dumpview", "--window", "lots"]),
        Err(ConfigError::InvalidWindow(_))
    ));
    assert!(matches!(
        cli_config(Config::default(), &["dumpview", "--log-format", "xml"]),
        Err(ConfigError::UnknownLogFormat(_))
    ));
}
