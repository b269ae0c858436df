use clap::{CommandFactory, FromArgMatches, Parser};
use std::fs;
use tempfile::tempdir;
use yams::config::{Config, DisplayParams, StorageParams};
use yams::consts::{ROUNDS_KEY, STATE_KEY};
use yams::YamsError;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (Config, clap::ArgMatches) {
    let matches = TestCli::command()
        .try_get_matches_from(std::iter::once("yams").chain(args.iter().copied()))
        .unwrap();
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

#[test]
fn test_cli_defaults_match_default_impl() {
    let (config, _) = parse(&[]);
    assert_eq!(config, Config::default());
    assert_eq!(config.storage.state_key, STATE_KEY);
    assert_eq!(config.storage.rounds_key, ROUNDS_KEY);
    assert_eq!(config.display.history_top, 3);
}

#[test]
fn test_partial_json_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"display": {"history_top": 5}}"#).unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.display, DisplayParams { history_top: 5 });
    assert_eq!(config.storage, StorageParams::default());
}

#[test]
fn test_explicit_cli_values_override_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{"storage": {"data_dir": "/srv/yams", "state_key": "s"}, "display": {"history_top": 5}}"#,
    )
    .unwrap();

    let (cli, matches) = parse(&["--history-top", "1", "--rounds-key", "r"]);
    let mut config = Config::load_from_file(&path).unwrap();
    config.merge_from_cli(&cli, &matches);

    assert_eq!(config.display.history_top, 1);
    assert_eq!(config.storage.rounds_key, "r");
    // Not given on the command line, so the file wins over the CLI default.
    assert_eq!(config.storage.data_dir, "/srv/yams");
    assert_eq!(config.storage.state_key, "s");
}

#[test]
fn test_bad_config_files() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        Config::load_from_file(dir.path().join("missing.json")),
        Err(YamsError::Config(_))
    ));

    let path = dir.path().join("broken.json");
    fs::write(&path, "{").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(YamsError::Config(_))
    ));
}
