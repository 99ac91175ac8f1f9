use std::io::Cursor;

use clap::Parser;
use harvester_app::{harvest_input, Args, ConfigFile, ToolConfig};
use harvester_engine::HarvestMode;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn config_in(temp: &TempDir, mode: HarvestMode, file: ConfigFile) -> ToolConfig {
    engine_logging::initialize_for_tests();
    let out = temp.path().join(mode.default_output_dir());
    let out = out.to_str().unwrap().to_string();
    let args = Args::try_parse_from(["harvest", "-o", out.as_str()]).unwrap();
    ToolConfig::resolve(mode, file, &args)
}

#[test]
fn empty_input_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp, HarvestMode::FullPage, ConfigFile::default());

    let report = harvest_input(&config, Cursor::new("")).unwrap();

    assert!(report.is_empty());
    assert!(!config.harvest.output_dir.exists());
}

#[test]
fn blank_lines_only_count_as_no_input_when_skipped() {
    let temp = TempDir::new().unwrap();
    let file = ConfigFile {
        skip_blank_lines: Some(true),
        ..ConfigFile::default()
    };
    let config = config_in(&temp, HarvestMode::ScriptsOnly, file);

    let report = harvest_input(&config, Cursor::new("\n   \n\n")).unwrap();

    assert!(report.is_empty());
    assert!(!config.harvest.output_dir.exists());
}

#[test]
fn unreachable_seeds_still_complete_the_run() {
    let temp = TempDir::new().unwrap();
    let config = config_in(&temp, HarvestMode::ScriptsOnly, ConfigFile::default());

    let report = harvest_input(
        &config,
        Cursor::new("  http://127.0.0.1:1/a  \n\nhttp://127.0.0.1:1/b\n"),
    )
    .unwrap();

    let urls: Vec<&str> = report.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec!["http://127.0.0.1:1/a", "", "http://127.0.0.1:1/b"]);
    assert_eq!(report.pages_failed(), 3);
    assert!(config.harvest.output_dir.is_dir());
    assert_eq!(std::fs::read_dir(&config.harvest.output_dir).unwrap().count(), 0);
}
