//! Logging initialization for the harvester tools.
//!
//! Progress and failures go to the terminal; a log file can be added through
//! the settings file.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{CombinedLogger, Config, ConfigBuilder, SharedLogger, WriteLogger};

/// Warnings only by default; per-URL `[OK]`/`[FAILED]` lines need `verbose`.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}

/// Initialize the global logger. A log file that cannot be created is
/// reported and skipped.
pub fn initialize(verbose: bool, log_file: Option<&Path>) {
    let level = level_for(verbose);

    let mut loggers: Vec<Box<dyn SharedLogger>> =
        vec![engine_logging::terminal_logger(level, terminal_config())];
    if let Some(path) = log_file {
        if let Some(file_logger) = create_file_logger(path) {
            loggers.push(file_logger);
        }
    }

    let _ = CombinedLogger::init(loggers);
}

fn terminal_config() -> Config {
    ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build()
}

fn file_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Info)
        .build()
}

// The file always records full detail, independent of `--verbose`.
fn create_file_logger(path: &Path) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(LevelFilter::Debug, file_config(), file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
