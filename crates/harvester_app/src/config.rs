//! Optional RON settings file, merged with defaults and CLI flags.
//!
//! Precedence: CLI flag, then settings file, then the tool's defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use harvester_core::LibraryFilter;
use harvester_engine::{HarvestMode, HarvestSettings};
use serde::Deserialize;

use crate::cli::Args;

/// Every field is optional; missing fields keep the tool default.
///
/// Timeouts are in seconds; `0` disables that timeout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub output_dir: Option<PathBuf>,
    pub threads: Option<u16>,
    pub libraries: Option<Vec<String>>,
    pub skip_blank_lines: Option<bool>,
    pub page_timeout_secs: Option<u64>,
    pub resource_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub redirect_limit: Option<usize>,
    pub max_bytes: Option<u64>,
    pub user_agent: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing settings file {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }
}

/// Fully resolved settings for one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    pub harvest: HarvestSettings,
    pub skip_blank_lines: bool,
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
}

impl ToolConfig {
    pub fn resolve(mode: HarvestMode, file: ConfigFile, args: &Args) -> Self {
        let mut harvest = HarvestSettings::for_mode(mode);

        if let Some(dir) = args.output.clone().or(file.output_dir) {
            harvest.output_dir = dir;
        }
        harvest.workers = usize::from(args.threads.or(file.threads).unwrap_or(1));
        if let Some(names) = file.libraries {
            harvest.libraries = LibraryFilter::new(names);
        }

        let fetch = &mut harvest.fetch;
        if let Some(secs) = file.page_timeout_secs {
            fetch.page_timeout = optional_timeout(secs);
        }
        if let Some(secs) = file.resource_timeout_secs {
            fetch.resource_timeout = optional_timeout(secs);
        }
        if let Some(secs) = file.connect_timeout_secs {
            fetch.connect_timeout = optional_timeout(secs);
        }
        if let Some(limit) = file.redirect_limit {
            fetch.redirect_limit = limit;
        }
        if let Some(max_bytes) = file.max_bytes {
            fetch.max_bytes = max_bytes;
        }
        if let Some(user_agent) = file.user_agent {
            fetch.user_agent = user_agent;
        }

        Self {
            harvest,
            skip_blank_lines: file.skip_blank_lines.unwrap_or(false),
            verbose: args.verbose,
            log_file: file.log_file,
        }
    }

    /// Reads the settings file named on the command line, if any, and resolves.
    pub fn from_args(mode: HarvestMode, args: &Args) -> anyhow::Result<Self> {
        let file = match &args.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        Ok(Self::resolve(mode, file, args))
    }
}

fn optional_timeout(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
