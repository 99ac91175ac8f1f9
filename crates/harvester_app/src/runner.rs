//! Shared entry point of the harvester tools: stdin in, artifacts out.

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_error, engine_info, engine_warn};
use harvester_core::parse_seed_lines;
use harvester_engine::{HarvestMode, Harvester, RunReport};

use crate::cli::Args;
use crate::config::ToolConfig;
use crate::logging;

pub const NO_INPUT_MESSAGE: &str = "No URLs received from STDIN";

/// Parses the command line, reads seeds from stdin and harvests them.
///
/// Individual URL failures never fail the process; only unusable settings
/// or an unusable output directory do.
pub fn run_tool(mode: HarvestMode) -> ExitCode {
    let args = Args::parse();
    let config = match ToolConfig::from_args(mode, &args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    logging::initialize(config.verbose, config.log_file.as_deref());

    match harvest_input(&config, std::io::stdin().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            engine_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Reads all of `input` as seed lines and runs one harvest over them.
pub fn harvest_input(config: &ToolConfig, mut input: impl Read) -> anyhow::Result<RunReport> {
    let mut raw = String::new();
    input
        .read_to_string(&mut raw)
        .context("reading seed URLs from input")?;

    let seeds = parse_seed_lines(&raw, config.skip_blank_lines);
    if seeds.is_empty() {
        engine_warn!("{}", NO_INPUT_MESSAGE);
        return Ok(RunReport::default());
    }
    engine_info!("Received {} websites", seeds.len());

    let harvester =
        Harvester::new(config.harvest.clone()).context("setting up the harvester")?;
    let report = harvester.run(seeds).with_context(|| {
        format!(
            "harvesting into {}",
            config.harvest.output_dir.display()
        )
    })?;
    Ok(report)
}
