//! Saves each page read from stdin plus its non-library scripts into `fetched-webpages/`.
use std::process::ExitCode;

use harvester_engine::HarvestMode;

fn main() -> ExitCode {
    harvester_app::run_tool(HarvestMode::FullPage)
}
