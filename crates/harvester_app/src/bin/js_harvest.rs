//! Saves the non-library scripts referenced by each page read from stdin into `js-files/`.
use std::process::ExitCode;

use harvester_engine::HarvestMode;

fn main() -> ExitCode {
    harvester_app::run_tool(HarvestMode::ScriptsOnly)
}
