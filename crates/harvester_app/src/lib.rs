//! Command-line glue shared by the `js-harvest` and `page-harvest` tools.
pub mod cli;
pub mod config;
pub mod logging;
pub mod runner;

pub use cli::Args;
pub use config::{ConfigFile, ToolConfig};
pub use runner::{harvest_input, run_tool};
