//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Read page URLs from stdin, one per line, and save the scripts they load.
///
/// Scripts from well-known libraries (jQuery, React, ...) are skipped.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Number of worker threads [default: 1]
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    pub threads: Option<u16>,

    /// Print per-URL progress and failures
    #[arg(short, long)]
    pub verbose: bool,

    /// RON settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory, overriding the tool's default
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_leaves_everything_to_config() {
        let args = Args::try_parse_from(["js-harvest"]).unwrap();
        assert_eq!(args.threads, None);
        assert!(!args.verbose);
        assert!(args.config.is_none());
        assert!(args.output.is_none());
    }

    #[test]
    fn short_and_long_flags_parse() {
        let args = Args::try_parse_from(["js-harvest", "-t", "8", "-v"]).unwrap();
        assert_eq!(args.threads, Some(8));
        assert!(args.verbose);

        let args = Args::try_parse_from([
            "page-harvest",
            "--threads",
            "3",
            "--verbose",
            "--config",
            "harvest.ron",
            "--output",
            "out",
        ])
        .unwrap();
        assert_eq!(args.threads, Some(3));
        assert_eq!(args.config, Some(PathBuf::from("harvest.ron")));
        assert_eq!(args.output, Some(PathBuf::from("out")));
    }

    #[test]
    fn zero_threads_is_rejected() {
        let err = Args::try_parse_from(["js-harvest", "-t", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
