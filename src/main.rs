use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use gp_results::observability::StdOutObserver;
use gp_results::pipeline::{ExtractionOptions, make_csv};
use gp_results::table::DEFAULT_OUTPUT_FILE;

/// Flatten genetic-programming experiment results into results.csv
#[derive(Parser, Debug)]
#[command(name = "gp-results")]
#[command(version, about)]
struct CliArgs {
    /// Root directory of the experiment results
    #[arg()]
    root: PathBuf,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();

    println!("Starting to extract data from {}", args.root.display());

    let options = ExtractionOptions {
        observer: Some(Arc::new(StdOutObserver)),
        ..Default::default()
    };
    make_csv(&args.root, DEFAULT_OUTPUT_FILE, &options)
        .with_context(|| format!("failed to extract results from {}", args.root.display()))?;

    println!("Finished, closing the program");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_the_only_positional_argument() {
        let args = CliArgs::try_parse_from(["gp-results", "data/exp1"]).unwrap();
        assert_eq!(args.root, PathBuf::from("data/exp1"));

        assert!(CliArgs::try_parse_from(["gp-results"]).is_err());
        assert!(CliArgs::try_parse_from(["gp-results", "a", "b"]).is_err());
    }
}
