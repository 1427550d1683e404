pub mod backend;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::backend::pipeline::parse_reviews;
use crate::backend::settings::{OutputFormat, Settings};

/// Convert a scraped review dump into a CSV table
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Text file holding the scraped reviews [default: reviews.txt]
    input: Option<PathBuf>,

    /// Where to write the converted reviews [default: reviews.csv]
    output: Option<PathBuf>,

    /// JSON settings file, overrides the one in the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format; json defaults the output path to reviews.json
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Log every parsed review
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_settings(self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(input) = self.input {
            settings.input_path = input;
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
        match self.output {
            Some(output) => settings.output_path = output,
            None => settings.apply_format_default_output(),
        }
        Ok(settings)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let settings = args.into_settings()?;
    let summary = parse_reviews(&settings)
        .inspect_err(|e| error!(stage = e.stage().name(), "conversion aborted"))
        .with_context(|| format!("Failed to convert {:?}", settings.input_path))?;

    println!(
        "Successfully converted {} reviews to {}",
        summary.reviews,
        summary.output.display()
    );
    Ok(())
}
