//! keyset - set-intersection statistics between two CSV files.
//!
//! Given two input files in CSV format and a key column, prints the total
//! and distinct number of keys in each file, plus the total and distinct
//! overlap between the two.
//!
//! # Usage
//!
//! ```bash
//! keyset --first-file a.csv --second-file b.csv --key email
//!
//! # Same, from the environment
//! FIRST_FILE=a.csv SECOND_FILE=b.csv KEY=email keyset --format json
//!
//! # Defaults from a TOML file, flags win
//! keyset --config keyset.toml --buffer-size 256
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use keyset_cli::{OutputFormat, commands, output};
use keyset_core::IntersectConfig;
use keyset_core::config::{ENV_BUFFER_SIZE, ENV_FIRST_FILE, ENV_KEY, ENV_SECOND_FILE};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "keyset")]
#[command(
    about = "Count keys in two CSV files and the overlap between them",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to the first of the two files to compare
    #[arg(long, env = ENV_FIRST_FILE)]
    first_file: Option<PathBuf>,

    /// Path to the second of the two files to compare
    #[arg(long, env = ENV_SECOND_FILE)]
    second_file: Option<PathBuf>,

    /// Column in the CSV files to be used as the key for comparison
    #[arg(short, long, env = ENV_KEY)]
    key: Option<String>,

    /// Number of keys buffered between each reader and its counter
    #[arg(short, long, env = ENV_BUFFER_SIZE)]
    buffer_size: Option<usize>,

    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (human, json, plain)
    #[arg(long, default_value = "human")]
    format: OutputFormatArg,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

impl Cli {
    /// Merge flags over the optional config file.
    fn into_config(self) -> Result<IntersectConfig> {
        let mut config = match &self.config {
            Some(path) => IntersectConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => IntersectConfig::default(),
        };

        if let Some(first) = self.first_file {
            config.first_source = first;
        }
        if let Some(second) = self.second_file {
            config.second_source = second;
        }
        if let Some(key) = self.key {
            config.key = key;
        }
        if let Some(buffer_size) = self.buffer_size {
            config.buffer_size = buffer_size;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        output::error(format!("{:#}", e));
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.format.into();
    let config = cli.into_config()?;

    commands::intersect(config, format).await?;
    if format == OutputFormat::Human {
        output::success("Done");
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if verbose {
        EnvFilter::new("keyset_core=debug,keyset_cli=debug,keyset=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("keyset_core=warn,keyset_cli=warn,warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
