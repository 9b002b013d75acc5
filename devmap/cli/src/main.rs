// Licensed under the Apache-2.0 license

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use devmap_generator::{generate_devmap_from_file, GeneratorConfig, OutputMode};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use tempfile::NamedTempFile;

#[derive(Parser, Debug)]
#[command(
    name = "devmap",
    author,
    version,
    about = "Generate the peripheral device map from a JSON device list"
)]
struct Cli {
    /// Output format (supported: ADA)
    #[arg(value_name = "MODE")]
    mode: OutputMode,

    /// JSON device list
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write the generated source to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Reject device names longer than the table name column
    #[arg(long)]
    strict_names: bool,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new().with_level(cli.log_level()).init()?;

    let config = GeneratorConfig::new(cli.mode).strict_names(cli.strict_names);
    let code = generate_devmap_from_file(&cli.input, &config)
        .with_context(|| format!("Failed to generate device map from {}", cli.input.display()))?;

    match &cli.output {
        Some(path) => write_file(path, &code)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(code.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Replaces `path` in one step, so readers never see a partial file.
fn write_file(path: &Path, code: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    file.write_all(code.as_bytes())?;
    file.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} bytes to {}", code.len(), path.display());
    Ok(())
}
