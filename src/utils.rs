use anyhow::Context;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Command};

/// Logs go to stderr; stdout is reserved for filter output. `RUST_LOG` wins
/// over the verbose flag when it is set.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

pub fn validate_args(args: &Args) -> anyhow::Result<()> {
    if let Command::Csv { fields, .. } = &args.command {
        if fields.is_empty() {
            anyhow::bail!("--field must be given at least once");
        }
        if let Some(empty) = fields.iter().position(|f| f.is_empty()) {
            anyhow::bail!("--field #{} is empty", empty + 1);
        }
    }

    if let Command::Labels { field, check, .. } = &args.command {
        if field.is_empty() {
            anyhow::bail!("--field must not be empty");
        }
        if check.is_empty() {
            anyhow::bail!("--check must not be empty");
        }
    }

    Ok(())
}

/// Opens the output file, or standard output when no path is given.
pub fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {:?}", path))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
