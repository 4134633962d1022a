//! Redact command implementation
//!
//! Line filter: every input line is redacted and written back with a
//! trailing newline.

use crate::cli::{load_app_config, EXIT_CONFIG, EXIT_OK};
use crate::redaction::Engine;
use anyhow::Context;
use clap::Args;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Input file (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_app_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let engine = match Engine::new(config.redaction) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let reader: Box<dyn BufRead> = match &self.input {
            Some(path) => Box::new(BufReader::new(
                File::open(path).with_context(|| format!("opening {}", path.display()))?,
            )),
            None => Box::new(io::stdin().lock()),
        };

        let writer: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(BufWriter::new(
                File::create(path).with_context(|| format!("creating {}", path.display()))?,
            )),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };

        let lines = engine.redact_stream(reader, writer)?;
        tracing::debug!(lines, "Redaction complete");
        engine.snapshot().log_summary();

        Ok(EXIT_OK)
    }
}
