//! Batch command implementation
//!
//! Reads a JSON array of records, redacts them through the engine's worker
//! pool and writes the array back in the same order.

use crate::cli::{load_app_config, EXIT_CONFIG, EXIT_OK};
use crate::domain::Record;
use crate::redaction::Engine;
use anyhow::Context;
use clap::Args;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON input file (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// JSON output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the metrics snapshot as JSON on stderr
    #[arg(long)]
    pub metrics: bool,
}

impl BatchArgs {
    /// Execute the batch command
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

        let input = match &self.input {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf).context("reading stdin")?;
                buf
            }
        };

        let records: Vec<Record> =
            serde_json::from_str(&input).context("input must be a JSON array of records")?;
        tracing::info!(record_count = records.len(), "Processing batch");

        let redacted = engine.process(records).await?;
        let json = serde_json::to_string_pretty(&redacted)?;

        match &self.output {
            Some(path) => fs::write(path, format!("{json}\n"))
                .with_context(|| format!("writing {}", path.display()))?,
            None => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{json}")?;
                stdout.flush()?;
            }
        }

        let metrics = engine.snapshot();
        metrics.log_summary();
        if self.metrics {
            eprintln!("{}", serde_json::to_string_pretty(&metrics)?);
        }

        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_batch_file_to_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        fs::write(
            &input,
            r#"[
                {"uuid": "c1", "speaker": "A", "text": "My SSN is 123-45-6789"},
                {"id": "c2", "label": "B", "text": "mail joe@example.com"},
                {"id": "c3", "text": "nothing"}
            ]"#,
        )
        .unwrap();

        let args = BatchArgs {
            input: Some(input),
            output: Some(output.clone()),
            metrics: false,
        };
        let code = args.execute("piiredact.toml").await.unwrap();
        assert_eq!(code, EXIT_OK);

        let records: Vec<Record> =
            serde_json::from_str(&fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(
            records,
            vec![
                Record::new("c1", "A", "My SSN is [SSN]"),
                Record::new("c2", "B", "mail [EMAIL]"),
                Record::new("c3", "", "nothing"),
            ]
        );
    }

    #[tokio::test]
    async fn test_batch_rejects_malformed_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.json");
        fs::write(&input, "{not json").unwrap();

        let args = BatchArgs {
            input: Some(input),
            output: None,
            metrics: false,
        };
        assert!(args.execute("piiredact.toml").await.is_err());
    }
}
