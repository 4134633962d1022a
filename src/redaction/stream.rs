//! One-shot and line-stream redaction over the built-in pattern set
//!
//! These entry points skip the engine entirely: no configuration, no metrics.
//! They use the same match/replace algorithm and validators as [`Engine`],
//! with the replacement text supplied by [`RedactOptions`].
//!
//! [`Engine`]: crate::redaction::Engine

use crate::domain::Result;
use crate::redaction::config::RedactionFormat;
use crate::redaction::redactor::Redactor;
use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Write};
use std::sync::{Arc, OnceLock};

/// Replacement callback: `(label, matched) -> replacement`
pub type ReplaceFn = dyn Fn(&str, &str) -> String + Send + Sync;

/// Options for the one-shot and streaming entry points
#[derive(Clone)]
pub struct RedactOptions {
    replace: Arc<ReplaceFn>,
}

impl RedactOptions {
    /// Options with a custom replacement callback
    pub fn new<F>(replace: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        Self {
            replace: Arc::new(replace),
        }
    }

    /// Options that render labels with a redaction format
    pub fn with_format(format: RedactionFormat) -> Self {
        Self::new(move |label, _| format.render(label))
    }

    /// Build the replacement for one confirmed match
    pub fn replacement(&self, label: &str, matched: &str) -> String {
        (self.replace)(label, matched)
    }
}

impl Default for RedactOptions {
    /// Replaces every match with `[REDACTED:<LABEL>]`
    fn default() -> Self {
        Self::new(|label, _| format!("[REDACTED:{label}]"))
    }
}

impl fmt::Debug for RedactOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedactOptions").finish_non_exhaustive()
    }
}

static DEFAULT_REDACTOR: OnceLock<Redactor> = OnceLock::new();

fn default_redactor() -> Result<&'static Redactor> {
    if let Some(redactor) = DEFAULT_REDACTOR.get() {
        return Ok(redactor);
    }
    let redactor = Redactor::builtin(&RedactionFormat::default())?;
    Ok(DEFAULT_REDACTOR.get_or_init(|| redactor))
}

/// Redact `text` with the built-in patterns and default options
///
/// ```
/// let redacted = piiredact::redaction::redact_pii("SSN 123-45-6789").unwrap();
/// assert_eq!(redacted, "SSN [REDACTED:SSN]");
/// ```
pub fn redact_pii(text: &str) -> Result<String> {
    redact_with_options(text, &RedactOptions::default())
}

/// Redact `text` with the built-in patterns and the given options
pub fn redact_with_options(text: &str, options: &RedactOptions) -> Result<String> {
    let redactor = default_redactor()?;
    Ok(redactor
        .redact_with(text, |label, matched| options.replacement(label, matched))
        .text)
}

/// All confirmed built-in matches in `text`, grouped by label
pub fn match_pii(text: &str) -> Result<HashMap<String, Vec<String>>> {
    Ok(default_redactor()?.find(text))
}

/// Read newline-delimited text, redact each line, write it back with a trailing newline
///
/// Uses the built-in pattern set. With `options` set to `None` the default
/// `[REDACTED:<LABEL>]` replacement applies. Bytes that are not valid UTF-8
/// are copied through unchanged and the text around them is still redacted.
/// The first read or write error aborts the stream.
pub fn redact_stream<R, W>(reader: R, writer: W, options: Option<&RedactOptions>) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let redactor = default_redactor()?;
    let default_options;
    let options = match options {
        Some(options) => options,
        None => {
            default_options = RedactOptions::default();
            &default_options
        }
    };

    let (_, outcome) = stream_lines(reader, writer, |segment| {
        redactor
            .redact_with(segment, |label, matched| options.replacement(label, matched))
            .text
    });
    outcome
}

/// Drive a line-by-line transform over raw bytes
///
/// `transform` sees each valid UTF-8 run of a line; invalid bytes between runs
/// are written as-is. Returns the number of lines read, including a line whose
/// write failed, alongside the outcome.
pub(crate) fn stream_lines<R, W, F>(reader: R, writer: W, transform: F) -> (u64, Result<()>)
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> String,
{
    let mut lines = 0;
    let outcome = copy_lines(reader, writer, transform, &mut lines);
    (lines, outcome)
}

fn copy_lines<R, W, F>(mut reader: R, mut writer: W, mut transform: F, lines: &mut u64) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> String,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        *lines += 1;

        for chunk in trim_line_ending(&buf).utf8_chunks() {
            writer.write_all(transform(chunk.valid()).as_bytes())?;
            writer.write_all(chunk.invalid())?;
        }
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Strip `\n` or `\r\n`
fn trim_line_ending(line: &[u8]) -> &[u8] {
    match line.strip_suffix(b"\n") {
        Some(line) => line.strip_suffix(b"\r").unwrap_or(line),
        None => line,
    }
}
