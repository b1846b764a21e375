//! Output formatting for CLI commands.
//!
//! Provides abstraction layer for outputting results in text or JSON format.

use anyhow::Result;
use arx_core::{FileMode, ObjectId, modes};
use serde::Serialize;
use std::io::{self, Write};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Writer for command output with format abstraction.
pub struct OutputWriter {
    format: OutputFormat,
    stdout: io::Stdout,
}

impl OutputWriter {
    /// Create a new OutputWriter.
    pub fn new(json: bool) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            stdout: io::stdout(),
        }
    }

    /// Write one archive entry as a text or JSON line.
    pub fn write_entry(
        &self,
        path: &str,
        id: &ObjectId,
        mode: FileMode,
        data: Option<&[u8]>,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let record = EntryRecord {
                    path,
                    mode: format!("{:06o}", mode),
                    kind: entry_kind_str(mode),
                    id: *id,
                    size: data.map(|d| d.len()),
                };
                writeln!(&self.stdout, "{}", serde_json::to_string(&record)?)?;
            }
            OutputFormat::Text => {
                let size = data.map_or_else(|| "-".to_string(), |d| d.len().to_string());
                writeln!(&self.stdout, "{:06o} {} {:>8} {}", mode, id, size, path)?;
            }
        }
        Ok(())
    }

    /// Write a single result using the configured format.
    ///
    /// The `text_fn` closure is called only in text mode to generate the
    /// human-readable output.
    pub fn write<T: Serialize>(&self, data: &T, text_fn: impl FnOnce() -> String) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(data)?;
                writeln!(&self.stdout, "{}", json)?;
            }
            OutputFormat::Text => {
                let text = text_fn();
                if !text.is_empty() {
                    write!(&self.stdout, "{}", text)?;
                }
            }
        }
        Ok(())
    }
}

fn entry_kind_str(mode: FileMode) -> &'static str {
    if modes::is_directory(mode) {
        "dir"
    } else if modes::is_gitlink(mode) {
        "gitlink"
    } else if modes::is_symlink(mode) {
        "symlink"
    } else {
        "file"
    }
}

// ============================================================================
// Data Transfer Objects (DTOs) for JSON output
// ============================================================================

/// One archive entry for `list --json`.
#[derive(Debug, Serialize)]
pub struct EntryRecord<'a> {
    pub path: &'a str,
    pub mode: String,
    pub kind: &'static str,
    pub id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

/// Output for the `ignored` command.
#[derive(Debug, Serialize)]
pub struct IgnoredOutput {
    pub path: String,
    pub ignored: bool,
}
