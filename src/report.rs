// src/report.rs
//! Report sinks: turn the finished summary into a distributable artifact.
//! The core's obligation ends at `Summary`; sinks own their formats.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::summary::Summary;

/// Output collaborator interface.
pub trait ReportSink {
    fn write(&self, summary: &Summary) -> Result<()>;
}

/// Plain-text file sink; blocks separated by a blank line, trailing newline
/// at EOF.
pub struct TextFileSink {
    path: PathBuf,
}

impl TextFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for TextFileSink {
    fn write(&self, summary: &Summary) -> Result<()> {
        let mut text = summary.render();
        text.push('\n');
        fs::write(&self.path, text.as_bytes())
            .with_context(|| format!("writing report to {}", self.path.display()))?;
        info!(
            target: "report",
            path = %self.path.display(),
            blocks = summary.blocks.len(),
            "report saved"
        );
        Ok(())
    }
}
