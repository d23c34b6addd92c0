//! Report output model for headless face runs.

use anyhow::{Context, Result};
use ocelli_face::{Expression, ExpressionFlags, Transition};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceReport {
    pub status: ReportStatus,
    pub scenario: Option<String>,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    pub flags: ExpressionFlags,
    pub expression: Expression,
    pub history: Vec<Transition>,
}

impl FaceReport {
    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    /// Write the report as pretty JSON, creating missing parent directories.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?,
            _ => {}
        }
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        self.write_to_writer(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// One JSON document followed by a newline.
    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self).context("Failed to encode report")?;
        writeln!(writer)?;
        Ok(())
    }

    /// Step and assertion that stopped the run, if any.
    pub fn failure(&self) -> Option<(usize, &str)> {
        let index = self.failed_step_index?;
        Some((index, self.assertion.as_deref().unwrap_or("step")))
    }
}
