// Session export to JSON

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::log::{SessionLog, SessionSummary};
use crate::feedback::{EdgeCase, FeedbackRecord};

/// Serializable view of a session
///
/// Borrows the log, so building one never copies or drops entries.
#[derive(Debug, Serialize)]
pub struct SessionExport<'a> {
    pub session_id: Uuid,
    pub session_started: DateTime<Utc>,
    pub session_timestamp: DateTime<Utc>,
    pub routing_tests: &'a [FeedbackRecord],
    pub edge_cases: &'a [EdgeCase],
    pub summary: SessionSummary,
}

impl SessionExport<'_> {
    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize session export")
    }
}

/// File name for an export taken at `at`, e.g. `clinic_routing_session_20261016_1430.json`
pub fn export_file_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("clinic_routing_session_{}.json", at.format("%Y%m%d_%H%M"))
}

/// Write the session to a timestamped JSON file under `dir`
///
/// Creates `dir` if needed and returns the path written. An export taken in
/// the same minute replaces the earlier file.
pub fn write_export(log: &SessionLog, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let path = dir.join(export_file_name(&Local::now()));
    let json = log.export().to_json()?;

    fs::write(&path, json)
        .with_context(|| format!("Failed to write session export: {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        records = log.len(),
        edge_cases = log.edge_cases().len(),
        "Exported session"
    );

    Ok(path)
}
