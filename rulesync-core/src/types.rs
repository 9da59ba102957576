use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Schema version stamped on every serialized sync report.
/// Bump when the report shape changes.
pub const REPORT_SCHEMA_VERSION: &str = "0.1.0";

/// Outcome of producing one destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Destination content was replaced with freshly rendered output.
    Written,
    /// Destination already contained exactly the rendered output.
    UpToDate,
    /// Check mode only: the destination differs and a real run would rewrite it.
    WouldUpdate,
    /// The destination could not be produced; see the report message.
    Failed,
}

/// Per-destination record inside a [`SyncReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationReport {
    pub name: String,
    pub path: String,
    pub status: SyncStatus,
    /// Human-readable failure detail, present only when status is `Failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// SHA-256 of the rendered content, absent when rendering failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

/// Summary of one full sync run across all configured destinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub schema_version: String,
    pub created_at: DateTime<Utc>,
    /// Source document the rules were extracted from
    pub source: String,
    /// Top-level key the extracted section lives under
    pub section_key: String,
    /// Line count of the converted Markdown rules
    pub rules_line_count: usize,
    pub destinations: Vec<DestinationReport>,
}

impl SyncReport {
    pub fn new(source: &Path, section_key: &str, rules_line_count: usize) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            created_at: Utc::now(),
            source: source.display().to_string(),
            section_key: section_key.to_string(),
            rules_line_count,
            destinations: Vec::new(),
        }
    }
}
