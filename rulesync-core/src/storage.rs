use crate::types::SyncStatus;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Write abstraction for rendered destination documents
pub trait DestinationWriter {
    /// Put `content` at `path`, reporting whether anything changed.
    fn write_document(&self, path: &Path, content: &str) -> Result<SyncStatus>;
}

/// Real filesystem writer: creates parent directories, writes UTF-8
/// without a byte order mark, and replaces the destination atomically
/// via a sibling temp file so readers never see a half-written file.
pub struct FileWriter {
    skip_unchanged: bool,
}

impl FileWriter {
    pub fn new(skip_unchanged: bool) -> Self {
        Self { skip_unchanged }
    }
}

impl DestinationWriter for FileWriter {
    fn write_document(&self, path: &Path, content: &str) -> Result<SyncStatus> {
        if self.skip_unchanged && is_current(path, content) {
            return Ok(SyncStatus::UpToDate);
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }

        let temp = temp_path(path);
        fs::write(&temp, content)
            .with_context(|| format!("Failed to write {}", temp.display()))?;
        fs::rename(&temp, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        Ok(SyncStatus::Written)
    }
}

/// Dry-run writer used by check mode: touches nothing, only classifies
/// each destination as up to date or due for a rewrite.
pub struct DryRunWriter;

impl Default for DryRunWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DryRunWriter {
    pub fn new() -> Self {
        Self
    }
}

impl DestinationWriter for DryRunWriter {
    fn write_document(&self, path: &Path, content: &str) -> Result<SyncStatus> {
        if is_current(path, content) {
            Ok(SyncStatus::UpToDate)
        } else {
            Ok(SyncStatus::WouldUpdate)
        }
    }
}

// The temp file lives next to the destination so the final rename never
// crosses a filesystem boundary.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    if let Some(file_name) = path.file_name() {
        name.push(file_name);
    }
    name.push(".tmp");
    path.with_file_name(name)
}

fn is_current(path: &Path, content: &str) -> bool {
    match fs::read_to_string(path) {
        Ok(existing) => content_hash(&existing) == content_hash(content),
        Err(_) => false,
    }
}

/// Calculate the SHA-256 hex digest of rendered content, used for change
/// detection and recorded in sync reports.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
