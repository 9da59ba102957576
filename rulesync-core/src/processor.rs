use crate::config::SyncConfig;
use crate::converter::convert_rules;
use crate::extractor::extract_section;
use crate::render::render_document;
use crate::storage::{content_hash, DestinationWriter, FileWriter};
use crate::types::{DestinationReport, SyncReport, SyncStatus};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Absolute locations for one sync run. The caller resolves the relative
/// paths from [`SyncConfig`] against its base directory; the processor
/// never guesses where files live.
#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub source: PathBuf,
    pub destinations: Vec<ResolvedDestination>,
}

#[derive(Debug, Clone)]
pub struct ResolvedDestination {
    pub name: String,
    pub header: PathBuf,
    pub output: PathBuf,
}

/// Drives the extract → convert → render → write pipeline across all
/// configured destinations.
pub struct SyncProcessor {
    config: SyncConfig,
    writer: Box<dyn DestinationWriter>,
}

impl SyncProcessor {
    /// Create SyncProcessor with the real filesystem writer, honoring the
    /// config's skip_unchanged switch.
    pub fn new(config: SyncConfig) -> Self {
        let writer = Box::new(FileWriter::new(config.skip_unchanged));
        Self { config, writer }
    }

    /// Create SyncProcessor with full dependency injection. Check mode
    /// passes a dry-run writer here; tests pass whatever they need.
    pub fn new_with_writer(config: SyncConfig, writer: Box<dyn DestinationWriter>) -> Self {
        Self { config, writer }
    }

    /// Run one full sync. Fails outright when the source cannot be read
    /// or the rules section is missing; individual destination failures
    /// are contained and recorded in the report instead.
    pub fn sync(&self, paths: &ResolvedPaths) -> Result<SyncReport> {
        let start_time = Instant::now();

        println!("📄 Reading source document: {}", paths.source.display());
        let document = fs::read_to_string(&paths.source)
            .with_context(|| format!("Failed to read {}", paths.source.display()))?;

        println!("🔍 Extracting `{}:` section...", self.config.section_key);
        let section = extract_section(&document, &self.config.section_key)?;
        let rules = convert_rules(&section);
        let line_count = rules.lines().count();
        println!("✅ Extraction completed ({} lines)", line_count);

        let mut report = SyncReport::new(&paths.source, &self.config.section_key, line_count);

        for dest in &paths.destinations {
            println!(
                "📝 Syncing destination `{}` → {}",
                dest.name,
                dest.output.display()
            );

            let entry = match self.sync_destination(dest, &rules) {
                Ok((status, hash)) => {
                    match status {
                        SyncStatus::Written => println!("   💾 Written"),
                        SyncStatus::UpToDate => println!("   ✅ Already up to date"),
                        SyncStatus::WouldUpdate => println!("   🔸 Out of date, would rewrite"),
                        SyncStatus::Failed => {}
                    }
                    DestinationReport {
                        name: dest.name.clone(),
                        path: dest.output.display().to_string(),
                        status,
                        message: None,
                        content_hash: Some(hash),
                    }
                }
                Err(e) => {
                    println!("   ❌ Failed: {e}");
                    DestinationReport {
                        name: dest.name.clone(),
                        path: dest.output.display().to_string(),
                        status: SyncStatus::Failed,
                        message: Some(format!("{e:#}")),
                        content_hash: None,
                    }
                }
            };
            report.destinations.push(entry);
        }

        println!(
            "⏱️  Total sync time: {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(report)
    }

    /// Render and write one destination: header file + section marker +
    /// converted rules.
    fn sync_destination(
        &self,
        dest: &ResolvedDestination,
        rules: &str,
    ) -> Result<(SyncStatus, String)> {
        let header = fs::read_to_string(&dest.header)
            .with_context(|| format!("Failed to read header {}", dest.header.display()))?;
        let content = render_document(&header, &self.config.section_marker, rules);
        let status = self.writer.write_document(&dest.output, &content)?;
        Ok((status, content_hash(&content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn sample_paths(dir: &TempDir) -> ResolvedPaths {
        let source = write_file(
            dir,
            "config.yaml",
            "name: assistant\nrules:\n  - name: style\n    rule: >-\n      # Style\n      Short.\nmodels: []\n",
        );
        let header = write_file(dir, "header.md", "# Header\n");
        ResolvedPaths {
            source,
            destinations: vec![ResolvedDestination {
                name: "claude".to_string(),
                header,
                output: dir.path().join("out/CLAUDE.md"),
            }],
        }
    }

    #[test]
    fn test_sync_writes_rendered_destination() {
        let dir = TempDir::new().unwrap();
        let paths = sample_paths(&dir);

        let processor = SyncProcessor::new(SyncConfig::default());
        let report = processor.sync(&paths).unwrap();

        assert!(report.succeeded());
        assert_eq!(report.destinations[0].status, SyncStatus::Written);

        let written = fs::read_to_string(dir.path().join("out/CLAUDE.md")).unwrap();
        assert_eq!(written, "# Header\n\n## important_rules\n\n### Style\nShort.\n");
    }

    #[test]
    fn test_second_sync_is_up_to_date() {
        let dir = TempDir::new().unwrap();
        let paths = sample_paths(&dir);

        let processor = SyncProcessor::new(SyncConfig::default());
        processor.sync(&paths).unwrap();
        let report = processor.sync(&paths).unwrap();

        assert_eq!(report.destinations[0].status, SyncStatus::UpToDate);
    }

    #[test]
    fn test_missing_section_aborts_before_any_write() {
        let dir = TempDir::new().unwrap();
        let mut paths = sample_paths(&dir);
        fs::write(&paths.source, "name: assistant\nmodels: []\n").unwrap();
        paths.destinations[0].output = dir.path().join("never.md");

        let processor = SyncProcessor::new(SyncConfig::default());
        let err = processor.sync(&paths).unwrap_err();

        assert!(err.downcast_ref::<SyncError>().is_some());
        assert!(!dir.path().join("never.md").exists());
    }

    #[test]
    fn test_missing_header_is_contained_per_destination() {
        let dir = TempDir::new().unwrap();
        let mut paths = sample_paths(&dir);
        paths.destinations.push(ResolvedDestination {
            name: "broken".to_string(),
            header: dir.path().join("no-such-header.md"),
            output: dir.path().join("broken.md"),
        });

        let processor = SyncProcessor::new(SyncConfig::default());
        let report = processor.sync(&paths).unwrap();

        assert!(!report.succeeded());
        assert_eq!(report.destinations[0].status, SyncStatus::Written);
        assert_eq!(report.destinations[1].status, SyncStatus::Failed);
        assert!(report.destinations[1].message.is_some());
        assert!(dir.path().join("out/CLAUDE.md").exists());
        assert!(!dir.path().join("broken.md").exists());
    }

    #[test]
    fn test_report_records_run_metadata() {
        let dir = TempDir::new().unwrap();
        let paths = sample_paths(&dir);

        let processor = SyncProcessor::new(SyncConfig::default());
        let report = processor.sync(&paths).unwrap();

        assert_eq!(report.section_key, "rules");
        assert_eq!(report.rules_line_count, 2);
        assert!(report.source.ends_with("config.yaml"));
        assert!(report.destinations[0].content_hash.is_some());
    }
}
