use crate::types::{SyncReport, SyncStatus};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

impl SyncReport {
    /// True when every destination produced output (nothing failed).
    pub fn succeeded(&self) -> bool {
        self.destinations
            .iter()
            .all(|d| d.status != SyncStatus::Failed)
    }

    /// True when nothing failed and nothing is pending. A check-mode run
    /// needs this to hold for a zero exit.
    pub fn is_clean(&self) -> bool {
        self.destinations
            .iter()
            .all(|d| matches!(d.status, SyncStatus::Written | SyncStatus::UpToDate))
    }

    pub fn count(&self, status: SyncStatus) -> usize {
        self.destinations
            .iter()
            .filter(|d| d.status == status)
            .count()
    }

    /// Save the report as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize sync report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DestinationReport;
    use tempfile::TempDir;

    fn report_with(statuses: &[SyncStatus]) -> SyncReport {
        let mut report = SyncReport::new(Path::new("config.yaml"), "rules", 3);
        for (i, status) in statuses.iter().enumerate() {
            report.destinations.push(DestinationReport {
                name: format!("dest{i}"),
                path: format!("out{i}.md"),
                status: *status,
                message: None,
                content_hash: None,
            });
        }
        report
    }

    #[test]
    fn test_succeeded_tolerates_pending_but_not_failures() {
        assert!(report_with(&[SyncStatus::Written, SyncStatus::UpToDate]).succeeded());
        assert!(report_with(&[SyncStatus::WouldUpdate]).succeeded());
        assert!(!report_with(&[SyncStatus::Written, SyncStatus::Failed]).succeeded());
    }

    #[test]
    fn test_is_clean_rejects_pending_and_failures() {
        assert!(report_with(&[SyncStatus::Written, SyncStatus::UpToDate]).is_clean());
        assert!(!report_with(&[SyncStatus::WouldUpdate]).is_clean());
        assert!(!report_with(&[SyncStatus::Failed]).is_clean());
    }

    #[test]
    fn test_empty_report_is_clean() {
        assert!(report_with(&[]).succeeded());
        assert!(report_with(&[]).is_clean());
    }

    #[test]
    fn test_count_by_status() {
        let report = report_with(&[
            SyncStatus::Written,
            SyncStatus::Written,
            SyncStatus::UpToDate,
        ]);
        assert_eq!(report.count(SyncStatus::Written), 2);
        assert_eq!(report.count(SyncStatus::UpToDate), 1);
        assert_eq!(report.count(SyncStatus::Failed), 0);
    }

    #[test]
    fn test_saved_report_parses_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");

        let report = report_with(&[SyncStatus::Written]);
        report.save(&path).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        let parsed: SyncReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.schema_version, report.schema_version);
        assert_eq!(parsed.destinations.len(), 1);
        assert_eq!(parsed.destinations[0].status, SyncStatus::Written);
    }
}
