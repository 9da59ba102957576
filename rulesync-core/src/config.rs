use anyhow::Result;
use serde::{Deserialize, Serialize};

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_section_key() -> String {
    "rules".to_string()
}

fn default_section_marker() -> String {
    "## important_rules".to_string()
}

fn default_source() -> String {
    "global/.continue/config.yaml".to_string()
}

fn default_destinations() -> Vec<DestinationConfig> {
    vec![
        DestinationConfig {
            name: "claude".to_string(),
            header: "claude-header.md".to_string(),
            output: "global/.claude/CLAUDE.md".to_string(),
        },
        DestinationConfig {
            name: "markdown".to_string(),
            header: "markdown-header.md".to_string(),
            output: "global/markdown/markdown.md".to_string(),
        },
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Source YAML document the rules are read from
    #[serde(default = "default_source")]
    pub source: String,
    /// Top-level key whose block is extracted from the source
    #[serde(default = "default_section_key")]
    pub section_key: String,
    /// Heading placed between each destination's header and the rules
    #[serde(default = "default_section_marker")]
    pub section_marker: String,
    /// Leave destinations untouched when their content already matches
    #[serde(default = "default_true")]
    pub skip_unchanged: bool,
    /// Destinations to sync, processed in order
    #[serde(default = "default_destinations")]
    pub destinations: Vec<DestinationConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// Label used in status output and sync reports
    pub name: String,
    /// Markdown header file prepended to the converted rules
    pub header: String,
    /// Output file the rendered document is written to
    pub output: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            section_key: default_section_key(),
            section_marker: default_section_marker(),
            skip_unchanged: true,
            destinations: default_destinations(),
        }
    }
}

impl SyncConfig {
    /// Load config from file path (functional approach)
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SyncConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|_| {
                eprintln!("⚠️  Failed to load config from {}, using defaults", p);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
