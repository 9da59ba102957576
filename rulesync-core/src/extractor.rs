use crate::error::SyncError;
use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled regex for section boundary detection
static TOP_LEVEL_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_]+:").unwrap());

/// Extract the block under a top-level `<section_key>:` line and dedent it
/// by one two-space level.
///
/// The section starts at the first line that is exactly `<section_key>:`
/// (no value, no trailing whitespace) and runs until the next top-level
/// key or end of input. Within the section, lines indented by at least
/// two spaces are dedented by exactly two, blank lines are kept as empty
/// lines, and the first non-blank line indented by less than two spaces
/// ends the section early. Trailing blank lines are trimmed.
///
/// Pure line processing; the document is never parsed as YAML.
pub fn extract_section(document: &str, section_key: &str) -> Result<Vec<String>, SyncError> {
    let lines: Vec<&str> = document.lines().collect();
    let header = format!("{section_key}:");

    let start = lines
        .iter()
        .position(|line| *line == header)
        .ok_or_else(|| SyncError::SectionNotFound {
            key: section_key.to_string(),
        })?;

    let mut section: Vec<String> = Vec::new();
    for line in &lines[start + 1..] {
        if TOP_LEVEL_KEY_REGEX.is_match(line) {
            break;
        }
        if let Some(stripped) = line.strip_prefix("  ") {
            section.push(stripped.to_string());
        } else if line.trim().is_empty() {
            section.push(String::new());
        } else {
            // A non-blank line indented by less than one level ends the
            // section even when no top-level key follows. Tab-indented
            // content counts as such a line.
            break;
        }
    }

    while section.last().is_some_and(|line| line.trim().is_empty()) {
        section.pop();
    }

    Ok(section)
}
