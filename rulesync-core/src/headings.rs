use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled regex for heading demotion performance
static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(#{1,4})\s+(.*)$").unwrap());

/// How many levels every matched heading is pushed down, so rule-local
/// headings nest under the destination's own `#`/`##` structure.
pub const HEADING_DEMOTION_STEP: usize = 2;

/// Demote Markdown headings inside a rule body by [`HEADING_DEMOTION_STEP`]
/// levels: `#` becomes `###`, `##` becomes `####`, and so on.
///
/// Only headings of levels 1-4 are rewritten; deeper ones pass through
/// unchanged. Leading whitespace before the hashes is dropped and the
/// whitespace between hashes and title collapses to a single space.
/// Whitespace-only lines normalize to empty lines, everything else is
/// returned as-is.
pub fn demote_headings(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else if let Some(caps) = HEADING_REGEX.captures(line) {
                let level = caps[1].len();
                let title = &caps[2];
                format!("{} {}", "#".repeat(level + HEADING_DEMOTION_STEP), title)
            } else {
                line.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demote(lines: &[&str]) -> Vec<String> {
        let owned: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        demote_headings(&owned)
    }

    #[test]
    fn test_each_level_shifts_down_two() {
        assert_eq!(demote(&["# Title"]), vec!["### Title"]);
        assert_eq!(demote(&["## Title"]), vec!["#### Title"]);
        assert_eq!(demote(&["### Title"]), vec!["##### Title"]);
        assert_eq!(demote(&["#### Title"]), vec!["###### Title"]);
    }

    #[test]
    fn test_level_five_and_deeper_pass_through() {
        assert_eq!(demote(&["##### Deep"]), vec!["##### Deep"]);
        assert_eq!(demote(&["###### Deeper"]), vec!["###### Deeper"]);
    }

    #[test]
    fn test_indented_heading_loses_its_indentation() {
        assert_eq!(demote(&["  ## Indented"]), vec!["#### Indented"]);
    }

    #[test]
    fn test_extra_whitespace_before_title_collapses() {
        assert_eq!(demote(&["#   Spaced Out"]), vec!["### Spaced Out"]);
    }

    #[test]
    fn test_hashes_without_space_are_not_headings() {
        assert_eq!(demote(&["#hashtag"]), vec!["#hashtag"]);
        assert_eq!(demote(&["##!"]), vec!["##!"]);
    }

    #[test]
    fn test_plain_text_is_untouched() {
        assert_eq!(
            demote(&["just a line", "- a bullet"]),
            vec!["just a line", "- a bullet"]
        );
    }

    #[test]
    fn test_whitespace_only_lines_become_empty() {
        assert_eq!(demote(&["", "   ", "\t"]), vec!["", "", ""]);
    }

    #[test]
    fn test_trailing_title_whitespace_is_kept() {
        assert_eq!(demote(&["## Title  "]), vec!["#### Title  "]);
    }

    #[test]
    fn test_demotion_is_not_idempotent() {
        let once = demote(&["# Title"]);
        let twice = demote_headings(&once);
        assert_eq!(twice, vec!["##### Title"]);
    }
}
