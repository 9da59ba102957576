use crate::headings::demote_headings;
use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled regexes for rule entry recognition
static ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^- name: (.+)$").unwrap());

static DESCRIPTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+description:").unwrap());

static RULE_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s+rule: >-$").unwrap());

static INDENTED_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s+)(.*)$").unwrap());

// Conversion state. The cursor index is the only thing that advances;
// the states themselves carry no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Looking for the next rule entry, copying stray text through
    Scanning,
    /// Just matched `- name:`, deciding whether a rule body follows
    EntryHeader,
    /// Inside a folded rule body, collecting dedented lines
    BodyCollect,
}

/// Convert an extracted rules section to Markdown.
///
/// Recognized entries look like:
///
/// ```yaml
/// - name: some_rule
///   description: optional one-liner
///   rule: >-
///     # Heading
///     body text
/// ```
///
/// The name and description are dropped. The folded body is dedented
/// against the indentation of its first non-blank line, its headings are
/// demoted two levels, and the result becomes one output block. Blank
/// body lines survive as blank lines. Lines that fit no part of the
/// entry grammar are copied through verbatim (blank ones are dropped),
/// so imperfect input degrades to visible text instead of an error.
/// This function never fails.
pub fn convert_rules(lines: &[String]) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut state = ParseState::Scanning;
    let mut body: Vec<String> = Vec::new();
    let mut base_indent: Option<String> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];

        match state {
            ParseState::Scanning => {
                if ENTRY_REGEX.is_match(line) {
                    i += 1;
                    state = ParseState::EntryHeader;
                } else {
                    if !line.trim().is_empty() {
                        blocks.push(line.clone());
                    }
                    i += 1;
                }
            }
            ParseState::EntryHeader => {
                // Bounded lookahead: an optional description line, then the
                // folded-scalar marker. An entry without the marker yields
                // no body; the unmatched line is reprocessed by Scanning.
                if DESCRIPTION_REGEX.is_match(line) {
                    i += 1;
                }
                if i < lines.len() && RULE_MARKER_REGEX.is_match(&lines[i]) {
                    i += 1;
                    body.clear();
                    base_indent = None;
                    state = ParseState::BodyCollect;
                } else {
                    state = ParseState::Scanning;
                }
            }
            ParseState::BodyCollect => {
                if line.trim().is_empty() {
                    body.push(String::new());
                    i += 1;
                } else if let Some(caps) = INDENTED_LINE_REGEX.captures(line) {
                    let indent = caps.get(1).map_or("", |m| m.as_str());
                    let base = base_indent.get_or_insert_with(|| indent.to_string());

                    if indent.len() >= base.len() && line.starts_with(base.as_str()) {
                        body.push(line[base.len()..].to_string());
                        i += 1;
                    } else {
                        // Indentation fell below the base: the body is over
                        // and this line belongs to whatever comes next.
                        flush_body(&mut blocks, &mut body, &mut base_indent);
                        state = ParseState::Scanning;
                    }
                } else {
                    // No leading whitespace at all ends the body the same way.
                    flush_body(&mut blocks, &mut body, &mut base_indent);
                    state = ParseState::Scanning;
                }
            }
        }
    }

    // End of input closes an open body just like a dedented line would.
    if state == ParseState::BodyCollect {
        flush_body(&mut blocks, &mut body, &mut base_indent);
    }

    blocks.join("\n")
}

fn flush_body(blocks: &mut Vec<String>, body: &mut Vec<String>, base_indent: &mut Option<String>) {
    if !body.is_empty() {
        let block = demote_headings(body).join("\n");
        // A body of nothing but blank lines can demote to an empty
        // string; emit a block only when visible text remains.
        if !block.is_empty() {
            blocks.push(block);
        }
    }
    body.clear();
    *base_indent = None;
}
