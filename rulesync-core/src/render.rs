/// Assemble the final document for one destination: the header with its
/// trailing whitespace trimmed, a blank line, the section marker, a blank
/// line, then the rules, closed by exactly one trailing newline.
pub fn render_document(header: &str, section_marker: &str, rules: &str) -> String {
    format!("{}\n\n{}\n\n{}\n", header.trim_end(), section_marker, rules)
}
