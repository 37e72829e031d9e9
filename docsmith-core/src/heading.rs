//! ATX heading line parsing shared by the splitter and sub-navigation.

/// Parse a markdown ATX heading line.
///
/// Returns the marker depth (count of leading `#`) and the heading text
/// with trailing whitespace removed. Only `#`-marker headings are
/// recognized; setext underlines and front matter are not.
pub fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let trimmed = line.trim_end_matches(['\n', '\r']);
    let rest = trimmed.trim_start_matches('#');
    let depth = trimmed.len() - rest.len();

    if depth == 0 || depth > u8::MAX as usize {
        return None;
    }

    // The marker must be followed by a space ("#Tag" is not a heading)
    rest.strip_prefix(' ')
        .map(|text| (depth as u8, text.trim_end()))
}
