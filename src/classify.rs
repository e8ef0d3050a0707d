//! Line classification for the profile text.

use crate::content::SECTION_HEADINGS;

const LIST_MARKERS: [&str; 4] = ["-", "1.", "2.", "3."];

/// The formatting class of a single content line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Nothing but whitespace.
    Blank,
    /// One of the known section headings.
    SectionHeading,
    /// Starts with a bullet or numbered marker.
    ListItem,
    /// Any other text.
    Paragraph,
}

/// Returns `true` when the trimmed line begins with a list marker.
pub fn is_list_item(line: &str) -> bool {
    let trimmed = line.trim();
    LIST_MARKERS
        .iter()
        .any(|marker| trimmed.starts_with(marker))
}

/// Returns `true` when the trimmed line is exactly one of the known section headings.
pub fn is_section_heading(line: &str) -> bool {
    SECTION_HEADINGS.contains(&line.trim())
}

/// Classifies a raw content line.
///
/// List markers win over heading matches, so `- Our Mission` is a list item.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if is_list_item(trimmed) {
        LineKind::ListItem
    } else if is_section_heading(trimmed) {
        LineKind::SectionHeading
    } else {
        LineKind::Paragraph
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_line, LineKind};
    use crate::content::SECTION_HEADINGS;

    #[test]
    fn headings_are_recognised_with_surrounding_whitespace() {
        for heading in SECTION_HEADINGS {
            assert_eq!(classify_line(heading), LineKind::SectionHeading);
            assert_eq!(
                classify_line(&format!("  {heading}\t")),
                LineKind::SectionHeading
            );
        }
    }

    #[test]
    fn list_markers_take_precedence_over_headings() {
        assert_eq!(classify_line("- Our Mission"), LineKind::ListItem);
        assert_eq!(classify_line("1. Our Vision"), LineKind::ListItem);
        assert_eq!(classify_line("2.Industries Served"), LineKind::ListItem);
        assert_eq!(classify_line("3. Contact Information"), LineKind::ListItem);
    }

    #[test]
    fn other_numbers_are_paragraphs() {
        assert_eq!(classify_line("4. Not a list"), LineKind::Paragraph);
        assert_eq!(classify_line("10 reasons"), LineKind::Paragraph);
    }

    #[test]
    fn partial_heading_matches_are_paragraphs() {
        assert_eq!(classify_line("Our Mission statement"), LineKind::Paragraph);
        assert_eq!(classify_line("our mission"), LineKind::Paragraph);
    }

    #[test]
    fn whitespace_is_blank() {
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(classify_line("   \t"), LineKind::Blank);
    }
}
