//! The compiled-in text of the company profile.
//!
//! The profile is a single static string.  [`ContentDocument`] exposes it as an ordered sequence of
//! lines, which is the unit the classifier and the render plan work on.

/// Title printed at the top of the first page and stored in the PDF metadata.
pub const PROFILE_TITLE: &str = "NorthPath Strategies: Company Profile";

/// Lines that are rendered as section headings when they appear on their own.
pub const SECTION_HEADINGS: [&str; 8] = [
    "About NorthPath Strategies",
    "Our Mission",
    "Our Vision",
    "Core Services Offered",
    "Our Approach",
    "What Sets Us Apart",
    "Industries Served",
    "Contact Information",
];

/// Full profile text.  The title line is repeated here and skipped during rendering.
pub const PROFILE_CONTENT: &str = "
NorthPath Strategies: Company Profile

About NorthPath Strategies
NorthPath Strategies specializes in strategically realigning and redefining organizational systems and structures to unlock leaders' potential and empower effective execution. We partner with forward-thinking organizations committed to operational excellence, clear strategic direction, and sustainable systemic change.

Our Mission
To redefine and realign organizational structures and systems, enabling leaders to thrive, execute effectively, and achieve sustained success.

Our Vision
To become the preferred strategic partner in driving systemic and structural transformations that empower organizations to achieve operational clarity, effectiveness, and resilience.

Core Services Offered
1. Systemic Realignment and Structural Transformation
- Organizational Structure Optimization
- Strategic Systems Redesign
- Performance Alignment and Accountability

2. Operational Excellence
- Process and Workflow Realignment
- Efficiency and Productivity Enhancement
- Sustainable Change Implementation

3. Strategic Execution Support
- Frameworks for Strategy Implementation
- Realignment of Resources and Capabilities
- Integrated Systems for Performance Management

Our Approach
NorthPath Strategies focuses on systemic solutions, aligning organizational structures with strategic priorities:
- Diagnosis and Analysis
- Strategic Realignment
- Execution Facilitation
- Long-term Sustainability

What Sets Us Apart
- Strategic Focus on Systems and Structures
- Integrated, Systemic Approach
- Empowering Leadership Execution
- Enduring Impact

Industries Served
- Higher Education Institutions
- Nonprofit Organizations
- Government Agencies
- Corporate Enterprises

Contact Information
Website: northpathstrategies.org
Email: info@northpathstrategies.org
Social Media:
- LinkedIn
- Twitter
- Facebook

NorthPath Strategies: Redefining Systems, Empowering Leaders.
";

/// An ordered, immutable view over the lines of a text block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentDocument {
    text: &'static str,
}

impl ContentDocument {
    /// Wraps an arbitrary static text block.
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    /// Returns the built-in company profile.
    pub const fn profile() -> Self {
        Self::new(PROFILE_CONTENT)
    }

    /// Iterates over the lines in order, untrimmed.
    pub fn lines(&self) -> impl Iterator<Item = &'static str> {
        self.text.split('\n')
    }
}

impl Default for ContentDocument {
    fn default() -> Self {
        Self::profile()
    }
}

#[cfg(test)]
mod tests {
    use super::{ContentDocument, PROFILE_TITLE, SECTION_HEADINGS};

    #[test]
    fn every_heading_appears_on_its_own_line() {
        let lines: Vec<_> = ContentDocument::profile()
            .lines()
            .map(str::trim)
            .collect();

        for heading in SECTION_HEADINGS {
            assert!(lines.contains(&heading), "missing heading line {heading:?}");
        }
    }

    #[test]
    fn title_is_repeated_in_content() {
        assert!(ContentDocument::profile()
            .lines()
            .any(|line| line.trim() == PROFILE_TITLE));
    }

    #[test]
    fn lines_keep_blank_entries() {
        let document = ContentDocument::new("a\n\nb");
        assert_eq!(document.lines().collect::<Vec<_>>(), vec!["a", "", "b"]);
    }
}
