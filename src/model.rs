//! Render plan describing the profile as an ordered list of layout blocks.
//!
//! The plan is derived from a [`ContentDocument`] and a [`ProfileLayout`] without touching fonts or
//! the filesystem.  The renderer later maps each block onto a `genpdf` element, so everything that
//! decides *what* ends up on the page can be checked here in isolation.

use crate::classify::{classify_line, LineKind};
use crate::config::ProfileLayout;
use crate::content::{ContentDocument, PROFILE_TITLE};

/// A single layout block of the profile.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// The optional logo image, placed at the layout's fixed position.
    Logo,
    /// Fixed vertical space in millimetres.
    Spacer(f64),
    /// Centered document title.
    Title(String),
    /// Bold section heading.
    Heading(String),
    /// Wrapped body text; `kind` is either a list item or a paragraph.
    Text { text: String, kind: LineKind },
}

impl Block {
    /// Convenience helper for building a body text block.
    pub fn text(text: impl Into<String>, kind: LineKind) -> Self {
        Self::Text {
            text: text.into(),
            kind,
        }
    }

    /// Returns the text carried by the block, if any.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Block::Title(text) | Block::Heading(text) | Block::Text { text, .. } => Some(text),
            Block::Logo | Block::Spacer(_) => None,
        }
    }
}

/// Ordered blocks that make up the rendered profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfilePlan {
    title: String,
    blocks: Vec<Block>,
}

impl ProfilePlan {
    /// Creates an empty plan with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Builds the plan for `document`.
    ///
    /// The logo and its reserved space come first, followed by the title and one block per
    /// non-blank line.  Lines equal to the title are skipped since the title is already printed.
    pub fn from_document(document: &ContentDocument, layout: &ProfileLayout) -> Self {
        let mut plan = Self::new(PROFILE_TITLE)
            .with_block(Block::Logo)
            .with_block(Block::Spacer(layout.logo_reserve_mm))
            .with_block(Block::Title(PROFILE_TITLE.to_owned()))
            .with_block(Block::Spacer(layout.title_gap_mm));

        for line in document.lines() {
            let trimmed = line.trim();
            if trimmed == PROFILE_TITLE {
                continue;
            }

            match classify_line(trimmed) {
                LineKind::Blank => {}
                LineKind::SectionHeading => {
                    plan.push(Block::Spacer(layout.heading_gap_mm));
                    plan.push(Block::Heading(trimmed.to_owned()));
                }
                kind => plan.push(Block::text(trimmed, kind)),
            }
        }

        plan
    }

    /// Returns the document title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the blocks in render order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the section headings in render order.
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Appends a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Appends a block and returns the updated plan.
    pub fn with_block(mut self, block: Block) -> Self {
        self.push(block);
        self
    }
}
