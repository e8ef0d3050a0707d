//! The profile rendering pipeline.
//!
//! [`ProfileRenderer::render`] turns the render plan into a `genpdf` document, writes it to the
//! output path and returns a [`RenderReport`] describing what happened.  Only directory creation,
//! font loading, serialization and the final write are fatal; a missing or broken logo is logged
//! and skipped.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use genpdf::elements::{Image, Paragraph};
use genpdf::style::{Style, StyledString};
use genpdf::Alignment;
use log::{debug, info, warn};

use crate::builder::DocumentBuilder;
use crate::config::ProfileLayout;
use crate::content::ContentDocument;
use crate::elements::{positioned_logo, PageCounter, PageMarker, PageSlot, Spacer};
use crate::error::{ProfileError, Result};
use crate::model::{Block, ProfilePlan};
use crate::paths::ProfilePaths;

/// What happened to the logo during a render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogoStatus {
    /// The logo was embedded.
    Placed,
    /// No file exists at the logo path.
    Missing,
    /// The file exists but could not be decoded or embedded.
    Failed(String),
}

/// A section heading together with the page it starts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionAnchor {
    title: String,
    page: Option<usize>,
}

impl SectionAnchor {
    pub fn new(title: impl Into<String>, page: Option<usize>) -> Self {
        Self {
            title: title.into(),
            page,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// 1-based page number, or `None` if the heading was never laid out.
    pub fn page(&self) -> Option<usize> {
        self.page
    }
}

/// Outcome of a successful render.
///
/// The `Display` implementation prints the diagnostic block shown after a run.
#[derive(Clone, Debug)]
pub struct RenderReport {
    paths: ProfilePaths,
    working_dir: Option<PathBuf>,
    logo: LogoStatus,
    logo_exists: bool,
    output_dir_exists: bool,
    page_count: usize,
    bytes_written: usize,
    sections: Vec<SectionAnchor>,
}

impl RenderReport {
    pub fn paths(&self) -> &ProfilePaths {
        &self.paths
    }

    pub fn logo(&self) -> &LogoStatus {
        &self.logo
    }

    pub fn logo_exists(&self) -> bool {
        self.logo_exists
    }

    pub fn output_dir_exists(&self) -> bool {
        self.output_dir_exists
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Size of the written PDF in bytes.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Section headings in render order.
    pub fn sections(&self) -> &[SectionAnchor] {
        &self.sections
    }
}

impl fmt::Display for RenderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let working_dir = self
            .working_dir
            .as_deref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "<unavailable>".to_owned());

        writeln!(
            f,
            "PDF created successfully at {}",
            self.paths.output().display()
        )?;
        writeln!(f, "Current working directory: {}", working_dir)?;
        writeln!(f, "Root directory: {}", self.paths.root().display())?;
        writeln!(f, "Logo path: {}", self.paths.logo().display())?;
        writeln!(f, "Exists? {}", self.logo_exists)?;
        write!(f, "Download dir exists? {}", self.output_dir_exists)
    }
}

/// Renders a [`ContentDocument`] into a PDF using a [`ProfileLayout`].
#[derive(Clone, Debug, Default)]
pub struct ProfileRenderer {
    content: ContentDocument,
    layout: ProfileLayout,
}

impl ProfileRenderer {
    /// Creates a renderer for the built-in profile with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the content and returns the updated renderer.
    pub fn with_content(mut self, content: ContentDocument) -> Self {
        self.content = content;
        self
    }

    /// Replaces the layout and returns the updated renderer.
    pub fn with_layout(mut self, layout: ProfileLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns the plan this renderer lays out.
    pub fn plan(&self) -> ProfilePlan {
        ProfilePlan::from_document(&self.content, &self.layout)
    }

    /// Renders the profile and writes it to `paths.output()`, replacing any previous file.
    pub fn render(&self, paths: &ProfilePaths) -> Result<RenderReport> {
        paths
            .ensure_output_dir()
            .map_err(|source| ProfileError::CreateOutputDir {
                path: paths.output_dir().to_path_buf(),
                source,
            })?;

        let plan = self.plan();
        debug!("Render plan has {} blocks", plan.blocks().len());

        let counter = PageCounter::new();
        let mut document = DocumentBuilder::new()
            .with_title(plan.title())
            .with_uniform_margin(self.layout.margin_mm)
            .with_font_size(self.layout.body_font_size)
            .with_line_spacing(self.layout.line_spacing)
            .with_page_counter(counter.clone())
            .build()
            .map_err(ProfileError::FontLoad)?;

        let mut logo = LogoStatus::Missing;
        let mut headings: Vec<(String, PageSlot)> = Vec::new();

        for block in plan.blocks() {
            match block {
                Block::Logo => {
                    let (status, image) = load_logo(paths.logo(), &self.layout);
                    if let Some(image) = image {
                        document.push(image);
                    }
                    logo = status;
                }
                Block::Spacer(height_mm) => document.push(Spacer::new(*height_mm)),
                Block::Title(text) => document.push(
                    Paragraph::new(styled(text, self.layout.title_font_size, true))
                        .aligned(Alignment::Center),
                ),
                Block::Heading(text) => {
                    let marker = PageMarker::new(
                        Paragraph::new(styled(text, self.layout.heading_font_size, true)),
                        counter.clone(),
                    );
                    headings.push((text.clone(), marker.slot()));
                    document.push(marker);
                }
                Block::Text { text, .. } => document.push(Paragraph::new(styled(
                    text,
                    self.layout.body_font_size,
                    false,
                ))),
            }
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(ProfileError::Render)?;

        let sections: Vec<SectionAnchor> = headings
            .into_iter()
            .map(|(title, slot)| SectionAnchor::new(title, slot.page()))
            .collect();
        for section in &sections {
            debug!("Section '{}' starts on page {:?}", section.title(), section.page());
        }

        #[cfg(feature = "bookmarks")]
        let bytes = crate::bookmarks::apply_section_bookmarks(&bytes, &sections)?;

        fs::write(paths.output(), &bytes).map_err(|source| ProfileError::Write {
            path: paths.output().to_path_buf(),
            source,
        })?;
        info!(
            "Wrote {} ({} bytes, {} pages)",
            paths.output().display(),
            bytes.len(),
            counter.current()
        );

        Ok(RenderReport {
            paths: paths.clone(),
            working_dir: env::current_dir().ok(),
            logo,
            logo_exists: paths.logo().exists(),
            output_dir_exists: paths.output_dir().exists(),
            page_count: counter.current(),
            bytes_written: bytes.len(),
            sections,
        })
    }
}

/// Renders the built-in profile with the default layout.
pub fn render(paths: &ProfilePaths) -> Result<RenderReport> {
    ProfileRenderer::new().render(paths)
}

fn styled(text: &str, font_size: u8, bold: bool) -> StyledString {
    let mut style = Style::new();
    style.set_font_size(font_size);
    if bold {
        style.set_bold();
    }
    StyledString::new(text.to_owned(), style)
}

fn load_logo(path: &Path, layout: &ProfileLayout) -> (LogoStatus, Option<Image>) {
    if !path.exists() {
        warn!("Logo file not found at {}", path.display());
        return (LogoStatus::Missing, None);
    }

    match positioned_logo(path, layout) {
        Ok(image) => (LogoStatus::Placed, Some(image)),
        Err(err) => {
            warn!("Error adding logo from {}: {}", path.display(), err);
            (LogoStatus::Failed(err.to_string()), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::{Mutex, Once};

    use log::{Level, LevelFilter, Log, Metadata, Record};

    use super::{load_logo, styled, LogoStatus, RenderReport, SectionAnchor};
    use crate::config::ProfileLayout;
    use crate::paths::ProfilePaths;

    struct CapturingLogger {
        warnings: Mutex<Vec<String>>,
    }

    impl Log for CapturingLogger {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record<'_>) {
            if self.enabled(record.metadata()) {
                self.warnings
                    .lock()
                    .expect("logger mutex poisoned")
                    .push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger {
        warnings: Mutex::new(Vec::new()),
    };
    static INSTALL_LOGGER: Once = Once::new();

    /// Warnings logged so far that mention `path`; tests run in parallel, so filter by their own
    /// temporary paths.
    fn warnings_about(path: &Path) -> Vec<String> {
        INSTALL_LOGGER.call_once(|| {
            log::set_logger(&LOGGER).expect("install capturing logger");
            log::set_max_level(LevelFilter::Warn);
        });

        let needle = path.display().to_string();
        LOGGER
            .warnings
            .lock()
            .expect("logger mutex poisoned")
            .iter()
            .filter(|message| message.contains(&needle))
            .cloned()
            .collect()
    }

    #[test]
    fn missing_logo_is_reported_without_image() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("logo.jpg");
        assert!(warnings_about(&path).is_empty());

        let (status, image) = load_logo(&path, &ProfileLayout::default());
        assert_eq!(status, LogoStatus::Missing);
        assert!(image.is_none());

        let warnings = warnings_about(&path);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Logo file not found at "));
    }

    #[test]
    fn unreadable_logo_is_reported_with_reason() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("logo.jpg");
        std::fs::write(&path, b"\xff\xd8 truncated").expect("write logo");
        assert!(warnings_about(&path).is_empty());

        let (status, image) = load_logo(&path, &ProfileLayout::default());
        assert!(matches!(&status, LogoStatus::Failed(reason) if !reason.is_empty()));
        assert!(image.is_none());

        let warnings = warnings_about(&path);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Error adding logo from "));
        if let LogoStatus::Failed(reason) = status {
            assert!(warnings[0].ends_with(&reason));
        }
    }

    #[test]
    fn styled_text_carries_size_and_weight() {
        let heading = styled("Our Mission", 14, true);
        assert_eq!(heading.s, "Our Mission");
        assert_eq!(heading.style.font_size(), 14);
        assert!(heading.style.is_bold());
        assert!(!styled("body", 12, false).style.is_bold());
    }

    #[test]
    fn report_prints_diagnostic_block() {
        let report = RenderReport {
            paths: ProfilePaths::from_root("/srv/site"),
            working_dir: Some("/tmp".into()),
            logo: LogoStatus::Missing,
            logo_exists: false,
            output_dir_exists: true,
            page_count: 2,
            bytes_written: 1024,
            sections: vec![SectionAnchor::new("Our Mission", Some(1))],
        };

        let text = report.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "PDF created successfully at /srv/site/public/downloads/NorthPath_Strategies_Profile.pdf",
                "Current working directory: /tmp",
                "Root directory: /srv/site",
                "Logo path: /srv/site/public/images/optimized-hero-logo-60.jpg",
                "Exists? false",
                "Download dir exists? true",
            ]
        );
    }
}
