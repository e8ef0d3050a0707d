//! Document construction helpers.

use crate::elements::{mm_from_f64, PageCounter};
use crate::fonts;
use genpdf::error::Error;
use genpdf::style;
use genpdf::{self, Margins, PageDecorator, PaperSize, Size};

/// Builder for `genpdf::Document` instances pre-configured with the crate defaults.
pub struct DocumentBuilder {
    title: Option<String>,
    paper_size: Size,
    margins: Option<Margins>,
    font_size: Option<u8>,
    line_spacing: Option<f64>,
    page_counter: PageCounter,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self {
            title: None,
            paper_size: PaperSize::A4.into(),
            margins: None,
            font_size: None,
            line_spacing: None,
            page_counter: PageCounter::new(),
        }
    }
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title stored in the document metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Applies the same margin in millimetres on all sides of every page.
    pub fn with_uniform_margin(mut self, margin_mm: f64) -> Self {
        self.margins = Some(Margins::trbl(
            mm_from_f64(margin_mm),
            mm_from_f64(margin_mm),
            mm_from_f64(margin_mm),
            mm_from_f64(margin_mm),
        ));
        self
    }

    /// Sets the default font size in points.
    pub fn with_font_size(mut self, font_size: u8) -> Self {
        self.font_size = Some(font_size);
        self
    }

    /// Sets the line spacing multiplier.
    pub fn with_line_spacing(mut self, line_spacing: f64) -> Self {
        self.line_spacing = Some(line_spacing);
        self
    }

    /// Uses `counter` to track page numbers while the document renders.
    pub fn with_page_counter(mut self, counter: PageCounter) -> Self {
        self.page_counter = counter;
        self
    }

    /// Builds a fully configured `genpdf::Document` instance.
    pub fn build(self) -> Result<genpdf::Document, Error> {
        let font_family = fonts::default_font_family()?;
        let mut document = genpdf::Document::new(font_family);

        document.set_paper_size(self.paper_size);
        if let Some(title) = self.title {
            document.set_title(title);
        }
        if let Some(font_size) = self.font_size {
            document.set_font_size(font_size);
        }
        if let Some(line_spacing) = self.line_spacing {
            document.set_line_spacing(line_spacing);
        }

        let decorator = CountingPageDecorator::new(self.margins, self.page_counter);
        document.set_page_decorator(decorator);

        Ok(document)
    }
}

struct CountingPageDecorator {
    margins: Option<Margins>,
    counter: PageCounter,
}

impl CountingPageDecorator {
    fn new(margins: Option<Margins>, counter: PageCounter) -> Self {
        Self { margins, counter }
    }
}

impl PageDecorator for CountingPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        _context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        _style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        self.counter.start_page();

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        Ok(area)
    }
}
