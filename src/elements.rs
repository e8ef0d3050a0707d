//! Custom `genpdf` elements used by the profile renderer.
//!
//! This module adds a fixed-height spacer, a loader for the absolutely positioned logo, and a
//! wrapper that records the page an element first lands on.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use image::GenericImageView;

use genpdf::elements::Image;
use genpdf::error::{Context as _, Error};
use genpdf::style::Style;
use genpdf::{render, Element, Mm, Position, RenderResult, Scale, Size};

use crate::config::ProfileLayout;

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

pub(crate) fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// Loads the logo at `path` and places it at the layout's fixed position and width.
///
/// The returned image has an explicit position, so it occupies no vertical space in the flow;
/// callers reserve that space separately.
pub fn positioned_logo(path: impl AsRef<Path>, layout: &ProfileLayout) -> Result<Image, Error> {
    let dynamic = decode_image_from_path(path)?;
    let natural = estimated_image_size(&dynamic, DEFAULT_IMAGE_DPI);
    let mut image = Image::from_dynamic_image(dynamic)?;

    let natural_width = mm_to_f64(natural.width);
    if natural_width > f64::EPSILON {
        let scale = layout.logo.width_mm / natural_width;
        image.set_scale(Scale::new(scale, scale));
    }

    let (x, y) = layout.logo_offset_mm();
    image.set_position(Position::new(mm_from_f64(x), mm_from_f64(y)));
    Ok(image)
}

/// Fixed vertical gap.
///
/// A gap that does not fit on the current page is cut off at the page end instead of carried over.
#[derive(Clone, Copy, Debug)]
pub struct Spacer {
    height: Mm,
}

impl Spacer {
    /// Creates a spacer of `height_mm` millimetres.
    pub fn new(height_mm: f64) -> Self {
        Self {
            height: mm_from_f64(height_mm.max(0.0)),
        }
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };

        let mut result = RenderResult::default();
        result.size = Size::new(0, height);
        Ok(result)
    }
}

/// Shared count of pages started so far; page numbers are 1-based.
#[derive(Clone, Debug, Default)]
pub struct PageCounter(Rc<Cell<usize>>);

impl PageCounter {
    /// Creates a counter that has not seen any page yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the start of a new page.
    pub fn start_page(&self) {
        self.0.set(self.0.get() + 1);
    }

    /// Number of the page currently being laid out, or 0 before the first page.
    pub fn current(&self) -> usize {
        self.0.get()
    }
}

/// Handle to the page recorded by a [`PageMarker`].
#[derive(Clone, Debug, Default)]
pub struct PageSlot(Rc<Cell<Option<usize>>>);

impl PageSlot {
    /// Page on which the marked element started, once rendered.
    pub fn page(&self) -> Option<usize> {
        self.0.get()
    }
}

/// Wraps an element and records the page it first produced content on.
pub struct PageMarker<E> {
    inner: E,
    counter: PageCounter,
    slot: PageSlot,
}

impl<E: Element> PageMarker<E> {
    /// Wraps `inner`, reading page numbers from `counter`.
    pub fn new(inner: E, counter: PageCounter) -> Self {
        Self {
            inner,
            counter,
            slot: PageSlot::default(),
        }
    }

    /// Returns a handle that can be read after the document has been rendered.
    pub fn slot(&self) -> PageSlot {
        self.slot.clone()
    }
}

impl<E: Element> Element for PageMarker<E> {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let result = self.inner.render(context, area, style)?;
        if self.slot.page().is_none() && result.size.height > Mm::default() {
            self.slot.0.set(Some(self.counter.current()));
        }
        Ok(result)
    }
}
