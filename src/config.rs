//! Compiled-in layout settings for the profile document.
//!
//! Lengths are millimetres and font sizes are points.  Positions given in page coordinates are
//! converted to the content area (inside the page margins) by the helpers on [`ProfileLayout`].

/// Where the logo goes on the first page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogoPlacement {
    /// Distance from the left page edge.
    pub x_mm: f64,
    /// Distance from the top page edge.
    pub y_mm: f64,
    /// Rendered width; the height follows from the aspect ratio.
    pub width_mm: f64,
}

/// Page geometry, fonts and spacing used when rendering the profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileLayout {
    /// Margin applied on all four sides of every page.
    pub margin_mm: f64,
    pub logo: LogoPlacement,
    /// Vertical space reserved for the logo, whether or not it is drawn.
    pub logo_reserve_mm: f64,
    pub title_font_size: u8,
    /// Gap after the title.
    pub title_gap_mm: f64,
    pub heading_font_size: u8,
    /// Gap before each section heading.
    pub heading_gap_mm: f64,
    pub body_font_size: u8,
    /// Line spacing multiplier applied to every text line.
    pub line_spacing: f64,
}

impl Default for ProfileLayout {
    fn default() -> Self {
        Self {
            margin_mm: 10.0,
            logo: LogoPlacement {
                x_mm: 10.0,
                y_mm: 10.0,
                width_mm: 50.0,
            },
            logo_reserve_mm: 35.0,
            title_font_size: 16,
            title_gap_mm: 5.0,
            heading_font_size: 14,
            heading_gap_mm: 5.0,
            body_font_size: 12,
            line_spacing: 2.0,
        }
    }
}

impl ProfileLayout {
    /// Logo offset relative to the top-left corner of the content area.
    ///
    /// Page positions that fall inside the margin are clamped to the content area edge.
    pub fn logo_offset_mm(&self) -> (f64, f64) {
        (
            (self.logo.x_mm - self.margin_mm).max(0.0),
            (self.logo.y_mm - self.margin_mm).max(0.0),
        )
    }
}
