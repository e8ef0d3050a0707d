//! Renders the NorthPath Strategies company profile to PDF.
//!
//! The profile text is compiled in.  [`renderer::render`] classifies every line, lays the result
//! out with `genpdf` and writes the PDF below the project root resolved by [`paths`].

pub mod builder;
pub mod classify;
pub mod config;
pub mod content;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod model;
pub mod paths;
pub mod renderer;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use error::{ProfileError, Result};
pub use paths::ProfilePaths;
pub use renderer::{render, LogoStatus, ProfileRenderer, RenderReport};
