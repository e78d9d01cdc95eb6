/*!
# Motif Mark Rendering

Backends that turn a [`LayoutGeometry`] into an image file. The layout engine
decides where everything goes; a renderer only draws it.

- [`SvgRenderer`]: vector output with text, byte-identical for identical input
- [`PngRenderer`]: raster of the SVG document, text included
*/

use std::path::Path;

use anyhow::Result;
use motif_core::layout::{Color, Extent, LayoutGeometry};
use serde::{Deserialize, Serialize};

pub mod png;
pub mod svg;

pub use png::PngRenderer;
pub use svg::SvgRenderer;

/// Canvas and styling shared by all renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Minimum canvas width; grows to fit the layout
    pub width: u32,
    /// Minimum canvas height; grows to fit the layout
    pub height: u32,
    pub background_color: Color,
    /// CSS font-family list; the PNG falls back to any installed sans-serif face
    pub font_family: String,
    pub provenance_comment: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 1100,
            background_color: Color::WHITE,
            font_family: "Arial, sans-serif".to_string(),
            provenance_comment: None,
        }
    }
}

impl RenderConfig {
    /// Canvas size: the configured size, enlarged to contain the layout.
    pub fn canvas_size(&self, extent: Extent) -> (u32, u32) {
        let width = (extent.width.max(0.0).ceil() as u32).max(self.width);
        let height = (extent.height.max(0.0).ceil() as u32).max(self.height);
        (width, height)
    }
}

/// A drawing backend for layouts.
pub trait Renderer {
    /// File extension written by this renderer, without the dot
    fn extension(&self) -> &'static str;

    fn render_to_file(&self, layout: &LayoutGeometry, path: &Path) -> Result<()>;
}
