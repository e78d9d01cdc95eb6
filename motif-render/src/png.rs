/*!
# PNG Export

Rasterizes the SVG document of a layout with `resvg`, so the PNG carries the
same shapes and text as the vector output. Text uses the installed system
fonts; when the configured families are missing, any sans-serif face stands in.
*/

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use image::RgbaImage;
use motif_core::layout::LayoutGeometry;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{self, fontdb};

use crate::svg::SvgRenderer;
use crate::{RenderConfig, Renderer};

/// PNG backend
#[derive(Debug, Clone, Default)]
pub struct PngRenderer {
    config: RenderConfig,
}

impl PngRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Rasterize a layout into an RGBA image.
    pub fn render_to_image(&self, layout: &LayoutGeometry) -> Result<RgbaImage> {
        let document = SvgRenderer::new(self.config.clone()).render_to_string(layout);

        let mut options = usvg::Options::default();
        options.fontdb = Arc::new(font_database());
        let tree = usvg::Tree::from_str(&document, &options)
            .context("Failed to parse the SVG document for rasterization")?;

        let size = tree.size().to_int_size();
        let mut pixmap = Pixmap::new(size.width(), size.height())
            .with_context(|| format!("Invalid canvas size {}x{}", size.width(), size.height()))?;
        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

        log::debug!("Rasterized layout at {}x{}", size.width(), size.height());
        pixmap_to_image(&pixmap)
    }
}

impl Renderer for PngRenderer {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn render_to_file(&self, layout: &LayoutGeometry, path: &Path) -> Result<()> {
        let img = self.render_to_image(layout)?;
        img.save(path)
            .with_context(|| format!("Failed to write PNG: {}", path.display()))?;
        log::info!("Wrote PNG {}", path.display());
        Ok(())
    }
}

/// System fonts, with the generic sans-serif family pointed at an installed face.
fn font_database() -> fontdb::Database {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let sans = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        ..fontdb::Query::default()
    };
    if db.query(&sans).is_none() {
        let fallback = db
            .faces()
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()));
        match fallback {
            Some(name) => {
                log::debug!("Using '{}' as the sans-serif font", name);
                db.set_sans_serif_family(name);
            }
            None => log::warn!("No system fonts found; PNG text will be missing"),
        }
    }

    db
}

/// Copy a premultiplied pixmap into a straight-alpha image.
fn pixmap_to_image(pixmap: &Pixmap) -> Result<RgbaImage> {
    let mut raw = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), raw)
        .context("Pixmap buffer does not match its size")
}
