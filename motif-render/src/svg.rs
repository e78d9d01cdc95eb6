/*!
# SVG Export

Writes a layout as a standalone SVG document. Output depends only on the
layout and [`RenderConfig`], so identical runs produce identical bytes.
*/

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use motif_core::layout::{BoxMark, LayoutGeometry, LegendRow, Rect, TextMark, TickMark};

use crate::{RenderConfig, Renderer};

/// SVG backend
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a layout to an in-memory SVG document.
    pub fn render_to_string(&self, layout: &LayoutGeometry) -> String {
        let (width, height) = self.config.canvas_size(layout.extent);
        let mut svg = SvgBuilder::new(&self.config, width, height);

        if let Some(comment) = &self.config.provenance_comment {
            svg.add_comment(comment);
        }
        svg.add_background();

        for record in &layout.records {
            svg.add_outline(&record.backbone);
            svg.add_text(&record.label);
            if let Some(exon) = &record.exon {
                svg.add_outline(exon);
            }
            for track in &record.motif_tracks {
                for tick in &track.ticks {
                    svg.add_tick(tick);
                }
            }
        }

        for row in &layout.legend {
            svg.add_legend_row(row);
        }

        if let Some(title) = &layout.title {
            svg.add_text(title);
        }

        svg.finish()
    }
}

impl Renderer for SvgRenderer {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render_to_file(&self, layout: &LayoutGeometry, path: &Path) -> Result<()> {
        let document = self.render_to_string(layout);
        fs::write(path, document)
            .with_context(|| format!("Failed to write SVG: {}", path.display()))?;
        log::info!("Wrote SVG {}", path.display());
        Ok(())
    }
}

/// SVG builder for vector graphics
struct SvgBuilder {
    config: RenderConfig,
    elements: Vec<String>,
    width: u32,
    height: u32,
    top_comments: Vec<String>,
}

impl SvgBuilder {
    fn new(config: &RenderConfig, width: u32, height: u32) -> Self {
        Self {
            config: config.clone(),
            elements: Vec::new(),
            width,
            height,
            top_comments: Vec::new(),
        }
    }

    fn add_comment(&mut self, text: &str) {
        self.top_comments.push(text.to_string());
    }

    fn add_background(&mut self) {
        self.elements.push(format!(
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            self.width, self.height, self.config.background_color
        ));
    }

    fn add_outline(&mut self, mark: &BoxMark) {
        let Rect { x, y, width, height } = mark.rect;
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            x, y, width, height, mark.color, mark.stroke_width
        ));
    }

    fn add_filled(&mut self, rect: &Rect, color: impl std::fmt::Display) {
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            rect.x, rect.y, rect.width, rect.height, color
        ));
    }

    fn add_tick(&mut self, tick: &TickMark) {
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            tick.x, tick.y_top, tick.x, tick.y_bottom, tick.color, tick.stroke_width
        ));
    }

    fn add_text(&mut self, mark: &TextMark) {
        self.elements.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" fill="{}">{}</text>"#,
            mark.x,
            mark.y,
            escape_xml(&self.config.font_family),
            mark.font_size,
            mark.color,
            escape_xml(&mark.text)
        ));
    }

    fn add_legend_row(&mut self, row: &LegendRow) {
        if let Some(swatch) = &row.swatch {
            self.add_filled(swatch, row.color);
        }
        if let Some(bar) = &row.bar {
            self.add_filled(bar, row.color);
        }
        self.add_text(&row.label);
    }

    fn finish(self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            self.width, self.height, self.width, self.height
        ));
        for c in &self.top_comments {
            for line in c.lines() {
                out.push_str(&format!("  <!-- {} -->\n", line.replace("--", "- -")));
            }
        }
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_core::{Annotator, LayoutConfig, MotifSet};

    fn sample_layout(title: Option<&str>) -> LayoutGeometry {
        let motifs = MotifSet::compile(["ygcy", "GCAUG"]).unwrap();
        Annotator::new(motifs, LayoutConfig::default())
            .annotate(
                vec![("seq<1>", b"ttgctagAGCTGCTatgcatg".to_vec())],
                title,
            )
            .unwrap()
            .layout
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_document_structure() {
        let svg = SvgRenderer::default().render_to_string(&sample_layout(Some("Figure_1")));
        let mut lines = svg.lines();
        assert_eq!(lines.next(), Some(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert_eq!(
            lines.next(),
            Some(r#"<svg width="1100" height="1100" viewBox="0 0 1100 1100" xmlns="http://www.w3.org/2000/svg">"#)
        );
        assert!(lines.next().is_some_and(|l| l.starts_with("  <rect ")));
        assert!(svg.ends_with("\n</svg>\n"));
        assert!(svg.contains(r##"<rect width="1100" height="1100" fill="#ffffff"/>"##));
        assert!(svg.contains(">Figure_1</text>"));
        assert!(svg.contains(">seq&lt;1&gt; (21 bases)</text>"));
    }

    #[test]
    fn test_backbone_exon_and_ticks() {
        let svg = SvgRenderer::default().render_to_string(&sample_layout(None));
        // Backbone at slot 1
        assert!(svg.contains(
            r##"<rect x="100" y="200" width="21" height="1" fill="none" stroke="#000000" stroke-width="10"/>"##
        ));
        // Exon spans offsets 7..13
        assert!(svg.contains(
            r##"<rect x="107" y="190" width="6" height="10" fill="none" stroke="#000000" stroke-width="10"/>"##
        ));
        // YGCY at offset 1, red, width 4
        assert!(svg.contains(
            r##"<line x1="101" y1="205" x2="101" y2="225" stroke="#ff0000" stroke-width="4"/>"##
        ));
        assert!(!svg.contains("<!--"));
    }

    #[test]
    fn test_legend_elements() {
        let svg = SvgRenderer::default().render_to_string(&sample_layout(None));
        assert!(svg.contains(r##"<rect x="825" y="40" width="10" height="10" fill="#ff0000"/>"##));
        assert!(svg.contains(">ygcy</text>"));
        assert!(svg.contains(">GCAUG</text>"));
        assert!(svg.contains(">Exon</text>"));
        assert!(svg.contains(">Intron</text>"));
    }

    #[test]
    fn test_provenance_comment() {
        let config = RenderConfig {
            provenance_comment: Some("motif-mark run\nmotifs: 2".to_string()),
            ..RenderConfig::default()
        };
        let svg = SvgRenderer::new(config).render_to_string(&sample_layout(None));
        assert!(svg.contains("  <!-- motif-mark run -->"));
        assert!(svg.contains("  <!-- motifs: 2 -->"));
    }
}
