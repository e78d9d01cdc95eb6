//! Diagram layout
//!
//! Turns annotated records into renderer-agnostic geometry. Coordinates are
//! the sequence's own base offsets shifted by a fixed left margin; nothing is
//! scaled, so longer sequences simply extend further right. Records are
//! stacked at `display_slot * vertical_spacing`. The legend sits at a fixed
//! x position with rows placed by a running counter: one row per motif,
//! then "Exon", then "Intron".
//!
//! Motif colors come from a fixed palette indexed by the motif's 1-based
//! color index. When there are more motifs than palette entries the palette
//! is reused cyclically, so motif 6 of a 5-color palette shares motif 1's
//! color.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnnotateError, AnnotateResult};
use crate::types::{MotifSet, SequenceRecord};

/// An opaque RGB color, written and parsed as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(s: &str) -> AnnotateResult<Self> {
        let invalid = || AnnotateError::InvalidColor {
            value: s.to_string(),
        };
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = AnnotateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Red, green, blue, light blue, pink.
pub fn default_palette() -> Vec<Color> {
    vec![
        Color::rgb(255, 0, 0),
        Color::rgb(0, 255, 0),
        Color::rgb(0, 0, 255),
        Color::rgb(0, 191, 255),
        Color::rgb(255, 0, 255),
    ]
}

/// Layout constants. All distances are in canvas units, one unit per base
/// horizontally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between consecutive record slots
    pub vertical_spacing: f64,
    /// x offset of sequence position 0
    pub left_margin: f64,
    pub backbone_thickness: f64,
    pub backbone_stroke: f64,
    /// Exon box top = backbone y - inset
    pub exon_inset: f64,
    pub exon_height: f64,
    pub exon_stroke: f64,
    /// Tick marks run from backbone y + top to backbone y + bottom
    pub tick_top: f64,
    pub tick_bottom: f64,
    /// Label baseline = backbone y - offset
    pub label_offset: f64,
    pub label_font_size: f64,
    pub title_x: f64,
    pub title_y: f64,
    pub title_font_size: f64,
    pub legend_swatch_x: f64,
    pub legend_bar_x: f64,
    pub legend_label_x: f64,
    /// Legend row k (1-based) starts at y = k * step
    pub legend_row_step: f64,
    pub legend_label_dy: f64,
    pub legend_swatch_size: f64,
    pub legend_bar_width: f64,
    pub legend_bar_height: f64,
    pub legend_font_size: f64,
    pub text_color: Color,
    pub palette: Vec<Color>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            vertical_spacing: 200.0,
            left_margin: 100.0,
            backbone_thickness: 1.0,
            backbone_stroke: 10.0,
            exon_inset: 10.0,
            exon_height: 10.0,
            exon_stroke: 10.0,
            tick_top: 5.0,
            tick_bottom: 25.0,
            label_offset: 30.0,
            label_font_size: 25.0,
            title_x: 100.0,
            title_y: 75.0,
            title_font_size: 40.0,
            legend_swatch_x: 825.0,
            legend_bar_x: 820.0,
            legend_label_x: 850.0,
            legend_row_step: 40.0,
            legend_label_dy: 10.0,
            legend_swatch_size: 10.0,
            legend_bar_width: 20.0,
            legend_bar_height: 5.0,
            legend_font_size: 30.0,
            text_color: Color::BLACK,
            palette: default_palette(),
        }
    }
}

impl LayoutConfig {
    /// Color for a 1-based motif color index, cycling through the palette.
    pub fn motif_color(&self, color_index: usize) -> AnnotateResult<Color> {
        if self.palette.is_empty() {
            return Err(AnnotateError::EmptyPalette);
        }
        let slot = color_index.saturating_sub(1) % self.palette.len();
        Ok(self.palette[slot])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Outlined rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxMark {
    pub rect: Rect,
    pub stroke_width: f64,
    pub color: Color,
}

/// Vertical line marking one motif occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    /// Occurrence start offset in the sequence
    pub offset: usize,
    pub x: f64,
    pub y_top: f64,
    pub y_bottom: f64,
    pub stroke_width: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMark {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub font_size: f64,
    pub color: Color,
}

/// Ticks of a single motif on a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotifTrack {
    pub motif: String,
    pub color_index: usize,
    pub color: Color,
    pub ticks: Vec<TickMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordGeometry {
    pub id: String,
    pub display_slot: usize,
    pub label: TextMark,
    pub backbone: BoxMark,
    pub exon: Option<BoxMark>,
    /// One track per motif, in motif order, even when it has no ticks
    pub motif_tracks: Vec<MotifTrack>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendKind {
    Motif { color_index: usize },
    Exon,
    Intron,
}

/// One legend row: an optional filled swatch, an optional bar sample and a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendRow {
    pub kind: LegendKind,
    pub color: Color,
    pub swatch: Option<Rect>,
    pub bar: Option<Rect>,
    pub label: TextMark,
}

/// Smallest canvas containing every element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutGeometry {
    pub title: Option<TextMark>,
    pub records: Vec<RecordGeometry>,
    pub legend: Vec<LegendRow>,
    pub extent: Extent,
}

/// Assigns geometry to annotated records.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `records` (in slot order) with the shared motif list.
    ///
    /// Every record must be annotated; a missing exon is reported as
    /// [`AnnotateError::NoExonFound`] rather than drawn as an empty box.
    pub fn layout(
        &self,
        records: &[SequenceRecord],
        motifs: &MotifSet,
        title: Option<&str>,
    ) -> AnnotateResult<LayoutGeometry> {
        let colors = motifs
            .iter()
            .map(|m| self.config.motif_color(m.color_index))
            .collect::<AnnotateResult<Vec<_>>>()?;

        let records = records
            .iter()
            .map(|record| self.layout_record(record, motifs, &colors))
            .collect::<AnnotateResult<Vec<_>>>()?;
        let legend = self.layout_legend(motifs, &colors);
        let title = title.map(|text| TextMark {
            x: self.config.title_x,
            y: self.config.title_y,
            text: text.to_string(),
            font_size: self.config.title_font_size,
            color: self.config.text_color,
        });
        let extent = self.extent(&records, &legend, title.as_ref());

        log::debug!(
            "Laid out {} records and {} legend rows ({}x{})",
            records.len(),
            legend.len(),
            extent.width,
            extent.height
        );

        Ok(LayoutGeometry {
            title,
            records,
            legend,
            extent,
        })
    }

    fn layout_record(
        &self,
        record: &SequenceRecord,
        motifs: &MotifSet,
        colors: &[Color],
    ) -> AnnotateResult<RecordGeometry> {
        let cfg = &self.config;
        let span = record
            .exon()
            .ok_or_else(|| AnnotateError::no_exon(&record.id))?;
        let matches = record
            .motif_matches()
            .ok_or_else(|| AnnotateError::not_annotated(&record.id))?;
        if matches.len() != motifs.len() {
            return Err(AnnotateError::not_annotated(&record.id));
        }

        let y = record.display_slot as f64 * cfg.vertical_spacing;

        let backbone = BoxMark {
            rect: Rect {
                x: cfg.left_margin,
                y,
                width: record.length() as f64,
                height: cfg.backbone_thickness,
            },
            stroke_width: cfg.backbone_stroke,
            color: cfg.text_color,
        };

        let exon = BoxMark {
            rect: Rect {
                x: cfg.left_margin + span.start as f64,
                y: y - cfg.exon_inset,
                width: span.length as f64,
                height: cfg.exon_height,
            },
            stroke_width: cfg.exon_stroke,
            color: cfg.text_color,
        };

        let motif_tracks = motifs
            .iter()
            .zip(matches)
            .zip(colors)
            .map(|((motif, offsets), &color)| MotifTrack {
                motif: motif.raw_text.clone(),
                color_index: motif.color_index,
                color,
                ticks: offsets
                    .iter()
                    .map(|&offset| TickMark {
                        offset,
                        x: cfg.left_margin + offset as f64,
                        y_top: y + cfg.tick_top,
                        y_bottom: y + cfg.tick_bottom,
                        stroke_width: motif.length() as f64,
                        color,
                    })
                    .collect(),
            })
            .collect();

        Ok(RecordGeometry {
            id: record.id.clone(),
            display_slot: record.display_slot,
            label: TextMark {
                x: cfg.left_margin,
                y: y - cfg.label_offset,
                text: record.label(),
                font_size: cfg.label_font_size,
                color: cfg.text_color,
            },
            backbone,
            exon: Some(exon),
            motif_tracks,
        })
    }

    fn layout_legend(&self, motifs: &MotifSet, colors: &[Color]) -> Vec<LegendRow> {
        let cfg = &self.config;
        let mut rows = Vec::with_capacity(motifs.len() + 2);
        let mut counter = 1usize;

        let row_y = |k: usize| k as f64 * cfg.legend_row_step;
        let swatch = |y: f64| Rect {
            x: cfg.legend_swatch_x,
            y,
            width: cfg.legend_swatch_size,
            height: cfg.legend_swatch_size,
        };
        let bar = |y: f64| Rect {
            x: cfg.legend_bar_x,
            y: y + cfg.legend_label_dy,
            width: cfg.legend_bar_width,
            height: cfg.legend_bar_height,
        };
        let label = |y: f64, text: &str| TextMark {
            x: cfg.legend_label_x,
            y: y + cfg.legend_label_dy,
            text: text.to_string(),
            font_size: cfg.legend_font_size,
            color: cfg.text_color,
        };

        for (motif, &color) in motifs.iter().zip(colors) {
            let y = row_y(counter);
            rows.push(LegendRow {
                kind: LegendKind::Motif {
                    color_index: motif.color_index,
                },
                color,
                swatch: Some(swatch(y)),
                bar: None,
                label: label(y, &motif.raw_text),
            });
            counter += 1;
        }

        let y = row_y(counter);
        rows.push(LegendRow {
            kind: LegendKind::Exon,
            color: cfg.text_color,
            swatch: Some(swatch(y)),
            bar: Some(bar(y)),
            label: label(y, "Exon"),
        });
        counter += 1;

        let y = row_y(counter);
        rows.push(LegendRow {
            kind: LegendKind::Intron,
            color: cfg.text_color,
            swatch: None,
            bar: Some(bar(y)),
            label: label(y, "Intron"),
        });

        rows
    }

    fn extent(
        &self,
        records: &[RecordGeometry],
        legend: &[LegendRow],
        title: Option<&TextMark>,
    ) -> Extent {
        let mut width: f64 = 0.0;
        let mut height: f64 = 0.0;
        let mut include = |x: f64, y: f64| {
            width = width.max(x);
            height = height.max(y);
        };

        for record in records {
            let half_stroke = record.backbone.stroke_width / 2.0;
            include(
                record.backbone.rect.right() + half_stroke,
                record.backbone.rect.bottom() + half_stroke,
            );
            for tick in record.motif_tracks.iter().flat_map(|t| &t.ticks) {
                include(tick.x + tick.stroke_width / 2.0, tick.y_bottom);
            }
        }
        for row in legend {
            for rect in row.swatch.iter().chain(row.bar.iter()) {
                include(rect.right(), rect.bottom());
            }
            include(row.label.x, row.label.y);
        }
        if let Some(title) = title {
            include(title.x, title.y);
        }

        Extent {
            width: width.ceil(),
            height: height.ceil(),
        }
    }
}
