use crate::models::{Anchor, ChartGeometry, ChartLayout, LegendSpec};
use crate::services::tick_service;

/// Fixed text metrics the legend is sized from
///
/// Sizing counts UTF-16 code units, which approximates a fixed-width face.
/// Astral characters such as emoji count twice, so they get room for a wide glyph.
/// A proportional face can overflow or leave slack at the right edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendMetrics {
    pub glyph_width: f64,
    pub glyph_height: f64,
    pub swatch_width: f64,
    pub x_padding: f64,
    pub y_padding: f64,
    /// Offset of the box from the top-left corner of the plotting area
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for LegendMetrics {
    fn default() -> Self {
        Self {
            glyph_width: 7.0,
            glyph_height: 20.0,
            swatch_width: 8.0,
            x_padding: 7.0,
            y_padding: 6.0,
            offset_x: 8.0,
            offset_y: 5.0,
        }
    }
}

impl LegendMetrics {
    pub fn width_for(&self, title_len: usize) -> f64 {
        title_len as f64 * (self.glyph_width + 0.5) + self.swatch_width + self.x_padding * 3.0 + 6.0
    }

    pub fn height(&self) -> f64 {
        self.glyph_height + self.y_padding * 2.0
    }
}

/// Legend box for `title` inside the top-left corner of the plot
pub fn legend_for(title: &str, geometry: &ChartGeometry, metrics: &LegendMetrics) -> LegendSpec {
    let x = geometry.margins.left + metrics.offset_x;
    let y = geometry.margins.top + metrics.offset_y;

    LegendSpec {
        x,
        y,
        width: metrics.width_for(title.encode_utf16().count()),
        height: metrics.height(),
        label: title.to_string(),
        swatch_x: x + metrics.x_padding,
        swatch_y: y + 12.0,
        swatch_size: metrics.swatch_width,
        text_x: x + metrics.x_padding + metrics.swatch_width + 6.0,
        text_y: y + 12.0 + 8.0,
    }
}

/// Positions of every text block outside the plotting area
pub fn build_layout(
    title: &str,
    max_count: u64,
    geometry: &ChartGeometry,
    metrics: &LegendMetrics,
) -> ChartLayout {
    let margins = &geometry.margins;
    let plot_right = margins.left + geometry.chart_width() - 5.0;
    let plot_bottom = margins.top + geometry.chart_height();
    let y_offset = tick_service::y_label_offset(max_count) as f64;

    ChartLayout {
        legend: legend_for(title, geometry, metrics),
        title: Anchor { x: geometry.width / 2.0, y: 30.0 },
        x_label: Anchor { x: geometry.width / 2.0, y: geometry.height - 10.0 },
        // Rotated title, anchored at its end
        y_label: Anchor { x: y_offset, y: geometry.height / 2.0 - 60.0 },
        watermark: Anchor { x: plot_right, y: plot_bottom + 35.0 },
        watermark_credit: Anchor { x: plot_right, y: plot_bottom + 50.0 },
    }
}
