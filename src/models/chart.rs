//! Chart generation models

use chrono::NaiveDate;

/// One point of the cumulative likes series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub cumulative_count: u64,
}

/// Space reserved around the plotting area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Fixed canvas size and margins of a render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
}

impl ChartGeometry {
    /// Width of the plotting area
    pub fn chart_width(&self) -> f64 {
        self.width - self.margins.left - self.margins.right
    }

    /// Height of the plotting area
    pub fn chart_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }
}

impl Default for ChartGeometry {
    /// 800x533 (2:3) canvas
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 533.0,
            margins: Margins {
                top: 60.0,
                right: 30.0,
                bottom: 50.0,
                left: 70.0,
            },
        }
    }
}

/// A labeled reference value on an axis
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    /// Pixel offset inside the plotting area
    pub position: f64,
    pub label: String,
}

/// Domain and formatted ticks of one axis
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub domain_min: f64,
    pub domain_max: f64,
    pub ticks: Vec<Tick>,
}

impl AxisSpec {
    pub fn tick_values(&self) -> Vec<f64> {
        self.ticks.iter().map(|t| t.value).collect()
    }
}

/// Legend box around the color swatch and the item title
#[derive(Debug, Clone, PartialEq)]
pub struct LegendSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub swatch_x: f64,
    pub swatch_y: f64,
    pub swatch_size: f64,
    pub text_x: f64,
    pub text_y: f64,
}

/// Absolute canvas position of a piece of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

/// Everything positioned outside the plotting area
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub legend: LegendSpec,
    pub title: Anchor,
    pub x_label: Anchor,
    pub y_label: Anchor,
    pub watermark: Anchor,
    pub watermark_credit: Anchor,
}

/// Input handed to the renderer
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub series: Vec<TimeSeriesPoint>,
    /// Series in plotting-area pixels
    pub points: Vec<(f64, f64)>,
    pub time_axis: AxisSpec,
    pub count_axis: AxisSpec,
    pub layout: ChartLayout,
    pub geometry: ChartGeometry,
}
