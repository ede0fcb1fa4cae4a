//! Data models for the likes graph pipeline
//!
//! All values here are created per request and dropped once the SVG is rendered.

pub mod like;
pub mod chart;
pub mod theme;

// Re-export commonly used types for convenience
pub use like::{LikeEvent, RawPage, ItemRef};
pub use chart::{
    TimeSeriesPoint, ChartGeometry, AxisSpec, Tick, LegendSpec, Anchor, ChartLayout,
    ChartSpec,
};
pub use theme::Theme;
