use crate::models::{AxisSpec, Tick};
use crate::services::scale_service::LinearScale;

/// `(exclusive upper bound on max_count, step)`, checked top-down
const STEP_BANDS: &[(u64, u64)] = &[(100, 10), (1_000, 100)];
/// Step once max_count clears every band above
const LARGE_STEP: u64 = 1_000;

/// `(inclusive lower bound on max_count, offset)`, checked top-down
const Y_LABEL_OFFSET_BANDS: &[(u64, i32)] = &[(10_000, 2), (1_000, 8), (100, 12)];
const DEFAULT_Y_LABEL_OFFSET: i32 = 20;

/// How count tick labels are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickUnit {
    /// Plain integer
    Raw,
    /// Thousands with one decimal and a `k` suffix
    Thousands,
}

/// Step and values of the count axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountTicks {
    pub step: u64,
    pub unit: TickUnit,
    pub values: Vec<u64>,
}

/// Step size for the count axis
pub fn tick_step(max_count: u64) -> u64 {
    STEP_BANDS
        .iter()
        .find(|(bound, _)| max_count < *bound)
        .map(|(_, step)| *step)
        .unwrap_or(LARGE_STEP)
}

pub fn tick_unit(max_count: u64) -> TickUnit {
    if max_count >= 1_000 {
        TickUnit::Thousands
    } else {
        TickUnit::Raw
    }
}

/// Every multiple of the step from 0 through max_count
pub fn plan_count_ticks(max_count: u64) -> CountTicks {
    let step = tick_step(max_count);
    let values = (0..=max_count / step).map(|i| i * step).collect();

    CountTicks {
        step,
        unit: tick_unit(max_count),
        values,
    }
}

/// Label for a count tick; the origin is left blank
pub fn format_count_tick(value: u64, unit: TickUnit) -> String {
    if value == 0 {
        return String::new();
    }
    match unit {
        TickUnit::Raw => value.to_string(),
        TickUnit::Thousands => format!("{:.1}k", value as f64 / 1000.0),
    }
}

/// Horizontal offset of the rotated "Likes" title, wider labels push it left
pub fn y_label_offset(max_count: u64) -> i32 {
    Y_LABEL_OFFSET_BANDS
        .iter()
        .find(|(bound, _)| max_count >= *bound)
        .map(|(_, offset)| *offset)
        .unwrap_or(DEFAULT_Y_LABEL_OFFSET)
}

/// Count axis with its ticks positioned by `scale`
pub fn count_axis(scale: &LinearScale, max_count: u64) -> AxisSpec {
    let planned = plan_count_ticks(max_count);
    let (domain_min, domain_max) = scale.domain();

    AxisSpec {
        domain_min,
        domain_max,
        ticks: planned
            .values
            .iter()
            .map(|&value| Tick {
                value: value as f64,
                position: scale.map(value as f64),
                label: format_count_tick(value, planned.unit),
            })
            .collect(),
    }
}
