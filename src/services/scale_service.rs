use chrono::{Datelike, Days, Months, NaiveDate};

use crate::models::{AxisSpec, ChartGeometry, Tick, TimeSeriesPoint};
use crate::services::series_service;

/// Roughly how many date ticks the time axis should carry
pub const TIME_TICK_TARGET: usize = 5;

/// Continuous linear mapping from a value domain to a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Map a domain value to the range
    ///
    /// Endpoints map exactly. A zero-width domain maps to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        let t = (value - d0) / (d1 - d0);
        r0 * (1.0 - t) + r1 * t
    }
}

/// Day-resolution time axis over `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    pub start: NaiveDate,
    pub end: NaiveDate,
    linear: LinearScale,
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, width: f64) -> Self {
        Self {
            start,
            end,
            linear: LinearScale::new((day_number(start), day_number(end)), (0.0, width)),
        }
    }

    pub fn map(&self, date: NaiveDate) -> f64 {
        self.linear.map(day_number(date))
    }

    pub fn linear(&self) -> &LinearScale {
        &self.linear
    }
}

/// Both axis mappings for one series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScales {
    pub time: TimeScale,
    pub count: LinearScale,
    pub max_count: u64,
}

/// Count axis `[0, max(max_count, 1)] -> [chart_height, 0]`
pub fn count_scale(max_count: u64, geometry: &ChartGeometry) -> LinearScale {
    let max_count = max_count.max(1);
    LinearScale::new((0.0, max_count as f64), (geometry.chart_height(), 0.0))
}

/// Scales for a non-empty, date-ordered series
pub fn build_scales(series: &[TimeSeriesPoint], geometry: &ChartGeometry) -> Option<ChartScales> {
    let start = series.iter().map(|p| p.date).min()?;
    let end = series.iter().map(|p| p.date).max()?;
    let max_count = series_service::max_count(series);

    Some(ChartScales {
        time: TimeScale::new(start, end, geometry.chart_width()),
        count: count_scale(max_count, geometry),
        max_count,
    })
}

/// Calendar step between two date ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInterval {
    Days(u32),
    Months(u32),
    Years(u32),
}

/// Candidate intervals, finest first
const TIME_INTERVALS: &[TimeInterval] = &[
    TimeInterval::Days(1),
    TimeInterval::Days(2),
    TimeInterval::Days(7),
    TimeInterval::Days(14),
    TimeInterval::Months(1),
    TimeInterval::Months(3),
    TimeInterval::Months(6),
    TimeInterval::Years(1),
    TimeInterval::Years(2),
    TimeInterval::Years(5),
    TimeInterval::Years(10),
    TimeInterval::Years(50),
];

impl TimeInterval {
    /// First aligned date on or after `date`
    fn ceil(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeInterval::Days(n) => {
                let rem = date.num_days_from_ce().rem_euclid(n as i32) as u64;
                if rem == 0 {
                    Some(date)
                } else {
                    date.checked_add_days(Days::new(n as u64 - rem))
                }
            }
            TimeInterval::Months(n) => {
                let mut tick = date.with_day(1)?;
                if tick < date {
                    tick = tick.checked_add_months(Months::new(1))?;
                }
                while tick.month0() % n != 0 {
                    tick = tick.checked_add_months(Months::new(1))?;
                }
                Some(tick)
            }
            TimeInterval::Years(n) => {
                let mut year = date.year();
                if NaiveDate::from_ymd_opt(year, 1, 1)? < date {
                    year += 1;
                }
                let rem = year.rem_euclid(n as i32);
                if rem != 0 {
                    year += n as i32 - rem;
                }
                NaiveDate::from_ymd_opt(year, 1, 1)
            }
        }
    }

    fn advance(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeInterval::Days(n) => date.checked_add_days(Days::new(n as u64)),
            TimeInterval::Months(n) => date.checked_add_months(Months::new(n)),
            TimeInterval::Years(n) => date.checked_add_months(Months::new(n * 12)),
        }
    }

    /// Aligned dates in `[start, end]`, or `None` once there are more than `limit`
    fn ticks(self, start: NaiveDate, end: NaiveDate, limit: usize) -> Option<Vec<NaiveDate>> {
        let mut ticks = Vec::new();
        let mut next = self.ceil(start);
        while let Some(tick) = next {
            if tick > end {
                break;
            }
            if ticks.len() == limit {
                return None;
            }
            ticks.push(tick);
            next = self.advance(tick);
        }
        Some(ticks)
    }

    pub fn format(self, date: NaiveDate) -> String {
        match self {
            TimeInterval::Days(_) => date.format("%b %d").to_string(),
            TimeInterval::Months(_) if date.month() == 1 => date.format("%Y").to_string(),
            TimeInterval::Months(_) => date.format("%B").to_string(),
            TimeInterval::Years(_) => date.format("%Y").to_string(),
        }
    }
}

/// Pick the finest interval giving at most `target` ticks, with its ticks
pub fn plan_time_ticks(
    start: NaiveDate,
    end: NaiveDate,
    target: usize,
) -> (TimeInterval, Vec<NaiveDate>) {
    for &interval in TIME_INTERVALS {
        if let Some(ticks) = interval.ticks(start, end, target) {
            return (interval, ticks);
        }
    }
    (TimeInterval::Years(50), vec![start])
}

/// Time axis with calendar-aligned ticks
pub fn time_axis(scale: &TimeScale) -> AxisSpec {
    let (interval, dates) = plan_time_ticks(scale.start, scale.end, TIME_TICK_TARGET);
    let (domain_min, domain_max) = scale.linear().domain();

    AxisSpec {
        domain_min,
        domain_max,
        ticks: dates
            .into_iter()
            .map(|date| Tick {
                value: day_number(date),
                position: scale.map(date),
                label: interval.format(date),
            })
            .collect(),
    }
}
