use crate::models::{LikeEvent, TimeSeriesPoint};

/// Build the cumulative likes series, one point per UTC day
///
/// Events are sorted by timestamp and counted with a 1-based running index.
/// Each day keeps the count reached by its last event, so intra-day growth
/// collapses into a single point.
pub fn build_time_series(events: &[LikeEvent]) -> Vec<TimeSeriesPoint> {
    let mut sorted: Vec<LikeEvent> = events.to_vec();
    sorted.sort_by_key(|e| e.timestamp_seconds);

    sorted
        .iter()
        .enumerate()
        .fold(Vec::new(), |mut series: Vec<TimeSeriesPoint>, (index, event)| {
            let cumulative_count = index as u64 + 1;
            let date = event.day();
            match series.last_mut() {
                Some(last) if last.date == date => last.cumulative_count = cumulative_count,
                _ => series.push(TimeSeriesPoint { date, cumulative_count }),
            }
            series
        })
}

/// Largest cumulative count in the series, floored at 1
pub fn max_count(series: &[TimeSeriesPoint]) -> u64 {
    series
        .iter()
        .map(|p| p.cumulative_count)
        .max()
        .unwrap_or(0)
        .max(1)
}
