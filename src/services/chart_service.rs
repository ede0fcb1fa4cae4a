use plotters::prelude::{
    Color, FontStyle, FontTransform, IntoDrawingArea, IntoFont, PathElement, Rectangle,
    SVGBackend, Text,
};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::models::{ChartGeometry, ChartSpec, Theme, TimeSeriesPoint};
use crate::services::layout_service::{self, LegendMetrics};
use crate::services::{scale_service, tick_service};
use crate::utils::errors::RenderError;

const FONT: &str = "xkcd, sans-serif";
const CHART_TITLE: &str = "GameBanana Likes History";
const WATERMARK: &str = "gamebanana-likes";
const WATERMARK_CREDIT: &str = "inspired by star-history.com";
/// Interpolated points drawn per series segment
const CURVE_SAMPLES: usize = 8;

/// Geometry for a chart of `series`, or `None` when there is nothing to plot
pub fn build_chart_spec(
    series: Vec<TimeSeriesPoint>,
    title: &str,
    geometry: ChartGeometry,
) -> Option<ChartSpec> {
    let scales = scale_service::build_scales(&series, &geometry)?;

    let points = series
        .iter()
        .map(|p| (scales.time.map(p.date), scales.count.map(p.cumulative_count as f64)))
        .collect();

    let time_axis = scale_service::time_axis(&scales.time);
    let count_axis = tick_service::count_axis(&scales.count, scales.max_count);
    let layout = layout_service::build_layout(title, scales.max_count, &geometry, &LegendMetrics::default());

    debug!(
        "Chart spec: {} points, count domain {}..{}, count ticks {:?}, {} date ticks over {}..{}",
        series.len(),
        count_axis.domain_min,
        count_axis.domain_max,
        count_axis.tick_values(),
        time_axis.ticks.len(),
        time_axis.domain_min,
        time_axis.domain_max
    );

    Some(ChartSpec {
        series,
        points,
        time_axis,
        count_axis,
        layout,
        geometry,
    })
}

/// Monotone cubic interpolation along x of a polyline
///
/// Tangents follow Steffen's method so the curve never overshoots the data.
pub fn monotone_x(points: &[(f64, f64)], samples: usize) -> Vec<(f64, f64)> {
    let n = points.len();
    if n < 3 || samples == 0 {
        return points.to_vec();
    }

    let secants: Vec<f64> = points
        .windows(2)
        .map(|w| {
            let h = w[1].0 - w[0].0;
            if h == 0.0 { 0.0 } else { (w[1].1 - w[0].1) / h }
        })
        .collect();

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        let (s0, s1) = (secants[i - 1], secants[i]);
        if s0 * s1 <= 0.0 {
            continue;
        }
        let h0 = points[i].0 - points[i - 1].0;
        let h1 = points[i + 1].0 - points[i].0;
        let p = (s0 * h1 + s1 * h0) / (h0 + h1);
        tangents[i] = 2.0 * s0.signum() * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    }
    tangents[0] = (3.0 * secants[0] - tangents[1]) / 2.0;
    tangents[n - 1] = (3.0 * secants[n - 2] - tangents[n - 2]) / 2.0;

    let mut curve = Vec::with_capacity((n - 1) * samples + 1);
    curve.push(points[0]);
    for i in 0..n - 1 {
        let (x0, y0) = points[i];
        let (x1, y1) = points[i + 1];
        let dx = (x1 - x0) / 3.0;
        let c0 = (x0 + dx, y0 + dx * tangents[i]);
        let c1 = (x1 - dx, y1 - dx * tangents[i + 1]);

        for k in 1..=samples {
            let t = k as f64 / samples as f64;
            let u = 1.0 - t;
            let b0 = u * u * u;
            let b1 = 3.0 * u * u * t;
            let b2 = 3.0 * u * t * t;
            let b3 = t * t * t;
            curve.push((
                b0 * x0 + b1 * c0.0 + b2 * c1.0 + b3 * x1,
                b0 * y0 + b1 * c0.1 + b2 * c1.1 + b3 * y1,
            ));
        }
    }
    curve
}

fn px(x: f64, y: f64) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Render a chart spec as an SVG document
pub fn render_svg(spec: &ChartSpec, theme: Theme) -> Result<String, RenderError> {
    let palette = theme.palette();
    let geometry = &spec.geometry;
    let layout = &spec.layout;
    let legend = &layout.legend;
    let (ox, oy) = (geometry.margins.left, geometry.margins.top);
    let chart_width = geometry.chart_width();
    let chart_height = geometry.chart_height();

    let mut svg = String::new();

    {
        let root = SVGBackend::with_string(&mut svg, (geometry.width as u32, geometry.height as u32))
            .into_drawing_area();

        if let Some(background) = palette.background {
            root.fill(&background).map_err(draw_err)?;
        }

        root.draw(&Text::new(
            CHART_TITLE,
            px(layout.title.x, layout.title.y),
            (FONT, 20.0)
                .into_font()
                .style(FontStyle::Bold)
                .color(&palette.text)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))
        .map_err(draw_err)?;

        // Legend
        let legend_from = px(legend.x, legend.y);
        let legend_to = px(legend.x + legend.width, legend.y + legend.height);
        if let Some(background) = palette.background {
            root.draw(&Rectangle::new([legend_from, legend_to], background.mix(0.85).filled()))
                .map_err(draw_err)?;
        }
        root.draw(&Rectangle::new([legend_from, legend_to], palette.text.stroke_width(2)))
            .map_err(draw_err)?;
        root.draw(&Rectangle::new(
            [
                px(legend.swatch_x, legend.swatch_y),
                px(legend.swatch_x + legend.swatch_size, legend.swatch_y + legend.swatch_size),
            ],
            palette.line.filled(),
        ))
        .map_err(draw_err)?;
        root.draw(&Text::new(
            legend.label.as_str(),
            px(legend.text_x, legend.text_y),
            (FONT, 15.0)
                .into_font()
                .color(&palette.text)
                .pos(Pos::new(HPos::Left, VPos::Bottom)),
        ))
        .map_err(draw_err)?;

        // Count axis
        root.draw(&PathElement::new(
            vec![px(ox, oy), px(ox, oy + chart_height)],
            palette.text.stroke_width(2),
        ))
        .map_err(draw_err)?;
        for tick in &spec.count_axis.ticks {
            let y = oy + tick.position;
            root.draw(&PathElement::new(
                vec![px(ox - 1.0, y), px(ox, y)],
                palette.text.stroke_width(1),
            ))
            .map_err(draw_err)?;
            if !tick.label.is_empty() {
                root.draw(&Text::new(
                    tick.label.as_str(),
                    px(ox - 7.0, y),
                    (FONT, 16.0)
                        .into_font()
                        .color(&palette.text)
                        .pos(Pos::new(HPos::Right, VPos::Center)),
                ))
                .map_err(draw_err)?;
            }
        }

        // Time axis
        let axis_y = oy + chart_height;
        root.draw(&PathElement::new(
            vec![px(ox, axis_y), px(ox + chart_width, axis_y)],
            palette.text.stroke_width(2),
        ))
        .map_err(draw_err)?;
        for tick in &spec.time_axis.ticks {
            root.draw(&Text::new(
                tick.label.as_str(),
                px(ox + tick.position, axis_y + 6.0),
                (FONT, 16.0)
                    .into_font()
                    .color(&palette.text)
                    .pos(Pos::new(HPos::Center, VPos::Top)),
            ))
            .map_err(draw_err)?;
        }

        // Axis titles
        root.draw(&Text::new(
            "Likes",
            px(layout.y_label.x, layout.y_label.y),
            (FONT, 17.0)
                .into_font()
                .transform(FontTransform::Rotate270)
                .color(&palette.text)
                .pos(Pos::new(HPos::Right, VPos::Top)),
        ))
        .map_err(draw_err)?;
        root.draw(&Text::new(
            "Date",
            px(layout.x_label.x, layout.x_label.y),
            (FONT, 17.0)
                .into_font()
                .color(&palette.text)
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        ))
        .map_err(draw_err)?;

        // Series
        let curve: Vec<(i32, i32)> = monotone_x(&spec.points, CURVE_SAMPLES)
            .into_iter()
            .map(|(x, y)| px(ox + x, oy + y))
            .collect();
        root.draw(&PathElement::new(curve, palette.line.stroke_width(3)))
            .map_err(draw_err)?;

        // Watermark
        root.draw(&Text::new(
            WATERMARK,
            px(layout.watermark.x, layout.watermark.y),
            (FONT, 14.0)
                .into_font()
                .color(&palette.watermark)
                .pos(Pos::new(HPos::Right, VPos::Bottom)),
        ))
        .map_err(draw_err)?;
        root.draw(&Text::new(
            WATERMARK_CREDIT,
            px(layout.watermark_credit.x, layout.watermark_credit.y),
            (FONT, 11.0)
                .into_font()
                .color(&palette.watermark_credit)
                .pos(Pos::new(HPos::Right, VPos::Bottom)),
        ))
        .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    Ok(svg)
}
