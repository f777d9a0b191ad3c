use textplots::{Chart, Plot, Shape};

use crate::analysis::FrequencyTable;

pub const CHART_WIDTH: u32 = 160;
pub const CHART_HEIGHT: u32 = 40;

/// Bar heights for the histogram: one `(x, f_i)` point per class.
pub fn histogram_points(table: &FrequencyTable) -> Vec<(f32, f32)> {
    table
        .classes()
        .into_iter()
        .map(|(x, count)| (x as f32, count as f32))
        .collect()
}

/// Horizontal extent of the chart, padded by half a class on each side.
pub fn histogram_bounds(points: &[(f32, f32)]) -> (f32, f32) {
    let min = points.first().map_or(0.0, |p| p.0);
    let max = points.last().map_or(1.0, |p| p.0);

    let step = points
        .windows(2)
        .map(|w| w[1].0 - w[0].0)
        .fold(f32::INFINITY, f32::min);
    let pad = if step.is_finite() && step > 0.0 { step / 2.0 } else { 0.5 };

    (min - pad, max + pad)
}

/// Print a bar chart of absolute frequencies to stdout.
pub fn plot_histogram(table: &FrequencyTable) {
    let points = histogram_points(table);
    if points.is_empty() {
        return;
    }
    let (min_x, max_x) = histogram_bounds(&points);

    Chart::new(CHART_WIDTH, CHART_HEIGHT, min_x, max_x)
        .lineplot(&Shape::Bars(&points))
        .nice();
}
