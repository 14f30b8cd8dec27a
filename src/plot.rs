//! PNG rendering of the training samples.
//!
//! Draws every `(x, y)` sample as a point and, for synthetic data, the line
//! the samples were generated around as a dashed red line. No text is drawn,
//! so no font backend is needed.

use crate::dataset::{Dataset, TrueParams};
use crate::error::{GdError, Result};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

pub const PLOT_SIZE: (u32, u32) = (1000, 600);

const DASHES: usize = 40;

/// Writes a scatter plot of `dataset` to `path` as PNG, with the generating
/// line of `truth` overlaid when given.
///
/// # Errors
/// [`GdError::Plot`] if a sample is not finite or the image cannot be
/// rendered or written.
pub fn save_data_plot(
    dataset: &Dataset,
    truth: Option<&TrueParams>,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let x_range = padded_range(dataset.x())?;
    let line = truth.map(|t| dash_segments(t, &x_range, DASHES));
    let line_ys = line.iter().flatten().flat_map(|seg| [seg[0].1, seg[1].1]);
    let y_values: Vec<f64> = dataset.y().iter().copied().chain(line_ys).collect();
    let y_range = padded_range(&y_values)?;

    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .draw_series(
            dataset
                .x()
                .iter()
                .zip(dataset.y())
                .map(|(&x, &y)| Circle::new((x, y), 3, BLUE.mix(0.6).filled())),
        )
        .map_err(plot_err)?;

    if let Some(segments) = line {
        chart
            .draw_series(
                segments
                    .into_iter()
                    .map(|seg| PathElement::new(seg.to_vec(), RED.stroke_width(2))),
            )
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    log::debug!("plot of {} samples written to {}", dataset.len(), path.display());
    Ok(())
}

/// Every other piece of the true line over `x_range` cut into
/// `2 * n_dashes - 1` equal pieces.
fn dash_segments(truth: &TrueParams, x_range: &Range<f64>, n_dashes: usize) -> Vec<[(f64, f64); 2]> {
    let pieces = 2 * n_dashes - 1;
    let step = (x_range.end - x_range.start) / pieces as f64;
    let at = |x: f64| (x, truth.slope * x + truth.intercept);
    (0..n_dashes)
        .map(|i| {
            let x0 = x_range.start + step * (2 * i) as f64;
            [at(x0), at(x0 + step)]
        })
        .collect()
}

/// Min..max of `values` widened by 5% on each side, or by 1 when all values
/// are equal.
fn padded_range(values: &[f64]) -> Result<Range<f64>> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(GdError::Plot("cannot plot non-finite samples".into()));
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    Ok((lo - pad)..(hi + pad))
}

fn plot_err(e: impl std::fmt::Display) -> GdError {
    GdError::Plot(e.to_string())
}
