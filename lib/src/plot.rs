//! SVG charts of a training set and its fitted line.
//!
//! The line is sampled with [`LinearModel::line`], so the chart shows exactly
//! what the predictor computes.

use crate::dataset::Dataset;
use crate::error::{RegressionError, Result};
use crate::model::{Fitted, InferenceModel, LinearModel};
use log::info;
use plotters::prelude::*;
use std::path::Path;

const LINE_POINTS: usize = 100;

/// Chart layout.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    pub caption: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            caption: "Price vs mileage".to_string(),
        }
    }
}

fn plot_error<E: std::fmt::Display>(e: E) -> RegressionError {
    RegressionError::Plot(e.to_string())
}

/// Axis bounds covering the data, the sampled line and the highlight,
/// padded by 5% so nothing sits on the frame.
fn bounds(points: impl Iterator<Item = (f64, f64)>) -> ((f64, f64), (f64, f64)) {
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in points.filter(|(x, y)| x.is_finite() && y.is_finite()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    (pad(x_min, x_max), pad(y_min, y_max))
}

fn pad(lo: f64, hi: f64) -> (f64, f64) {
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    let margin = if hi > lo { (hi - lo) * 0.05 } else { lo.abs().max(1.0) * 0.05 };
    (lo - margin, hi + margin)
}

/// Draws the observations, the regression line over the observed mileage
/// range and, when given, the estimate at `highlight` into an SVG file.
pub fn render_svg<P: AsRef<Path>>(
    path: P,
    dataset: &Dataset,
    model: &LinearModel<Fitted>,
    highlight: Option<f64>,
    options: &PlotOptions,
) -> Result<()> {
    let path = path.as_ref();

    let mut x_lo = dataset.min_mileage().min(0.0);
    let mut x_hi = dataset.max_mileage();
    if let Some(m) = highlight {
        x_lo = x_lo.min(m);
        x_hi = x_hi.max(m);
    }
    let line = model.line(x_lo, x_hi, LINE_POINTS);
    let marker = highlight.map(|m| (m, model.predict(&m)));

    let ((x_min, x_max), (y_min, y_max)) = bounds(
        dataset
            .iter()
            .map(|o| (o.mileage, o.price))
            .chain(line.iter().copied())
            .chain(marker),
    );

    let root = SVGBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.caption, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Mileage (km)")
        .y_desc("Price")
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(
            dataset
                .iter()
                .map(|o| Circle::new((o.mileage, o.price), 4, BLUE.filled())),
        )
        .map_err(plot_error)?
        .label("observations")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE.filled()));

    chart
        .draw_series(LineSeries::new(line, RED.stroke_width(2)))
        .map_err(plot_error)?
        .label(format!(
            "price = {:.2} + {:.6} × km",
            model.intercept(),
            model.slope()
        ))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    if let Some(point) = marker {
        chart
            .draw_series(std::iter::once(Circle::new(point, 7, GREEN.filled())))
            .map_err(plot_error)?
            .label(format!("estimate at {} km: {:.2}", point.0, point.1))
            .legend(|(x, y)| Circle::new((x + 10, y), 5, GREEN.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    info!("chart written to {}", path.display());
    Ok(())
}
