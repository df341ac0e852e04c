use std::path::PathBuf;

use plotters::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::PricePoint;

/// Legend label of the price dataset
pub const DATASET_LABEL: &str = "Price (USD)";

/// Line color of the price dataset (blue)
pub const DATASET_COLOR: (u8, u8, u8) = (0, 0, 255);

/// Curve smoothing of the price line; 0 draws straight segments
pub const DATASET_TENSION: f64 = 0.2;

/// Interpolated points per segment when the line is smoothed
const SMOOTHING_STEPS: usize = 8;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

/// One line dataset of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub color: (u8, u8, u8),
    pub tension: f64,
}

/// The live chart: shared x labels plus its datasets
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub show_legend: bool,
}

impl LineChart {
    fn price_chart(labels: Vec<String>, data: Vec<f64>) -> Self {
        Self {
            labels,
            datasets: vec![Dataset {
                label: DATASET_LABEL.to_string(),
                data,
                color: DATASET_COLOR,
                tension: DATASET_TENSION,
            }],
            show_legend: true,
        }
    }
}

/// Draws a chart somewhere visible
pub trait ChartRenderer: Send {
    fn render(&mut self, chart: &LineChart) -> Result<(), ChartError>;
}

/// Owner of the one chart instance.
///
/// The chart is built on the first `update` and mutated in place afterwards.
pub struct ChartSurface {
    chart: Option<LineChart>,
    renderer: Box<dyn ChartRenderer>,
    instances_created: usize,
}

impl ChartSurface {
    pub fn new(renderer: Box<dyn ChartRenderer>) -> Self {
        Self {
            chart: None,
            renderer,
            instances_created: 0,
        }
    }

    /// Replace the displayed series and redraw. Accepts an empty series.
    pub fn update(&mut self, series: &[PricePoint]) {
        let labels: Vec<String> = series.iter().map(|p| p.label.clone()).collect();
        let data: Vec<f64> = series.iter().map(|p| p.value).collect();

        match self.chart.as_mut() {
            Some(chart) => {
                chart.labels = labels;
                if let Some(dataset) = chart.datasets.first_mut() {
                    dataset.data = data;
                }
            }
            None => {
                self.chart = Some(LineChart::price_chart(labels, data));
                self.instances_created += 1;
                debug!("Chart created");
            }
        }

        self.redraw();
    }

    fn redraw(&mut self) {
        if let Some(chart) = self.chart.as_ref() {
            // A failed draw leaves the old picture; the chart state is already updated
            if let Err(e) = self.renderer.render(chart) {
                warn!("{}", e);
            }
        }
    }

    pub fn chart(&self) -> Option<&LineChart> {
        self.chart.as_ref()
    }

    /// How many chart instances this surface has built (never more than one)
    pub fn instances_created(&self) -> usize {
        self.instances_created
    }
}

/// Approximate a curve through `points` with cubic Bézier segments whose
/// control points are pulled toward the neighbours by `tension`.
///
/// The result still passes through every input point.
pub fn smooth_path(points: &[(f64, f64)], tension: f64, steps: usize) -> Vec<(f64, f64)> {
    if points.len() < 3 || tension <= 0.0 || steps < 2 {
        return points.to_vec();
    }

    let last = points.len() - 1;
    let mut path = Vec::with_capacity(last * steps + 1);

    for i in 0..last {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(last)];

        let c1 = (p1.0 + (p2.0 - p0.0) * tension, p1.1 + (p2.1 - p0.1) * tension);
        let c2 = (p2.0 - (p3.0 - p1.0) * tension, p2.1 - (p3.1 - p1.1) * tension);

        for s in 0..steps {
            let t = s as f64 / steps as f64;
            let u = 1.0 - t;
            let b0 = u * u * u;
            let b1 = 3.0 * u * u * t;
            let b2 = 3.0 * u * t * t;
            let b3 = t * t * t;
            path.push((
                b0 * p1.0 + b1 * c1.0 + b2 * c2.0 + b3 * p2.0,
                b0 * p1.1 + b1 * c1.1 + b2 * c2.1 + b3 * p2.1,
            ));
        }
    }

    path.push(points[last]);
    path
}

/// Renders the chart to a PNG file with plotters
pub struct PlottersRenderer {
    output_path: PathBuf,
    width: u32,
    height: u32,
}

impl PlottersRenderer {
    pub fn new(output_path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            output_path: output_path.into(),
            width,
            height,
        }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&mut self, chart: &LineChart) -> Result<(), ChartError> {
        let draw_err = |e: &dyn std::fmt::Display| ChartError::Drawing(e.to_string());

        let backend = BitMapBackend::new(&self.output_path, (self.width, self.height));
        let root = backend.into_drawing_area();
        root.fill(&WHITE).map_err(|e| draw_err(&e))?;

        let values = chart.datasets.iter().flat_map(|d| d.data.iter().copied());
        let (min_price, max_price) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        let (y_min, y_max) = if min_price.is_finite() && max_price.is_finite() {
            // Add some padding to the price range
            let padding = (max_price - min_price).max(1e-8) * 0.1;
            ((min_price - padding).max(0.0), max_price + padding)
        } else {
            (0.0, 1.0)
        };

        let x_max = (chart.labels.len().saturating_sub(1)).max(1) as f64;

        let mut cartesian = ChartBuilder::on(&root)
            .caption(DATASET_LABEL, ("sans-serif", 32.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..x_max, y_min..y_max)
            .map_err(|e| draw_err(&e))?;

        let labels = &chart.labels;
        let x_label_formatter = |x: &f64| {
            let idx = x.round();
            if (x - idx).abs() < 1e-6 && idx >= 0.0 {
                labels.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        };

        cartesian
            .configure_mesh()
            .x_labels(labels.len().clamp(2, 8))
            .x_label_formatter(&x_label_formatter)
            .x_desc("Date")
            .y_desc("USD")
            .draw()
            .map_err(|e| draw_err(&e))?;

        for dataset in &chart.datasets {
            let color = RGBColor(dataset.color.0, dataset.color.1, dataset.color.2);
            let points: Vec<(f64, f64)> = dataset
                .data
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, *v))
                .collect();

            cartesian
                .draw_series(LineSeries::new(
                    smooth_path(&points, dataset.tension, SMOOTHING_STEPS),
                    color.stroke_width(2),
                ))
                .map_err(|e| draw_err(&e))?
                .label(dataset.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        if chart.show_legend {
            cartesian
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(|e| draw_err(&e))?;
        }

        root.present().map_err(|e| draw_err(&e))?;
        debug!("Chart written to {}", self.output_path.display());
        Ok(())
    }
}
