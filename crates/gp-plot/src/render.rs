//! Figure ownership and rendering.

use std::path::Path;

use gp_query::Query;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, DrawingAreaErrorKind};
use plotters::prelude::*;
use tracing::{debug, info};

use crate::error::{PlotError, PlotResult, precondition};
use crate::figure::{Figure, RiverRequest};

const DEFAULT_SIZE: (u32, u32) = (1024, 768);

/// Holds at most one figure between `river_plot` and `save_plot`.
#[derive(Debug)]
pub struct RiverPlotter {
    figure: Option<Figure>,
    size: (u32, u32),
}

impl Default for RiverPlotter {
    fn default() -> Self {
        Self {
            figure: None,
            size: DEFAULT_SIZE,
        }
    }
}

impl RiverPlotter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    /// Build a river plot of `query`, replacing any current figure.
    ///
    /// On failure the previous figure is kept.
    pub fn river_plot(&mut self, query: &Query, request: &RiverRequest) -> PlotResult<&Figure> {
        let figure = Figure::build(query, request)?;
        debug!(title = %figure.title, bands = figure.bands.len(), "built river plot");
        Ok(self.figure.insert(figure))
    }

    pub fn clear_figure(&mut self) {
        self.figure = None;
    }

    /// Render the current figure; `.svg` paths get vector output, anything
    /// else a bitmap whose format follows the extension.
    pub fn save_plot(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let path = path.as_ref();
        let Some(figure) = &self.figure else {
            return Err(precondition("there is no figure to save; call river_plot first"));
        };
        if path.as_os_str().is_empty() {
            return Err(precondition("an output file name is required"));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        if is_svg {
            draw(SVGBackend::new(path, self.size).into_drawing_area(), figure)?;
        } else {
            draw(BitMapBackend::new(path, self.size).into_drawing_area(), figure)?;
        }
        info!(path = %path.display(), "saved river plot");
        Ok(())
    }
}

fn render_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> PlotError {
    PlotError::Render {
        message: e.to_string(),
    }
}

/// Y extent handed to the chart; a flat figure still gets a non-empty range.
fn y_extent(figure: &Figure) -> (f64, f64) {
    let (lo, hi) = figure.y_range;
    if hi > lo { (lo, hi) } else { (lo, lo + 1.0) }
}

fn draw<DB>(root: DrawingArea<DB, Shift>, figure: &Figure) -> PlotResult<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(render_error)?;

    let (x0, x1) = figure.x_range;
    let (y0, y1) = y_extent(figure);
    let mut chart = ChartBuilder::on(&root)
        .caption(&figure.title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0 as f64..x1.max(x0 + 1) as f64, y0..y1)
        .map_err(render_error)?;
    chart
        .configure_mesh()
        .x_desc(&figure.x_label)
        .y_desc(&figure.y_label)
        .draw()
        .map_err(render_error)?;

    for (i, band) in figure.bands.iter().enumerate() {
        let color = Palette99::pick(i).mix(0.9);
        // Upper edge left to right, then lower edge back.
        let outline: Vec<(f64, f64)> = figure
            .x
            .iter()
            .zip(&band.upper)
            .map(|(&t, &y)| (t as f64, y))
            .chain(
                figure
                    .x
                    .iter()
                    .zip(&band.lower)
                    .rev()
                    .map(|(&t, &y)| (t as f64, y)),
            )
            .collect();
        chart
            .draw_series(std::iter::once(Polygon::new(outline, color.filled())))
            .map_err(render_error)?
            .label(band.label.to_string())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    if !figure.bands.is_empty() {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_error)?;
    }
    root.present().map_err(render_error)?;
    Ok(())
}
