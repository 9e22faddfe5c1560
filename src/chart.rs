//! Heart rate and speed chart with the two compared sections shaded
//!
//! Rendering needs the `charts` feature. Without it [`render_chart`] fails
//! with [`AnalyzerError::Chart`] and callers carry on with the numbers.

use std::path::Path;

use crate::error::{AnalyzerError, Result};
use crate::preview::PreviewData;
use crate::section::TimeRange;

/// Whether this build can draw charts
pub fn charts_available() -> bool {
    cfg!(feature = "charts")
}

/// Draw the preview series to `path`; `.svg` selects SVG output, anything else PNG
pub fn render_chart(
    preview: &PreviewData,
    range1: &TimeRange,
    range2: &TimeRange,
    path: &Path,
    size: (u32, u32),
) -> Result<()> {
    if preview.is_empty() {
        return Err(AnalyzerError::Chart("nothing to plot".to_string()));
    }
    let spans = [range1.offsets()?, range2.offsets()?];
    render_spans(preview, &spans, path, size)
}

/// Split the heart rate series at gaps so lines are not drawn across them
pub fn heart_rate_runs(preview: &PreviewData) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for (t, hr) in preview.timestamps.iter().zip(&preview.heart_rate) {
        match hr {
            Some(value) => current.push((*t, *value)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

#[cfg(not(feature = "charts"))]
fn render_spans(
    _preview: &PreviewData,
    _spans: &[(f64, f64); 2],
    _path: &Path,
    _size: (u32, u32),
) -> Result<()> {
    Err(AnalyzerError::Chart(
        "this build has no chart support (enable the `charts` feature)".to_string(),
    ))
}

#[cfg(feature = "charts")]
fn render_spans(
    preview: &PreviewData,
    spans: &[(f64, f64); 2],
    path: &Path,
    size: (u32, u32),
) -> Result<()> {
    use plotters::prelude::*;

    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    let result = if is_svg {
        draw::draw_chart(SVGBackend::new(path, size).into_drawing_area(), preview, spans)
            .map_err(|e| e.to_string())
    } else {
        draw::draw_chart(BitMapBackend::new(path, size).into_drawing_area(), preview, spans)
            .map_err(|e| e.to_string())
    };

    result.map_err(AnalyzerError::Chart)?;
    tracing::info!(path = %path.display(), "Chart written");
    Ok(())
}

#[cfg(feature = "charts")]
mod draw {
    use plotters::coord::Shift;
    use plotters::prelude::*;

    use super::heart_rate_runs;
    use crate::preview::PreviewData;

    const SECTION_COLORS: [RGBColor; 2] = [RGBColor(173, 216, 230), RGBColor(144, 238, 144)];

    pub(super) fn draw_chart<DB: DrawingBackend>(
        root: DrawingArea<DB, Shift>,
        preview: &PreviewData,
        spans: &[(f64, f64); 2],
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let x_max = preview.total_time.max(1.0);
        let hr_max = preview.max_heart_rate().unwrap_or(0.0).max(1.0) * 1.1;
        let speed_max = preview.max_speed().max(1.0) * 1.1;

        let mut chart = ChartBuilder::on(&root)
            .caption("Heart Rate and Speed Analysis", ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .right_y_label_area_size(60)
            .build_cartesian_2d(0.0..x_max, 0.0..hr_max)?
            .set_secondary_coord(0.0..x_max, 0.0..speed_max);

        chart
            .configure_mesh()
            .x_desc("Time (seconds)")
            .y_desc("Heart Rate (BPM)")
            .draw()?;
        chart
            .configure_secondary_axes()
            .y_desc("Speed (km/h)")
            .draw()?;

        for ((start, end), color) in spans.iter().zip(SECTION_COLORS) {
            chart.draw_series(std::iter::once(Rectangle::new(
                [(start.max(0.0), 0.0), (end.min(x_max), hr_max)],
                color.mix(0.2).filled(),
            )))?;
        }

        let mut labelled = false;
        for run in heart_rate_runs(preview) {
            let series = chart.draw_series(LineSeries::new(run, &BLUE))?;
            if !labelled {
                series
                    .label("Heart Rate")
                    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
                labelled = true;
            }
        }

        chart
            .draw_secondary_series(LineSeries::new(
                preview
                    .timestamps
                    .iter()
                    .copied()
                    .zip(preview.speed.iter().copied()),
                &RED,
            ))?
            .label("Speed")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;

        root.present()?;
        Ok(())
    }
}
