use anyhow::{bail, Result};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::Path;
use swa_core::spectral::{PowerSpectrum, SpectralFit};

const CHART_SIZE: (u32, u32) = (800, 600);

/// Periodogram chart with the fitted power law overlaid as a dashed line.
///
/// Density is drawn on a logarithmic axis against linear frequency.
pub fn render_psd_chart(
    path: &Path,
    spectrum: &PowerSpectrum,
    fit: &SpectralFit,
    column: &str,
) -> Result<()> {
    let points: Vec<(f64, f64)> = spectrum
        .frequencies_hz
        .iter()
        .zip(&spectrum.power)
        .filter(|&(&f, &p)| p > 0.0 && p.is_finite() && f.is_finite())
        .map(|(&f, &p)| (f, p))
        .collect();
    if points.is_empty() {
        bail!("spectrum of '{}' has no positive density to draw", column);
    }

    let f_max = points.iter().map(|&(f, _)| f).fold(0.0, f64::max);
    let mut p_min = f64::INFINITY;
    let mut p_max = f64::NEG_INFINITY;
    for &(_, p) in &points {
        p_min = p_min.min(p);
        p_max = p_max.max(p);
    }

    let fit_line: Vec<(f64, f64)> = points
        .iter()
        .filter(|&&(f, _)| f > 0.0)
        .map(|&(f, _)| (f, fit.evaluate(f)))
        .collect();

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20i32)
        .caption(
            format!("{} power spectral density", column),
            ("sans-serif", 24),
        )
        .x_label_area_size(40u32)
        .y_label_area_size(60u32)
        .build_cartesian_2d(0.0..f_max, (p_min / 10.0..p_max * 10.0).log_scale())?;
    chart
        .configure_mesh()
        .x_desc("frequency [Hz]")
        .y_desc("PSD")
        .draw()?;

    chart
        .draw_series(LineSeries::new(points, BLUE))?
        .label(column)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(DashedLineSeries::new(fit_line, 6, 4, RED.stroke_width(1)))?
        .label(format!("Slope = {:.2}", fit.slope))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
