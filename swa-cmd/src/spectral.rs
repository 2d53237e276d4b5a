//! Spectral analysis command.

use anyhow::bail;
use log::info;
use std::fs;
use std::path::Path;
use swa_charts::psd_chart;
use swa_core::loader;
use swa_core::spectral::{estimate_sample_rate, fit_spectral_slope, periodogram};

/// Estimate the power spectral density of one column, fit the spectral
/// slope and render the chart.
///
/// When no sampling rate is given it is estimated from the median epoch
/// step of the table.
pub fn run_psd(
    table_csv: &str,
    column: &str,
    sample_rate: Option<f64>,
    out: &str,
) -> anyhow::Result<()> {
    let table = loader::load_table(table_csv)?;
    let samples = table.column(column)?;

    let sample_rate = match sample_rate {
        Some(rate) if rate > 0.0 => rate,
        Some(rate) => bail!("sample rate must be positive, got {}", rate),
        None => match estimate_sample_rate(table.epochs_ns()) {
            Some(rate) => {
                info!("estimated sample rate: {:.6} Hz", rate);
                rate
            }
            None => {
                bail!("cannot estimate a sample rate from the epoch axis, pass --sample-rate")
            }
        },
    };

    let spectrum = periodogram(samples, sample_rate);
    let fit = fit_spectral_slope(&spectrum)?;
    info!(
        "periodogram of '{}': {} bins up to {:.3} Hz",
        column,
        spectrum.power.len(),
        spectrum.frequencies_hz.last().copied().unwrap_or(0.0)
    );

    if let Some(parent) = Path::new(out).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    psd_chart::render_psd_chart(Path::new(out), &spectrum, &fit, column)?;
    info!("wrote {}", out);
    println!("Spectral slope of '{}': {:.2}", column, fit.slope);
    Ok(())
}
