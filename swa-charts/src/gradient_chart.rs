use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use log::warn;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use swa_core::error::SwaError;
use swa_core::render::SeriesSink;

const CHART_SIZE: (u32, u32) = (800, 600);

/// Renders every series handed to it as a PNG line chart in one directory.
pub struct GradientChart {
    out_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl GradientChart {
    pub fn new<P: Into<PathBuf>>(out_dir: P) -> Self {
        GradientChart {
            out_dir: out_dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths of the files rendered so far, in render order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl SeriesSink for GradientChart {
    fn render(
        &mut self,
        epochs_ns: &[i64],
        values: &[f64],
        label: &str,
        units: &str,
    ) -> swa_core::error::Result<()> {
        let path = self.out_dir.join(format!("{}.png", file_stem(label)));
        draw_series_chart(&path, epochs_ns, values, label, units)
            .map_err(|e| SwaError::Render(format!("{}: {}", path.display(), e)))?;
        self.written.push(path);
        Ok(())
    }
}

fn draw_series_chart(
    path: &Path,
    epochs_ns: &[i64],
    values: &[f64],
    label: &str,
    units: &str,
) -> Result<()> {
    let points: Vec<(DateTime<Utc>, f64)> = epochs_ns
        .iter()
        .zip(values)
        .filter(|&(_, v)| v.is_finite())
        .map(|(&ns, &v)| (DateTime::from_timestamp_nanos(ns), v))
        .collect();
    if points.is_empty() {
        warn!("series '{}' has no finite values, rendering an empty frame", label);
    }

    let (start, end) = padded_time_range(epochs_ns);
    let ranged_time: RangedDateTime<DateTime<Utc>> = (start..end).into();
    let (y_min, y_max) = padded_value_range(values);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20i32)
        .caption(label, ("sans-serif", 24))
        .x_label_area_size(40u32)
        .y_label_area_size(60u32)
        .build_cartesian_2d(ranged_time, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_labels(6_usize)
        .x_label_formatter(&|stamp| stamp.format("%H:%M:%S").to_string())
        .x_desc("time (UTC)")
        .y_desc(units)
        .draw()?;

    chart
        .draw_series(LineSeries::new(points, RED))?
        .label(label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn file_stem(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn padded_time_range(epochs_ns: &[i64]) -> (DateTime<Utc>, DateTime<Utc>) {
    let first = epochs_ns.first().copied().unwrap_or(0);
    let last = epochs_ns.last().copied().unwrap_or(0);
    let start = DateTime::from_timestamp_nanos(first);
    let mut end = DateTime::from_timestamp_nanos(last);
    // a zero-width time axis cannot be drawn
    if end <= start {
        end = start + Duration::seconds(1);
    }
    (start, end)
}

fn padded_value_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let margin = (max - min) * 0.05;
    (min - margin, max + margin)
}

#[cfg(test)]
mod test {
    use super::{file_stem, padded_time_range, padded_value_range};

    #[test]
    fn test_file_stem_is_filesystem_safe() {
        assert_eq!(file_stem("Bx gradient"), "bx_gradient");
        assert_eq!(file_stem("n/cc (total)"), "n_cc__total_");
    }

    #[test]
    fn test_padded_value_range() {
        assert_eq!(padded_value_range(&[]), (0.0, 1.0));
        assert_eq!(padded_value_range(&[f64::NAN]), (0.0, 1.0));
        assert_eq!(padded_value_range(&[2.0, 2.0]), (1.0, 3.0));
        let (min, max) = padded_value_range(&[0.0, 10.0, f64::NAN]);
        assert!((min + 0.5).abs() < 1e-12);
        assert!((max - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_padded_time_range_never_collapses() {
        let (start, end) = padded_time_range(&[5_000_000_000, 5_000_000_000]);
        assert!(end > start);
        let (start, end) = padded_time_range(&[]);
        assert!(end > start);
    }
}
