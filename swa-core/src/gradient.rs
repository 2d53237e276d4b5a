use crate::error::{Result, SwaError};
use crate::render::SeriesSink;
use crate::timeseries::TimeSeriesTable;
use itertools::Itertools;
use log::warn;
use std::collections::BTreeMap;

/// Epochs are i64 nanoseconds; gradients are taken against seconds so the
/// outputs read as physical rates (nT/s for magnetometer data).
const NS_TO_SECONDS: f64 = 1e-9;

/// Per-column time-derivatives of a [`TimeSeriesTable`].
///
/// Carries the filtered epochs, or the original epochs with every value
/// undefined when the input had no valid time intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientResult {
    epochs_ns: Vec<i64>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl GradientResult {
    pub fn epochs_ns(&self) -> &[i64] {
        &self.epochs_ns
    }

    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .get(name)
            .map(|values| values.as_slice())
            .ok_or_else(|| SwaError::ColumnNotFound(name.to_string()))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|name| name.as_str())
    }
}

/// Indices of samples that follow a non-zero time step, plus one trailing
/// index to keep the final sample.
///
/// Returns an empty vector when every consecutive delta is zero (single
/// sample, empty input, or a fully duplicated time axis). That is a legal
/// degenerate state, not an error.
pub fn filter_valid_intervals(epochs_ns: &[i64]) -> Vec<usize> {
    let mut valid: Vec<usize> = epochs_ns
        .iter()
        .tuple_windows()
        .enumerate()
        .filter_map(|(i, (a, b))| if b - a != 0 { Some(i) } else { None })
        .collect();
    match valid.last().copied() {
        Some(last) => {
            valid.push(last + 1);
            valid
        }
        None => {
            warn!("no valid time intervals in {} samples", epochs_ns.len());
            Vec::new()
        }
    }
}

/// Compute the time-derivative of every column.
///
/// Samples on zero-delta time steps are dropped first; the derivative is
/// then taken on the surviving strictly increasing time base, in seconds.
/// If no valid intervals exist the result keeps the original epochs and
/// every column is all-NaN, so callers can tell degenerate input apart
/// from empty input.
pub fn compute_gradients(table: &TimeSeriesTable) -> GradientResult {
    let keep = filter_valid_intervals(table.epochs_ns());

    if keep.is_empty() {
        let columns = table
            .column_names()
            .map(|name| (name.to_string(), vec![f64::NAN; table.len()]))
            .collect();
        return GradientResult {
            epochs_ns: table.epochs_ns().to_vec(),
            columns,
        };
    }

    let epochs_ns: Vec<i64> = keep.iter().map(|&i| table.epochs_ns()[i]).collect();
    let time_s: Vec<f64> = epochs_ns
        .iter()
        .map(|&ns| ns as f64 * NS_TO_SECONDS)
        .collect();

    let mut columns = BTreeMap::new();
    for (name, values) in table.columns() {
        let filtered: Vec<f64> = keep.iter().map(|&i| values[i]).collect();
        columns.insert(name.clone(), gradient_1d(&filtered, &time_s));
    }

    GradientResult { epochs_ns, columns }
}

/// Finite-difference derivative of `f` with respect to `x`.
///
/// Second-order central differences in the interior (exact for quadratics
/// even on non-uniform grids), first-order one-sided differences at the
/// two ends. `x` must be strictly increasing.
fn gradient_1d(f: &[f64], x: &[f64]) -> Vec<f64> {
    let n = f.len();
    debug_assert_eq!(n, x.len());
    if n < 2 {
        return vec![f64::NAN; n];
    }
    let mut grad = vec![0.0; n];
    grad[0] = (f[1] - f[0]) / (x[1] - x[0]);
    grad[n - 1] = (f[n - 1] - f[n - 2]) / (x[n - 1] - x[n - 2]);
    for i in 1..n - 1 {
        let hs = x[i] - x[i - 1];
        let hd = x[i + 1] - x[i];
        grad[i] = (hs * hs * f[i + 1] + (hd * hd - hs * hs) * f[i] - hd * hd * f[i - 1])
            / (hs * hd * (hd + hs));
    }
    grad
}

/// Hand one gradient column to a rendering sink.
///
/// `units` is the unit of the source quantity; the rendered series is
/// labeled as a rate of change per second.
pub fn plot_gradient(
    result: &GradientResult,
    column: &str,
    units: &str,
    sink: &mut dyn SeriesSink,
) -> Result<()> {
    let values = result.column(column)?;
    let label = format!("{} gradient", column);
    let rate_units = format!("{}/s", units);
    sink.render(result.epochs_ns(), values, &label, &rate_units)
}

/// Render every column of a gradient result through the same sink.
pub fn plot_all_gradients(
    result: &GradientResult,
    units: &str,
    sink: &mut dyn SeriesSink,
) -> Result<()> {
    for column in result.column_names() {
        plot_gradient(result, column, units, sink)?;
    }
    Ok(())
}
