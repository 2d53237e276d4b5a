use crate::error::Result;

/// Destination for rendered series; drawing backends live behind this seam.
pub trait SeriesSink {
    /// Render one fully materialized series. `label` identifies the series,
    /// `units` is the physical unit of `values`.
    fn render(&mut self, epochs_ns: &[i64], values: &[f64], label: &str, units: &str)
        -> Result<()>;
}
