use crate::error::{Result, SwaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A time-indexed table of named numeric columns.
///
/// Epochs are nanoseconds since the Unix epoch. Raw tables may contain
/// duplicate epochs (zero-delta steps); algorithms that need a strictly
/// increasing time base filter those out first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesTable {
    epochs_ns: Vec<i64>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl TimeSeriesTable {
    /// Build a table, checking every column against the epoch axis.
    pub fn new(epochs_ns: Vec<i64>, columns: BTreeMap<String, Vec<f64>>) -> Result<Self> {
        let expected = epochs_ns.len();
        for (name, values) in &columns {
            if values.len() != expected {
                return Err(SwaError::LengthMismatch {
                    column: name.clone(),
                    expected,
                    found: values.len(),
                });
            }
        }
        Ok(TimeSeriesTable { epochs_ns, columns })
    }

    pub fn epochs_ns(&self) -> &[i64] {
        &self.epochs_ns
    }

    /// Number of samples (rows).
    pub fn len(&self) -> usize {
        self.epochs_ns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs_ns.is_empty()
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

    pub fn columns(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.columns
    }
}
