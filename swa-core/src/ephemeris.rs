use crate::error::{Result, SwaError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One spacecraft position sample in GSE coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitSample {
    /// Epoch in nanoseconds since the Unix epoch.
    pub epoch_ns: i64,
    /// Position in km, GSE frame (x toward the Sun).
    pub position_gse_km: [f64; 3],
    /// Distance from Earth's center in km, derived from the position.
    pub radial_km: f64,
}

impl OrbitSample {
    pub fn new(epoch_ns: i64, position_gse_km: [f64; 3]) -> Self {
        let [x, y, z] = position_gse_km;
        let radial_km = (x * x + y * y + z * z).sqrt();
        OrbitSample {
            epoch_ns,
            position_gse_km,
            radial_km,
        }
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.epoch_ns)
    }
}

/// Build a trajectory from parallel coordinate columns.
///
/// The columns must all have the same length as the epoch axis; a
/// mismatch is a structural error and aborts the whole construction.
pub fn from_columns(
    epochs_ns: &[i64],
    x_km: &[f64],
    y_km: &[f64],
    z_km: &[f64],
) -> Result<Vec<OrbitSample>> {
    let expected = epochs_ns.len();
    for (axis, found) in [
        ("x_gse_km", x_km.len()),
        ("y_gse_km", y_km.len()),
        ("z_gse_km", z_km.len()),
    ] {
        if found != expected {
            return Err(SwaError::LengthMismatch {
                column: axis.to_string(),
                expected,
                found,
            });
        }
    }
    Ok((0..expected)
        .map(|i| OrbitSample::new(epochs_ns[i], [x_km[i], y_km[i], z_km[i]]))
        .collect())
}

/// First sample of a trajectory that falls inside the model boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossingEvent {
    pub index: usize,
    pub epoch_ns: i64,
}

impl CrossingEvent {
    pub fn epoch(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.epoch_ns)
    }
}
