use crate::ephemeris::{CrossingEvent, OrbitSample};
use crate::error::{Result, SwaError};
use crate::geometry::EARTH_RADIUS_KM;
use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Location and shape of one polar-cusp indentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuspParams {
    /// Depression amplitude in km, negative for an indentation.
    pub c: f64,
    /// Decay rate over angular distance from the cusp center.
    pub d: f64,
    /// Exponent applied to the angular distance.
    pub e: f64,
    /// Polar angle of the cusp center.
    pub theta: f64,
    /// Azimuthal angle of the cusp center.
    pub phi: f64,
}

/// Coefficients of the empirical magnetopause surface.
///
/// The defaults carry the published model constants; alternative parameter
/// sets can be built literally for studies of other boundary shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnetopauseParams {
    /// Subsolar standoff scale in km.
    pub r0_km: f64,
    /// Tail flaring strength.
    pub m: f64,
    /// Azimuthal flaring coefficients.
    pub beta: [f64; 4],
    pub cusp_north: CuspParams,
    pub cusp_south: CuspParams,
}

impl Default for MagnetopauseParams {
    fn default() -> Self {
        MagnetopauseParams {
            r0_km: 10.8 * EARTH_RADIUS_KM,
            m: 0.1,
            beta: [-1.03, -0.07, -0.02, 0.09],
            cusp_north: CuspParams {
                c: -6.0,
                d: -10.0,
                e: 1.0,
                theta: 0.64,
                phi: PI,
            },
            cusp_south: CuspParams {
                c: -7.0,
                d: -6.0,
                e: 1.0,
                theta: 1.25,
                phi: PI,
            },
        }
    }
}

/// Empirical magnetopause boundary model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MagnetopauseModel {
    pub params: MagnetopauseParams,
}

/// Polar and azimuthal angle of a position vector.
///
/// The polar angle is measured from the +z axis, the azimuthal angle from
/// the +x axis within the xy plane. Positions with zero or non-finite
/// radius have no direction and are rejected.
pub fn angles_from_position(position_km: [f64; 3]) -> Result<(f64, f64)> {
    let [x, y, z] = position_km;
    let r = (x * x + y * y + z * z).sqrt();
    if !r.is_finite() {
        return Err(SwaError::UndefinedAngle(
            "a non-finite position has no direction".to_string(),
        ));
    }
    if r == 0.0 {
        return Err(SwaError::UndefinedAngle(
            "the coordinate origin has no direction".to_string(),
        ));
    }
    Ok(((z / r).acos(), y.atan2(x)))
}

fn sample_angles(sample: &OrbitSample, index: usize) -> Result<(f64, f64)> {
    if !sample.radial_km.is_finite() {
        return Err(SwaError::UndefinedAngle(format!(
            "sample {} has a non-finite position",
            index
        )));
    }
    if sample.radial_km == 0.0 {
        return Err(SwaError::UndefinedAngle(format!(
            "sample {} sits at the coordinate origin",
            index
        )));
    }
    angles_from_position(sample.position_gse_km)
}

// angular distance to the cusp center by the spherical law of cosines,
// with the acos argument clamped against float rounding
fn cusp_depression(cusp: &CuspParams, theta: f64, phi: f64) -> f64 {
    let cos_psi =
        cusp.theta.cos() * theta.cos() + cusp.theta.sin() * theta.sin() * (phi - cusp.phi).cos();
    let psi = cos_psi.clamp(-1.0, 1.0).acos();
    cusp.c * (cusp.d * psi.powf(cusp.e)).exp()
}

impl MagnetopauseModel {
    pub fn new(params: MagnetopauseParams) -> Self {
        MagnetopauseModel { params }
    }

    /// Model boundary distance in km toward `(theta, phi)`.
    pub fn boundary_radius(&self, theta: f64, phi: f64) -> f64 {
        let p = &self.params;
        let depression = cusp_depression(&p.cusp_north, theta, phi)
            + cusp_depression(&p.cusp_south, theta, phi);
        let flaring = p.beta[0]
            + p.beta[1] * phi.cos()
            + p.beta[2] * phi.sin()
            + p.beta[3] * phi.sin().powi(2);
        let flaring = flaring.clamp(-2.0, 2.0);
        let base = (theta / 2.0).cos() + p.m * (2.0 * theta).sin() * (1.0 - (-theta).exp());
        p.r0_km * base.powf(flaring) + depression
    }

    /// Mark every sample of a trajectory as inside (`true`) or outside the
    /// boundary.
    ///
    /// Samples with zero or non-finite radial distance have no defined
    /// angular position and fail the whole classification.
    pub fn classify_samples(&self, samples: &[OrbitSample]) -> Result<Vec<bool>> {
        let mut inside = Vec::with_capacity(samples.len());
        for (index, sample) in samples.iter().enumerate() {
            let (theta, phi) = sample_angles(sample, index)?;
            inside.push(sample.radial_km < self.boundary_radius(theta, phi));
        }
        Ok(inside)
    }

    /// Earliest sample of the trajectory that falls inside the boundary.
    ///
    /// Trajectories of fewer than two samples carry no crossing information
    /// and yield `Ok(None)`.
    pub fn first_crossing(&self, samples: &[OrbitSample]) -> Result<Option<CrossingEvent>> {
        if samples.len() < 2 {
            debug!(
                "trajectory of {} samples is too short for crossing detection",
                samples.len()
            );
            return Ok(None);
        }
        for (index, sample) in samples.iter().enumerate() {
            let (theta, phi) = sample_angles(sample, index)?;
            if sample.radial_km < self.boundary_radius(theta, phi) {
                return Ok(Some(CrossingEvent {
                    index,
                    epoch_ns: sample.epoch_ns,
                }));
            }
        }
        Ok(None)
    }

    /// Boundary radii over the outer product of `theta` and `phi`, clamped
    /// into the plotting range.
    ///
    /// Non-finite evaluations collapse to the lower clamp bound so a mesh
    /// built from the grid never carries NaN vertices.
    pub fn boundary_surface_grid(&self, theta: &[f64], phi: &[f64]) -> Vec<Vec<f64>> {
        let limit = 50.0 * EARTH_RADIUS_KM;
        theta
            .iter()
            .map(|&th| {
                phi.iter()
                    .map(|&ph| {
                        let r = self.boundary_radius(th, ph);
                        if r.is_nan() {
                            -limit
                        } else {
                            r.clamp(-limit, limit)
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::{angles_from_position, CuspParams, MagnetopauseModel, MagnetopauseParams};
    use crate::ephemeris::OrbitSample;
    use crate::error::SwaError;
    use crate::geometry::{linspace, EARTH_RADIUS_KM};
    use std::f64::consts::PI;

    fn constant_radius_params(r0_km: f64) -> MagnetopauseParams {
        let flat_cusp = CuspParams {
            c: 0.0,
            d: -1.0,
            e: 1.0,
            theta: 0.64,
            phi: PI,
        };
        MagnetopauseParams {
            r0_km,
            m: 0.0,
            beta: [0.0; 4],
            cusp_north: flat_cusp,
            cusp_south: flat_cusp,
        }
    }

    #[test]
    fn test_default_params_match_published_constants() {
        let params = MagnetopauseParams::default();
        assert!((params.r0_km - 68806.8).abs() < 1e-9);
        assert_eq!(params.m, 0.1);
        assert_eq!(params.beta, [-1.03, -0.07, -0.02, 0.09]);
        assert_eq!(params.cusp_north.theta, 0.64);
        assert_eq!(params.cusp_south.theta, 1.25);
        assert_eq!(params.cusp_north.phi, PI);
    }

    #[test]
    fn test_angles_from_position() {
        let (theta, phi) = angles_from_position([1.0, 0.0, 0.0]).unwrap();
        assert!((theta - PI / 2.0).abs() < 1e-12);
        assert!(phi.abs() < 1e-12);

        let (theta, _) = angles_from_position([0.0, 0.0, 5.0]).unwrap();
        assert!(theta.abs() < 1e-12);

        let (_, phi) = angles_from_position([0.0, -2.0, 0.0]).unwrap();
        assert!((phi + PI / 2.0).abs() < 1e-12);

        assert!(matches!(
            angles_from_position([0.0, 0.0, 0.0]),
            Err(SwaError::UndefinedAngle(_))
        ));
        assert!(matches!(
            angles_from_position([f64::NAN, 2.0, 0.0]),
            Err(SwaError::UndefinedAngle(_))
        ));
        assert!(matches!(
            angles_from_position([f64::INFINITY, 0.0, 0.0]),
            Err(SwaError::UndefinedAngle(_))
        ));
    }

    #[test]
    fn test_boundary_radius_reference_values() {
        let model = MagnetopauseModel::default();
        // subsolar point
        assert!((model.boundary_radius(PI / 2.0, 0.0) - 100739.05166347753).abs() < 1e-5);
        // anti-sunward equator
        assert!((model.boundary_radius(PI / 2.0, PI) - 95966.8266005904).abs() < 1e-5);
        // dusk equator
        assert!((model.boundary_radius(PI / 2.0, PI / 2.0) - 95967.84793603825).abs() < 1e-5);
        // mid-latitude
        assert!((model.boundary_radius(1.0, 0.3) - 74055.84572737424).abs() < 1e-5);
        // north cusp center
        assert!((model.boundary_radius(0.64, PI) - 69164.44949258918).abs() < 1e-4);
    }

    #[test]
    fn test_boundary_radius_is_deterministic() {
        let model = MagnetopauseModel::default();
        for theta in [0.0, 0.64, 1.0, PI / 2.0] {
            for phi in [0.0, 0.3, PI] {
                let first = model.boundary_radius(theta, phi);
                let second = model.boundary_radius(theta, phi);
                assert_eq!(first.to_bits(), second.to_bits());
            }
        }
    }

    #[test]
    fn test_boundary_is_azimuth_independent_at_the_pole() {
        let model = MagnetopauseModel::default();
        let at_noon = model.boundary_radius(0.0, 1.0);
        let at_dusk = model.boundary_radius(0.0, 2.5);
        assert!((at_noon - 68806.78615906577).abs() < 1e-5);
        assert!((at_noon - at_dusk).abs() < 1e-9);
    }

    #[test]
    fn test_constant_radius_parameterization() {
        let model = MagnetopauseModel::new(constant_radius_params(10_000.0));
        for theta in [0.1, 0.8, PI / 2.0, 2.4] {
            for phi in [0.0, 1.0, PI, 5.0] {
                assert!((model.boundary_radius(theta, phi) - 10_000.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_classify_samples_against_default_boundary() {
        let model = MagnetopauseModel::default();
        let samples = vec![
            OrbitSample::new(0, [95_000.0, 0.0, 0.0]),
            OrbitSample::new(1, [105_000.0, 0.0, 0.0]),
            OrbitSample::new(2, [60_000.0, 40_000.0, -20_000.0]),
        ];
        let inside = model.classify_samples(&samples).unwrap();
        assert_eq!(inside, vec![true, false, true]);
    }

    #[test]
    fn test_classify_rejects_origin_sample() {
        let model = MagnetopauseModel::default();
        let samples = vec![
            OrbitSample::new(0, [95_000.0, 0.0, 0.0]),
            OrbitSample::new(1, [0.0, 0.0, 0.0]),
        ];
        match model.classify_samples(&samples).unwrap_err() {
            SwaError::UndefinedAngle(message) => assert!(message.contains("sample 1")),
            other => panic!("expected undefined angle, got {}", other),
        }
    }

    #[test]
    fn test_non_finite_sample_cannot_pass_as_outside() {
        let model = MagnetopauseModel::default();
        let samples = vec![
            OrbitSample::new(0, [120_000.0, 0.0, 0.0]),
            OrbitSample::new(100, [f64::NAN, 0.0, 0.0]),
            OrbitSample::new(200, [110_000.0, 0.0, 0.0]),
        ];
        match model.classify_samples(&samples).unwrap_err() {
            SwaError::UndefinedAngle(message) => assert!(message.contains("sample 1")),
            other => panic!("expected undefined angle, got {}", other),
        }
        // the crossing scan must stop at the bad sample, not step over it
        assert!(matches!(
            model.first_crossing(&samples),
            Err(SwaError::UndefinedAngle(_))
        ));
    }

    #[test]
    fn test_first_crossing_finds_earliest_inside_sample() {
        let model = MagnetopauseModel::new(constant_radius_params(10_000.0));
        let samples = vec![
            OrbitSample::new(100, [50_000.0, 0.0, 0.0]),
            OrbitSample::new(200, [9_000.0, 0.0, 0.0]),
            OrbitSample::new(300, [8_000.0, 0.0, 0.0]),
        ];
        let event = model.first_crossing(&samples).unwrap().unwrap();
        assert_eq!(event.index, 1);
        assert_eq!(event.epoch_ns, 200);
    }

    #[test]
    fn test_first_crossing_agrees_with_classification() {
        let model = MagnetopauseModel::default();
        let samples = vec![
            OrbitSample::new(0, [120_000.0, 10_000.0, 0.0]),
            OrbitSample::new(1, [110_000.0, 5_000.0, 2_000.0]),
            OrbitSample::new(2, [98_000.0, 1_000.0, 500.0]),
            OrbitSample::new(3, [90_000.0, 0.0, 0.0]),
        ];
        let inside = model.classify_samples(&samples).unwrap();
        let event = model.first_crossing(&samples).unwrap().unwrap();
        assert_eq!(inside.iter().position(|&flag| flag), Some(event.index));
    }

    #[test]
    fn test_short_trajectories_have_no_crossing() {
        let model = MagnetopauseModel::default();
        assert_eq!(model.first_crossing(&[]).unwrap(), None);
        let lone = vec![OrbitSample::new(0, [9_000.0, 0.0, 0.0])];
        assert_eq!(model.first_crossing(&lone).unwrap(), None);
    }

    #[test]
    fn test_fully_outside_trajectory_has_no_crossing() {
        let model = MagnetopauseModel::new(constant_radius_params(10_000.0));
        let samples = vec![
            OrbitSample::new(0, [50_000.0, 0.0, 0.0]),
            OrbitSample::new(1, [40_000.0, 0.0, 0.0]),
        ];
        assert_eq!(model.first_crossing(&samples).unwrap(), None);
    }

    #[test]
    fn test_boundary_surface_grid_is_finite_and_clamped() {
        let model = MagnetopauseModel::default();
        let theta = linspace(0.0, PI, 100);
        let phi = linspace(0.0, 2.0 * PI, 100);
        let grid = model.boundary_surface_grid(&theta, &phi);
        assert_eq!(grid.len(), 100);

        let limit = 50.0 * EARTH_RADIUS_KM;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for row in &grid {
            assert_eq!(row.len(), 100);
            for &r in row {
                assert!(r.is_finite());
                assert!((-limit..=limit).contains(&r));
                min = min.min(r);
                max = max.max(r);
            }
        }
        // the tail flank runs away and pins at the clamp
        assert_eq!(max, limit);
        assert!((min - 68521.44949275408).abs() < 1e-5);
    }
}
