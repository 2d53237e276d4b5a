use easy_cast::Cast;
use std::f64::consts::PI;

/// Mean Earth radius in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub fn km_to_re(km: f64) -> f64 {
    km / EARTH_RADIUS_KM
}

/// `count` evenly spaced values covering `[start, stop]`, endpoints included.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![start];
    }
    let span: f64 = ((count - 1) as i64).cast();
    let mut values: Vec<f64> = (0..count)
        .map(|i| {
            let step: f64 = (i as i64).cast();
            start + (stop - start) * (step / span)
        })
        .collect();
    // the last value must be exactly stop, not a rounding neighbor of it
    if let Some(last) = values.last_mut() {
        *last = stop;
    }
    values
}

/// Cartesian point for a radius, polar angle and azimuthal angle.
pub fn spherical_to_cartesian(r: f64, theta: f64, phi: f64) -> [f64; 3] {
    [
        r * theta.sin() * phi.cos(),
        r * theta.sin() * phi.sin(),
        r * theta.cos(),
    ]
}

/// Rotate a point about the +y axis by `angle` radians.
pub fn rotate_about_y(point: [f64; 3], angle: f64) -> [f64; 3] {
    let [x, y, z] = point;
    [
        x * angle.cos() + z * angle.sin(),
        y,
        -x * angle.sin() + z * angle.cos(),
    ]
}

/// Surface sampled over a two-parameter grid, stored as parallel coordinate
/// matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    pub x: Vec<Vec<f64>>,
    pub y: Vec<Vec<f64>>,
    pub z: Vec<Vec<f64>>,
}

impl SurfaceMesh {
    pub fn rows(&self) -> usize {
        self.x.len()
    }

    pub fn cols(&self) -> usize {
        self.x.first().map_or(0, Vec::len)
    }

    /// Same surface rotated about the +y axis by `angle` radians.
    pub fn rotate_about_y(&self, angle: f64) -> SurfaceMesh {
        let mut rotated = self.clone();
        for i in 0..self.x.len() {
            for j in 0..self.x[i].len() {
                let point = [self.x[i][j], self.y[i][j], self.z[i][j]];
                let [x, y, z] = rotate_about_y(point, angle);
                rotated.x[i][j] = x;
                rotated.y[i][j] = y;
                rotated.z[i][j] = z;
            }
        }
        rotated
    }
}

/// Sphere of `radius` around `center`, sampled on a `resolution` by
/// `resolution` grid of the two angular parameters.
pub fn sphere_mesh(radius: f64, center: [f64; 3], resolution: usize) -> SurfaceMesh {
    let u = linspace(0.0, 2.0 * PI, resolution);
    let v = linspace(0.0, PI, resolution);
    let mut x = Vec::with_capacity(u.len());
    let mut y = Vec::with_capacity(u.len());
    let mut z = Vec::with_capacity(u.len());
    for &a in &u {
        let mut row_x = Vec::with_capacity(v.len());
        let mut row_y = Vec::with_capacity(v.len());
        let mut row_z = Vec::with_capacity(v.len());
        for &b in &v {
            row_x.push(center[0] + radius * a.cos() * b.sin());
            row_y.push(center[1] + radius * a.sin() * b.sin());
            row_z.push(center[2] + radius * b.cos());
        }
        x.push(row_x);
        y.push(row_y);
        z.push(row_z);
    }
    SurfaceMesh { x, y, z }
}

/// Cartesian mesh for a radial grid, where `radii[i][j]` is the radius
/// sampled at `(theta[i], phi[j])`.
pub fn mesh_from_radial_grid(radii: &[Vec<f64>], theta: &[f64], phi: &[f64]) -> SurfaceMesh {
    let mut x = Vec::with_capacity(radii.len());
    let mut y = Vec::with_capacity(radii.len());
    let mut z = Vec::with_capacity(radii.len());
    for (row, &th) in radii.iter().zip(theta) {
        let mut row_x = Vec::with_capacity(row.len());
        let mut row_y = Vec::with_capacity(row.len());
        let mut row_z = Vec::with_capacity(row.len());
        for (&r, &ph) in row.iter().zip(phi) {
            let [px, py, pz] = spherical_to_cartesian(r, th, ph);
            row_x.push(px);
            row_y.push(py);
            row_z.push(pz);
        }
        x.push(row_x);
        y.push(row_y);
        z.push(row_z);
    }
    SurfaceMesh { x, y, z }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_hits_both_endpoints() {
        let theta = linspace(0.0, PI, 100);
        assert_eq!(theta.len(), 100);
        assert_eq!(theta[0], 0.0);
        assert_eq!(theta[99], PI);
        for pair in theta.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_linspace_small_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.5, 9.0, 1), vec![3.5]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_spherical_to_cartesian_axes() {
        let [x, y, z] = spherical_to_cartesian(2.0, PI / 2.0, 0.0);
        assert!((x - 2.0).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
        assert!(z.abs() < 1e-12);

        let [x, y, z] = spherical_to_cartesian(3.0, 0.0, 1.2);
        assert!(x.abs() < 1e-12);
        assert!(y.abs() < 1e-12);
        assert!((z - 3.0).abs() < 1e-12);
    }

    #[test]
    fn rotate_about_y_test() {
        assert_eq!(rotate_about_y([1.0, 2.0, 3.0], 0.0), [1.0, 2.0, 3.0]);

        let [x, y, z] = rotate_about_y([1.0, 2.0, 3.0], PI / 2.0);
        assert!((x - 3.0).abs() < 1e-12);
        assert!((y - 2.0).abs() < 1e-12);
        assert!((z + 1.0).abs() < 1e-12);

        let forward = rotate_about_y([0.3, -1.1, 2.4], 0.7);
        let [x, y, z] = rotate_about_y(forward, -0.7);
        assert!((x - 0.3).abs() < 1e-12);
        assert!((y + 1.1).abs() < 1e-12);
        assert!((z - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_mesh_shape_and_radius() {
        let center = [1.0, -1.0, 0.5];
        let mesh = sphere_mesh(2.0, center, 4);
        assert_eq!(mesh.rows(), 4);
        assert_eq!(mesh.cols(), 4);
        for i in 0..mesh.rows() {
            for j in 0..mesh.cols() {
                let dx = mesh.x[i][j] - center[0];
                let dy = mesh.y[i][j] - center[1];
                let dz = mesh.z[i][j] - center[2];
                let distance = (dx * dx + dy * dy + dz * dz).sqrt();
                assert!((distance - 2.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_mesh_from_radial_grid() {
        let radii = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        let theta = [PI / 2.0, PI];
        let phi = [0.0, PI / 2.0];
        let mesh = mesh_from_radial_grid(&radii, &theta, &phi);
        assert_eq!(mesh.rows(), 2);
        assert_eq!(mesh.cols(), 2);
        // equator, noon
        assert!((mesh.x[0][0] - 1.0).abs() < 1e-12);
        // equator, dusk
        assert!((mesh.y[0][1] - 1.0).abs() < 1e-12);
        // south pole
        assert!((mesh.z[1][0] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotated_mesh_keeps_y() {
        let mesh = sphere_mesh(1.0, [0.0; 3], 3);
        let rotated = mesh.rotate_about_y(PI / 2.0);
        for i in 0..mesh.rows() {
            for j in 0..mesh.cols() {
                assert!((rotated.y[i][j] - mesh.y[i][j]).abs() < 1e-12);
                let before = mesh.x[i][j].hypot(mesh.z[i][j]);
                let after = rotated.x[i][j].hypot(rotated.z[i][j]);
                assert!((before - after).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn km_to_re_test() {
        assert_eq!(km_to_re(EARTH_RADIUS_KM), 1.0);
        assert_eq!(km_to_re(0.0), 0.0);
        assert!((km_to_re(12742.0) - 2.0).abs() < 1e-12);
    }
}
