use anyhow::Result;
use plotters::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};
use std::path::Path;
use swa_core::ephemeris::OrbitSample;
use swa_core::geometry::{
    linspace, mesh_from_radial_grid, sphere_mesh, SurfaceMesh, EARTH_RADIUS_KM,
};
use swa_core::magnetopause::MagnetopauseModel;

const CHART_SIZE: (u32, u32) = (1000, 800);
const GRID_RESOLUTION: usize = 100;
const SPHERE_RESOLUTION: usize = 50;
const WIREFRAME_STRIDE: usize = 5;

/// Render the 3D scene: trajectory markers colored by the inside/outside
/// classification, with the Earth sphere and the boundary surface drawn as
/// wireframes, both rotated about the y axis into the display frame.
pub fn render_orbit_scene(
    path: &Path,
    samples: &[OrbitSample],
    model: &MagnetopauseModel,
) -> Result<()> {
    let inside = model.classify_samples(samples)?;

    let earth =
        sphere_mesh(EARTH_RADIUS_KM, [0.0; 3], SPHERE_RESOLUTION).rotate_about_y(FRAC_PI_2);
    let theta = linspace(0.0, PI, GRID_RESOLUTION);
    let phi = linspace(0.0, 2.0 * PI, GRID_RESOLUTION);
    let grid = model.boundary_surface_grid(&theta, &phi);
    let boundary = mesh_from_radial_grid(&grid, &theta, &phi).rotate_about_y(FRAC_PI_2);

    let limit = 50.0 * EARTH_RADIUS_KM;
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20i32)
        .caption(
            "Orbit with Earth and magnetopause boundary",
            ("sans-serif", 24),
        )
        .build_cartesian_3d(-limit..limit, -limit..limit, -limit..limit)?;
    chart.with_projection(|mut pb| {
        pb.pitch = 0.25;
        pb.yaw = 0.6;
        pb.scale = 0.85;
        pb.into_matrix()
    });
    chart.configure_axes().draw()?;

    let earth_style = BLUE.mix(0.4);
    for line in wireframe_polylines(&earth, WIREFRAME_STRIDE) {
        chart.draw_series(LineSeries::new(line, &earth_style))?;
    }
    let boundary_style = RED.mix(0.25);
    for line in wireframe_polylines(&boundary, WIREFRAME_STRIDE) {
        chart.draw_series(LineSeries::new(line, &boundary_style))?;
    }

    chart.draw_series(samples.iter().zip(&inside).map(|(sample, &is_inside)| {
        let [x, y, z] = sample.position_gse_km;
        let color = if is_inside { GREEN } else { RED };
        Circle::new((x, y, z), 2, color.filled())
    }))?;

    root.present()?;
    Ok(())
}

// one polyline per sampled row and column; the edge rows are always kept so
// the outline stays closed
fn stride_indices(count: usize, stride: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..count).step_by(stride.max(1)).collect();
    if count > 0 && indices.last() != Some(&(count - 1)) {
        indices.push(count - 1);
    }
    indices
}

fn wireframe_polylines(mesh: &SurfaceMesh, stride: usize) -> Vec<Vec<(f64, f64, f64)>> {
    let mut lines = Vec::new();
    for &i in &stride_indices(mesh.rows(), stride) {
        lines.push(
            (0..mesh.cols())
                .map(|j| (mesh.x[i][j], mesh.y[i][j], mesh.z[i][j]))
                .collect(),
        );
    }
    for &j in &stride_indices(mesh.cols(), stride) {
        lines.push(
            (0..mesh.rows())
                .map(|i| (mesh.x[i][j], mesh.y[i][j], mesh.z[i][j]))
                .collect(),
        );
    }
    lines
}
