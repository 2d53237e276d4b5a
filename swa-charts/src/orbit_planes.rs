use anyhow::Result;
use chrono::Local;
use plotters::prelude::*;
use std::f64::consts::{FRAC_PI_2, PI};
use std::path::{Path, PathBuf};
use swa_core::ephemeris::OrbitSample;
use swa_core::geometry::{km_to_re, linspace};
use swa_core::magnetopause::MagnetopauseModel;

const CHART_SIZE: (u32, u32) = (800, 800);
const AXIS_LIMIT_RE: f64 = 60.0;

type PlaneProjector = fn(&OrbitSample) -> (f64, f64);

fn xy_plane(sample: &OrbitSample) -> (f64, f64) {
    let [x, y, _] = sample.position_gse_km;
    (km_to_re(x), km_to_re(y))
}

fn xz_plane(sample: &OrbitSample) -> (f64, f64) {
    let [x, _, z] = sample.position_gse_km;
    (km_to_re(x), km_to_re(z))
}

fn yz_plane(sample: &OrbitSample) -> (f64, f64) {
    let [_, y, z] = sample.position_gse_km;
    (km_to_re(y), km_to_re(z))
}

/// Render the trajectory onto the three GSE coordinate planes, one PNG per
/// plane, with a 1 Re Earth disk on each and the model boundary's equatorial
/// trace on the xy panel. File names carry a render timestamp.
pub fn render_orbit_planes(
    out_dir: &Path,
    samples: &[OrbitSample],
    model: &MagnetopauseModel,
) -> Result<Vec<PathBuf>> {
    let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let planes: [(&str, &str, &str, PlaneProjector); 3] = [
        ("xy", "GSE X Position, Re", "GSE Y Position, Re", xy_plane),
        ("xz", "GSE X Position, Re", "GSE Z Position, Re", xz_plane),
        ("yz", "GSE Y Position, Re", "GSE Z Position, Re", yz_plane),
    ];
    let mut written = Vec::with_capacity(planes.len());
    for (suffix, x_label, y_label, project) in planes {
        let path = out_dir.join(format!("orbit_{}_{}.png", suffix, stamp));
        draw_plane(&path, samples, model, suffix, x_label, y_label, project)?;
        written.push(path);
    }
    Ok(written)
}

/// Equatorial cut of the model boundary in Earth radii, as xy points.
pub fn equatorial_trace(model: &MagnetopauseModel, points: usize) -> Vec<(f64, f64)> {
    linspace(0.0, 2.0 * PI, points)
        .into_iter()
        .map(|phi| {
            let radius = km_to_re(model.boundary_radius(FRAC_PI_2, phi));
            (radius * phi.cos(), radius * phi.sin())
        })
        .collect()
}

fn circle_points(radius: f64) -> Vec<(f64, f64)> {
    linspace(0.0, 2.0 * PI, 100)
        .into_iter()
        .map(|angle| (radius * angle.cos(), radius * angle.sin()))
        .collect()
}

fn draw_plane(
    path: &Path,
    samples: &[OrbitSample],
    model: &MagnetopauseModel,
    suffix: &str,
    x_label: &str,
    y_label: &str,
    project: PlaneProjector,
) -> Result<()> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20i32)
        .caption(
            format!("Orbit {} plane (GSE)", suffix.to_uppercase()),
            ("sans-serif", 24),
        )
        .x_label_area_size(40u32)
        .y_label_area_size(60u32)
        .build_cartesian_2d(
            -AXIS_LIMIT_RE..AXIS_LIMIT_RE,
            -AXIS_LIMIT_RE..AXIS_LIMIT_RE,
        )?;
    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()?;

    chart
        .draw_series(LineSeries::new(samples.iter().map(project), BLUE))?
        .label("orbit")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(circle_points(1.0), GREEN))?
        .label("Earth")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));

    if suffix == "xy" {
        chart
            .draw_series(LineSeries::new(equatorial_trace(model, 200), BLACK))?
            .label("magnetopause")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
