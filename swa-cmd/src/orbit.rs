//! Magnetopause boundary commands over a trajectory.

use log::info;
use serde_json::json;
use std::fs;
use std::path::Path;
use swa_charts::{orbit_planes, orbit_scene};
use swa_core::loader;
use swa_core::magnetopause::MagnetopauseModel;

/// Report the first magnetopause crossing of a trajectory together with an
/// inside/outside census of its samples.
pub fn run_crossing(ephemeris_csv: &str, json_output: bool) -> anyhow::Result<()> {
    let samples = loader::load_ephemeris(ephemeris_csv)?;
    let model = MagnetopauseModel::default();

    let inside = model.classify_samples(&samples)?;
    let crossing = model.first_crossing(&samples)?;
    let inside_count = inside.iter().filter(|&&flag| flag).count();
    info!(
        "classified {} samples, {} inside the boundary",
        samples.len(),
        inside_count
    );

    if json_output {
        let report = json!({
            "samples": samples.len(),
            "inside": inside_count,
            "outside": samples.len() - inside_count,
            "first_crossing": crossing,
            "first_crossing_epoch": crossing.map(|event| event.epoch().to_rfc3339()),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match crossing {
        Some(event) => println!("First magnetopause crossing at: {}", event.epoch()),
        None => println!("No magnetopause crossing detected"),
    }
    println!(
        "{} of {} samples inside the boundary",
        inside_count,
        samples.len()
    );
    Ok(())
}

/// Render the trajectory onto the three GSE coordinate planes.
pub fn run_orbit_planes(ephemeris_csv: &str, out_dir: &str) -> anyhow::Result<()> {
    let samples = loader::load_ephemeris(ephemeris_csv)?;
    let model = MagnetopauseModel::default();

    fs::create_dir_all(out_dir)?;
    let written = orbit_planes::render_orbit_planes(Path::new(out_dir), &samples, &model)?;
    for path in &written {
        info!("wrote {}", path.display());
    }
    println!("Rendered {} plane charts into {}", written.len(), out_dir);
    Ok(())
}

/// Render the 3D orbit scene with Earth and the model boundary.
pub fn run_orbit_scene(ephemeris_csv: &str, out: &str) -> anyhow::Result<()> {
    let samples = loader::load_ephemeris(ephemeris_csv)?;
    let model = MagnetopauseModel::default();

    if let Some(parent) = Path::new(out).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    orbit_scene::render_orbit_scene(Path::new(out), &samples, &model)?;
    println!("Rendered orbit scene to {}", out);
    Ok(())
}
