//! Command implementations for the SWA CLI.
//!
//! Provides subcommands for gradient tables, spectral analysis and
//! magnetopause boundary studies over CSV inputs.

use clap::Subcommand;

pub mod gradient;
pub mod orbit;
pub mod spectral;

#[derive(Subcommand)]
pub enum Command {
    /// Compute per-column time gradients of a measurement table and render one chart per column
    Gradient {
        /// Path to the measurement table CSV (header: epoch,<col>,...)
        #[arg(short = 't', long)]
        table_csv: String,

        /// Column to process (repeat for several; default: every column)
        #[arg(short = 'c', long = "column")]
        columns: Vec<String>,

        /// Unit of the source columns, used for axis labels
        #[arg(short = 'u', long, default_value = "nT")]
        units: String,

        /// Directory for the rendered charts
        #[arg(short = 'o', long, default_value = "plots")]
        out_dir: String,
    },

    /// Estimate the power spectral density of one column and fit its spectral slope
    Psd {
        /// Path to the measurement table CSV
        #[arg(short = 't', long)]
        table_csv: String,

        /// Column to analyze
        #[arg(short = 'c', long)]
        column: String,

        /// Sampling rate in Hz (default: estimated from the epoch axis)
        #[arg(short = 's', long)]
        sample_rate: Option<f64>,

        /// Output PNG path
        #[arg(short = 'o', long, default_value = "plots/psd.png")]
        out: String,
    },

    /// Detect the first magnetopause crossing of a trajectory
    Crossing {
        /// Path to the ephemeris CSV (header: epoch,x_gse_km,y_gse_km,z_gse_km)
        #[arg(short = 'e', long)]
        ephemeris_csv: String,

        /// Emit the report as JSON instead of console lines
        #[arg(long)]
        json: bool,
    },

    /// Render the trajectory onto the three GSE coordinate planes
    OrbitPlanes {
        /// Path to the ephemeris CSV
        #[arg(short = 'e', long)]
        ephemeris_csv: String,

        /// Directory for the rendered charts
        #[arg(short = 'o', long, default_value = "plots")]
        out_dir: String,
    },

    /// Render the 3D orbit scene with Earth and the model boundary
    OrbitScene {
        /// Path to the ephemeris CSV
        #[arg(short = 'e', long)]
        ephemeris_csv: String,

        /// Output PNG path
        #[arg(short = 'o', long, default_value = "plots/orbit_scene.png")]
        out: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Gradient {
            table_csv,
            columns,
            units,
            out_dir,
        } => gradient::run_gradient(&table_csv, &columns, &units, &out_dir),
        Command::Psd {
            table_csv,
            column,
            sample_rate,
            out,
        } => spectral::run_psd(&table_csv, &column, sample_rate, &out),
        Command::Crossing {
            ephemeris_csv,
            json,
        } => orbit::run_crossing(&ephemeris_csv, json),
        Command::OrbitPlanes {
            ephemeris_csv,
            out_dir,
        } => orbit::run_orbit_planes(&ephemeris_csv, &out_dir),
        Command::OrbitScene { ephemeris_csv, out } => {
            orbit::run_orbit_scene(&ephemeris_csv, &out)
        }
    }
}
