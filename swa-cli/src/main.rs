//! SWA CLI - Command line tool for spacecraft time-series and orbital analysis.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "swa-cli",
    version,
    about = "Space weather analysis toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: swa_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    swa_cmd::run(cli.command)
}
