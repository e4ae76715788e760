//! dbconf CLI — prints the non-secret database settings.

use clap::Parser;
use dbconf::config::Settings;
use dbconf::telemetry::{TelemetryConfig, init_telemetry};

#[derive(Parser)]
#[command(
    name = "dbconf",
    version,
    about = "Print database settings resolved from the environment and .env (password omitted)"
)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    if let Err(err) = init_telemetry(TelemetryConfig::default()) {
        eprintln!("warning: failed to init logging: {err}");
    }

    let settings = Settings::from_env()?;
    tracing::info!(host = settings.db_host(), "settings loaded");

    println!("{}", settings.public_line());
    Ok(())
}
