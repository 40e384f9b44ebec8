mod scenario;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::scenario::{Overrides, ReplayError, Script};

#[derive(Parser, Debug)]
#[command(name = "canvas-replay", about = "Replay recorded canvas input and print the resulting board")]
struct Cli {
    /// Path to a JSON replay script.
    script: PathBuf,

    #[arg(long, env = "CANVAS_WHEEL_SENSITIVITY")]
    wheel_sensitivity: Option<f64>,

    #[arg(long, env = "CANVAS_TAP_THRESHOLD")]
    tap_threshold: Option<f64>,

    #[arg(long, env = "CANVAS_PAN_KEY")]
    pan_key: Option<String>,

    /// Print the summary on a single line.
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, ReplayError> {
    let overrides = Overrides {
        wheel_sensitivity: cli.wheel_sensitivity,
        tap_threshold_px: cli.tap_threshold,
        pan_key: cli.pan_key,
    };
    let script = Script::load(&cli.script)?;
    let summary = scenario::replay(script, &overrides)?;
    let output =
        if cli.compact { serde_json::to_string(&summary)? } else { serde_json::to_string_pretty(&summary)? };
    Ok(output)
}
