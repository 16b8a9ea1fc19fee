//! Drift Player - Standalone player binary
//!
//! Opens a window, loads the floor and player sprites and runs the frame loop.
//!
//! Usage:
//!   drift-player [--config <drift.toml>] [--windowed] [--fps <n>] [--frames <n>]

use anyhow::Result;
use clap::Parser;
use drift_player::{write_error_lines, Args, WinitPlatform};
use drift_runtime::{ErrorLog, FrameLoop};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;

    println!("Controls:");
    println!("  Arrows   - Move");
    println!("  Escape   - Exit");

    let platform = match WinitPlatform::open(&config.window) {
        Ok(platform) => platform,
        Err(err) => {
            tracing::error!(error = %err, "could not open the window");
            let mut errors = ErrorLog::new();
            let status = errors.record(err.code());
            write_error_lines(&mut std::io::stderr(), &errors.flush())?;
            std::process::exit(status);
        }
    };

    let report = FrameLoop::new(platform, config).run();
    write_error_lines(&mut std::io::stderr(), &report.errors)?;
    tracing::info!(
        frames = report.frames,
        x = report.final_position.x,
        y = report.final_position.y,
        "session ended"
    );

    if !report.is_success() {
        std::process::exit(report.exit_code);
    }
    Ok(())
}
