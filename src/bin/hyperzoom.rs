//! Hyperzoom demo host
//!
//! Opens a window over a demo scene, or runs the health checks with `--health`.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use hyperzoom::app::App;
use hyperzoom::{HyperzoomConfig, build_info, health};

#[derive(Debug, Parser)]
#[command(name = "hyperzoom", version, about = "Camera zoom and focus demo")]
struct Args {
    /// Configuration profile (falls back to HYPERZOOM_PROFILE, then "release")
    #[arg(long)]
    profile: Option<String>,

    /// Run the health checks, print the report and exit with its code
    #[arg(long)]
    health: bool,

    /// Number of focusable houses in the demo scene
    #[arg(long, default_value_t = 4)]
    targets: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!(version = %build_info::version_string(), "hyperzoom");

    let config = match &args.profile {
        Some(profile) => HyperzoomConfig::load(profile),
        None => HyperzoomConfig::load_from_env(),
    }
    .context("failed to load configuration")?;

    if args.health {
        let report = health::run_checks_with(config);
        health::print_report(&report);
        std::process::exit(report.exit_code());
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, args.targets);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with an error")?;

    Ok(())
}
