mod app;
mod config;
mod participant;

use app::App;
use clap::Parser;
use config::AppConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Visual working-memory recall session (headless)")]
struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "vwm.toml")]
    config: String,

    /// RNG seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Write probe results as JSON here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write stored sample-screen data as JSON here
    #[arg(long)]
    display_out: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load_or_default(&args.config);
    let seed = args
        .seed
        .or(config.experiment.seed)
        .unwrap_or_else(rand::random);
    tracing::info!(seed, config = %args.config, "starting");

    let summary = App::new(config, seed, args.out, args.display_out).run()?;
    eprintln!(
        "{} trials ({} aborted), {} probes scored, mean |error| {}",
        summary.trials,
        summary.failed_trials,
        summary.results,
        summary
            .mean_abs_error_deg
            .map_or_else(|| "n/a".to_string(), |e| format!("{e:.1}°")),
    );
    Ok(())
}
