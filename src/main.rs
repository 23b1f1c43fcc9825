use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;

use cli::Cli;
use netwatch::config::Config;
use netwatch::monitor::{Monitor, termination_signal};
use netwatch::probe::{Prober, build_prober};
use netwatch::recorder::CsvRecorder;

/// Exit status of a process stopped by SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 130;

fn setup_logging(config: &Config) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("netwatch")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("netwatch.log");

    // Setup env_logger with file output, keeping stdout for outage lines
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let default_level = config.log_level.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    config.validate().context("Invalid configuration")?;

    let prober = build_prober(&config.probe);
    let recorder =
        CsvRecorder::create(&config.output.path, config.output.append).context("Failed to open outage log")?;

    println!(
        "{} {} every {}s, logging outages to {}",
        "Monitoring".cyan(),
        prober.target(),
        config.interval_secs,
        config.output.path.display()
    );
    if config.verbose {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let monitor = Monitor::new(prober, recorder, config.monitor_config(cli.count));
    match monitor.run(termination_signal()).await {
        Ok(summary) => {
            info!("Finished: {:?}", summary);
            Ok(())
        }
        Err(e) if e.is_interrupted() => {
            info!("Exiting on termination request");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        Err(e) => Err(e).context("Monitor failed"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration, then overlay command-line values
    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config);

    setup_logging(&config).context("Failed to setup logging")?;
    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
