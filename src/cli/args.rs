//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use netwatch::config::Config;
use netwatch::probe::ProbeMethod;

/// netwatch - log intervals of lost connectivity to a CSV file
#[derive(Parser, Debug)]
#[command(name = "netwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// The file to write the outage log to (`-` for stdout)
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,

    /// Host to probe
    #[arg(short, long)]
    pub target: Option<String>,

    /// Interval between probes in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Print every probe result, not only state changes
    #[arg(short, long)]
    pub verbose: bool,

    /// Probe transport
    #[arg(short, long, value_enum)]
    pub method: Option<ProbeMethod>,

    /// Port for the tcp method
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Per-probe reply timeout in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// Append to the output file instead of truncating it
    #[arg(short, long)]
    pub append: bool,

    /// Stop after this many probes
    #[arg(short = 'n', long)]
    pub count: Option<u64>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Overlay command-line values on a loaded config
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(path) = &self.output_file {
            config.output.path = path.clone();
        }
        if self.append {
            config.output.append = true;
        }
        if let Some(target) = &self.target {
            config.probe.target = target.clone();
        }
        if let Some(method) = self.method {
            config.probe.method = method;
        }
        if let Some(port) = self.port {
            config.probe.port = port;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.probe.timeout_ms = timeout_ms;
        }
        if let Some(interval) = self.interval {
            config.interval_secs = interval;
        }
        if self.is_verbose() {
            config.verbose = true;
        }
    }
}
