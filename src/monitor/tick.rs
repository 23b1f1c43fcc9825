//! Tick cadence and per-run counters
//!
//! One tick is one probe, one `observe` call and one wait for the next
//! interval.

use std::time::Duration;

use crate::error::{NetwatchError, Result};
use crate::tracker::Effect;

/// Configuration for the monitor loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Interval between probes
    pub interval: Duration,
    /// Print a line for every steady-state tick
    pub verbose: bool,
    /// Stop normally after this many ticks
    pub max_ticks: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            verbose: false,
            max_ticks: None,
        }
    }
}

impl MonitorConfig {
    /// Create a new monitor config
    pub fn new(interval: Duration, verbose: bool) -> Self {
        Self {
            interval,
            verbose,
            max_ticks: None,
        }
    }

    /// Stop after `count` ticks
    pub fn with_max_ticks(mut self, count: u64) -> Self {
        self.max_ticks = Some(count);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(NetwatchError::InvalidConfig("interval must be greater than 0".to_string()));
        }
        Ok(())
    }
}

/// Counters kept across ticks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Number of ticks since start
    pub tick_count: u64,
    /// Ticks whose probe failed
    pub failed_probes: u64,
    /// Outages that started this run
    pub outages_started: u64,
    /// Outages closed and recorded this run
    pub outages_recorded: u64,
}

impl TickStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tick and the effect it produced
    pub fn record(&mut self, probe_ok: bool, effect: &Effect) {
        self.tick_count += 1;
        if !probe_ok {
            self.failed_probes += 1;
        }
        match effect {
            Effect::LogInterruption { .. } => self.outages_started += 1,
            Effect::LogRestoration { .. } => self.outages_recorded += 1,
            Effect::None | Effect::EmitVerbose { .. } => {}
        }
    }

    /// Check if the tick budget is used up
    pub fn reached(&self, max_ticks: Option<u64>) -> bool {
        max_ticks.is_some_and(|max| self.tick_count >= max)
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub stats: TickStats,
    /// An outage was still open and was written with an open end
    pub flushed_open_outage: bool,
}
