//! Monitor - the driver loop
//!
//! Each tick the monitor:
//! - Runs one probe
//! - Captures the wall-clock time as soon as the probe resolves
//! - Feeds the outcome to the [`OutageTracker`] and realizes the effect
//! - Waits for the next interval
//!
//! The termination future is raced against the whole tick, so a request
//! arriving mid-probe or mid-sleep is seen immediately. The tracker is then
//! shut down exactly once, any open outage is appended before returning, and
//! the run ends with [`NetwatchError::Interrupted`] so the caller can exit the
//! way an interrupted process does.

mod signal;
mod tick;

use std::future::Future;

use chrono::Local;
use log::{debug, info, warn};
use tokio::time::{Interval, MissedTickBehavior};

use crate::console;
use crate::error::{NetwatchError, Result};
use crate::probe::Prober;
use crate::recorder::Recorder;
use crate::tracker::{Effect, OutageTracker};

pub use signal::termination_signal;
pub use tick::{MonitorConfig, RunSummary, TickStats};

enum Step {
    Ticked(Result<()>),
    Terminate,
}

/// Drives a prober at a fixed cadence and logs outages to a recorder
pub struct Monitor<P, R> {
    prober: P,
    recorder: R,
    config: MonitorConfig,
    tracker: OutageTracker,
    stats: TickStats,
}

impl<P: Prober, R: Recorder> Monitor<P, R> {
    pub fn new(prober: P, recorder: R, config: MonitorConfig) -> Self {
        let tracker = OutageTracker::new(config.verbose);
        Self {
            prober,
            recorder,
            config,
            tracker,
            stats: TickStats::new(),
        }
    }

    /// Run until `shutdown` resolves or the tick budget is used up.
    ///
    /// Returns `Err(Interrupted)` after a termination request, once any open
    /// outage has been recorded. Recorder failures abort the run.
    pub async fn run<F>(mut self, shutdown: F) -> Result<RunSummary>
    where
        F: Future<Output = ()>,
    {
        self.config.validate()?;
        self.recorder.write_header()?;
        info!(
            "Monitoring {} every {:?} (verbose: {})",
            self.prober.target(),
            self.config.interval,
            self.config.verbose
        );

        let mut interval = tokio::time::interval(self.config.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            if self.stats.reached(self.config.max_ticks) {
                info!("Tick budget of {:?} reached", self.config.max_ticks);
                return self.finish(false);
            }

            let step = tokio::select! {
                biased;
                _ = &mut shutdown => Step::Terminate,
                result = self.tick(&mut interval) => Step::Ticked(result),
            };

            match step {
                Step::Ticked(result) => result?,
                Step::Terminate => return self.finish(true),
            }
        }
    }

    /// Wait for the next slot, probe once and realize the effect
    async fn tick(&mut self, interval: &mut Interval) -> Result<()> {
        interval.tick().await;

        let outcome = self.prober.probe().await;
        let now = Local::now();

        let effect = self.tracker.observe(outcome, now);
        self.stats.record(outcome.is_success(), &effect);
        self.realize(&effect)
    }

    fn realize(&mut self, effect: &Effect) -> Result<()> {
        match effect {
            Effect::None => debug!("Tick {}: no change", self.stats.tick_count),
            Effect::LogInterruption { at } => warn!("Connection to {} lost at {}", self.prober.target(), at),
            Effect::LogRestoration { record } => {
                self.recorder.append(record)?;
                info!("Connection to {} restored, outage {:?}", self.prober.target(), record);
            }
            Effect::EmitVerbose { .. } => {}
        }
        console::print_effect(effect, self.prober.target());
        Ok(())
    }

    /// Shut the tracker down and write any open outage.
    ///
    /// Consumes the monitor, so this runs once per run.
    fn finish(self, interrupted: bool) -> Result<RunSummary> {
        let Monitor {
            mut recorder,
            tracker,
            stats,
            ..
        } = self;

        let flushed_open_outage = match tracker.shutdown(Local::now()) {
            Some(record) => {
                recorder.append(&record)?;
                warn!("Recorded open outage since {} at shutdown", record.start());
                println!("{}", console::render_shutdown(&record));
                true
            }
            None => false,
        };

        info!(
            "Monitor stopped after {} ticks, {} outages recorded{}",
            stats.tick_count,
            stats.outages_recorded,
            if flushed_open_outage { " plus one open outage" } else { "" }
        );

        if interrupted {
            return Err(NetwatchError::Interrupted);
        }
        Ok(RunSummary {
            stats,
            flushed_open_outage,
        })
    }
}
