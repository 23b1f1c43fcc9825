//! Outage Tracker - connectivity state machine
//!
//! Consumes one probe outcome per tick and decides when an outage starts and
//! ends. The tracker does no I/O: it returns an [`Effect`] that the monitor
//! realizes against the recorder and the console.
//!
//! ```text
//!   Up --Failure--> Down { since: now }      => LogInterruption
//!   Down --Success--> Up                     => LogRestoration(record)
//!   otherwise                                => EmitVerbose | None
//! ```

use chrono::{DateTime, Local};

use crate::domain::{OutageRecord, ProbeOutcome};

/// Connectivity status of the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Up,
    Down,
}

/// State carried between ticks.
///
/// The outage start lives inside the `Down` variant, so it is present
/// exactly when the status is `Down`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityState {
    #[default]
    Up,
    Down { since: DateTime<Local> },
}

impl ConnectivityState {
    pub fn status(&self) -> Status {
        match self {
            ConnectivityState::Up => Status::Up,
            ConnectivityState::Down { .. } => Status::Down,
        }
    }

    pub fn outage_start(&self) -> Option<DateTime<Local>> {
        match self {
            ConnectivityState::Up => None,
            ConnectivityState::Down { since } => Some(*since),
        }
    }

    pub fn is_down(&self) -> bool {
        self.status() == Status::Down
    }

    /// `outage_start` is set iff the status is `Down`
    pub fn is_consistent(&self) -> bool {
        self.outage_start().is_some() == self.is_down()
    }
}

/// What the caller must do after a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Steady state, nothing to report
    None,
    /// Connectivity lost; an outage started at `at`
    LogInterruption { at: DateTime<Local> },
    /// Connectivity restored; `record` must be appended to the recorder
    LogRestoration { record: OutageRecord },
    /// Steady state with verbose reporting on
    EmitVerbose {
        at: DateTime<Local>,
        outcome: ProbeOutcome,
    },
}

impl Effect {
    /// Whether this effect marks a state transition
    pub fn is_transition(&self) -> bool {
        matches!(self, Effect::LogInterruption { .. } | Effect::LogRestoration { .. })
    }
}

/// Connectivity state machine
#[derive(Debug, Clone, Default)]
pub struct OutageTracker {
    state: ConnectivityState,
    verbose: bool,
}

impl OutageTracker {
    /// Create a tracker in the initial `Up` state
    pub fn new(verbose: bool) -> Self {
        Self {
            state: ConnectivityState::Up,
            verbose,
        }
    }

    pub fn state(&self) -> &ConnectivityState {
        &self.state
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Feed one probe outcome observed at `now`.
    ///
    /// `now` must be captured when the probe resolved.
    pub fn observe(&mut self, outcome: ProbeOutcome, now: DateTime<Local>) -> Effect {
        match (self.state, outcome.is_success()) {
            (ConnectivityState::Up, false) => {
                self.state = ConnectivityState::Down { since: now };
                Effect::LogInterruption { at: now }
            }
            (ConnectivityState::Down { since }, true) => {
                self.state = ConnectivityState::Up;
                Effect::LogRestoration {
                    record: OutageRecord::closed(since, now),
                }
            }
            _ if self.verbose => Effect::EmitVerbose { at: now, outcome },
            _ => Effect::None,
        }
    }

    /// Handle a termination request.
    ///
    /// Consumes the tracker so it runs at most once. Returns the in-progress
    /// outage as an unterminated record when `Down`, nothing when `Up`. The
    /// caller re-propagates the termination either way.
    pub fn shutdown(self, now: DateTime<Local>) -> Option<OutageRecord> {
        match self.state {
            ConnectivityState::Up => None,
            ConnectivityState::Down { since } => {
                log::debug!("Flushing open outage (since {}) at shutdown {}", since, now);
                Some(OutageRecord::unterminated(since))
            }
        }
    }
}
