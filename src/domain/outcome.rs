//! Probe outcome types.
//!
//! This module defines the result of a single reachability check.

use std::time::Duration;

/// Outcome of one probe against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Target answered within the probe's own timeout
    Success { latency: Duration },
    /// Target did not answer, or the probe itself could not run
    Failure,
}

impl ProbeOutcome {
    /// Create a success outcome from a latency
    pub fn success(latency: Duration) -> Self {
        ProbeOutcome::Success { latency }
    }

    /// Check if the target was reachable
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    /// Latency of a successful probe
    pub fn latency(&self) -> Option<Duration> {
        match self {
            ProbeOutcome::Success { latency } => Some(*latency),
            ProbeOutcome::Failure => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_accessors() {
        let outcome = ProbeOutcome::success(Duration::from_millis(12));
        assert!(outcome.is_success());
        assert_eq!(outcome.latency(), Some(Duration::from_millis(12)));
    }

    #[test]
    fn test_failure_accessors() {
        assert!(!ProbeOutcome::Failure.is_success());
        assert_eq!(ProbeOutcome::Failure.latency(), None);
    }
}
