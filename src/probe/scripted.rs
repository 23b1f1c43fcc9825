// Prober that replays a fixed list of outcomes, for driving the monitor in tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::Prober;
use crate::domain::ProbeOutcome;

/// Replays `outcomes` in order, one per probe.
///
/// Once the script is used up, the next probe signals [`ScriptedProber::exhausted`]
/// and never resolves, which models a termination request arriving mid-probe.
#[derive(Debug)]
pub struct ScriptedProber {
    target: String,
    outcomes: Vec<ProbeOutcome>,
    next: AtomicUsize,
    exhausted: Arc<Notify>,
}

impl ScriptedProber {
    pub fn new(outcomes: impl IntoIterator<Item = ProbeOutcome>) -> Self {
        Self {
            target: "scripted".to_string(),
            outcomes: outcomes.into_iter().collect(),
            next: AtomicUsize::new(0),
            exhausted: Arc::new(Notify::new()),
        }
    }

    /// Handle notified when a probe is requested past the end of the script
    pub fn exhausted(&self) -> Arc<Notify> {
        Arc::clone(&self.exhausted)
    }

    /// Number of probes served so far
    pub fn probes_served(&self) -> usize {
        self.next.load(Ordering::SeqCst).min(self.outcomes.len())
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self) -> ProbeOutcome {
        let idx = self.next.fetch_add(1, Ordering::SeqCst);
        match self.outcomes.get(idx) {
            Some(outcome) => *outcome,
            None => {
                self.exhausted.notify_one();
                std::future::pending().await
            }
        }
    }

    fn target(&self) -> &str {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_replays_in_order() {
        let ok = ProbeOutcome::success(Duration::from_millis(3));
        let prober = ScriptedProber::new([ok, ProbeOutcome::Failure]);
        assert_eq!(prober.probe().await, ok);
        assert_eq!(prober.probe().await, ProbeOutcome::Failure);
        assert_eq!(prober.probes_served(), 2);
    }

    #[tokio::test]
    async fn test_exhaustion_notifies_and_hangs() {
        let prober = ScriptedProber::new([]);
        let exhausted = prober.exhausted();
        tokio::select! {
            _ = prober.probe() => panic!("exhausted probe must not resolve"),
            _ = exhausted.notified() => {}
        }
    }
}
