// ICMP echo through the system `ping` utility, so no raw-socket privileges are needed

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use super::Prober;
use crate::domain::ProbeOutcome;

/// Sends a single echo request per probe
#[derive(Debug, Clone)]
pub struct PingProber {
    target: String,
    timeout: Duration,
}

impl PingProber {
    pub fn new(target: impl Into<String>, timeout: Duration) -> Self {
        Self {
            target: target.into(),
            timeout,
        }
    }

    /// Arguments for a single echo request with a reply deadline
    fn args(&self) -> Vec<String> {
        let millis = self.timeout.as_millis().max(1);
        if cfg!(windows) {
            vec!["-n".into(), "1".into(), "-w".into(), millis.to_string(), self.target.clone()]
        } else if cfg!(target_os = "macos") {
            vec!["-c".into(), "1".into(), "-W".into(), millis.to_string(), self.target.clone()]
        } else {
            let secs = self.timeout.as_secs().max(1);
            vec!["-c".into(), "1".into(), "-W".into(), secs.to_string(), self.target.clone()]
        }
    }
}

/// Extract the round-trip time from ping output (`time=12.3 ms`, `time<1ms`)
pub(crate) fn parse_latency(output: &str) -> Option<Duration> {
    let idx = output.find("time=").map(|i| i + 5).or_else(|| output.find("time<").map(|i| i + 5))?;
    let value: String = output[idx..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let ms: f64 = value.parse().ok()?;
    Duration::try_from_secs_f64(ms / 1000.0).ok()
}

#[async_trait]
impl Prober for PingProber {
    async fn probe(&self) -> ProbeOutcome {
        let started = Instant::now();
        let result = Command::new("ping")
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await;

        match result {
            Ok(output) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let latency = parse_latency(&stdout).unwrap_or_else(|| started.elapsed());
                ProbeOutcome::success(latency)
            }
            Ok(output) => {
                debug!(
                    "ping {} exited with {:?}: {}",
                    self.target,
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                ProbeOutcome::Failure
            }
            Err(e) => {
                debug!("ping {} could not run: {}", self.target, e);
                ProbeOutcome::Failure
            }
        }
    }

    fn target(&self) -> &str {
        &self.target
    }
}
