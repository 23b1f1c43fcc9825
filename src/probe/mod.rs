//! Reachability probes
//!
//! A prober issues one check against its target and reports a
//! [`ProbeOutcome`]. Every kind of probe error (spawn failure, DNS failure,
//! timeout, unreachable) is folded into `Failure`; the reason is logged at
//! debug level and discarded. There is no retry policy here.

mod ping;
mod scripted;
mod tcp;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::ProbeOutcome;

pub use ping::PingProber;
pub use scripted::ScriptedProber;
pub use tcp::TcpProber;

/// One-shot reachability check against a fixed target
#[async_trait]
pub trait Prober: Send + Sync {
    /// Run a single probe. Never fails; errors become `Failure`.
    async fn probe(&self) -> ProbeOutcome;

    /// Target this prober checks, for display
    fn target(&self) -> &str;
}

#[async_trait]
impl<P: Prober + ?Sized> Prober for Box<P> {
    async fn probe(&self) -> ProbeOutcome {
        (**self).probe().await
    }

    fn target(&self) -> &str {
        (**self).target()
    }
}

/// Transport used to check reachability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMethod {
    /// ICMP echo via the system `ping` utility
    #[default]
    Ping,
    /// TCP connect to `target:port`
    Tcp,
}

/// Settings needed to build a prober
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub target: String,
    pub method: ProbeMethod,
    pub port: u16,
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            target: "8.8.8.8".to_string(),
            method: ProbeMethod::Ping,
            port: 53,
            timeout_ms: 4000,
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Build the prober selected by `config.method`
pub fn build_prober(config: &ProbeConfig) -> Box<dyn Prober> {
    match config.method {
        ProbeMethod::Ping => Box::new(PingProber::new(&config.target, config.timeout())),
        ProbeMethod::Tcp => Box::new(TcpProber::new(&config.target, config.port, config.timeout())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_config_default() {
        let config = ProbeConfig::default();
        assert_eq!(config.target, "8.8.8.8");
        assert_eq!(config.method, ProbeMethod::Ping);
        assert_eq!(config.port, 53);
        assert_eq!(config.timeout(), Duration::from_secs(4));
    }

    #[test]
    fn test_build_prober_uses_target() {
        let mut config = ProbeConfig {
            target: "example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(build_prober(&config).target(), "example.com");

        config.method = ProbeMethod::Tcp;
        config.port = 443;
        assert_eq!(build_prober(&config).target(), "example.com:443");
    }

    #[test]
    fn test_probe_method_serde() {
        let method: ProbeMethod = serde_yaml::from_str("tcp").unwrap();
        assert_eq!(method, ProbeMethod::Tcp);
        assert_eq!(serde_yaml::to_string(&ProbeMethod::Ping).unwrap().trim(), "ping");
    }
}
