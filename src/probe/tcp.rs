// TCP connect probe, for networks that drop ICMP or hosts without a `ping` binary

use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::debug;
use tokio::net::TcpStream;

use super::Prober;
use crate::domain::ProbeOutcome;

/// Opens and drops one TCP connection per probe
#[derive(Debug, Clone)]
pub struct TcpProber {
    address: String,
    timeout: Duration,
}

impl TcpProber {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Self {
        Self {
            address: format!("{}:{}", host, port),
            timeout,
        }
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self) -> ProbeOutcome {
        let started = Instant::now();
        match tokio::time::timeout(self.timeout, TcpStream::connect(&self.address)).await {
            Ok(Ok(_stream)) => ProbeOutcome::success(started.elapsed()),
            Ok(Err(e)) => {
                debug!("connect to {} failed: {}", self.address, e);
                ProbeOutcome::Failure
            }
            Err(_) => {
                debug!("connect to {} timed out after {:?}", self.address, self.timeout);
                ProbeOutcome::Failure
            }
        }
    }

    fn target(&self) -> &str {
        &self.address
    }
}
