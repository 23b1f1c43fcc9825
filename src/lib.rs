//! netwatch - connectivity outage logger
//!
//! Probes a target host at a fixed interval and records every interval of
//! lost connectivity to an append-only CSV log, including an outage still in
//! progress when the process is stopped.

pub mod config;
pub mod console;
pub mod domain;
pub mod error;
pub mod monitor;
pub mod probe;
pub mod recorder;
pub mod tracker;

pub use error::{NetwatchError, Result};
