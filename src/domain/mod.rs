//! Domain types for netwatch
//!
//! - ProbeOutcome: Result of one reachability check (Success with latency, or Failure)
//! - OutageRecord: One outage interval as written to the outage log

pub mod outcome;
pub mod record;

pub use outcome::ProbeOutcome;
pub use record::{OutageEnd, OutageRecord, UNTERMINATED_SENTINEL, format_timestamp};
