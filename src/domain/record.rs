//! Outage records persisted to the outage log.
//!
//! An outage is written exactly once, either when connectivity comes back
//! (closed record) or when the process is stopped mid-outage (unterminated
//! record). The end field of an unterminated record is the literal `-`,
//! which never parses as an ISO-8601 timestamp, so consumers can tell an
//! open outage apart from a malformed row.

use chrono::{DateTime, Local, SecondsFormat};
use std::fmt;
use std::time::Duration;

/// Field value written for an outage whose end was never observed.
pub const UNTERMINATED_SENTINEL: &str = "-";

/// Render a timestamp the way the outage log stores it.
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// End of an outage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutageEnd {
    /// Connectivity was observed again at this time
    At(DateTime<Local>),
    /// Process stopped before connectivity came back
    Unterminated,
}

impl OutageEnd {
    /// CSV field for this end
    pub fn as_field(&self) -> String {
        match self {
            OutageEnd::At(ts) => format_timestamp(ts),
            OutageEnd::Unterminated => UNTERMINATED_SENTINEL.to_string(),
        }
    }
}

impl fmt::Display for OutageEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_field())
    }
}

/// One outage interval. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutageRecord {
    start: DateTime<Local>,
    end: OutageEnd,
}

impl OutageRecord {
    /// Outage that ended when connectivity was restored
    pub fn closed(start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self {
            start,
            end: OutageEnd::At(end),
        }
    }

    /// Outage still in progress when the process stopped
    pub fn unterminated(start: DateTime<Local>) -> Self {
        Self {
            start,
            end: OutageEnd::Unterminated,
        }
    }

    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub fn end(&self) -> OutageEnd {
        self.end
    }

    pub fn is_unterminated(&self) -> bool {
        self.end == OutageEnd::Unterminated
    }

    /// Length of a closed outage; `None` for unterminated ones
    pub fn duration(&self) -> Option<Duration> {
        match self.end {
            OutageEnd::At(end) => (end - self.start).to_std().ok(),
            OutageEnd::Unterminated => None,
        }
    }

    /// The two fields written to the log: `interruption_start`, `interruption_end`
    pub fn to_row(&self) -> [String; 2] {
        [format_timestamp(&self.start), self.end.as_field()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn ts(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_closed_record() {
        let record = OutageRecord::closed(ts(0), ts(90));
        assert_eq!(record.start(), ts(0));
        assert_eq!(record.end(), OutageEnd::At(ts(90)));
        assert!(!record.is_unterminated());
        assert_eq!(record.duration(), Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_unterminated_record() {
        let record = OutageRecord::unterminated(ts(5));
        assert!(record.is_unterminated());
        assert_eq!(record.duration(), None);
        assert_eq!(record.to_row()[1], "-");
    }

    #[test]
    fn test_sentinel_is_not_a_timestamp() {
        assert!(DateTime::<FixedOffset>::parse_from_rfc3339(UNTERMINATED_SENTINEL).is_err());
        assert!(UNTERMINATED_SENTINEL.parse::<DateTime<FixedOffset>>().is_err());
    }

    #[test]
    fn test_row_timestamps_parse_back() {
        let record = OutageRecord::closed(ts(0), ts(30));
        let [start, end] = record.to_row();
        let start = DateTime::parse_from_rfc3339(&start).unwrap();
        let end = DateTime::parse_from_rfc3339(&end).unwrap();
        assert_eq!(start.timestamp(), ts(0).timestamp());
        assert_eq!(end.timestamp(), ts(30).timestamp());
    }

    #[test]
    fn test_outage_end_display() {
        assert_eq!(OutageEnd::Unterminated.to_string(), "-");
        assert_eq!(OutageEnd::At(ts(0)).to_string(), format_timestamp(&ts(0)));
    }
}
