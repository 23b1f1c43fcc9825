//! Outage log
//!
//! Append-only sink for [`OutageRecord`]s. The persisted format is CSV with
//! the header `interruption_start,interruption_end`. Both fields are
//! ISO-8601 timestamps, except that an outage still open when the process
//! stopped has `-` as its end.
//!
//! Every append is flushed before it returns. A failed write is fatal to the
//! monitor, since a lost record defeats the log.

mod csv;
mod memory;

use crate::domain::OutageRecord;
use crate::error::Result;

pub use self::csv::{CsvRecorder, HEADER};
pub use self::memory::MemoryRecorder;

/// Append-only outage sink
pub trait Recorder: Send {
    /// Write the header row. Called once at startup.
    fn write_header(&mut self) -> Result<()>;

    /// Append one record and flush it durably
    fn append(&mut self, record: &OutageRecord) -> Result<()>;
}

impl<R: Recorder + ?Sized> Recorder for Box<R> {
    fn write_header(&mut self) -> Result<()> {
        (**self).write_header()
    }

    fn append(&mut self, record: &OutageRecord) -> Result<()> {
        (**self).append(record)
    }
}
