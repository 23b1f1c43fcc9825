//! CSV outage log.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use log::{debug, info};

use super::Recorder;
use crate::domain::OutageRecord;
use crate::error::{NetwatchError, Result};

/// Header row of the outage log
pub const HEADER: &str = "interruption_start,interruption_end";

/// File writer whose `flush` also syncs data to disk
#[derive(Debug)]
struct SyncedFile(File);

impl Write for SyncedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()?;
        self.0.sync_data()
    }
}

/// Writes outage records as CSV rows to any writer
pub struct CsvRecorder<W: Write> {
    writer: W,
    skip_header: bool,
}

impl<W: Write> std::fmt::Debug for CsvRecorder<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvRecorder")
            .field("skip_header", &self.skip_header)
            .finish_non_exhaustive()
    }
}

impl<W: Write> CsvRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            skip_header: false,
        }
    }

    /// Recorder for a sink that already has a header row
    pub fn without_header(writer: W) -> Self {
        Self {
            writer,
            skip_header: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }
}

impl CsvRecorder<Box<dyn Write + Send>> {
    /// Open the outage log at `path`; `-` means stdout.
    ///
    /// Truncates by default. With `append`, existing rows are kept and the
    /// header is only written if the file is empty.
    pub fn create(path: &Path, append: bool) -> Result<Self> {
        if path == Path::new("-") {
            debug!("Writing outage log to stdout");
            return Ok(Self::new(Box::new(io::stdout())));
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .map_err(|e| NetwatchError::Recorder(format!("cannot open {}: {}", path.display(), e)))?;

        let has_rows = append && file.metadata().map(|m| m.len() > 0).unwrap_or(false);
        info!(
            "Writing outage log to {} ({})",
            path.display(),
            if append { "append" } else { "truncate" }
        );

        let writer: Box<dyn Write + Send> = Box::new(SyncedFile(file));
        if has_rows {
            Ok(Self::without_header(writer))
        } else {
            Ok(Self::new(writer))
        }
    }
}

impl<W: Write + Send> Recorder for CsvRecorder<W> {
    fn write_header(&mut self) -> Result<()> {
        if self.skip_header {
            debug!("Outage log already has rows, skipping header");
            return Ok(());
        }
        self.write_line(HEADER)
            .map_err(|e| NetwatchError::Recorder(format!("cannot write header: {}", e)))
    }

    fn append(&mut self, record: &OutageRecord) -> Result<()> {
        let [start, end] = record.to_row();
        self.write_line(&format!("{},{}", start, end))
            .map_err(|e| NetwatchError::Recorder(format!("cannot append outage record: {}", e)))?;
        debug!("Recorded outage {} -> {}", start, end);
        Ok(())
    }
}
