//! In-memory outage sink for tests.

use std::sync::{Arc, Mutex};

use super::Recorder;
use crate::domain::OutageRecord;
use crate::error::{NetwatchError, Result};

#[derive(Debug, Default)]
struct Inner {
    headers: usize,
    records: Vec<OutageRecord>,
    fail_appends: bool,
}

/// Cloneable handle to a shared in-memory log
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder whose appends always fail, to exercise the fatal sink path
    pub fn failing() -> Self {
        let recorder = Self::new();
        if let Ok(mut inner) = recorder.inner.lock() {
            inner.fail_appends = true;
        }
        recorder
    }

    /// Records appended so far
    pub fn records(&self) -> Vec<OutageRecord> {
        self.inner.lock().map(|i| i.records.clone()).unwrap_or_default()
    }

    /// Number of times the header was written
    pub fn headers_written(&self) -> usize {
        self.inner.lock().map(|i| i.headers).unwrap_or_default()
    }
}

impl Recorder for MemoryRecorder {
    fn write_header(&mut self) -> Result<()> {
        let mut inner = self.inner.lock().map_err(|e| NetwatchError::Recorder(e.to_string()))?;
        inner.headers += 1;
        Ok(())
    }

    fn append(&mut self, record: &OutageRecord) -> Result<()> {
        let mut inner = self.inner.lock().map_err(|e| NetwatchError::Recorder(e.to_string()))?;
        if inner.fail_appends {
            return Err(NetwatchError::Recorder("append rejected".to_string()));
        }
        inner.records.push(*record);
        Ok(())
    }
}
