use super::StatusSink;
use parking_lot::Mutex;
use std::time::Duration;

/// One captured status update
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRecord {
    pub at: Duration,
    pub percent: f64,
    pub precision: usize,
}

/// Sink that keeps every update in memory
#[derive(Debug, Default)]
pub struct RecordingStatus {
    records: Mutex<Vec<StatusRecord>>,
}

impl RecordingStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<StatusRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl StatusSink for RecordingStatus {
    fn report(&self, percent: f64, precision: usize, at: Duration) {
        self.records.lock().push(StatusRecord { at, percent, precision });
    }
}
