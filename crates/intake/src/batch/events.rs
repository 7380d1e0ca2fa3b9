//! Progress events and the final batch summary.

use std::fmt;
use std::path::PathBuf;

use crate::models::{CandidateRecord, RecordStatus};

/// Progress events emitted while a batch runs.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Started {
        total_files: usize,
    },
    FileStarted {
        index: usize,
        path: PathBuf,
    },
    FileAdded {
        path: PathBuf,
        serial: u64,
        status: RecordStatus,
        record: CandidateRecord,
    },
    FileSkipped {
        path: PathBuf,
        reason: String,
    },
    FileFailed {
        path: PathBuf,
        error: String,
    },
    Finished(BatchSummary),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub added: usize,
    pub skipped: usize,
    pub failed: usize,
    /// The stop flag ended the batch before every file was processed.
    pub stopped: bool,
}

impl BatchSummary {
    pub fn processed(&self) -> usize {
        self.added + self.skipped + self.failed
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} files: {} added, {} skipped, {} failed",
            self.processed(),
            self.added,
            self.skipped,
            self.failed
        )?;
        if self.stopped {
            write!(f, " (stopped, {} not processed)", self.total - self.processed())?;
        }
        Ok(())
    }
}
