//! In-memory analysis results keyed by an auto-incrementing file id.
//!
//! Results live for the lifetime of the process; nothing is evicted.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::error::{HighlightError, Result};
use crate::types::{FileHighlights, TranscriptHighlights};

#[derive(Debug, Clone)]
enum Entry {
    Pending,
    Ready(Vec<TranscriptHighlights>),
}

#[derive(Debug, Default)]
struct StoreInner {
    next_id: u64,
    entries: HashMap<u64, Entry>,
}

/// Shared result store; safe to use from many request threads.
#[derive(Debug, Default)]
pub struct AnalysisStore {
    inner: Mutex<StoreInner>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id and marks it pending in one critical section.
    pub fn reserve(&self) -> Result<u64> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.insert(id, Entry::Pending);
        debug!(file_id = id, "reserved analysis slot");
        Ok(id)
    }

    /// Stores the finished results for a reserved id.
    pub fn complete(&self, id: u64, results: Vec<TranscriptHighlights>) -> Result<()> {
        let mut inner = self.lock()?;
        match inner.entries.get_mut(&id) {
            Some(entry) => {
                *entry = Entry::Ready(results);
                Ok(())
            }
            None => Err(HighlightError::NotFound(id)),
        }
    }

    /// Results for `id`; never waits for a running analysis.
    pub fn get(&self, id: u64) -> Result<FileHighlights> {
        let inner = self.lock()?;
        match inner.entries.get(&id) {
            Some(Entry::Ready(results)) => Ok(FileHighlights {
                file_id: id,
                results: results.clone(),
            }),
            Some(Entry::Pending) => Err(HighlightError::Pending(id)),
            None => Err(HighlightError::NotFound(id)),
        }
    }

    /// Number of ids handed out so far.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner.lock().map_err(|_| HighlightError::StorePoisoned)
    }
}
