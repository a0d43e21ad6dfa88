//! Error types shared across the highlight pipeline.

use thiserror::Error;

/// Convenient alias for results returned by the highlighter library.
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Failures surfaced by `analyze` / `highlights`.
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("malformed transcript file: {0}")]
    MalformedInput(String),

    #[error("no analysis found for file {0}")]
    NotFound(u64),

    #[error("analysis for file {0} is still running")]
    Pending(u64),

    #[error("phrase oracle failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("analysis store lock was poisoned")]
    StorePoisoned,

    #[error("failed to read transcript file: {0}")]
    Io(#[from] std::io::Error),
}

impl HighlightError {
    /// True when the caller, not the service, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            HighlightError::MalformedInput(_)
                | HighlightError::NotFound(_)
                | HighlightError::Pending(_)
        )
    }
}

/// Reasons a ranked segment could not be mapped onto the timing table.
///
/// These are recovered per segment: the selector logs and moves on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignmentError {
    #[error("segment produced no tokens")]
    EmptySegment,

    #[error("segment text does not occur in the transcript")]
    SegmentNotInText,

    #[error("occurrence {expected} of token {token:?} not found in timing table (saw {seen})")]
    OccurrenceNotFound {
        token: String,
        expected: usize,
        seen: usize,
    },

    #[error("end anchor {anchor} lies beyond timing table of {len} entries")]
    AnchorOutOfBounds { anchor: usize, len: usize },

    #[error("no pronunciation entry between indices {from} and {to}")]
    NoPronunciation { from: usize, to: usize },

    #[error("pronunciation entry {index} carries no timestamp")]
    MissingTimestamp { index: usize },

    #[error("resolved span {start_time}..{end_time} is empty")]
    EmptySpan { start_time: f64, end_time: f64 },
}

/// Failures from a phrase oracle call.
#[derive(Debug, Clone, Error)]
pub enum OracleError {
    #[error("oracle exceeded its {budget_ms} ms budget")]
    Timeout { budget_ms: u64 },

    #[error("oracle worker exited without a result")]
    WorkerLost,

    #[error("{0}")]
    Failed(String),
}
