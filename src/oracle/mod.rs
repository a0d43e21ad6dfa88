//! Phrase-graph oracle - sentence boundaries and ranked key phrases
//!
//! The segment ranker only needs sentence spans and ranked phrases located
//! by token span. Any linguistic toolkit can supply them through
//! [`PhraseOracle`]; [`TextRankOracle`] is the built-in implementation.

pub mod textrank;

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::OracleError;

pub use textrank::TextRankOracle;

/// Sentence boundary in oracle token space.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceSpan {
    /// First token index (inclusive)
    pub start: usize,
    /// Last token index (exclusive)
    pub end: usize,
    /// Verbatim sentence text as it appears in the source
    pub text: String,
}

/// A concrete occurrence of a phrase, located by token span.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// A ranked candidate phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    pub text: String,
    /// Importance score; larger is more central
    pub rank: f64,
    pub chunks: Vec<Chunk>,
}

/// Everything the ranker needs from one oracle call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OracleOutput {
    pub sentences: Vec<SentenceSpan>,
    pub phrases: Vec<Phrase>,
}

/// Capability that segments text into sentences and ranks its phrases.
pub trait PhraseOracle: Send + Sync {
    fn rank_phrases_and_segment(&self, text: &str) -> Result<OracleOutput, OracleError>;
}

impl<T: PhraseOracle + ?Sized> PhraseOracle for Arc<T> {
    fn rank_phrases_and_segment(&self, text: &str) -> Result<OracleOutput, OracleError> {
        (**self).rank_phrases_and_segment(text)
    }
}

/// Runs an oracle on a worker thread and gives up after a time budget.
///
/// Workers cannot be cancelled. After a timeout the worker keeps running
/// detached until the inner oracle returns, and its late result is dropped.
/// Nothing bounds how many such workers exist at once, so repeated timeouts
/// against a slow oracle accumulate threads; size the budget above the
/// oracle's normal latency.
pub struct BudgetedOracle {
    inner: Arc<dyn PhraseOracle>,
    budget: Duration,
}

impl BudgetedOracle {
    pub fn new(inner: Arc<dyn PhraseOracle>, budget: Duration) -> Self {
        Self { inner, budget }
    }
}

impl PhraseOracle for BudgetedOracle {
    fn rank_phrases_and_segment(&self, text: &str) -> Result<OracleOutput, OracleError> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let owned = text.to_string();
        thread::Builder::new()
            .name("phrase-oracle".to_string())
            .spawn(move || {
                let _ = tx.send(inner.rank_phrases_and_segment(&owned));
            })
            .map_err(|err| OracleError::Failed(err.to_string()))?;

        let budget_ms = u64::try_from(self.budget.as_millis()).unwrap_or(u64::MAX);
        match rx.recv_timeout(self.budget) {
            Ok(result) => {
                debug!(budget_ms, "oracle finished within budget");
                result
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(budget_ms, "oracle exceeded time budget");
                Err(OracleError::Timeout { budget_ms })
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(OracleError::WorkerLost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowOracle {
        delay: Duration,
    }

    impl PhraseOracle for SlowOracle {
        fn rank_phrases_and_segment(&self, _text: &str) -> Result<OracleOutput, OracleError> {
            thread::sleep(self.delay);
            Ok(OracleOutput::default())
        }
    }

    struct PanickingOracle;

    impl PhraseOracle for PanickingOracle {
        fn rank_phrases_and_segment(&self, _text: &str) -> Result<OracleOutput, OracleError> {
            panic!("oracle crashed");
        }
    }

    #[test]
    fn budget_allows_fast_oracle() {
        let oracle = BudgetedOracle::new(
            Arc::new(SlowOracle {
                delay: Duration::from_millis(1),
            }),
            Duration::from_secs(5),
        );
        assert!(oracle.rank_phrases_and_segment("Hi.").is_ok());
    }

    #[test]
    fn budget_times_out_slow_oracle() {
        let oracle = BudgetedOracle::new(
            Arc::new(SlowOracle {
                delay: Duration::from_millis(500),
            }),
            Duration::from_millis(10),
        );
        let err = oracle.rank_phrases_and_segment("Hi.").unwrap_err();
        assert!(matches!(err, OracleError::Timeout { budget_ms: 10 }));
    }

    #[test]
    fn crashed_worker_is_reported() {
        let oracle = BudgetedOracle::new(Arc::new(PanickingOracle), Duration::from_secs(5));
        let err = oracle.rank_phrases_and_segment("Hi.").unwrap_err();
        assert!(matches!(err, OracleError::WorkerLost));
    }
}
