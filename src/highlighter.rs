//! Request surface: `analyze` an uploaded transcript file, then look up
//! its `highlights` by id.

use std::any::Any;
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{error, info};

use crate::config::HighlightConfig;
use crate::error::{OracleError, Result};
use crate::oracle::{BudgetedOracle, PhraseOracle, TextRankOracle};
use crate::ranking::SegmentRanker;
use crate::selection::{select_highlights, OverlapPolicy};
use crate::store::AnalysisStore;
use crate::transcript::parse_transcript_file;
use crate::types::{
    FileHighlights, RankedSegment, Transcript, TranscriptFile, TranscriptHighlights, WordTimeEntry,
};

/// Ranks, aligns, and stores highlight reels for uploaded transcripts.
pub struct Highlighter {
    ranker: SegmentRanker<Arc<dyn PhraseOracle>>,
    store: AnalysisStore,
    overlap_policy: OverlapPolicy,
}

impl Highlighter {
    /// Uses the built-in TextRank oracle.
    pub fn new(config: &HighlightConfig) -> Self {
        let oracle = Arc::new(TextRankOracle::with_window(config.cooccurrence_window));
        Self::with_oracle(oracle, config)
    }

    /// Uses a caller-supplied oracle, time-budgeted when the config asks for it.
    pub fn with_oracle(oracle: Arc<dyn PhraseOracle>, config: &HighlightConfig) -> Self {
        let oracle: Arc<dyn PhraseOracle> = match config.oracle_budget() {
            Some(budget) => Arc::new(BudgetedOracle::new(oracle, budget)),
            None => oracle,
        };
        Self {
            ranker: SegmentRanker::new(oracle).with_phrase_divisor(config.phrase_divisor),
            store: AnalysisStore::new(),
            overlap_policy: config.overlap_policy,
        }
    }

    /// Parses and analyzes an uploaded file, returning its new id.
    ///
    /// Malformed input is rejected before an id is allocated.
    pub fn analyze<R: Read>(&self, target_seconds: u32, reader: R) -> Result<u64> {
        let file = parse_transcript_file(reader)?;
        self.analyze_file(target_seconds, &file)
    }

    /// Analyzes an already parsed file, returning its new id.
    pub fn analyze_file(&self, target_seconds: u32, file: &TranscriptFile) -> Result<u64> {
        let file_id = self.store.reserve()?;
        info!(
            file_id,
            transcripts = file.transcripts.len(),
            items = file.items.len(),
            target_seconds,
            "analyzing transcript file"
        );

        let results: Vec<TranscriptHighlights> = file
            .transcripts
            .iter()
            .map(|transcript| {
                self.highlight_transcript(transcript, &file.items, f64::from(target_seconds))
            })
            .collect();

        self.store.complete(file_id, results)?;
        info!(file_id, "analysis stored");
        Ok(file_id)
    }

    /// Stored results for `file_id`.
    pub fn highlights(&self, file_id: u64) -> Result<FileHighlights> {
        self.store.get(file_id)
    }

    /// Sentences of `text`, most central first.
    pub fn rank(&self, text: &str) -> std::result::Result<Vec<RankedSegment>, OracleError> {
        self.ranker.rank(text)
    }

    /// Highlights for one transcript; oracle failures and panics yield an
    /// empty reel.
    pub fn highlight_transcript(
        &self,
        transcript: &Transcript,
        items: &[WordTimeEntry],
        target_duration: f64,
    ) -> TranscriptHighlights {
        let transcript_id = transcript.public_id();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.build_reel(transcript, items, target_duration)
        }));
        match outcome {
            Ok(reel) => reel,
            Err(payload) => {
                error!(
                    transcript_id,
                    panic = panic_message(payload.as_ref()),
                    "analysis panicked; transcript skipped"
                );
                TranscriptHighlights::empty(transcript_id)
            }
        }
    }

    fn build_reel(
        &self,
        transcript: &Transcript,
        items: &[WordTimeEntry],
        target_duration: f64,
    ) -> TranscriptHighlights {
        let transcript_id = transcript.public_id();
        let ranked = match self.ranker.rank(&transcript.text) {
            Ok(ranked) => ranked,
            Err(err) => {
                error!(transcript_id, error = %err, "ranking failed; transcript skipped");
                return TranscriptHighlights::empty(transcript_id);
            }
        };

        let selection = select_highlights(
            &ranked,
            items,
            &transcript.text,
            target_duration,
            self.overlap_policy,
        );
        info!(
            transcript_id,
            clips = selection.clips.len(),
            duration = selection.duration,
            "selected highlights"
        );
        TranscriptHighlights {
            transcript_id,
            duration: selection.duration,
            highlights: selection.clips,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
