//! Segment ranking - orders sentences by closeness to the phrase centroid
//!
//! Only the top tenth of ranked phrases (by default) contribute. Each
//! sentence is scored by how much of their normalized importance it fails
//! to cover; the least-missing sentence is the most central.

mod vector;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::OracleError;
use crate::oracle::{OracleOutput, PhraseOracle, SentenceSpan};
use crate::types::RankedSegment;

pub use vector::UnitVector;

/// Default share of ranked phrases kept: `phrase_count / 10`
pub const DEFAULT_PHRASE_DIVISOR: usize = 10;

/// A sentence span with the ids of the retained phrases it contains
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Index in original sentence order
    pub id: usize,
    pub start: usize,
    pub end: usize,
    pub phrase_ids: BTreeSet<usize>,
}

impl Segment {
    fn from_sentence(id: usize, sentence: &SentenceSpan) -> Self {
        Self {
            id,
            start: sentence.start,
            end: sentence.end,
            phrase_ids: BTreeSet::new(),
        }
    }

    fn contains(&self, start: usize, end: usize) -> bool {
        self.start <= start && end <= self.end
    }
}

/// Ranks a transcript's sentences using a phrase oracle
pub struct SegmentRanker<O> {
    oracle: O,
    phrase_divisor: usize,
}

impl<O: PhraseOracle> SegmentRanker<O> {
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            phrase_divisor: DEFAULT_PHRASE_DIVISOR,
        }
    }

    /// Keep `phrase_count / divisor` phrases (a zero divisor is treated as 1).
    pub fn with_phrase_divisor(mut self, divisor: usize) -> Self {
        self.phrase_divisor = divisor.max(1);
        self
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Sentences of `text`, most central first
    pub fn rank(&self, text: &str) -> Result<Vec<RankedSegment>, OracleError> {
        let output = self.oracle.rank_phrases_and_segment(text)?;
        Ok(rank_oracle_output(&output, self.phrase_divisor))
    }
}

/// Pure ranking step over a finished oracle result
pub fn rank_oracle_output(output: &OracleOutput, phrase_divisor: usize) -> Vec<RankedSegment> {
    let (unit, segments) = build_vectors(output, phrase_divisor);

    let mut scored: Vec<(usize, f64)> = segments
        .iter()
        .map(|segment| (segment.id, unit.distance(&segment.phrase_ids)))
        .collect();
    // Stable: equal distances keep sentence order.
    scored.sort_by(|a, b| a.1.total_cmp(&b.1));

    debug!(
        sentences = segments.len(),
        retained_phrases = unit.len(),
        degenerate = unit.is_degenerate(),
        "ranked segments"
    );

    scored
        .into_iter()
        .map(|(id, distance)| RankedSegment {
            id,
            text: output.sentences[id].text.clone(),
            distance,
        })
        .collect()
}

/// Builds the unit vector and per-segment phrase sets.
///
/// Phrases are visited in descending rank order (oracle order breaks ties)
/// and the ordinal in that order becomes the phrase id. Each chunk is
/// credited to the first sentence that fully contains it.
pub fn build_vectors(output: &OracleOutput, phrase_divisor: usize) -> (UnitVector, Vec<Segment>) {
    let mut segments: Vec<Segment> = output
        .sentences
        .iter()
        .enumerate()
        .map(|(id, sentence)| Segment::from_sentence(id, sentence))
        .collect();

    let mut order: Vec<usize> = (0..output.phrases.len()).collect();
    order.sort_by(|&a, &b| {
        output.phrases[b]
            .rank
            .total_cmp(&output.phrases[a].rank)
    });
    let phrase_limit = output.phrases.len() / phrase_divisor.max(1);

    let mut raw_scores = Vec::with_capacity(phrase_limit);
    for (phrase_id, &phrase_idx) in order.iter().take(phrase_limit).enumerate() {
        let phrase = &output.phrases[phrase_idx];
        raw_scores.push(phrase.rank);
        for chunk in &phrase.chunks {
            if let Some(segment) = segments
                .iter_mut()
                .find(|segment| segment.contains(chunk.start, chunk.end))
            {
                segment.phrase_ids.insert(phrase_id);
            }
        }
    }

    (UnitVector::from_scores(raw_scores), segments)
}
