//! Timing alignment - maps a ranked sentence back onto the word timing table
//!
//! The sentence's first token is located by occurrence count: if it appears
//! `n` times in the transcript before the sentence, the sentence starts at
//! the `n + 1`-th matching table entry. Timestamps come from the nearest
//! pronunciation entries inside the anchored range.

use crate::error::AlignmentError;
use crate::tokenize::tokenize;
use crate::types::{Clip, WordTimeEntry};

/// Table indices bracketing a located segment (both inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
    pub start: usize,
    pub end: usize,
}

/// Locates sentences of one transcript inside its timing table.
#[derive(Debug, Clone, Copy)]
pub struct TimingAligner<'a> {
    table: &'a [WordTimeEntry],
    search_text: &'a str,
}

impl<'a> TimingAligner<'a> {
    pub fn new(table: &'a [WordTimeEntry], search_text: &'a str) -> Self {
        Self { table, search_text }
    }

    /// Start and end timestamps of `segment_text`.
    pub fn locate(&self, segment_text: &str) -> Result<Clip, AlignmentError> {
        let anchors = self.anchors(segment_text)?;
        let start_time = self.forward_time(anchors)?;
        let end_time = self.backward_time(anchors)?;
        if end_time <= start_time {
            return Err(AlignmentError::EmptySpan {
                start_time,
                end_time,
            });
        }
        Ok(Clip {
            start_time,
            end_time,
        })
    }

    /// Table indices of the segment's first and last tokens.
    pub fn anchors(&self, segment_text: &str) -> Result<Anchors, AlignmentError> {
        let tokens = tokenize(segment_text);
        let first_token = *tokens.first().ok_or(AlignmentError::EmptySegment)?;

        let offset = self
            .search_text
            .find(segment_text)
            .ok_or(AlignmentError::SegmentNotInText)?;
        let preceding = tokenize(&self.search_text[..offset])
            .into_iter()
            .filter(|token| *token == first_token)
            .count();
        let expected = preceding + 1;

        let mut seen = 0;
        let start = self
            .table
            .iter()
            .position(|entry| {
                if entry.content() == Some(first_token) {
                    seen += 1;
                }
                seen == expected
            })
            .ok_or_else(|| AlignmentError::OccurrenceNotFound {
                token: first_token.to_string(),
                expected,
                seen,
            })?;

        let end = start + tokens.len() - 1;
        if end >= self.table.len() {
            return Err(AlignmentError::AnchorOutOfBounds {
                anchor: end,
                len: self.table.len(),
            });
        }
        Ok(Anchors { start, end })
    }

    fn forward_time(&self, anchors: Anchors) -> Result<f64, AlignmentError> {
        let index = (anchors.start..=anchors.end)
            .find(|&idx| self.table[idx].is_pronunciation())
            .ok_or(AlignmentError::NoPronunciation {
                from: anchors.start,
                to: anchors.end,
            })?;
        self.table[index]
            .start_time
            .ok_or(AlignmentError::MissingTimestamp { index })
    }

    fn backward_time(&self, anchors: Anchors) -> Result<f64, AlignmentError> {
        let index = (anchors.start..=anchors.end)
            .rev()
            .find(|&idx| self.table[idx].is_pronunciation())
            .ok_or(AlignmentError::NoPronunciation {
                from: anchors.end,
                to: anchors.start,
            })?;
        self.table[index]
            .end_time
            .ok_or(AlignmentError::MissingTimestamp { index })
    }
}

/// One-shot form of [`TimingAligner::locate`].
pub fn locate(
    segment_text: &str,
    timing_table: &[WordTimeEntry],
    search_text: &str,
) -> Result<Clip, AlignmentError> {
    TimingAligner::new(timing_table, search_text).locate(segment_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "The cat sat. The cat ran far.";

    fn cat_table() -> Vec<WordTimeEntry> {
        let mut table = Vec::new();
        let mut t = 0.0;
        for word in ["The", "cat", "sat", ".", "The", "cat", "ran", "far", "."] {
            if word == "." {
                table.push(WordTimeEntry::punctuation(word));
            } else {
                table.push(WordTimeEntry::word(word, t, t + 0.5));
                t += 0.5;
            }
        }
        table
    }

    #[test]
    fn locates_first_sentence() {
        let table = cat_table();
        let clip = locate("The cat sat.", &table, TEXT).unwrap();
        assert_eq!(clip.start_time, 0.0);
        assert_eq!(clip.end_time, 1.5);
    }

    #[test]
    fn locates_repeated_first_token_by_occurrence() {
        let table = cat_table();
        let aligner = TimingAligner::new(&table, TEXT);
        let anchors = aligner.anchors("The cat ran far.").unwrap();
        assert_eq!(anchors, Anchors { start: 4, end: 8 });
        let clip = aligner.locate("The cat ran far.").unwrap();
        assert_eq!(clip.start_time, 1.5);
        assert_eq!(clip.end_time, 3.5);
    }

    #[test]
    fn missing_occurrence_is_reported() {
        let table = cat_table();
        let err = locate("Dogs bark.", &table, "Dogs bark.").unwrap_err();
        assert_eq!(
            err,
            AlignmentError::OccurrenceNotFound {
                token: "Dogs".to_string(),
                expected: 1,
                seen: 0,
            }
        );
    }

    #[test]
    fn segment_absent_from_text_is_reported() {
        let table = cat_table();
        let err = locate("The bird flew.", &table, TEXT).unwrap_err();
        assert_eq!(err, AlignmentError::SegmentNotInText);
    }

    #[test]
    fn end_anchor_past_table_is_reported() {
        let table = cat_table();
        let text = "The cat ran far and wide.";
        let truncated = &table[4..8];
        let err = locate(text, truncated, text).unwrap_err();
        assert!(matches!(err, AlignmentError::AnchorOutOfBounds { .. }));
    }

    #[test]
    fn punctuation_only_range_has_no_pronunciation() {
        let table = vec![
            WordTimeEntry::punctuation("!"),
            WordTimeEntry::punctuation("!"),
        ];
        let err = locate("!!", &table, "!!").unwrap_err();
        assert!(matches!(err, AlignmentError::NoPronunciation { .. }));
    }

    #[test]
    fn empty_segment_is_reported() {
        let table = cat_table();
        assert_eq!(
            locate("   ", &table, TEXT).unwrap_err(),
            AlignmentError::EmptySegment
        );
    }

    #[test]
    fn untimed_pronunciation_is_reported() {
        let mut table = cat_table();
        table[0].start_time = None;
        let err = locate("The cat sat.", &table, TEXT).unwrap_err();
        assert_eq!(err, AlignmentError::MissingTimestamp { index: 0 });
    }
}
