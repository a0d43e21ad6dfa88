//! Core types for the highlight reel pipeline

use serde::{Deserialize, Serialize};

/// One transcript from an uploaded file
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// 0-based ordinal within the source file
    pub index: usize,
    pub text: String,
}

impl Transcript {
    /// 1-based id used in exported results
    pub fn public_id(&self) -> usize {
        self.index + 1
    }
}

/// Type tag of a timing table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// A spoken word with reliable timestamps
    Pronunciation,
    /// Punctuation or filler without reliable timing
    Other(String),
}

impl EntryKind {
    pub fn from_tag(tag: &str) -> Self {
        if tag == "pronunciation" {
            EntryKind::Pronunciation
        } else {
            EntryKind::Other(tag.to_string())
        }
    }
}

/// Alternative transcription of a single timing table entry
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    pub content: String,
    pub confidence: Option<f64>,
}

/// One element of the word-level timing table
#[derive(Debug, Clone, PartialEq)]
pub struct WordTimeEntry {
    pub start_time: Option<f64>, // seconds
    pub end_time: Option<f64>,   // seconds
    pub kind: EntryKind,
    pub alternatives: Vec<Alternative>,
}

impl WordTimeEntry {
    /// Builds a timed spoken word
    pub fn word(content: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            start_time: Some(start_time),
            end_time: Some(end_time),
            kind: EntryKind::Pronunciation,
            alternatives: vec![Alternative {
                content: content.into(),
                confidence: None,
            }],
        }
    }

    /// Builds an untimed punctuation marker
    pub fn punctuation(content: impl Into<String>) -> Self {
        Self {
            start_time: None,
            end_time: None,
            kind: EntryKind::Other("punctuation".to_string()),
            alternatives: vec![Alternative {
                content: content.into(),
                confidence: None,
            }],
        }
    }

    /// Text of the top alternative, if any
    pub fn content(&self) -> Option<&str> {
        self.alternatives.first().map(|alt| alt.content.as_str())
    }

    pub fn is_pronunciation(&self) -> bool {
        self.kind == EntryKind::Pronunciation
    }
}

/// A parsed upload: every transcript plus the shared timing table
#[derive(Debug, Clone, Default)]
pub struct TranscriptFile {
    pub transcripts: Vec<Transcript>,
    pub items: Vec<WordTimeEntry>,
}

/// A selected highlight span on the audio timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub start_time: f64, // seconds
    pub end_time: f64,   // seconds
}

impl Clip {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Highlights selected for a single transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptHighlights {
    /// 1-based transcript id
    pub transcript_id: usize,
    /// Sum of the returned clip durations, in seconds
    pub duration: f64,
    pub highlights: Vec<Clip>,
}

impl TranscriptHighlights {
    pub fn empty(transcript_id: usize) -> Self {
        Self {
            transcript_id,
            duration: 0.0,
            highlights: Vec::new(),
        }
    }
}

/// Lookup result for one analyzed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileHighlights {
    pub file_id: u64,
    pub results: Vec<TranscriptHighlights>,
}

/// A sentence in ranked order with its centrality distance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSegment {
    /// Index of the sentence in original order
    pub id: usize,
    pub text: String,
    /// Residual phrase mass missing from this sentence (lower = more central)
    pub distance: f64,
}
