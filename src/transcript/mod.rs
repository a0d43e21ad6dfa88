//! Transcript ingest - parses uploaded transcription JSON
//!
//! The upload carries one or more full-text transcripts and a single
//! word-level timing table shared by all of them. Shape problems are
//! reported before any analysis starts.

use std::io::Read;

use serde::Deserialize;

use crate::error::{HighlightError, Result};
use crate::types::{Alternative, EntryKind, Transcript, TranscriptFile, WordTimeEntry};

#[derive(Debug, Deserialize)]
struct RawFile {
    results: RawResults,
}

#[derive(Debug, Deserialize)]
struct RawResults {
    transcripts: Vec<RawTranscript>,
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawTranscript {
    transcript: String,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    start_time: Option<Numeric>,
    #[serde(default)]
    end_time: Option<Numeric>,
    alternatives: Vec<RawAlternative>,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct RawAlternative {
    content: String,
    #[serde(default)]
    confidence: Option<Numeric>,
}

/// Transcription services emit timings both as JSON numbers and as strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn to_f64(&self, field: &str, index: usize) -> Result<f64> {
        match self {
            Numeric::Number(value) => Ok(*value),
            Numeric::Text(raw) => raw.trim().parse::<f64>().map_err(|_| {
                HighlightError::MalformedInput(format!(
                    "item {index} has non-numeric {field} {raw:?}"
                ))
            }),
        }
    }
}

/// Parse an uploaded transcript file.
///
/// # Errors
/// `MalformedInput` when a required key is missing or a value has the wrong
/// shape, `Io` when the reader itself fails.
pub fn parse_transcript_file<R: Read>(reader: R) -> Result<TranscriptFile> {
    let raw: RawFile = serde_json::from_reader(reader).map_err(|err| {
        if err.is_io() {
            HighlightError::Io(err.into())
        } else {
            HighlightError::MalformedInput(err.to_string())
        }
    })?;
    convert(raw.results)
}

/// Parse an uploaded transcript file held in memory.
pub fn parse_transcript_str(raw: &str) -> Result<TranscriptFile> {
    parse_transcript_file(raw.as_bytes())
}

fn convert(results: RawResults) -> Result<TranscriptFile> {
    let transcripts = results
        .transcripts
        .into_iter()
        .enumerate()
        .map(|(index, raw)| Transcript {
            index,
            text: raw.transcript,
        })
        .collect();

    let items = results
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| convert_item(index, item))
        .collect::<Result<Vec<_>>>()?;

    Ok(TranscriptFile { transcripts, items })
}

fn convert_item(index: usize, item: RawItem) -> Result<WordTimeEntry> {
    let start_time = item
        .start_time
        .as_ref()
        .map(|value| value.to_f64("start_time", index))
        .transpose()?;
    let end_time = item
        .end_time
        .as_ref()
        .map(|value| value.to_f64("end_time", index))
        .transpose()?;
    let alternatives = item
        .alternatives
        .into_iter()
        .map(|alt| {
            let confidence = alt
                .confidence
                .as_ref()
                .map(|value| value.to_f64("confidence", index))
                .transpose()?;
            Ok(Alternative {
                content: alt.content,
                confidence,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(WordTimeEntry {
        start_time,
        end_time,
        kind: EntryKind::from_tag(&item.kind),
        alternatives,
    })
}
