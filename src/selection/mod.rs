//! Highlight selection - greedily fills the reel with the most central sentences
//!
//! Ranked sentences are aligned one by one and appended until the
//! accumulated clip time reaches the requested duration. Sentences that
//! cannot be aligned are skipped. The final clips are chronological.

mod accumulator;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::alignment::TimingAligner;
use crate::types::{Clip, RankedSegment, WordTimeEntry};

use accumulator::ClipAccumulator;

/// What to do when two selected sentences map to overlapping spans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Return clips exactly as aligned
    #[default]
    Keep,
    /// Merge overlapping clips and report the union length
    Merge,
}

/// Chosen clips in chronological order and their total length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub clips: Vec<Clip>,
    pub duration: f64, // seconds
}

/// Select highlight clips for one transcript.
///
/// # Arguments
/// * `ranked` - sentences, most central first
/// * `timing_table` - word-level timing entries in audio order
/// * `full_text` - the transcript the sentences were taken from
/// * `target_duration` - stop once this many seconds are selected
/// * `policy` - overlap handling applied after sorting
pub fn select_highlights(
    ranked: &[RankedSegment],
    timing_table: &[WordTimeEntry],
    full_text: &str,
    target_duration: f64,
    policy: OverlapPolicy,
) -> Selection {
    let aligner = TimingAligner::new(timing_table, full_text);
    let mut accumulator = ClipAccumulator::new(target_duration, policy);

    for segment in ranked {
        match aligner.locate(&segment.text) {
            Ok(clip) => {
                debug!(
                    segment = segment.id,
                    start_time = clip.start_time,
                    end_time = clip.end_time,
                    "selected clip"
                );
                if accumulator.push(clip) {
                    break;
                }
            }
            Err(err) => {
                warn!(segment = segment.id, error = %err, "skipping unaligned segment");
            }
        }
    }

    accumulator.finish()
}
