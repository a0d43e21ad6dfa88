use crate::types::Clip;

use super::{OverlapPolicy, Selection};

pub(super) struct ClipAccumulator {
    clips: Vec<Clip>,
    duration: f64,
    target_duration: f64,
    policy: OverlapPolicy,
}

impl ClipAccumulator {
    pub(super) fn new(target_duration: f64, policy: OverlapPolicy) -> Self {
        Self {
            clips: Vec::new(),
            duration: 0.0,
            target_duration,
            policy,
        }
    }

    /// Adds a clip; true once the target has been met.
    ///
    /// Under `Merge` the union of the clips counts, so a clip that only
    /// repeats covered time adds nothing.
    pub(super) fn push(&mut self, clip: Clip) -> bool {
        match self.policy {
            OverlapPolicy::Keep => {
                self.duration += clip.duration();
                self.clips.push(clip);
            }
            OverlapPolicy::Merge => {
                insert_merged(&mut self.clips, clip);
                self.duration = self.clips.iter().map(Clip::duration).sum();
            }
        }
        self.duration >= self.target_duration
    }

    pub(super) fn finish(mut self) -> Selection {
        self.clips.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        Selection {
            clips: self.clips,
            duration: self.duration,
        }
    }
}

/// Inserts into a sorted, disjoint clip list, absorbing every overlap.
fn insert_merged(merged: &mut Vec<Clip>, mut clip: Clip) {
    let first = merged.partition_point(|existing| existing.end_time <= clip.start_time);
    let mut last = first;
    while last < merged.len() && merged[last].start_time < clip.end_time {
        clip.start_time = clip.start_time.min(merged[last].start_time);
        clip.end_time = clip.end_time.max(merged[last].end_time);
        last += 1;
    }
    merged.splice(first..last, [clip]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(start_time: f64, end_time: f64) -> Clip {
        Clip {
            start_time,
            end_time,
        }
    }

    #[test]
    fn merge_counts_repeated_time_once() {
        let mut acc = ClipAccumulator::new(2.0, OverlapPolicy::Merge);
        assert!(!acc.push(clip(0.0, 1.5)));
        assert!(!acc.push(clip(0.0, 1.5)));
        assert!(acc.push(clip(1.5, 3.5)));
        let selection = acc.finish();
        assert_eq!(selection.clips, vec![clip(0.0, 1.5), clip(1.5, 3.5)]);
        assert_eq!(selection.duration, 3.5);
    }

    #[test]
    fn merge_absorbs_every_overlapped_clip() {
        let mut acc = ClipAccumulator::new(100.0, OverlapPolicy::Merge);
        acc.push(clip(4.0, 5.0));
        acc.push(clip(0.0, 1.0));
        acc.push(clip(2.0, 3.0));
        acc.push(clip(0.5, 4.5));
        let selection = acc.finish();
        assert_eq!(selection.clips, vec![clip(0.0, 5.0)]);
        assert_eq!(selection.duration, 5.0);
    }

    #[test]
    fn keep_counts_raw_sum() {
        let mut acc = ClipAccumulator::new(2.0, OverlapPolicy::Keep);
        assert!(!acc.push(clip(0.0, 1.5)));
        assert!(acc.push(clip(0.0, 1.5)));
        let selection = acc.finish();
        assert_eq!(selection.clips.len(), 2);
        assert_eq!(selection.duration, 3.0);
    }
}
