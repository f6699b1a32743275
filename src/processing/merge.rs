/*!
 * Merge engine: collapse temporally close entries.
 */

use crate::subtitle::{SubtitleEntry, SubtitleTrack};

/// Merge consecutive entries whose gap is below `max_gap` seconds.
///
/// Single left-to-right sweep with one accumulator. An entry is absorbed
/// when the gap between the accumulator's stop and its start is
/// non-negative and strictly below `max_gap`; captions are joined with a
/// single space and the span extended to the absorbed entry's stop.
/// Overlapping entries (negative gap) are never merged. `max_gap = 0`
/// merges only exactly-touching entries.
pub fn merge_adjacent(track: &SubtitleTrack, max_gap: f64) -> SubtitleTrack {
    let Some(first) = track.entries.first() else {
        return SubtitleTrack::default();
    };

    let mut merged: Vec<SubtitleEntry> = Vec::new();
    let mut current = first.clone();

    for next in &track.entries[1..] {
        let gap = next.start - current.stop;

        if (gap >= 0.0 && gap < max_gap) || (max_gap == 0.0 && gap == 0.0) {
            current = SubtitleEntry::new(
                current.ordinal,
                current.start,
                next.stop,
                format!("{} {}", current.caption, next.caption),
            );
        } else {
            merged.push(current);
            current = next.clone();
        }
    }

    merged.push(current);
    SubtitleTrack::from_entries(merged)
}
