/*!
 * Split engine: break over-long entries into timed fragments.
 *
 * Cut points are character positions immediately after a configurable set
 * of break characters. Fragments are sized so that their estimated reading
 * time stays at or below the duration ceiling, then the original time span
 * is re-allocated across them by the selected distribution method.
 */

use serde::{Deserialize, Serialize};

use crate::subtitle::{SubtitleEntry, SubtitleTrack};

/// Default cut characters: line breaks and common sentence/clause punctuation
pub const DEFAULT_SPLIT_CHARACTERS: &str = "\n.!?,;:";

/// Comparison slack for capped duration redistribution
const EPSILON: f64 = 1e-9;

/// Time-redistribution policy used when dividing one entry's span among
/// its fragments. The human-readable description is display metadata only.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    /// Each fragment gets time proportional to its character count
    #[default]
    Proportional,
    /// The span is divided evenly across fragments
    Uniform,
}

impl SplitMethod {
    // @returns: Capitalized method name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Proportional => "Proportional",
            Self::Uniform => "Uniform",
        }
    }

    /// Human-readable description for UI display
    pub fn description(&self) -> &'static str {
        match self {
            Self::Proportional => {
                "Each fragment receives time proportional to its share of the caption text"
            }
            Self::Uniform => "The original time span is divided evenly across all fragments",
        }
    }

    /// Distribute `span` seconds across fragments with the given character
    /// counts. Durations are raw; the caller quantizes boundaries and pins
    /// the final stop time.
    fn allocate(&self, span: f64, char_counts: &[usize]) -> Vec<f64> {
        match self {
            Self::Proportional => {
                let total: usize = char_counts.iter().sum();
                char_counts
                    .iter()
                    .map(|&count| span * count as f64 / total as f64)
                    .collect()
            }
            Self::Uniform => {
                vec![span / char_counts.len() as f64; char_counts.len()]
            }
        }
    }
}

/// Split every entry longer than `max_duration` seconds into fragments.
///
/// Entries at or below the ceiling pass through unchanged, as does any
/// entry whose caption yields fewer than two fragments. Fragment spans are
/// contiguous: the first fragment starts at the original start, the last
/// one stops exactly at the original stop, and intermediate boundaries are
/// quantized to whole milliseconds.
pub fn split_long_entries(
    track: &SubtitleTrack,
    max_duration: f64,
    split_characters: &str,
    method: SplitMethod,
) -> SubtitleTrack {
    let mut result: Vec<SubtitleEntry> = Vec::new();

    for entry in &track.entries {
        let span = entry.duration();
        if span <= max_duration {
            result.push(entry.clone());
            continue;
        }

        let fragments = fragment_caption(&entry.caption, split_characters, span, max_duration);
        if fragments.len() < 2 {
            // Degenerate split: nothing to divide, keep the entry as-is
            result.push(entry.clone());
            continue;
        }

        let char_counts: Vec<usize> = fragments.iter().map(|f| f.chars().count()).collect();
        let mut durations = method.allocate(span, &char_counts);
        cap_durations(&mut durations, max_duration);

        let mut start = entry.start;
        let last = fragments.len() - 1;
        for (index, (fragment, duration)) in fragments.into_iter().zip(durations).enumerate() {
            // The last fragment absorbs any rounding remainder so the
            // overall span ends exactly at the original stop time
            let stop = if index == last {
                entry.stop
            } else {
                (start + duration).quantize_ms()
            };
            result.push(SubtitleEntry::new(entry.ordinal, start, stop, fragment));
            start = stop;
        }
    }

    SubtitleTrack::from_entries(result)
}

/// Cut a caption into fragments whose character counts keep their
/// estimated reading time within the ceiling.
///
/// The per-fragment character budget is the share of the caption readable
/// in `max_duration` at the entry's overall reading rate. The walk cuts at
/// the last candidate inside the budget window; when the window contains
/// no candidate the cut is forced at the budget boundary. Fragments are
/// trimmed and empties dropped.
fn fragment_caption(
    caption: &str,
    split_characters: &str,
    span: f64,
    max_duration: f64,
) -> Vec<String> {
    let chars: Vec<char> = caption.chars().collect();
    let total = chars.len();
    if total == 0 {
        return Vec::new();
    }

    let budget = ((total as f64 * max_duration / span).floor() as usize).max(1);

    // Positions immediately after a split character; a cut at the very end
    // of the caption is no cut at all
    let candidates: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(index, c)| split_characters.contains(**c) && index + 1 < total)
        .map(|(index, _)| index + 1)
        .collect();

    let mut fragments: Vec<String> = Vec::new();
    let mut from = 0;

    while from < total {
        // Leading whitespace carries no reading time
        while from < total && chars[from].is_whitespace() {
            from += 1;
        }
        if from >= total {
            break;
        }

        let window_end = from + budget;
        if window_end >= total {
            fragments.push(chars[from..].iter().collect());
            break;
        }

        let cut = candidates
            .iter()
            .copied()
            .filter(|&c| c > from && c <= window_end)
            .last()
            .unwrap_or(window_end);

        fragments.push(chars[from..cut].iter().collect());
        from = cut;
    }

    fragments
        .iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

/// Clamp durations to the ceiling, pushing the excess onto fragments that
/// still have headroom (weighted by how much each has). Leaves durations
/// untouched when no fragment has headroom left.
fn cap_durations(durations: &mut [f64], max_duration: f64) {
    loop {
        let excess: f64 = durations
            .iter()
            .filter(|&&d| d > max_duration)
            .map(|d| d - max_duration)
            .sum();
        if excess <= EPSILON {
            return;
        }

        let headroom: f64 = durations
            .iter()
            .filter(|&&d| d < max_duration)
            .map(|d| max_duration - d)
            .sum();
        if headroom <= EPSILON {
            // Total span exceeds fragments * ceiling; nowhere to shift time
            return;
        }

        let shifted = excess.min(headroom);
        for duration in durations.iter_mut() {
            if *duration > max_duration {
                *duration = max_duration;
            } else if *duration < max_duration {
                *duration += shifted * (max_duration - *duration) / headroom;
            }
        }
    }
}
