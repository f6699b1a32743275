use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;
use log::{warn, debug};

use crate::errors::SubtitleError;
use crate::timecode::Timecode;

// @module: Subtitle data model, SRT parser and serializers

// @const: Runs of whitespace, including line breaks
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Instructional header emitted at the top of the annotated output. The
/// annotated file is handed to an external text-processing step (e.g. a
/// translator) and reassembled elsewhere using the #N# markers.
pub const ANNOTATED_PREAMBLE: &str = "\
Translate the following text in full, making sure that:
1. The original markers (#1#, #2#, #3#, etc.) are kept exactly in the same positions, never moved or removed.
2. The translation is accurate, natural and fluid, in a spoken register suitable for video narration.
3. The translated text occupies roughly the same speaking time as the original, so each caption stays in sync with the video.
4. Spelling, punctuation and capitalization errors are fully corrected.
5. No additional formatting is introduced: no lists, no artificial line breaks. Return the text as one continuous block, exactly like the original, only translated and corrected.
Return only the continuous translated text, without comments or extra formatting.

";

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    // @field: 1-based position, reassigned on serialization
    pub ordinal: usize,

    // @field: Start time
    pub start: Timecode,

    // @field: Stop time
    pub stop: Timecode,

    // @field: Caption text, may contain internal line breaks
    pub caption: String,
}

impl SubtitleEntry {
    /// Create a new subtitle entry
    pub fn new(ordinal: usize, start: Timecode, stop: Timecode, caption: String) -> Self {
        SubtitleEntry {
            ordinal,
            start,
            stop,
            caption,
        }
    }

    /// Duration of this entry in seconds
    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }

    /// Caption with all internal line breaks and whitespace runs
    /// collapsed to single spaces
    pub fn flattened_caption(&self) -> String {
        WHITESPACE_RUN.replace_all(&self.caption, " ").into_owned()
    }
}

/// Ordered sequence of subtitle entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleTrack {
    /// Entries in input order; the parser does not re-sort
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleTrack {
    /// Create a track from existing entries
    pub fn from_entries(entries: Vec<SubtitleEntry>) -> Self {
        SubtitleTrack { entries }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the track has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse SRT content into a track
    ///
    /// Tolerant of malformed input: a block whose timing line does not
    /// parse is skipped (the scan advances past the index and timing
    /// lines), a block with an empty caption is dropped, and anything
    /// outside a block that is not a bare-number index line is ignored.
    /// Never fails; returns whatever valid blocks were found.
    pub fn parse(content: &str) -> Self {
        let lines: Vec<&str> = content.lines().collect();
        let mut entries: Vec<SubtitleEntry> = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].trim();

            // A line consisting solely of digits opens a new block. The
            // ordinal itself is not trusted; output renumbers anyway.
            if line.is_empty() || !line.chars().all(|c| c.is_ascii_digit()) {
                i += 1;
                continue;
            }

            if i + 1 >= lines.len() {
                break;
            }

            let timing_line = lines[i + 1].trim();
            let (start, stop) = match Self::parse_timing(timing_line) {
                Ok(times) => times,
                Err(err) => {
                    warn!("Skipping malformed block at line {}: {}", i + 2, err);
                    i += 2;
                    continue;
                }
            };

            // Collect caption lines up to the next blank line or EOF
            let mut caption_lines: Vec<&str> = Vec::new();
            i += 2;
            while i < lines.len() {
                let caption_line = lines[i].trim();
                if caption_line.is_empty() {
                    break;
                }
                caption_lines.push(caption_line);
                i += 1;
            }

            let caption = caption_lines.join("\n");
            if caption.is_empty() {
                debug!("Dropping block with empty caption before line {}", i + 1);
                continue;
            }

            entries.push(SubtitleEntry::new(entries.len() + 1, start, stop, caption));
        }

        SubtitleTrack { entries }
    }

    /// Parse a `<time> --> <time>` timing line
    pub fn parse_timing(line: &str) -> Result<(Timecode, Timecode), SubtitleError> {
        let parts: Vec<&str> = line.split("-->").collect();
        if parts.len() != 2 {
            return Err(SubtitleError::InvalidTimingLine(line.to_string()));
        }

        let start = Timecode::parse(parts[0])?;
        let stop = Timecode::parse(parts[1])?;
        Ok((start, stop))
    }

    /// Serialize to standard SRT form
    ///
    /// Entries are renumbered 1..N by output position. A blank line
    /// separates entries; there is no trailing blank line after the last.
    pub fn to_srt_string(&self) -> String {
        let mut result = String::new();

        for (index, entry) in self.entries.iter().enumerate() {
            result.push_str(&format!(
                "{}\n{} --> {}\n{}\n",
                index + 1,
                entry.start,
                entry.stop,
                entry.caption
            ));
            if index < self.entries.len() - 1 {
                result.push('\n');
            }
        }

        result
    }

    /// Serialize to the annotated form used for translation round-trips
    ///
    /// A fixed instructional preamble is followed by `#N#<caption> ` for
    /// every entry, captions flattened to single-space whitespace. This
    /// output is consumed by an external tool and never re-parsed here.
    pub fn to_annotated_string(&self) -> String {
        let mut result = String::from(ANNOTATED_PREAMBLE);

        for (index, entry) in self.entries.iter().enumerate() {
            result.push_str(&format!("#{}#{} ", index + 1, entry.flattened_caption()));
        }

        result
    }
}

impl fmt::Display for SubtitleTrack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_srt_string())
    }
}

/// Summary statistics over a track, for the CLI report
#[derive(Debug, Clone, PartialEq)]
pub struct TrackStats {
    /// Number of entries
    pub entry_count: usize,
    /// Sum of entry durations in seconds
    pub total_duration: f64,
    /// Mean entry duration in seconds
    pub average_duration: f64,
    /// Mean gap between consecutive entries in seconds
    pub average_gap: f64,
    /// Entries longer than LONG_ENTRY_SECS
    pub long_entries: usize,
    /// Gaps shorter than SMALL_GAP_SECS
    pub small_gaps: usize,
}

impl TrackStats {
    /// Duration above which an entry counts as long
    pub const LONG_ENTRY_SECS: f64 = 7.0;

    /// Gap below which two entries count as nearly touching
    pub const SMALL_GAP_SECS: f64 = 0.1;

    /// Compute statistics for a track
    pub fn for_track(track: &SubtitleTrack) -> Self {
        let entry_count = track.len();
        let total_duration: f64 = track.entries.iter().map(|e| e.duration()).sum();
        let average_duration = if entry_count > 0 {
            total_duration / entry_count as f64
        } else {
            0.0
        };

        let mut total_gap = 0.0;
        let mut small_gaps = 0;
        for pair in track.entries.windows(2) {
            let gap = pair[1].start - pair[0].stop;
            total_gap += gap;
            if gap < Self::SMALL_GAP_SECS {
                small_gaps += 1;
            }
        }
        let average_gap = if entry_count > 1 {
            total_gap / (entry_count - 1) as f64
        } else {
            0.0
        };

        let long_entries = track
            .entries
            .iter()
            .filter(|e| e.duration() > Self::LONG_ENTRY_SECS)
            .count();

        TrackStats {
            entry_count,
            total_duration,
            average_duration,
            average_gap,
            long_entries,
            small_gaps,
        }
    }
}
