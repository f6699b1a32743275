/*!
 * Common test utilities for the srtproc test suite
 */

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::Result;
use tempfile::TempDir;

use srtproc::subtitle::{SubtitleEntry, SubtitleTrack};
use srtproc::timecode::Timecode;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds a subtitle entry from seconds and a caption
pub fn entry(start: f64, stop: f64, caption: &str) -> SubtitleEntry {
    SubtitleEntry::new(
        0,
        Timecode::from_seconds(start),
        Timecode::from_seconds(stop),
        caption.to_string(),
    )
}

/// A small track with merge and split candidates
pub fn sample_track() -> SubtitleTrack {
    SubtitleTrack::from_entries(vec![
        entry(0.0, 2.5, "Welcome to the subtitle processor."),
        entry(2.6, 5.0, "This tool helps you merge and split subtitles."),
        entry(5.1, 7.8, "You can adjust the maximum gap between subtitles."),
        entry(7.85, 10.2, "Short gap here, should merge easily."),
        entry(
            12.5,
            18.0,
            "This is a very long subtitle that should be split into multiple parts \
             when using split mode, especially with punctuation marks like commas, \
             periods, and other separators.",
        ),
        entry(
            25.0,
            35.0,
            "First sentence is here. Second sentence follows. Third one too. \
             And finally, the fourth sentence completes this long subtitle.",
        ),
    ])
}

/// SRT content with three well-formed blocks
pub fn sample_srt_content() -> &'static str {
    "1\n\
     00:00:01,000 --> 00:00:04,000\n\
     This is a test subtitle.\n\
     \n\
     2\n\
     00:00:05,000 --> 00:00:09,000\n\
     It contains multiple entries.\n\
     \n\
     3\n\
     00:00:10,000 --> 00:00:14,000\n\
     For testing purposes.\n"
}
