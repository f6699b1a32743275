/*!
 * Tests for subtitle parsing and serialization
 */

use srtproc::errors::SubtitleError;
use srtproc::subtitle::{ANNOTATED_PREAMBLE, SubtitleTrack, TrackStats};
use crate::common;

/// Test parsing well-formed SRT content
#[test]
fn test_parse_withWellFormedContent_shouldReturnAllEntries() {
    let track = SubtitleTrack::parse(common::sample_srt_content());

    assert_eq!(track.len(), 3);
    assert_eq!(track.entries[0].caption, "This is a test subtitle.");
    assert!((track.entries[0].start.seconds() - 1.0).abs() < 1e-9);
    assert!((track.entries[0].stop.seconds() - 4.0).abs() < 1e-9);
    assert_eq!(track.entries[2].caption, "For testing purposes.");
}

/// Multi-line captions are joined with newlines
#[test]
fn test_parse_withMultilineCaption_shouldJoinWithNewline() {
    let content = "1\n00:00:01,000 --> 00:00:04,000\nFirst line\nSecond line\n";
    let track = SubtitleTrack::parse(content);

    assert_eq!(track.len(), 1);
    assert_eq!(track.entries[0].caption, "First line\nSecond line");
}

/// Parser tolerance: a malformed timing line drops only that block
#[test]
fn test_parse_withMalformedTimingLine_shouldSkipBlockAndContinue() {
    let content = "1\n\
                   00:00:01,000 --> 00:00:04,000\n\
                   Good entry.\n\
                   \n\
                   2\n\
                   not a timing line\n\
                   Orphaned text.\n\
                   \n\
                   3\n\
                   00:00:10,000 --> 00:00:14,000\n\
                   Another good entry.\n";
    let track = SubtitleTrack::parse(content);

    assert_eq!(track.len(), 2);
    assert_eq!(track.entries[0].caption, "Good entry.");
    assert_eq!(track.entries[1].caption, "Another good entry.");
}

/// Timing-line failures distinguish a missing arrow from a bad timecode
#[test]
fn test_parseTiming_withMalformedLine_shouldReportCause() {
    let timing = SubtitleTrack::parse_timing("00:00:01,000 --> 00:00:04,000").unwrap();
    assert!((timing.0.seconds() - 1.0).abs() < 1e-9);
    assert!((timing.1.seconds() - 4.0).abs() < 1e-9);

    assert!(matches!(
        SubtitleTrack::parse_timing("no arrow here"),
        Err(SubtitleError::InvalidTimingLine(_))
    ));
    assert!(matches!(
        SubtitleTrack::parse_timing("aa:bb:cc,ddd --> 00:00:04,000"),
        Err(SubtitleError::InvalidTimecode(_))
    ));
}

/// A block with no caption text is silently dropped
#[test]
fn test_parse_withEmptyCaption_shouldDropBlock() {
    let content = "1\n00:00:01,000 --> 00:00:04,000\n\n2\n00:00:05,000 --> 00:00:09,000\nKept.\n";
    let track = SubtitleTrack::parse(content);

    assert_eq!(track.len(), 1);
    assert_eq!(track.entries[0].caption, "Kept.");
}

/// Garbage input yields an empty track, never an error
#[test]
fn test_parse_withGarbageContent_shouldReturnEmptyTrack() {
    let track = SubtitleTrack::parse("no subtitles here\njust text\n");
    assert!(track.is_empty());

    let track = SubtitleTrack::parse("");
    assert!(track.is_empty());
}

/// Input ordinals are not trusted; serialization renumbers 1..N
#[test]
fn test_serialize_withArbitraryInputOrdinals_shouldRenumber() {
    let content = "7\n00:00:01,000 --> 00:00:02,000\nFirst.\n\n3\n00:00:03,000 --> 00:00:04,000\nSecond.\n";
    let track = SubtitleTrack::parse(content);
    let output = track.to_srt_string();

    assert!(output.starts_with("1\n"));
    assert!(output.contains("\n\n2\n"));
}

/// Out-of-order input is preserved in input order; the parser does not
/// sort. Permissive by design: merge/split then operate on input order.
#[test]
fn test_parse_withOutOfOrderEntries_shouldPreserveInputOrder() {
    let content = "1\n00:00:10,000 --> 00:00:12,000\nLater.\n\n2\n00:00:01,000 --> 00:00:03,000\nEarlier.\n";
    let track = SubtitleTrack::parse(content);

    assert_eq!(track.len(), 2);
    assert_eq!(track.entries[0].caption, "Later.");
    assert_eq!(track.entries[1].caption, "Earlier.");
}

/// Standard serialization shape: blank line between entries, none after
/// the last
#[test]
fn test_to_srt_string_withTwoEntries_shouldMatchExpectedShape() {
    let track = SubtitleTrack::from_entries(vec![
        common::entry(1.0, 4.0, "Hello"),
        common::entry(5.0, 9.0, "World"),
    ]);

    let expected = "1\n00:00:01,000 --> 00:00:04,000\nHello\n\n2\n00:00:05,000 --> 00:00:09,000\nWorld\n";
    assert_eq!(track.to_srt_string(), expected);
}

/// Serialization round-trip through the parser preserves entries
#[test]
fn test_serialize_thenParse_shouldPreserveEntries() {
    let track = SubtitleTrack::parse(common::sample_srt_content());
    let reparsed = SubtitleTrack::parse(&track.to_srt_string());

    assert_eq!(reparsed, track);
}

/// Annotated form: preamble, #N# markers, flattened captions
#[test]
fn test_to_annotated_string_withMultilineCaptions_shouldFlattenAndMark() {
    let track = SubtitleTrack::from_entries(vec![
        common::entry(1.0, 4.0, "First line\nSecond  line"),
        common::entry(5.0, 9.0, "Another entry"),
    ]);

    let annotated = track.to_annotated_string();
    assert!(annotated.starts_with(ANNOTATED_PREAMBLE));
    assert!(annotated.ends_with("#1#First line Second line #2#Another entry "));
}

/// Track statistics match the underlying entries
#[test]
fn test_track_stats_withSampleTrack_shouldComputeAggregates() {
    let track = SubtitleTrack::from_entries(vec![
        common::entry(0.0, 2.0, "a"),
        common::entry(2.05, 4.05, "b"),
        common::entry(5.0, 15.0, "c"),
    ]);

    let stats = TrackStats::for_track(&track);
    assert_eq!(stats.entry_count, 3);
    assert!((stats.total_duration - 14.0).abs() < 1e-9);
    assert_eq!(stats.long_entries, 1);
    assert_eq!(stats.small_gaps, 1);
}

/// Statistics for an empty track are all zero
#[test]
fn test_track_stats_withEmptyTrack_shouldBeZero() {
    let stats = TrackStats::for_track(&SubtitleTrack::default());
    assert_eq!(stats.entry_count, 0);
    assert_eq!(stats.average_duration, 0.0);
    assert_eq!(stats.average_gap, 0.0);
}
