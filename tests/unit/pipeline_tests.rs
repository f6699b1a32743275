/*!
 * Tests for the processing pipeline and debounced recompute
 */

use std::time::Duration;

use srtproc::processing::pipeline::process_track;
use srtproc::{DebouncedProcessor, ProcessingMode, ProcessingParams, ProcessingPipeline};
use srtproc::errors::PipelineError;
use crate::common;

#[test]
fn test_processTrack_withSplitMode_shouldDispatchToSplit() {
    let track = common::sample_track();
    let params = ProcessingParams {
        mode: ProcessingMode::Split,
        max_duration: 4.0,
        ..ProcessingParams::default()
    };

    let processed = process_track(&track, &params);
    assert!(processed.len() > track.len());
}

/// Parameters irrelevant to the active mode have no effect on the result
#[test]
fn test_processTrack_withMergeMode_shouldIgnoreSplitParameters() {
    let track = common::sample_track();
    let base = ProcessingParams {
        mode: ProcessingMode::Merge,
        max_gap: 0.2,
        ..ProcessingParams::default()
    };
    let with_noise = ProcessingParams {
        max_duration: 0.5,
        split_characters: "qz".to_string(),
        ..base.clone()
    };

    assert_eq!(process_track(&track, &base), process_track(&track, &with_noise));
}

#[test]
fn test_pipeline_process_shouldNeverTouchOriginal() {
    let track = common::sample_track();
    let mut pipeline = ProcessingPipeline::new(track.clone());
    let params = ProcessingParams {
        max_gap: 0.2,
        ..ProcessingParams::default()
    };

    pipeline.process(&params);
    assert_eq!(pipeline.original(), &track);
    assert_ne!(pipeline.processed(), &track);
}

/// Apply twice, then unwind both commits in order
#[test]
fn test_pipeline_withStackedCommits_shouldRestoreInReverseOrder() {
    let track = common::sample_track();
    let mut pipeline = ProcessingPipeline::new(track.clone());

    pipeline.process(&ProcessingParams {
        max_gap: 0.2,
        ..ProcessingParams::default()
    });
    pipeline.apply_processed();
    let after_first = pipeline.original().clone();

    pipeline.process(&ProcessingParams {
        mode: ProcessingMode::Split,
        max_duration: 4.0,
        ..ProcessingParams::default()
    });
    pipeline.apply_processed();
    assert_eq!(pipeline.backup_depth(), 2);

    pipeline.restore_backup().unwrap();
    assert_eq!(pipeline.original(), &after_first);

    pipeline.restore_backup().unwrap();
    assert_eq!(pipeline.original(), &track);
    assert_eq!(pipeline.backup_depth(), 0);
}

#[test]
fn test_pipeline_restore_withEmptyStack_shouldReturnError() {
    let mut pipeline = ProcessingPipeline::new(common::sample_track());
    assert!(matches!(
        pipeline.restore_backup(),
        Err(PipelineError::NothingToRestore)
    ));
}

#[test]
fn test_pipeline_new_shouldInitializeProcessedFromOriginal() {
    let track = common::sample_track();
    let pipeline = ProcessingPipeline::new(track.clone());

    assert_eq!(pipeline.processed(), &track);
    assert_eq!(pipeline.backup_depth(), 0);
}

/// Commit and undo go through the shared handle while the debouncer owns
/// the pipeline
#[tokio::test]
async fn test_debouncedProcessor_pipelineHandle_shouldShareState() {
    let processor = DebouncedProcessor::with_quiet_window(
        common::sample_track(),
        Duration::from_millis(10),
    );
    let mut rx = processor.subscribe();

    processor.request(ProcessingParams {
        max_gap: 0.2,
        ..ProcessingParams::default()
    });
    tokio::time::timeout(Duration::from_secs(1), rx.changed())
        .await
        .expect("recompute should publish")
        .unwrap();

    let handle = processor.pipeline();
    {
        let mut pipeline = handle.lock();
        pipeline.apply_processed();
        assert_eq!(pipeline.backup_depth(), 1);
        pipeline.restore_backup().unwrap();
    }

    let pipeline = handle.lock();
    assert_eq!(pipeline.original(), &common::sample_track());
}

#[tokio::test]
async fn test_debouncedProcessor_withRapidRequests_shouldPublishLatestResult() {
    let processor = DebouncedProcessor::with_quiet_window(
        common::sample_track(),
        Duration::from_millis(20),
    );
    let rx = processor.subscribe();

    // Burst of parameter changes inside one quiet window; only the last
    // one may publish
    for max_gap in [0.01, 0.02, 0.05, 0.2] {
        processor.request(ProcessingParams {
            max_gap,
            ..ProcessingParams::default()
        });
    }

    tokio::time::sleep(Duration::from_millis(150)).await;

    let expected = process_track(
        &common::sample_track(),
        &ProcessingParams {
            max_gap: 0.2,
            ..ProcessingParams::default()
        },
    );
    assert_eq!(*rx.borrow(), expected);
}
