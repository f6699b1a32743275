/*!
 * Processing pipeline: mode dispatch, undo stack and debounced recompute.
 *
 * The pipeline holds the immutable "original" track and the disposable
 * "processed" track, plus a LIFO stack of original snapshots for undoing
 * a commit. `DebouncedProcessor` wraps it with the single-flight,
 * cancellable recompute contract used by interactive callers: rapid
 * parameter changes are coalesced within a quiet window and a superseded
 * computation never publishes over a newer result.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::debug;
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::errors::PipelineError;
use crate::subtitle::SubtitleTrack;
use super::split::DEFAULT_SPLIT_CHARACTERS;
use super::{ProcessingMode, SplitMethod, merge_adjacent, split_long_entries};

/// Quiet window applied between a parameter change and the recompute
pub const DEFAULT_QUIET_WINDOW_MS: u64 = 200;

/// Live parameters supplied by the presentation layer. Parameters that
/// are irrelevant to the active mode are ignored by dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingParams {
    /// Which transformation to run
    pub mode: ProcessingMode,
    /// Merge: maximum gap in seconds between entries to be joined
    pub max_gap: f64,
    /// Split: maximum entry duration in seconds
    pub max_duration: f64,
    /// Split: characters eligible as cut points
    pub split_characters: String,
    /// Split: time redistribution policy
    pub split_method: SplitMethod,
}

impl Default for ProcessingParams {
    fn default() -> Self {
        ProcessingParams {
            mode: ProcessingMode::Merge,
            max_gap: 1.0,
            max_duration: 7.0,
            split_characters: DEFAULT_SPLIT_CHARACTERS.to_string(),
            split_method: SplitMethod::default(),
        }
    }
}

/// Run the transformation selected by `params.mode` over a track
pub fn process_track(track: &SubtitleTrack, params: &ProcessingParams) -> SubtitleTrack {
    match params.mode {
        ProcessingMode::Merge => merge_adjacent(track, params.max_gap),
        ProcessingMode::Split => split_long_entries(
            track,
            params.max_duration,
            &params.split_characters,
            params.split_method,
        ),
    }
}

/// Coordination layer over the merge and split engines
#[derive(Debug, Clone, Default)]
pub struct ProcessingPipeline {
    /// Track loaded from the source file, replaced only by a commit
    original: SubtitleTrack,
    /// Result of the latest transformation run
    processed: SubtitleTrack,
    /// Prior originals, most recent last
    backups: Vec<SubtitleTrack>,
}

impl ProcessingPipeline {
    /// Create a pipeline around a freshly parsed track
    pub fn new(original: SubtitleTrack) -> Self {
        ProcessingPipeline {
            processed: original.clone(),
            original,
            backups: Vec::new(),
        }
    }

    /// The current original track
    pub fn original(&self) -> &SubtitleTrack {
        &self.original
    }

    /// The current processed track
    pub fn processed(&self) -> &SubtitleTrack {
        &self.processed
    }

    /// Number of snapshots available to restore
    pub fn backup_depth(&self) -> usize {
        self.backups.len()
    }

    /// Recompute the processed track from the original with the given
    /// parameters. The processed track is replaced wholesale; the
    /// original is never touched.
    pub fn process(&mut self, params: &ProcessingParams) -> &SubtitleTrack {
        self.processed = process_track(&self.original, params);
        &self.processed
    }

    /// Commit the processed track as the new original, keeping the prior
    /// original on the backup stack for undo
    pub fn apply_processed(&mut self) {
        let promoted = self.processed.clone();
        self.backups.push(std::mem::replace(&mut self.original, promoted));
    }

    /// Undo the most recent commit. Fails without touching any state
    /// when there is nothing to restore.
    pub fn restore_backup(&mut self) -> Result<(), PipelineError> {
        let snapshot = self.backups.pop().ok_or(PipelineError::NothingToRestore)?;
        self.original = snapshot;
        Ok(())
    }
}

/// Debounced, cancellable recompute wrapper around a shared pipeline.
///
/// Each request bumps a generation counter and schedules a task that waits
/// out the quiet window, re-checks the generation at entry and again
/// before publishing, and abandons its work when superseded. Results are
/// published on a watch channel, always in request order.
#[derive(Debug)]
pub struct DebouncedProcessor {
    pipeline: Arc<Mutex<ProcessingPipeline>>,
    generation: Arc<AtomicU64>,
    quiet_window: Duration,
    publisher: watch::Sender<SubtitleTrack>,
}

impl DebouncedProcessor {
    /// Create a processor with the default quiet window
    pub fn new(original: SubtitleTrack) -> Self {
        Self::with_quiet_window(original, Duration::from_millis(DEFAULT_QUIET_WINDOW_MS))
    }

    /// Create a processor with a custom quiet window
    pub fn with_quiet_window(original: SubtitleTrack, quiet_window: Duration) -> Self {
        let (publisher, _) = watch::channel(original.clone());
        DebouncedProcessor {
            pipeline: Arc::new(Mutex::new(ProcessingPipeline::new(original))),
            generation: Arc::new(AtomicU64::new(0)),
            quiet_window,
            publisher,
        }
    }

    /// Subscribe to published processed tracks
    pub fn subscribe(&self) -> watch::Receiver<SubtitleTrack> {
        self.publisher.subscribe()
    }

    /// Shared handle to the underlying pipeline, for commit and undo
    pub fn pipeline(&self) -> Arc<Mutex<ProcessingPipeline>> {
        Arc::clone(&self.pipeline)
    }

    /// Schedule a recompute with the given parameters, superseding any
    /// recompute still waiting or running
    pub fn request(&self, params: ProcessingParams) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let pipeline = Arc::clone(&self.pipeline);
        let publisher = self.publisher.clone();
        let quiet_window = self.quiet_window;

        tokio::spawn(async move {
            tokio::time::sleep(quiet_window).await;

            // Superseded while waiting out the quiet window
            if latest.load(Ordering::SeqCst) != generation {
                debug!("Recompute generation {} superseded before start", generation);
                return;
            }

            let processed = {
                let mut pipeline = pipeline.lock();
                pipeline.process(&params).clone()
            };

            // A newer request arrived while computing; drop the result
            if latest.load(Ordering::SeqCst) != generation {
                debug!("Recompute generation {} superseded before publish", generation);
                return;
            }

            let _ = publisher.send(processed);
        });
    }
}
