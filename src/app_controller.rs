use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::processing::{ProcessingMode, ProcessingPipeline};
use crate::subtitle::{SubtitleTrack, TrackStats};

// @module: Application controller for subtitle processing

/// Main application controller for merge/split processing
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Suffix used in output filenames for the active mode
    fn output_suffix(&self) -> &'static str {
        match self.config.mode {
            ProcessingMode::Merge => "merged",
            ProcessingMode::Split => "split",
        }
    }

    /// Process a single subtitle file or every subtitle file in a directory
    pub fn run(
        &self,
        input_path: PathBuf,
        output_dir: Option<PathBuf>,
        annotated: bool,
        force_overwrite: bool,
    ) -> Result<()> {
        if FileManager::dir_exists(&input_path) {
            self.run_folder(input_path, annotated, force_overwrite)
        } else if FileManager::file_exists(&input_path) {
            let output_dir = match output_dir {
                Some(dir) => dir,
                None => input_path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(".")),
            };
            self.run_file(&input_path, &output_dir, annotated, force_overwrite)
        } else {
            Err(anyhow!("Input path does not exist: {:?}", input_path))
        }
    }

    /// Process one subtitle file, writing the standard output and, when
    /// requested, the annotated output next to it
    pub fn run_file(
        &self,
        input_file: &Path,
        output_dir: &Path,
        annotated: bool,
        force_overwrite: bool,
    ) -> Result<()> {
        let content = FileManager::read_to_string(input_file)?;
        if !FileManager::looks_like_srt(&content) {
            return Err(anyhow!("Not an SRT subtitle file: {:?}", input_file));
        }

        let output_path =
            FileManager::generate_output_path(input_file, output_dir, self.output_suffix(), "srt");
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, output already exists (use -f to force overwrite)");
            return Ok(());
        }

        let original = SubtitleTrack::parse(&content);
        if original.is_empty() {
            warn!("No valid subtitle entries found in {:?}", input_file);
        }

        let mut pipeline = ProcessingPipeline::new(original);
        let params = self.config.to_params();
        pipeline.process(&params);
        let processed = pipeline.processed();

        self.log_stats(pipeline.original(), processed);

        FileManager::ensure_dir(output_dir)?;
        FileManager::write_to_file(&output_path, &processed.to_srt_string())?;
        info!("Wrote processed subtitles to {:?}", output_path);

        if annotated {
            let annotated_path =
                FileManager::generate_output_path(input_file, output_dir, "annotated", "srt");
            FileManager::write_to_file(&annotated_path, &processed.to_annotated_string())?;
            info!("Wrote annotated subtitles to {:?}", annotated_path);
        }

        Ok(())
    }

    /// Process every subtitle file found under a directory (recursive)
    pub fn run_folder(
        &self,
        input_dir: PathBuf,
        annotated: bool,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        let subtitle_files = FileManager::find_files(&input_dir, "srt")?;
        if subtitle_files.is_empty() {
            return Err(anyhow!("No subtitle files found in directory: {:?}", input_dir));
        }

        // Progress bar for folder processing
        let folder_pb = ProgressBar::new(subtitle_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let mut success_count = 0;
        let mut error_count = 0;

        for subtitle_file in subtitle_files.iter() {
            let file_name = subtitle_file
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            // Outputs land next to their inputs
            let output_dir = match subtitle_file.parent() {
                Some(parent) => parent.to_path_buf(),
                None => input_dir.clone(),
            };

            match self.run_file(subtitle_file, &output_dir, annotated, force_overwrite) {
                Ok(_) => {
                    success_count += 1;
                }
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    error_count += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        let duration = start_time.elapsed();
        info!(
            "Folder processing completed in {:.1}s: {} processed, {} errors",
            duration.as_secs_f64(),
            success_count,
            error_count
        );

        Ok(())
    }

    /// Log before/after statistics for one processed track
    fn log_stats(&self, original: &SubtitleTrack, processed: &SubtitleTrack) {
        let before = TrackStats::for_track(original);
        let after = TrackStats::for_track(processed);

        info!(
            "{}: {} entries -> {} entries (avg duration {:.1}s -> {:.1}s)",
            self.config.mode.display_name(),
            before.entry_count,
            after.entry_count,
            before.average_duration,
            after.average_duration
        );

        match self.config.mode {
            ProcessingMode::Merge => {
                info!(
                    "Gaps under {:.1}ms before processing: {}",
                    TrackStats::SMALL_GAP_SECS * 1000.0,
                    before.small_gaps
                );
            }
            ProcessingMode::Split => {
                info!(
                    "Entries over {:.0}s: {} before, {} after",
                    TrackStats::LONG_ENTRY_SECS,
                    before.long_entries,
                    after.long_entries
                );
            }
        }
    }
}
