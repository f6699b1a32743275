use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::time::Duration;

use crate::processing::pipeline::DEFAULT_QUIET_WINDOW_MS;
use crate::processing::split::DEFAULT_SPLIT_CHARACTERS;
use crate::processing::{DebouncedProcessor, ProcessingMode, ProcessingParams, SplitMethod};
use crate::subtitle::SubtitleTrack;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Which transformation to run by default
    #[serde(default)]
    pub mode: ProcessingMode,

    /// Merge engine settings
    #[serde(default)]
    pub merge: MergeConfig,

    /// Split engine settings
    #[serde(default)]
    pub split: SplitConfig,

    /// Quiet window for the debounced recompute, in milliseconds
    #[serde(default = "default_quiet_window_ms")]
    pub quiet_window_ms: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Merge engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MergeConfig {
    /// Maximum gap in seconds between entries to be joined
    #[serde(default = "default_max_gap")]
    pub max_gap: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_gap: default_max_gap(),
        }
    }
}

/// Split engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SplitConfig {
    /// Maximum entry duration in seconds before splitting
    #[serde(default = "default_max_duration")]
    pub max_duration: f64,

    /// Characters eligible as cut points
    #[serde(default = "default_split_characters")]
    pub split_characters: String,

    /// Time redistribution policy
    #[serde(default)]
    pub method: SplitMethod,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_duration: default_max_duration(),
            split_characters: default_split_characters(),
            method: SplitMethod::default(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_max_gap() -> f64 {
    1.0
}

fn default_max_duration() -> f64 {
    7.0
}

fn default_split_characters() -> String {
    DEFAULT_SPLIT_CHARACTERS.to_string()
}

fn default_quiet_window_ms() -> u64 {
    DEFAULT_QUIET_WINDOW_MS
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.merge.max_gap < 0.0 {
            return Err(anyhow!(
                "merge.max_gap must be non-negative, got {}",
                self.merge.max_gap
            ));
        }

        if self.split.max_duration <= 0.0 {
            return Err(anyhow!(
                "split.max_duration must be positive, got {}",
                self.split.max_duration
            ));
        }

        if self.split.split_characters.is_empty() {
            return Err(anyhow!("split.split_characters must not be empty"));
        }

        Ok(())
    }

    /// Build the live parameter set handed to the pipeline
    pub fn to_params(&self) -> ProcessingParams {
        ProcessingParams {
            mode: self.mode,
            max_gap: self.merge.max_gap,
            max_duration: self.split.max_duration,
            split_characters: self.split.split_characters.clone(),
            split_method: self.split.method,
        }
    }

    /// Quiet window for the debounced recompute
    pub fn quiet_window(&self) -> Duration {
        Duration::from_millis(self.quiet_window_ms)
    }

    /// Build a debounced processor over a track using this
    /// configuration's quiet window
    pub fn debounced_processor(&self, original: SubtitleTrack) -> DebouncedProcessor {
        DebouncedProcessor::with_quiet_window(original, self.quiet_window())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            mode: ProcessingMode::default(),
            merge: MergeConfig::default(),
            split: SplitConfig::default(),
            quiet_window_ms: default_quiet_window_ms(),
            log_level: LogLevel::default(),
        }
    }
}
