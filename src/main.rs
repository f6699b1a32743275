// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::processing::{ProcessingMode, SplitMethod};

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod processing;
mod subtitle;
mod timecode;

/// CLI Wrapper for ProcessingMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProcessingMode {
    Merge,
    Split,
}

impl From<CliProcessingMode> for ProcessingMode {
    fn from(cli_mode: CliProcessingMode) -> Self {
        match cli_mode {
            CliProcessingMode::Merge => ProcessingMode::Merge,
            CliProcessingMode::Split => ProcessingMode::Split,
        }
    }
}

/// CLI Wrapper for SplitMethod to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSplitMethod {
    Proportional,
    Uniform,
}

impl From<CliSplitMethod> for SplitMethod {
    fn from(cli_method: CliSplitMethod) -> Self {
        match cli_method {
            CliSplitMethod::Proportional => SplitMethod::Proportional,
            CliSplitMethod::Uniform => SplitMethod::Uniform,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge or split subtitle entries in SRT files (default command)
    #[command(alias = "process")]
    Process(ProcessArgs),

    /// Generate shell completions for srtproc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Input SRT file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Processing mode
    #[arg(short, long, value_enum)]
    mode: Option<CliProcessingMode>,

    /// Merge: maximum gap in seconds between entries to be joined
    #[arg(short = 'g', long)]
    max_gap: Option<f64>,

    /// Split: maximum entry duration in seconds
    #[arg(short = 'd', long)]
    max_duration: Option<f64>,

    /// Split: characters eligible as cut points
    #[arg(long)]
    split_characters: Option<String>,

    /// Split: time redistribution method
    #[arg(long, value_enum)]
    split_method: Option<CliSplitMethod>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write the annotated (marker-tagged) output file
    #[arg(short, long)]
    annotated: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Merge temporally close SRT entries or split over-long ones,
re-allocating time across the pieces.

Modes:
    merge - join entries whose gap is below --max-gap
    split - divide entries longer than --max-duration at punctuation")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input SRT file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Processing mode
    #[arg(short, long, value_enum)]
    mode: Option<CliProcessingMode>,

    /// Merge: maximum gap in seconds between entries to be joined
    #[arg(short = 'g', long)]
    max_gap: Option<f64>,

    /// Split: maximum entry duration in seconds
    #[arg(short = 'd', long)]
    max_duration: Option<f64>,

    /// Split: characters eligible as cut points
    #[arg(long)]
    split_characters: Option<String>,

    /// Split: time redistribution method
    #[arg(long, value_enum)]
    split_method: Option<CliSplitMethod>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write the annotated (marker-tagged) output file
    #[arg(short, long)]
    annotated: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "srtproc", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Process(args)) => run_process(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let process_args = ProcessArgs {
                input_path,
                mode: cli.mode,
                max_gap: cli.max_gap,
                max_duration: cli.max_duration,
                split_characters: cli.split_characters,
                split_method: cli.split_method,
                output_dir: cli.output_dir,
                annotated: cli.annotated,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_process(process_args)
        }
    }
}

fn run_process(options: ProcessArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(mode) = &options.mode {
        config.mode = mode.clone().into();
    }
    if let Some(max_gap) = options.max_gap {
        config.merge.max_gap = max_gap;
    }
    if let Some(max_duration) = options.max_duration {
        config.split.max_duration = max_duration;
    }
    if let Some(split_characters) = &options.split_characters {
        config.split.split_characters = split_characters.clone();
    }
    if let Some(split_method) = &options.split_method {
        config.split.method = split_method.clone().into();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(to_level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;
    controller.run(
        options.input_path,
        options.output_dir,
        options.annotated,
        options.force_overwrite,
    )
}
