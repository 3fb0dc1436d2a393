//! Audio Pitch Changer - command-line host.
//!
//! Provisions the bundled tools on startup, then runs one boundary operation
//! and prints its result as JSON on stdout.

mod cli;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pitch_core::config::{ConfigManager, Settings};
use pitch_core::logging;
use pitch_core::observer::CallbackObserver;
use pitch_core::tools::{BinaryExtractor, Toolchain};
use pitch_core::{AudioFile, AudioService, ProbeError, ProcessResult, TranscodeRequest};

use cli::{Cli, Command, ToolCommand};

/// Exit code for a failed startup (tools could not be provisioned).
const EXIT_INIT_FAILED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            print_result(&ProcessResult::failure(format!("{:#}", e), ""));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = load_settings(cli.config)?;

    logging::init_tracing(cli.log_level.unwrap_or(settings.logging.level));
    tracing::info!("Audio Pitch Changer v{} starting...", pitch_core::version());

    match cli.command {
        // Describing a file needs no tools.
        Command::Describe { path } => describe(&path),
        Command::Tool(command) => run_with_tools(&settings, command),
    }
}

fn run_with_tools(settings: &Settings, command: ToolCommand) -> Result<ExitCode> {
    let extractor = match settings.tools.tools_dir() {
        Some(dir) => BinaryExtractor::new(dir),
        None => BinaryExtractor::for_user(&settings.tools.app_dir_name)
            .context("Unable to locate tool directory")?,
    };

    let handles = match Toolchain::initialize(&extractor) {
        Ok(handles) => handles,
        Err(e) => {
            tracing::error!("{}", e);
            print_result(&ProcessResult::failure(
                format!("Failed to initialize tools: {}", e),
                "",
            ));
            return Ok(ExitCode::from(EXIT_INIT_FAILED));
        }
    };

    let observer = CallbackObserver::new(
        || tracing::info!("Processing started"),
        || tracing::info!("Processing finished"),
    );
    let service = AudioService::new(handles)
        .with_observer(Arc::new(observer))
        .with_resample_rate(settings.processing.resample_rate);

    let result = match command {
        ToolCommand::Check => service.check_ffmpeg(),
        ToolCommand::Shift {
            input,
            output,
            semitones,
            preserve_tempo,
        } => service.process_audio(&TranscodeRequest::new(input, output, semitones, preserve_tempo)),
        ToolCommand::Info { path } => service.get_audio_info(&path),
        ToolCommand::SampleRate { path } => match service.get_sample_rate(&path) {
            Ok(rate) => {
                println!("{}", rate);
                return Ok(ExitCode::SUCCESS);
            }
            Err(e) => ProcessResult::failure(e.to_string(), probe_output(&e)),
        },
    };

    print_result(&result);
    Ok(if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn describe(path: &Path) -> Result<ExitCode> {
    let file = AudioFile::from_path(path)?;
    if !file.has_supported_extension() {
        tracing::warn!("{} does not have a recognized audio extension", file.name);
    }
    println!("{}", serde_json::to_string_pretty(&file)?);
    Ok(ExitCode::SUCCESS)
}

fn load_settings(path: Option<PathBuf>) -> Result<Settings> {
    let path = match path {
        Some(path) => path,
        None => ConfigManager::default_path(pitch_core::APP_NAME)?,
    };
    let mut manager = ConfigManager::new(&path);
    manager
        .load_or_create()
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    Ok(manager.settings().clone())
}

fn probe_output(e: &ProbeError) -> String {
    match e {
        ProbeError::ProbeFailed(run) => run.output().to_string(),
        ProbeError::ParseFailed { raw, .. } => raw.clone(),
    }
}

fn print_result(result: &ProcessResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{}", json),
        Err(_) => println!("{:?}", result),
    }
}
