//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pitch_core::logging::LogLevel;

#[derive(Debug, Parser)]
#[command(name = "audio-pitch-changer", version, about = "Change the pitch of audio files using the bundled ffmpeg")]
pub struct Cli {
    /// Settings file (defaults to <config-dir>/AudioPitchChanger/settings.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print name, path and size of a file
    Describe { path: PathBuf },

    #[command(flatten)]
    Tool(ToolCommand),
}

/// Subcommands that need the extracted tools.
#[derive(Debug, Subcommand)]
pub enum ToolCommand {
    /// Verify the extracted ffmpeg runs
    Check,

    /// Shift the pitch of INPUT by a number of semitones and write OUTPUT
    Shift {
        input: PathBuf,

        /// Output file; its extension selects the codec (mp3, flac, wav, aac, m4a, ogg)
        output: PathBuf,

        #[arg(short, long, allow_negative_numbers = true, default_value_t = 0.0)]
        semitones: f64,

        /// Keep the original duration (rubberband) instead of resampling
        #[arg(short, long)]
        preserve_tempo: bool,
    },

    /// Print ffprobe format and stream metadata as JSON
    Info { path: PathBuf },

    /// Print the sample rate of the first audio stream
    SampleRate { path: PathBuf },
}
