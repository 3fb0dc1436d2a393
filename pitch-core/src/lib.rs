//! Pitch Core - Backend logic for Audio Pitch Changer
//!
//! This crate contains all orchestration logic with zero UI dependencies:
//! - Provisioning of the bundled ffmpeg/ffprobe executables
//! - Pitch ratio math
//! - ffmpeg/ffprobe argument building
//! - Synchronous process execution with uniform result reporting
//!
//! It can be used by the command-line host or a GUI shell.

pub mod command;
pub mod config;
pub mod logging;
pub mod models;
pub mod observer;
pub mod pitch;
pub mod result;
pub mod runner;
pub mod service;
pub mod tools;

pub use command::{OutputFormat, ProbeError, ProbeProperty, ProbeRequest, TranscodeRequest};
pub use models::AudioFile;
pub use observer::ProcessingObserver;
pub use result::ProcessResult;
pub use runner::{ProcessRunner, RunError, RunOutput, SystemRunner};
pub use service::{AudioService, ServiceError};
pub use tools::{ExecutableAsset, ExtractError, InitError, Toolchain, ToolchainHandles};

/// Application directory name under the user config directory.
pub const APP_NAME: &str = "AudioPitchChanger";

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
