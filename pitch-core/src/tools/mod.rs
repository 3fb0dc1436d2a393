//! Provisioning of the bundled ffmpeg/ffprobe executables.
//!
//! This module provides:
//! - Embedded payload lookup (`ExecutableAsset`)
//! - Idempotent extraction to a per-user directory (`BinaryExtractor`)
//! - One-shot startup initialization producing immutable `ToolchainHandles`
//!
//! # Example
//!
//! ```no_run
//! use pitch_core::tools::{BinaryExtractor, Toolchain};
//!
//! let extractor = BinaryExtractor::for_user(pitch_core::APP_NAME).unwrap();
//! let handles = Toolchain::initialize(&extractor).unwrap();
//! println!("ffmpeg at {}", handles.ffmpeg().display());
//! ```

mod assets;
mod extract;

pub use assets::{executable_name, ExecutableAsset};
pub use extract::{BinaryExtractor, ExtractError, Extraction};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

/// Transcoder tool name.
pub const FFMPEG: &str = "ffmpeg";
/// Metadata probe tool name.
pub const FFPROBE: &str = "ffprobe";

/// Fatal startup error; nothing in this crate works without both tools.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Failed to initialize {tool}: {source}")]
    InitializationFailed { tool: String, source: ExtractError },
}

/// Resolved tool paths. Immutable once built, shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainHandles {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl ToolchainHandles {
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    pub fn ffmpeg(&self) -> &Path {
        &self.ffmpeg
    }

    pub fn ffprobe(&self) -> &Path {
        &self.ffprobe
    }
}

/// Startup initialization of the toolchain.
pub struct Toolchain;

impl Toolchain {
    /// Extract the embedded ffmpeg and ffprobe payloads.
    pub fn initialize(extractor: &BinaryExtractor) -> Result<ToolchainHandles, InitError> {
        let ffmpeg = ExecutableAsset::embedded(FFMPEG).map_err(|e| init_failed(FFMPEG, e))?;
        let ffprobe = ExecutableAsset::embedded(FFPROBE).map_err(|e| init_failed(FFPROBE, e))?;
        Self::initialize_with(extractor, &ffmpeg, &ffprobe)
    }

    /// Extract explicitly supplied assets.
    pub fn initialize_with(
        extractor: &BinaryExtractor,
        ffmpeg: &ExecutableAsset,
        ffprobe: &ExecutableAsset,
    ) -> Result<ToolchainHandles, InitError> {
        let ffmpeg_path = extractor
            .ensure_extracted(ffmpeg)
            .map_err(|e| init_failed(FFMPEG, e))?;
        let ffprobe_path = extractor
            .ensure_extracted(ffprobe)
            .map_err(|e| init_failed(FFPROBE, e))?;

        info!("FFmpeg path set to: {}", ffmpeg_path.display());
        info!("FFprobe path set to: {}", ffprobe_path.display());

        Ok(ToolchainHandles::new(ffmpeg_path, ffprobe_path))
    }
}

fn init_failed(tool: &str, source: ExtractError) -> InitError {
    error!("Unable to initialize {}: {}", tool, source);
    InitError::InitializationFailed {
        tool: tool.to_string(),
        source,
    }
}
