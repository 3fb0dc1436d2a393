//! ffprobe queries.
//!
//! Two queries are supported: the bare sample rate of the first audio stream,
//! and the full format/stream metadata as JSON. The JSON is returned as-is;
//! interpreting it is left to the caller.

use std::ffi::OsString;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::runner::{ProcessRunner, RunError};

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("ffprobe failed: {0}")]
    ProbeFailed(#[from] RunError),

    #[error("Failed to parse sample rate {raw:?}: {source}")]
    ParseFailed { raw: String, source: ParseIntError },
}

/// What to ask ffprobe for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeProperty {
    /// `stream=sample_rate` of the first audio stream.
    SampleRate,
    /// Format and all streams, JSON.
    FullMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    file_path: PathBuf,
    property: ProbeProperty,
}

impl ProbeRequest {
    pub fn new(file_path: impl Into<PathBuf>, property: ProbeProperty) -> Self {
        Self {
            file_path: file_path.into(),
            property,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn property(&self) -> ProbeProperty {
        self.property
    }

    /// ffprobe argument list for this request.
    pub fn args(&self) -> Vec<OsString> {
        let flags: &[&str] = match self.property {
            ProbeProperty::SampleRate => &[
                "-v",
                "error",
                "-select_streams",
                "a:0",
                "-show_entries",
                "stream=sample_rate",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ],
            ProbeProperty::FullMetadata => &[
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ],
        };

        let mut args: Vec<OsString> = flags.iter().map(|f| OsString::from(*f)).collect();
        args.push(self.file_path.clone().into_os_string());
        args
    }
}

pub fn sample_rate_args(path: &Path) -> Vec<OsString> {
    ProbeRequest::new(path, ProbeProperty::SampleRate).args()
}

pub fn format_info_args(path: &Path) -> Vec<OsString> {
    ProbeRequest::new(path, ProbeProperty::FullMetadata).args()
}

/// Parse the bare sample-rate output (e.g. `"48000\n"`).
pub fn parse_sample_rate(stdout: &str) -> Result<u32, ProbeError> {
    let trimmed = stdout.trim();
    trimmed.parse::<u32>().map_err(|source| ProbeError::ParseFailed {
        raw: trimmed.to_string(),
        source,
    })
}

/// Runs ffprobe queries through a [`ProcessRunner`].
pub struct AudioProber<'a> {
    ffprobe: &'a Path,
    runner: &'a dyn ProcessRunner,
}

impl<'a> AudioProber<'a> {
    pub fn new(ffprobe: &'a Path, runner: &'a dyn ProcessRunner) -> Self {
        Self { ffprobe, runner }
    }

    /// Sample rate of the first audio stream, in Hz.
    pub fn get_sample_rate(&self, path: &Path) -> Result<u32, ProbeError> {
        let output = self.runner.run(self.ffprobe, &sample_rate_args(path))?;
        let rate = parse_sample_rate(&output.stdout_text())?;
        tracing::debug!("{} sample rate: {} Hz", path.display(), rate);
        Ok(rate)
    }

    /// Raw JSON format/stream metadata.
    pub fn get_format_info(&self, path: &Path) -> Result<String, RunError> {
        let output = self.runner.run(self.ffprobe, &format_info_args(path))?;
        Ok(output.combined())
    }
}
