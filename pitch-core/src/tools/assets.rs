//! Embedded executable payloads.
//!
//! The platform ffmpeg/ffprobe builds are dropped into `pitch-core/payload/`
//! before a release build and bundled into the binary by `rust-embed`.

use std::borrow::Cow;
use std::fmt;

use rust_embed::RustEmbed;

use super::extract::ExtractError;

#[derive(RustEmbed)]
#[folder = "payload/"]
struct Payloads;

/// Platform file name for a tool (`ffmpeg` -> `ffmpeg.exe` on Windows).
pub fn executable_name(tool: &str) -> String {
    format!("{}{}", tool, std::env::consts::EXE_SUFFIX)
}

/// An executable shipped as a byte payload.
#[derive(Clone)]
pub struct ExecutableAsset {
    name: String,
    payload: Cow<'static, [u8]>,
}

impl ExecutableAsset {
    /// Create an asset from an in-memory payload.
    pub fn new(name: impl Into<String>, payload: impl Into<Cow<'static, [u8]>>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }

    /// Look up the bundled payload for `tool`.
    pub fn embedded(tool: &str) -> Result<Self, ExtractError> {
        let name = executable_name(tool);
        match Payloads::get(&name) {
            Some(file) => Ok(Self {
                name,
                payload: file.data,
            }),
            None => Err(ExtractError::PayloadMissing(name)),
        }
    }

    /// File name the payload is written under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl fmt::Debug for ExecutableAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutableAsset")
            .field("name", &self.name)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executable_name_uses_platform_suffix() {
        let name = executable_name("ffmpeg");
        if cfg!(windows) {
            assert_eq!(name, "ffmpeg.exe");
        } else {
            assert_eq!(name, "ffmpeg");
        }
    }

    #[test]
    fn unknown_payload_is_missing() {
        let err = ExecutableAsset::embedded("no-such-tool").unwrap_err();
        assert!(matches!(err, ExtractError::PayloadMissing(_)));
    }

    #[test]
    fn debug_hides_payload_bytes() {
        let asset = ExecutableAsset::new("tool", vec![1u8, 2, 3]);
        let debug = format!("{:?}", asset);
        assert!(debug.contains("payload_len: 3"));
    }
}
