//! Audio file descriptor handed over by the file selection layer.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::service::ServiceError;

/// Extensions offered when picking an input file.
pub const SUPPORTED_INPUT_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "aac", "ogg", "m4a", "wma"];

/// A selected audio file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFile {
    pub name: String,
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
}

impl AudioFile {
    /// Describe an existing file.
    ///
    /// Only a missing path is `InputMissing`; other metadata errors are
    /// reported as `InputUnreadable` with their cause.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ServiceError::InputMissing(path.to_path_buf()),
            _ => ServiceError::InputUnreadable {
                path: path.to_path_buf(),
                source,
            },
        })?;
        if !metadata.is_file() {
            return Err(ServiceError::InputMissing(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            name,
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }

    /// Whether the extension is one the picker offers.
    pub fn has_supported_extension(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_ascii_lowercase();
                SUPPORTED_INPUT_EXTENSIONS.contains(&e.as_str())
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn describes_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Track.WAV");
        fs::write(&path, vec![0u8; 1234]).unwrap();

        let file = AudioFile::from_path(&path).unwrap();

        assert_eq!(file.name, "Track.WAV");
        assert_eq!(file.path, path);
        assert_eq!(file.size, 1234);
        assert!(file.has_supported_extension());
    }

    #[test]
    fn missing_file_is_input_missing() {
        let err = AudioFile::from_path("/nonexistent/song.mp3").unwrap_err();
        assert!(matches!(err, ServiceError::InputMissing(_)));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_path_keeps_its_cause() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("song.mp3");
        fs::write(&file, b"ID3").unwrap();

        // A regular file used as a directory fails with ENOTDIR, not NotFound.
        let err = AudioFile::from_path(file.join("inner.mp3")).unwrap_err();

        match err {
            ServiceError::InputUnreadable { path, source } => {
                assert_eq!(path, file.join("inner.mp3"));
                assert_ne!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn directory_is_not_an_audio_file() {
        let dir = tempdir().unwrap();
        assert!(AudioFile::from_path(dir.path()).is_err());
    }
}
