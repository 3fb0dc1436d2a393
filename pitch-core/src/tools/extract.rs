//! Idempotent extraction of embedded executables.
//!
//! Payloads are written once into a per-user application directory
//! (e.g. `~/.config/AudioPitchChanger` on Linux) and reused on every later
//! start. An existing file is trusted as-is; no size or hash check is done.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use directories::BaseDirs;
use parking_lot::Mutex;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use super::assets::ExecutableAsset;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Unable to determine the user config directory")]
    DirectoryUnavailable,

    #[error("Failed to create directory {}: {source}", .path.display())]
    DirectoryCreateFailed { path: PathBuf, source: io::Error },

    #[error("Failed to write executable {}: {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    #[error("No embedded payload for {0}")]
    PayloadMissing(String),
}

/// Outcome of a single extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub path: PathBuf,
    /// False when an existing file was reused.
    pub written: bool,
}

/// Writes executable payloads into a fixed directory.
pub struct BinaryExtractor {
    base_dir: PathBuf,
    /// One lock per asset name so concurrent first runs in this process
    /// write once. Other processes are settled by the no-clobber rename.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl BinaryExtractor {
    /// Extractor rooted at an explicit directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Extractor rooted at `<user-config-dir>/<app_name>`.
    pub fn for_user(app_name: &str) -> Result<Self, ExtractError> {
        let dirs = BaseDirs::new().ok_or(ExtractError::DirectoryUnavailable)?;
        Ok(Self::new(dirs.config_dir().join(app_name)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path an asset with this name is (or will be) extracted to.
    pub fn target_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Ensure the asset exists on disk and return its path.
    pub fn ensure_extracted(&self, asset: &ExecutableAsset) -> Result<PathBuf, ExtractError> {
        self.extract(asset).map(|extraction| extraction.path)
    }

    /// Same as [`ensure_extracted`](Self::ensure_extracted), but also reports
    /// whether a write happened.
    pub fn extract(&self, asset: &ExecutableAsset) -> Result<Extraction, ExtractError> {
        fs::create_dir_all(&self.base_dir).map_err(|source| ExtractError::DirectoryCreateFailed {
            path: self.base_dir.clone(),
            source,
        })?;

        let path = self.target_path(asset.name());

        let lock = self.lock_for(asset.name());
        let _guard = lock.lock();

        if path.exists() {
            info!("'{}' already present, skipping extraction", asset.name());
            return Ok(Extraction {
                path,
                written: false,
            });
        }

        info!("Extracting '{}' to {}", asset.name(), path.display());
        let written = write_executable(&self.base_dir, &path, asset.payload()).map_err(|source| {
            ExtractError::WriteFailed {
                path: path.clone(),
                source,
            }
        })?;

        if written {
            debug!("Wrote {} bytes to {}", asset.payload().len(), path.display());
        } else {
            info!("'{}' was extracted by another process", asset.name());
        }

        Ok(Extraction { path, written })
    }

    fn lock_for(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Write the payload to a uniquely named temp file in `dir`, mark it
/// executable, then move it to `path` without replacing an existing file.
///
/// A partially written file is never visible under the final name. Returns
/// false when another writer got there first; its file is kept.
fn write_executable(dir: &Path, path: &Path, data: &[u8]) -> io::Result<bool> {
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    set_executable(temp.as_file())?;

    match temp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error),
    }
}

#[cfg(unix)]
fn set_executable(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn set_executable(_file: &File) -> io::Result<()> {
    Ok(())
}
