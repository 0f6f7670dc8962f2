//! On-disk key/value storage.
//!
//! Each key maps to `{base_dir}/{sanitized_key}.json` holding the raw value.
//! Sanitizing is lossy: keys that differ only in characters outside
//! `[A-Za-z0-9_-]` (`a.b` and `a_b`) share one file.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::KeyValueStore;
use crate::error::SessionError;
use crate::Result;

/// Persistent storage backed by one file per key.
///
/// Distinct keys can map to the same file; see [`FileStorage::path_for`].
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at `base_dir`, creating the directory if needed.
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file holding `key`.
    ///
    /// Characters outside `[A-Za-z0-9_-]` become `_`, so `a.b` and `a_b`
    /// resolve to the same path.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for FileStorage {
    /// Invalid UTF-8 is replaced rather than reported, so a damaged file
    /// surfaces as undecodable data instead of an I/O failure.
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(persistence(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        // Write-then-rename keeps the previous value intact if the write fails.
        fs::write(&tmp, value).map_err(|e| persistence(key, e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(persistence(key, e));
        }

        debug!(path = %path.display(), "stored entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(persistence(key, e)),
        }
    }
}

fn persistence(key: &str, source: io::Error) -> SessionError {
    SessionError::Persistence {
        key: key.to_string(),
        source,
    }
}

/// Replace anything but ASCII alphanumerics, `_` and `-` with `_`.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
