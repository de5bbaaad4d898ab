// In: src/bridge/log_file.rs

//! A file that libgmt writes its messages into for the duration of one call.

use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::config::GmtConfig;
use crate::error::Result;

/// A log file path owned for exactly one scope.
///
/// The file is removed when the `LogFile` is dropped, whether the call it was
/// capturing succeeded or not.
#[derive(Debug)]
pub struct LogFile {
    path: TempPath,
}

impl LogFile {
    /// Creates a fresh, empty file in the system temp directory, named with the
    /// configured prefix and suffix.
    pub fn create(config: &GmtConfig) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(&config.log_prefix)
            .suffix(&config.log_suffix)
            .tempfile()?;
        // Close our handle; libgmt opens the file by name.
        let path = file.into_temp_path();
        log::debug!("Created GMT log file '{}'", path.display());
        Ok(Self { path })
    }

    /// Takes ownership of a caller-chosen path. It is removed on drop like a
    /// generated one.
    pub fn adopt(path: impl Into<PathBuf>) -> Self {
        Self {
            path: TempPath::from_path(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Everything libgmt has written so far, with surrounding whitespace removed.
    /// A file libgmt never created reads as empty. Bytes that aren't UTF-8 are
    /// replaced with U+FFFD.
    pub fn read(&self) -> Result<String> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).trim().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the file now, reporting any failure instead of ignoring it.
    pub fn close(self) -> Result<()> {
        let display = self.path.display().to_string();
        match self.path.close() {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        log::debug!("Removed GMT log file '{}'", display);
        Ok(())
    }
}
