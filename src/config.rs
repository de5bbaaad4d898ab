// In: src/config.rs

//! The single source of truth for how gmt-clib finds libgmt and names the
//! resources it creates.
//!
//! `GmtConfig` is created once at the application boundary (from defaults, the
//! environment, or a JSON document) and handed to `LibGmt`, which keeps it for
//! the lifetime of the binding.

use std::ffi::OsString;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable naming the directory that contains the GMT shared library.
pub const LIBRARY_PATH_ENV: &str = "GMT_LIBRARY_PATH";

//==================================================================================
// I. The Unified GmtConfig
//==================================================================================

/// Settings for loading libgmt and for the sessions and log files it creates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GmtConfig {
    /// The name of the shared library **without** the platform extension.
    /// Can be a bare name resolved by the platform loader or a full path.
    #[serde(default = "default_library_name")]
    pub library_name: String,

    /// Directory containing the library. When unset, the platform loader's
    /// search rules apply.
    #[serde(default)]
    pub library_path: Option<PathBuf>,

    /// The tag handed to `GMT_Create_Session`. It doesn't affect the outcome of
    /// any call, but shows up in libgmt's own messages.
    #[serde(default = "default_session_name")]
    pub session_name: String,

    /// Prefix for the temporary files libgmt writes its messages into.
    #[serde(default = "default_log_prefix")]
    pub log_prefix: String,

    /// Suffix for the temporary files libgmt writes its messages into.
    #[serde(default = "default_log_suffix")]
    pub log_suffix: String,
}

impl Default for GmtConfig {
    fn default() -> Self {
        Self {
            library_name: default_library_name(),
            library_path: None,
            session_name: default_session_name(),
            log_prefix: default_log_prefix(),
            log_suffix: default_log_suffix(),
        }
    }
}

impl GmtConfig {
    /// Defaults, with `library_path` taken from `GMT_LIBRARY_PATH` when it is set.
    pub fn from_env() -> Self {
        Self::default().with_library_path_var(std::env::var_os(LIBRARY_PATH_ENV))
    }

    /// The settings behind the Python `LibGMT` class: like `from_env`, but with
    /// sessions and log files named `gmt-python-*`.
    pub fn for_python(libname: &str) -> Self {
        Self::from_env()
            .with_library_name(libname)
            .with_session_name("gmt-python-session")
            .with_log_prefix("gmt-python-")
    }

    /// Parses a (possibly partial) JSON object. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The file handed to the platform loader: `[library_path/]library_name` plus
    /// the platform's shared library extension (`.so`, `.dylib` or `.dll`).
    pub fn library_file(&self) -> PathBuf {
        let file_name = format!("{}{}", self.library_name, std::env::consts::DLL_SUFFIX);
        match &self.library_path {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    /// Replaces the library name, keeping every other setting.
    pub fn with_library_name(mut self, name: impl Into<String>) -> Self {
        self.library_name = name.into();
        self
    }

    /// Replaces the session tag, keeping every other setting.
    pub fn with_session_name(mut self, name: impl Into<String>) -> Self {
        self.session_name = name.into();
        self
    }

    /// Replaces the prefix of generated log file names, keeping every other setting.
    pub fn with_log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_prefix = prefix.into();
        self
    }

    // Empty values are treated as unset.
    fn with_library_path_var(mut self, value: Option<OsString>) -> Self {
        if let Some(dir) = value.filter(|v| !v.is_empty()) {
            self.library_path = Some(PathBuf::from(dir));
        }
        self
    }
}

/// Helper for `serde` to provide a default for `library_name`.
fn default_library_name() -> String {
    "libgmt".to_string()
}

/// Helper for `serde` to provide a default for `session_name`.
fn default_session_name() -> String {
    "gmt-rust-session".to_string()
}

fn default_log_prefix() -> String {
    "gmt-rust-".to_string()
}

fn default_log_suffix() -> String {
    ".log".to_string()
}
