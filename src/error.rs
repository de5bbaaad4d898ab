// In: src/error.rs

//! This module defines the single, unified error type for the entire gmt-clib crate.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use std::ffi::NulError;
use thiserror::Error;

/// Message used whenever a session-bound operation runs without an open session.
pub(crate) const NO_SESSION_MESSAGE: &str =
    "No currently open session. Call methods only inside a 'with' block.";

#[derive(Error, Debug)]
pub enum GmtError {
    // =========================================================================
    // === Binding Errors (one category per failure the caller can act on)
    // =========================================================================
    /// The shared library could not be opened by the platform loader.
    #[error("{0}")]
    LibraryNotFound(String),

    /// A libgmt call failed, a constant is unknown, or an argument was rejected
    /// before reaching libgmt.
    #[error("{0}")]
    Clib(String),

    /// A session-bound operation was invoked while no session is open.
    #[error("{}", NO_SESSION_MESSAGE)]
    NoSession,

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// A string passed towards libgmt contained an interior NUL byte.
    #[error("String argument contains an interior NUL byte: {0}")]
    InvalidString(#[from] NulError),

    /// Creating, reading or removing a temporary log file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The JSON configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl GmtError {
    /// Shorthand for building a `GmtError::Clib` from anything string-like.
    pub(crate) fn clib(msg: impl Into<String>) -> Self {
        GmtError::Clib(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, GmtError>;

// =============================================================================
// === Python Conversions ===
// =============================================================================

#[cfg(feature = "python")]
impl From<GmtError> for pyo3::PyErr {
    fn from(err: GmtError) -> pyo3::PyErr {
        use crate::ffi::python::{GMTCLibError, GMTCLibNoSessionError, GMTCLibNotFoundError};

        match err {
            GmtError::NoSession => GMTCLibNoSessionError::new_err(err.to_string()),
            GmtError::LibraryNotFound(_) => GMTCLibNotFoundError::new_err(err.to_string()),
            _ => GMTCLibError::new_err(err.to_string()),
        }
    }
}
