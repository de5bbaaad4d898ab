//! This module holds the two foreign boundaries of the crate.
//!
//! `native` faces down, towards the libgmt shared library loaded at runtime.
//! `python` faces up, towards CPython, and is only compiled with the `python`
//! feature.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Loading libgmt and resolving its exported symbols with `libloading`.
pub mod native;

/// The `pyo3` extension module wrapping `LibGmt` for Python callers.
#[cfg(feature = "python")]
pub mod python;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use self::native::NativeLibrary;
