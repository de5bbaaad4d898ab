//! This file is the root of the `gmt_clib` Rust crate: bindings to the GMT C API
//! shared library (libgmt).
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`bridge`, `ffi`, etc.)
//!     and re-exporting the types most callers need.
//! 2.  Defining the `#[pymodule]` which acts as the main entry point when the
//!     compiled library is imported into Python (with the `python` feature).

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

#[doc(hidden)]
pub use log;

pub mod bridge;
pub mod config;
pub mod error;
pub mod ffi;
pub mod traits;
pub mod types;

pub use bridge::{DataHandle, DataOptions, LibGmt, LogFile, SessionHandle, SessionScope, GMT_NOTSET};
pub use config::GmtConfig;
pub use error::{GmtError, Result};
pub use ffi::NativeLibrary;
pub use observability::init_logger;
pub use traits::GmtApi;
pub use types::{DataFamily, DataGeometry, DataMode, DataVia, FamilySpec};

//==================================================================================
// 2. Python Module Definition
//==================================================================================
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The `gmt_clib` Python module.
#[cfg(feature = "python")]
#[pymodule]
fn gmt_clib(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use ffi::python::{
        GMTCLibError, GMTCLibNoSessionError, GMTCLibNotFoundError, PyLibGmt, PyLogFile,
    };

    let py = m.py();

    // --- Classes ---
    m.add_class::<PyLibGmt>()?;
    m.add_class::<PyLogFile>()?;

    // --- Functions ---
    m.add_function(wrap_pyfunction!(ffi::python::enable_verbose_logging_py, m)?)?;

    // --- Exceptions ---
    m.add("GMTCLibError", py.get_type_bound::<GMTCLibError>())?;
    m.add("GMTCLibNoSessionError", py.get_type_bound::<GMTCLibNoSessionError>())?;
    m.add("GMTCLibNotFoundError", py.get_type_bound::<GMTCLibNotFoundError>())?;

    // --- Expose version string as a module attribute ---
    m.add("__version__", VERSION)?;

    Ok(())
}
