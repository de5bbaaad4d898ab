// In: src/ffi/python.rs

use std::path::PathBuf;

use log::LevelFilter;
use pyo3::create_exception;
use pyo3::exceptions::PyException;
use pyo3::prelude::*;

use crate::bridge::{DataOptions, LibGmt, LogFile};
use crate::config::GmtConfig;
use crate::observability;
use crate::types::{DataFamily, DataGeometry, DataMode, DataVia};

//==================================================================================
// I. Exceptions
//==================================================================================

create_exception!(
    gmt_clib,
    GMTCLibError,
    PyException,
    "Error raised when a call to libgmt fails or an argument is rejected."
);
create_exception!(
    gmt_clib,
    GMTCLibNoSessionError,
    GMTCLibError,
    "Error raised when a method needing a session is called outside a 'with' block."
);
create_exception!(
    gmt_clib,
    GMTCLibNotFoundError,
    GMTCLibError,
    "Error raised when the GMT shared library can't be loaded."
);

//==================================================================================
// II. The LibGMT Context Manager
//==================================================================================

/// Load and access the GMT shared library (libgmt).
///
/// Works as a context manager that creates a GMT C API session on entry and
/// destroys it on exit. Most methods must be called inside the `with` block.
///
/// >>> with LibGMT() as lib:
/// ...     lib.call_module('psbasemap', '-R0/5/0/10 -JX10c -Ba')
#[pyclass(name = "LibGMT", module = "gmt_clib", unsendable)]
pub struct PyLibGmt {
    inner: LibGmt,
}

#[pymethods]
impl PyLibGmt {
    #[new]
    #[pyo3(signature = (libname = "libgmt"))]
    fn new(libname: &str) -> PyResult<Self> {
        Ok(Self {
            inner: LibGmt::with_config(GmtConfig::for_python(libname))?,
        })
    }

    #[classattr]
    fn data_families() -> Vec<&'static str> {
        DataFamily::names()
    }

    #[classattr]
    fn data_vias() -> Vec<&'static str> {
        DataVia::names()
    }

    #[classattr]
    fn data_geometries() -> Vec<&'static str> {
        DataGeometry::names()
    }

    #[classattr]
    fn data_modes() -> Vec<&'static str> {
        DataMode::names()
    }

    fn __enter__(mut slf: PyRefMut<'_, Self>) -> PyResult<PyRefMut<'_, Self>> {
        slf.inner.begin()?;
        Ok(slf)
    }

    /// Destroys the session. Returns `False` so exceptions from the block propagate.
    fn __exit__(
        &mut self,
        _exc_type: Option<PyObject>,
        _exc_value: Option<PyObject>,
        _traceback: Option<PyObject>,
    ) -> PyResult<bool> {
        self.inner.end()?;
        Ok(false)
    }

    /// The address of the current session's `GMTAPI_CTRL` struct.
    #[getter]
    fn current_session(&self) -> PyResult<usize> {
        Ok(self.inner.current_session()?.address())
    }

    /// Get the value of a constant (C enum) from `gmt_resources.h`.
    fn get_constant(&self, name: &str) -> PyResult<i32> {
        Ok(self.inner.get_constant(name)?)
    }

    /// Call a GMT module with the given arguments as a single string.
    fn call_module(&self, module: &str, args: &str) -> PyResult<()> {
        Ok(self.inner.call_module(module, args)?)
    }

    /// Create an empty GMT data container and return its address.
    #[pyo3(signature = (
        family,
        geometry,
        mode,
        dim = None,
        ranges = None,
        inc = None,
        registration = None,
        pad = None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn create_data(
        &self,
        family: &str,
        geometry: &str,
        mode: &str,
        dim: Option<Vec<u64>>,
        ranges: Option<Vec<f64>>,
        inc: Option<Vec<f64>>,
        registration: Option<u32>,
        pad: Option<i32>,
    ) -> PyResult<usize> {
        let mut options =
            DataOptions::from_slices(dim.as_deref(), ranges.as_deref(), inc.as_deref())?;
        options.registration = registration;
        options.pad = pad;

        let data = self
            .inner
            .create_data_from_names(family, geometry, mode, &options)?;
        Ok(data.address())
    }

    /// Send libgmt's messages for the next call to a file.
    ///
    /// Returns a context manager yielding the file name. The file is deleted on exit.
    #[pyo3(signature = (logfile = None))]
    fn log_to_file(&self, logfile: Option<PathBuf>) -> PyResult<PyLogFile> {
        let log = self.inner.log_to_file(logfile.as_deref())?;
        Ok(PyLogFile { inner: Some(log) })
    }
}

/// Context manager owning one libgmt log file.
#[pyclass(name = "LogFile", module = "gmt_clib")]
pub struct PyLogFile {
    inner: Option<LogFile>,
}

#[pymethods]
impl PyLogFile {
    fn __enter__(&self) -> PyResult<String> {
        self.path()
    }

    fn __exit__(
        &mut self,
        _exc_type: Option<PyObject>,
        _exc_value: Option<PyObject>,
        _traceback: Option<PyObject>,
    ) -> PyResult<bool> {
        if let Some(log) = self.inner.take() {
            log.close()?;
        }
        Ok(false)
    }

    /// The path of the log file.
    #[getter]
    fn path(&self) -> PyResult<String> {
        match &self.inner {
            Some(log) => Ok(log.path().to_string_lossy().to_string()),
            None => Err(GMTCLibError::new_err("The log file has already been removed.")),
        }
    }

    /// The (trimmed) text libgmt has written so far.
    fn read(&self) -> PyResult<String> {
        match &self.inner {
            Some(log) => Ok(log.read()?),
            None => Err(GMTCLibError::new_err("The log file has already been removed.")),
        }
    }
}

//==================================================================================
// III. Module Functions
//==================================================================================

#[pyfunction]
#[pyo3(name = "enable_verbose_logging", signature = (log_file = None))]
pub fn enable_verbose_logging_py(log_file: Option<PathBuf>) -> PyResult<bool> {
    Ok(observability::init_logger(LevelFilter::Debug, log_file.as_deref())?)
}
