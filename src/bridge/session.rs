// In: src/bridge/session.rs

//! The `LibGmt` facade: one loaded libgmt, at most one open session, and the
//! typed wrappers around every bound entry point.

use std::ffi::{c_void, CString};
use std::ops::Deref;
use std::path::Path;
use std::ptr::{self, NonNull};

use crate::bridge::data::{DataHandle, DataOptions};
use crate::bridge::log_file::LogFile;
use crate::config::GmtConfig;
use crate::error::{GmtError, Result};
use crate::ffi::native::NativeLibrary;
use crate::traits::GmtApi;
use crate::types::{DataGeometry, DataMode, FamilySpec};

/// What `GMT_Get_Enum` returns for a name it doesn't know (`GMT_NOTSET`).
pub const GMT_NOTSET: i32 = -99999;

//==================================================================================
// I. Session Handle
//==================================================================================

/// The opaque `GMTAPI_CTRL` pointer identifying an open libgmt session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(NonNull<c_void>);

impl SessionHandle {
    fn from_raw(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(SessionHandle)
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }

    /// The session pointer as an integer, for callers that can only carry integers.
    pub fn address(&self) -> usize {
        self.0.as_ptr() as usize
    }
}

//==================================================================================
// II. The LibGmt Facade
//==================================================================================

/// Access to the GMT C API through a runtime-loaded shared library.
///
/// Most operations need an open session. Open one with [`LibGmt::scope`], which
/// destroys it again when the returned guard goes out of scope, or manage it by
/// hand with [`LibGmt::begin`] and [`LibGmt::end`]. Calling a session-bound
/// method without an open session fails with `GmtError::NoSession`.
///
/// ```no_run
/// use gmt_clib::LibGmt;
///
/// let mut lib = LibGmt::new("libgmt")?;
/// let session = lib.scope()?;
/// session.call_module("psbasemap", "-R0/5/0/10 -JX10c -Bafg -P ->basemap.ps")?;
/// session.finish()?;
/// # Ok::<(), gmt_clib::GmtError>(())
/// ```
pub struct LibGmt<A: GmtApi = NativeLibrary> {
    api: A,
    config: GmtConfig,
    session: Option<SessionHandle>,
}

impl LibGmt<NativeLibrary> {
    /// Loads `libname` (no extension), looking in `GMT_LIBRARY_PATH` when it is set.
    pub fn new(libname: &str) -> Result<Self> {
        Self::with_config(GmtConfig::from_env().with_library_name(libname))
    }

    /// Loads the library described by `config`.
    pub fn with_config(config: GmtConfig) -> Result<Self> {
        let api = NativeLibrary::load(&config)?;
        Ok(Self::with_api(api, config))
    }
}

impl<A: GmtApi> LibGmt<A> {
    /// Wraps an already bound API. No session is opened.
    pub fn with_api(api: A, config: GmtConfig) -> Self {
        Self {
            api,
            config,
            session: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &GmtConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The handle of the open session.
    pub fn current_session(&self) -> Result<SessionHandle> {
        self.session.ok_or(GmtError::NoSession)
    }

    //------------------------------------------------------------------------------
    // Session lifecycle
    //------------------------------------------------------------------------------

    /// Opens a session tagged with `config.session_name`.
    pub fn begin(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Err(GmtError::clib("A GMT session is already open."));
        }
        let name = self.config.session_name.clone();
        let session = self.create_session(&name)?;
        log::info!("Opened GMT session '{}' ({:p})", name, session.as_ptr());
        self.session = Some(session);
        Ok(())
    }

    /// Destroys the open session. The handle is forgotten even if libgmt
    /// reports a failure, so it can never be used again.
    pub fn end(&mut self) -> Result<()> {
        let session = self.session.take().ok_or(GmtError::NoSession)?;
        self.destroy_session(session)?;
        log::info!("Closed GMT session ({:p})", session.as_ptr());
        Ok(())
    }

    /// Opens a session that lives as long as the returned guard.
    pub fn scope(&mut self) -> Result<SessionScope<'_, A>> {
        self.begin()?;
        Ok(SessionScope {
            lib: self,
            finished: false,
        })
    }

    /// Creates the `GMTAPI_CTRL` struct required by the other API functions.
    pub(crate) fn create_session(&self, name: &str) -> Result<SessionHandle> {
        let pad = self.get_unsigned_constant("GMT_PAD_DEFAULT")?;
        let session_type = self.get_unsigned_constant("GMT_SESSION_EXTERNAL")?;
        let tag = CString::new(name)?;

        let raw = unsafe { self.api.create_session(&tag, pad, session_type) };
        log_event!("event" = "create_session", "name" = name, "pointer" = format!("{:p}", raw));

        SessionHandle::from_raw(raw)
            .ok_or_else(|| GmtError::clib("Failed to create a GMT API void pointer."))
    }

    /// Terminates a session and frees its memory. Leaving a session behind can
    /// leave configuration files that influence later sessions.
    pub(crate) fn destroy_session(&self, session: SessionHandle) -> Result<()> {
        let status = unsafe { self.api.destroy_session(session.as_ptr()) };
        log_event!(
            "event" = "destroy_session",
            "pointer" = format!("{:p}", session.as_ptr()),
            "status" = status
        );
        if status != 0 {
            return Err(GmtError::clib("Failed to destroy GMT API session"));
        }
        Ok(())
    }

    //------------------------------------------------------------------------------
    // Constants
    //------------------------------------------------------------------------------

    /// The value of a constant (C enum) from `gmt_resources.h`, such as
    /// `"GMT_SESSION_EXTERNAL"`. Values can change between GMT releases, so
    /// always look them up instead of hard-coding them.
    pub fn get_constant(&self, name: &str) -> Result<i32> {
        let c_name = CString::new(name)?;
        let value = unsafe { self.api.get_enum(&c_name) };
        log_event!("event" = "get_constant", "name" = name, "value" = value);

        if value == GMT_NOTSET {
            return Err(GmtError::clib(format!(
                "Constant '{}' doesn't exist in libgmt.",
                name
            )));
        }
        Ok(value)
    }

    // For constants passed through `unsigned int` parameters.
    fn get_unsigned_constant(&self, name: &str) -> Result<u32> {
        let value = self.get_constant(name)?;
        u32::try_from(value).map_err(|_| {
            GmtError::clib(format!(
                "Constant '{}' has value {}, which can't be passed as unsigned.",
                name, value
            ))
        })
    }

    //------------------------------------------------------------------------------
    // Messages and modules
    //------------------------------------------------------------------------------

    /// Sends the messages of the next libgmt call to a file.
    ///
    /// With `None`, a fresh temporary file is created. Either way the returned
    /// `LogFile` owns the path and removes it when dropped, including when this
    /// method fails after creating it.
    pub fn log_to_file(&self, logfile: Option<&Path>) -> Result<LogFile> {
        let session = self.current_session()?;
        let mode = self.get_unsigned_constant("GMT_LOG_ONCE")?;
        let method = self.get_unsigned_constant("GMT_IS_FILE")?;

        let log = match logfile {
            Some(path) => LogFile::adopt(path),
            None => LogFile::create(&self.config)?,
        };
        let c_path = path_to_cstring(log.path())?;

        let status = unsafe {
            self.api
                .handle_messages(session.as_ptr(), mode, method, c_path.as_ptr())
        };
        log_event!(
            "event" = "handle_messages",
            "path" = log.path().display(),
            "status" = status
        );
        if status != 0 {
            return Err(GmtError::clib(format!(
                "Failed to set logging to file '{}' (error: {}).",
                log.path().display(),
                status
            )));
        }
        Ok(log)
    }

    /// Runs a GMT module with its arguments given as one command-line string,
    /// e.g. `call_module("pscoast", "-R0/5/0/10 -JM10c -G200")`.
    ///
    /// On failure, whatever libgmt logged during the call becomes part of the
    /// error message.
    pub fn call_module(&self, module: &str, args: &str) -> Result<()> {
        let mode = self.get_constant("GMT_MODULE_CMD")?;
        let c_module = CString::new(module)?;
        let c_args = CString::new(args)?;

        // Checked before the log file exists so a missing session leaves nothing behind.
        let session = self.current_session()?;
        let logfile = self.log_to_file(None)?;

        let status = unsafe {
            self.api.call_module(
                session.as_ptr(),
                &c_module,
                mode,
                c_args.as_ptr() as *mut c_void,
            )
        };
        log_event!(
            "event" = "call_module",
            "module" = module,
            "args" = args,
            "status" = status
        );

        // The log must be read before the file is removed.
        let log = logfile.read();
        let closed = logfile.close();

        if status != 0 {
            if let Err(e) = &closed {
                log::warn!("Failed to remove GMT log file after '{}' failed: {}", module, e);
            }
            // The module's status outranks a log we couldn't read.
            let log = log.unwrap_or_else(|e| {
                log::warn!("Failed to read GMT log file after '{}' failed: {}", module, e);
                String::new()
            });
            if log.is_empty() {
                return Err(GmtError::clib(format!(
                    "Invalid GMT module name '{}'.",
                    module
                )));
            }
            return Err(GmtError::clib(format!(
                "'{}' failed (error: {}).\n---------- Error log ----------\n\n{}\n\n-------------------------------",
                module, status, log
            )));
        }
        closed
    }

    //------------------------------------------------------------------------------
    // Data containers
    //------------------------------------------------------------------------------

    /// Creates an empty GMT data container in the open session.
    ///
    /// `registration` and `pad` default to `GMT_GRID_NODE_REG` and
    /// `GMT_PAD_DEFAULT` when `options` leaves them unset.
    pub fn create_data(
        &self,
        family: FamilySpec,
        geometry: DataGeometry,
        mode: DataMode,
        options: &DataOptions,
    ) -> Result<DataHandle> {
        let session = self.current_session()?;

        let family_value = self.family_value(family)?;
        let geometry_value = self.get_unsigned_constant(geometry.constant_name())?;
        let mode_value = self.get_unsigned_constant(mode.constant_name())?;
        let registration = match options.registration {
            Some(registration) => registration,
            None => self.get_unsigned_constant("GMT_GRID_NODE_REG")?,
        };
        let pad = match options.pad {
            Some(pad) => pad,
            None => self.get_constant("GMT_PAD_DEFAULT")?,
        };

        let raw = unsafe {
            self.api.create_data(
                session.as_ptr(),
                family_value,
                geometry_value,
                mode_value,
                options.dim_ptr(),
                options.ranges_ptr(),
                options.inc_ptr(),
                registration,
                pad,
                // NULL: no existing data to wrap.
                ptr::null_mut(),
            )
        };
        log_event!(
            "event" = "create_data",
            "family" = family,
            "geometry" = geometry,
            "mode" = mode,
            "pointer" = format!("{:p}", raw)
        );

        DataHandle::from_raw(raw)
            .ok_or_else(|| GmtError::clib("Failed to create an empty GMT data pointer."))
    }

    /// Like [`LibGmt::create_data`], with family, geometry and mode given by their
    /// constant names (e.g. `"GMT_IS_DATASET|GMT_VIA_MATRIX"`, `"GMT_IS_POINT"`,
    /// `"GMT_OUTPUT"`). Invalid names are rejected before libgmt is called.
    pub fn create_data_from_names(
        &self,
        family: &str,
        geometry: &str,
        mode: &str,
        options: &DataOptions,
    ) -> Result<DataHandle> {
        let family = family.parse::<FamilySpec>()?;
        let mode = mode.parse::<DataMode>()?;
        let geometry = geometry.parse::<DataGeometry>()?;
        self.create_data(family, geometry, mode, options)
    }

    // libgmt takes the family and its via as one integer: their sum.
    fn family_value(&self, spec: FamilySpec) -> Result<u32> {
        let family_value = self.get_unsigned_constant(spec.family.constant_name())?;
        let via_value = match spec.via {
            Some(via) => self.get_unsigned_constant(via.constant_name())?,
            None => 0,
        };
        family_value.checked_add(via_value).ok_or_else(|| {
            GmtError::clib(format!("Data family value overflows for '{}'.", spec))
        })
    }
}

impl<A: GmtApi> Drop for LibGmt<A> {
    fn drop(&mut self) {
        if self.session.is_some() {
            log::warn!("GMT session still open when the binding was dropped; destroying it");
            if let Err(e) = self.end() {
                log::warn!("Failed to destroy GMT session on drop: {}", e);
            }
        }
    }
}

//==================================================================================
// III. Scoped Session
//==================================================================================

/// An open session tied to a lexical scope. Dereferences to the owning `LibGmt`.
///
/// Dropping the guard destroys the session; a failure to do so is logged. Use
/// [`SessionScope::finish`] to observe that failure instead.
pub struct SessionScope<'a, A: GmtApi> {
    lib: &'a mut LibGmt<A>,
    finished: bool,
}

impl<A: GmtApi> SessionScope<'_, A> {
    /// Destroys the session now and reports the result.
    pub fn finish(mut self) -> Result<()> {
        self.finished = true;
        self.lib.end()
    }
}

impl<A: GmtApi> Deref for SessionScope<'_, A> {
    type Target = LibGmt<A>;

    fn deref(&self) -> &LibGmt<A> {
        &*self.lib
    }
}

impl<A: GmtApi> Drop for SessionScope<'_, A> {
    fn drop(&mut self) {
        if !self.finished {
            if let Err(e) = self.lib.end() {
                log::warn!("Failed to destroy GMT session at end of scope: {}", e);
            }
        }
    }
}

//==================================================================================
// IV. Helpers
//==================================================================================

#[cfg(unix)]
fn path_to_cstring(path: &Path) -> Result<CString> {
    use std::os::unix::ffi::OsStrExt;
    Ok(CString::new(path.as_os_str().as_bytes())?)
}

#[cfg(not(unix))]
fn path_to_cstring(path: &Path) -> Result<CString> {
    let path_str = path.to_str().ok_or_else(|| {
        GmtError::clib(format!(
            "Log file path '{}' is not valid UTF-8.",
            path.display()
        ))
    })?;
    Ok(CString::new(path_str)?)
}
