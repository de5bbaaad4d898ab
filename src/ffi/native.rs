// In: src/ffi/native.rs

//! Loads the GMT shared library at runtime and binds its C entry points.
//!
//! Only `GMT_Create_Session`, `GMT_Destroy_Session`, `GMT_Get_Enum`,
//! `GMT_Call_Module`, `GMT_Create_Data` and `GMT_Handle_Messages` are bound. All
//! six must be present or loading fails, so a successfully constructed
//! `NativeLibrary` never has to look a symbol up again.

use std::ffi::{c_char, c_int, c_uint, c_void, CStr};
use std::fmt;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};

use crate::config::GmtConfig;
use crate::error::{GmtError, Result};
use crate::traits::GmtApi;

//==================================================================================
// 1. C Signatures
//==================================================================================

/// `int (*print_func)(FILE *, const char *)`. Always passed as NULL.
type PrintFn = Option<unsafe extern "C" fn(*mut c_void, *const c_char) -> c_int>;

type CreateSessionFn =
    unsafe extern "C" fn(*const c_char, c_uint, c_uint, PrintFn) -> *mut c_void;
type DestroySessionFn = unsafe extern "C" fn(*mut c_void) -> c_int;
type GetEnumFn = unsafe extern "C" fn(*const c_char) -> c_int;
type CallModuleFn = unsafe extern "C" fn(*mut c_void, *const c_char, c_int, *mut c_void) -> c_int;
type CreateDataFn = unsafe extern "C" fn(
    *mut c_void,  // API
    c_uint,       // family
    c_uint,       // geometry
    c_uint,       // mode
    *const u64,   // dim
    *const f64,   // range
    *const f64,   // inc
    c_uint,       // registration
    c_int,        // pad
    *mut c_void,  // data
) -> *mut c_void;
type HandleMessagesFn = unsafe extern "C" fn(*mut c_void, c_uint, c_uint, *const c_char) -> c_int;

//==================================================================================
// 2. The Loaded Library
//==================================================================================

/// libgmt, opened with `libloading`, with every bound entry point resolved.
pub struct NativeLibrary {
    path: PathBuf,
    create_session: CreateSessionFn,
    destroy_session: DestroySessionFn,
    get_enum: GetEnumFn,
    call_module: CallModuleFn,
    create_data: CreateDataFn,
    handle_messages: HandleMessagesFn,
    // The function pointers above are only valid while this handle is alive.
    _library: Library,
}

impl NativeLibrary {
    /// Opens the library file described by `config` (see `GmtConfig::library_file`).
    pub fn load(config: &GmtConfig) -> Result<Self> {
        Self::open(&config.library_file())
    }

    /// Opens the shared library at `path` and resolves every bound symbol.
    ///
    /// # Errors
    /// - `LibraryNotFound`: the platform loader could not open `path`.
    /// - `Clib`: the library was opened but one of the GMT entry points is missing.
    pub fn open(path: &Path) -> Result<Self> {
        log::info!("Loading GMT shared library '{}'", path.display());

        // Loading runs the library's initializers; there is no way to vet them first.
        let library = unsafe { Library::new(path) }.map_err(|e| {
            GmtError::LibraryNotFound(format!(
                "Error loading the GMT shared library '{}': {}",
                path.display(),
                e
            ))
        })?;

        // SAFETY: each alias above mirrors the prototype declared in gmt.h.
        let bound = unsafe {
            NativeLibrary {
                path: path.to_path_buf(),
                create_session: resolve(&library, "Create_Session")?,
                destroy_session: resolve(&library, "Destroy_Session")?,
                get_enum: resolve(&library, "Get_Enum")?,
                call_module: resolve(&library, "Call_Module")?,
                create_data: resolve(&library, "Create_Data")?,
                handle_messages: resolve(&library, "Handle_Messages")?,
                _library: library,
            }
        };

        log::debug!("Bound GMT C API from '{}'", bound.path.display());
        Ok(bound)
    }

    /// The path the library was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Looks up `GMT_<name>` and copies the function pointer out of the symbol.
///
/// # Safety
/// `T` must be the exact function pointer type of the exported symbol, and the
/// returned pointer must not outlive `library`.
unsafe fn resolve<T: Copy>(library: &Library, name: &str) -> Result<T> {
    let symbol_name = format!("GMT_{}\0", name);
    let symbol: Symbol<T> = library.get(symbol_name.as_bytes()).map_err(|e| {
        log::warn!("Symbol lookup for GMT_{} failed: {}", name, e);
        GmtError::clib(format!(
            "Error loading libgmt. Couldn't access function GMT_{}.",
            name
        ))
    })?;
    Ok(*symbol)
}

impl fmt::Debug for NativeLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeLibrary")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

//==================================================================================
// 3. GmtApi Implementation
//==================================================================================

impl GmtApi for NativeLibrary {
    unsafe fn create_session(&self, tag: &CStr, pad: c_uint, mode: c_uint) -> *mut c_void {
        (self.create_session)(tag.as_ptr(), pad, mode, None)
    }

    unsafe fn destroy_session(&self, session: *mut c_void) -> c_int {
        (self.destroy_session)(session)
    }

    unsafe fn get_enum(&self, name: &CStr) -> c_int {
        (self.get_enum)(name.as_ptr())
    }

    unsafe fn call_module(
        &self,
        session: *mut c_void,
        module: &CStr,
        mode: c_int,
        args: *mut c_void,
    ) -> c_int {
        (self.call_module)(session, module.as_ptr(), mode, args)
    }

    unsafe fn create_data(
        &self,
        session: *mut c_void,
        family: c_uint,
        geometry: c_uint,
        mode: c_uint,
        dim: *const u64,
        range: *const f64,
        inc: *const f64,
        registration: c_uint,
        pad: c_int,
        data: *mut c_void,
    ) -> *mut c_void {
        (self.create_data)(
            session,
            family,
            geometry,
            mode,
            dim,
            range,
            inc,
            registration,
            pad,
            data,
        )
    }

    unsafe fn handle_messages(
        &self,
        session: *mut c_void,
        mode: c_uint,
        method: c_uint,
        dest: *const c_char,
    ) -> c_int {
        (self.handle_messages)(session, mode, method, dest)
    }
}
