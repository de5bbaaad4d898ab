//! This module defines the seam between the safe `LibGmt` facade and libgmt itself.
//!
//! `GmtApi` has one method per bound C entry point. The production implementation
//! (`ffi::native::NativeLibrary`) forwards to function pointers resolved from the
//! shared library; tests substitute a recording fake.

use std::ffi::{c_char, c_int, c_uint, c_void, CStr};

/// Raw access to the bound libgmt entry points.
///
/// Arguments and return values keep their C shapes. Turning return codes and NULL
/// pointers into `GmtError`s is the caller's job.
pub trait GmtApi {
    /// `GMT_Create_Session`. A NULL print function makes libgmt use its default printer.
    ///
    /// # Safety
    /// Must only be called with a library that exports a compatible `GMT_Create_Session`.
    unsafe fn create_session(&self, tag: &CStr, pad: c_uint, mode: c_uint) -> *mut c_void;

    /// `GMT_Destroy_Session`. Returns libgmt's status code.
    ///
    /// # Safety
    /// `session` must be a live pointer returned by `create_session` on this same API
    /// and must not be used again afterwards.
    unsafe fn destroy_session(&self, session: *mut c_void) -> c_int;

    /// `GMT_Get_Enum`. Returns `-99999` for unknown names.
    ///
    /// # Safety
    /// Must only be called with a library that exports a compatible `GMT_Get_Enum`.
    unsafe fn get_enum(&self, name: &CStr) -> c_int;

    /// `GMT_Call_Module`. `args` is interpreted according to `mode`.
    ///
    /// # Safety
    /// `session` must be live, and `args` must match what libgmt expects for `mode`.
    unsafe fn call_module(
        &self,
        session: *mut c_void,
        module: &CStr,
        mode: c_int,
        args: *mut c_void,
    ) -> c_int;

    /// `GMT_Create_Data`. NULL array pointers select libgmt's defaults.
    ///
    /// # Safety
    /// `session` must be live; non-NULL array pointers must reference at least 4
    /// (`dim`, `range`) or 2 (`inc`) elements.
    #[allow(clippy::too_many_arguments)]
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
    ) -> *mut c_void;

    /// `GMT_Handle_Messages`. `dest` is interpreted according to `method`.
    ///
    /// # Safety
    /// `session` must be live and `dest` must match what libgmt expects for `method`.
    unsafe fn handle_messages(
        &self,
        session: *mut c_void,
        mode: c_uint,
        method: c_uint,
        dest: *const c_char,
    ) -> c_int;
}
