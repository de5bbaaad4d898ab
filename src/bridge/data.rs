// In: src/bridge/data.rs

//! Optional array arguments of `GMT_Create_Data` and their marshalling into the
//! pointer arguments libgmt expects.

use std::ffi::c_void;
use std::ptr::{self, NonNull};

use crate::error::{GmtError, Result};

/// Optional arguments to `LibGmt::create_data`. Anything left as `None` lets
/// libgmt (or the session's defaults) decide.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DataOptions {
    /// Dimensions of the container. Their meaning depends on the family; see
    /// `GMT_Create_Data` in the GMT API documentation.
    pub dim: Option<[u64; 4]>,
    /// Extent as `[xmin, xmax, ymin, ymax]`. Called `range` on the C side.
    pub ranges: Option<[f64; 4]>,
    /// Increments between points as `[x_inc, y_inc]`.
    pub inc: Option<[f64; 2]>,
    /// Node registration. Defaults to `GMT_GRID_NODE_REG`.
    pub registration: Option<u32>,
    /// Grid padding. Defaults to `GMT_PAD_DEFAULT`.
    pub pad: Option<i32>,
}

impl DataOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dim(mut self, dim: [u64; 4]) -> Self {
        self.dim = Some(dim);
        self
    }

    pub fn ranges(mut self, ranges: [f64; 4]) -> Self {
        self.ranges = Some(ranges);
        self
    }

    pub fn inc(mut self, inc: [f64; 2]) -> Self {
        self.inc = Some(inc);
        self
    }

    pub fn registration(mut self, registration: u32) -> Self {
        self.registration = Some(registration);
        self
    }

    pub fn pad(mut self, pad: i32) -> Self {
        self.pad = Some(pad);
        self
    }

    /// Builds options from variable-length inputs, as received from dynamic callers.
    /// Each array goes through `fixed_array`.
    pub fn from_slices(
        dim: Option<&[u64]>,
        ranges: Option<&[f64]>,
        inc: Option<&[f64]>,
    ) -> Result<Self> {
        Ok(Self {
            dim: dim.map(|d| fixed_array("dim", d)).transpose()?,
            ranges: ranges.map(|r| fixed_array("ranges", r)).transpose()?,
            inc: inc.map(|i| fixed_array("inc", i)).transpose()?,
            ..Self::default()
        })
    }

    pub(crate) fn dim_ptr(&self) -> *const u64 {
        array_ptr(&self.dim)
    }

    pub(crate) fn ranges_ptr(&self) -> *const f64 {
        array_ptr(&self.ranges)
    }

    pub(crate) fn inc_ptr(&self) -> *const f64 {
        array_ptr(&self.inc)
    }
}

/// Copies `values` into a fixed-size array for a C `T[N]` argument.
///
/// Missing trailing elements are zero-filled. More than `N` values is an error.
pub fn fixed_array<T, const N: usize>(name: &str, values: &[T]) -> Result<[T; N]>
where
    T: Copy + Default,
{
    if values.len() > N {
        return Err(GmtError::clib(format!(
            "Argument '{}' accepts at most {} values, got {}.",
            name,
            N,
            values.len()
        )));
    }
    let mut array = [T::default(); N];
    array[..values.len()].copy_from_slice(values);
    Ok(array)
}

// NULL for an absent array, otherwise a pointer to its first element.
fn array_ptr<T, const N: usize>(array: &Option<[T; N]>) -> *const T {
    match array {
        Some(values) => values.as_ptr(),
        None => ptr::null(),
    }
}

/// An empty data container allocated by libgmt inside the current session.
///
/// The container belongs to the session; libgmt frees it when the session is
/// destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataHandle(NonNull<c_void>);

impl DataHandle {
    pub(crate) fn from_raw(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(DataHandle)
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }

    /// The container's address, for callers that can only carry integers.
    pub fn address(&self) -> usize {
        self.0.as_ptr() as usize
    }
}
