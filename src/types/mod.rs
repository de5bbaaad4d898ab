//! This module defines the strongly-typed vocabulary accepted by `GMT_Create_Data`.
//!
//! libgmt identifies data families, geometries and creation modes by the names of
//! its C enum constants. The enums here close those sets so that a misspelled name
//! is rejected in Rust, before any native call is made.

pub mod gmt_data_type;

// Re-export the main type(s) for easier access.
pub use gmt_data_type::{DataFamily, DataGeometry, DataMode, DataVia, FamilySpec};
