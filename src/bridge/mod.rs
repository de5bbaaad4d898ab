// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing API of gmt-clib. It turns the raw, pointer-and-
// status-code entry points behind `GmtApi` into typed Rust calls with scoped
// resources. Nothing below this layer knows about sessions being open or closed.
//
// Call Flow (call_module):
//
//   1. [LibGmt::call_module]            -> Receives module name + argument string
//         |
//         `-> a. GMT_Get_Enum("GMT_MODULE_CMD")   (constant lookup)
//         `-> b. current session                  (NoSession if none)
//         `-> c. LogFile::create + GMT_Handle_Messages (scoped temp log)
//
//   2. [GmtApi::call_module]            -> GMT_Call_Module(session, module, mode, args)
//
//   3. [LibGmt::call_module]            -> Reads the log, removes the file, and turns a
//                                          non-zero status into GmtError::Clib
//
// Resource Scoping:
//
//   * Session  -> `SessionScope` guard (or begin/end), destroyed on every exit path.
//   * Log file -> `LogFile`, removed on drop whatever the call's outcome.
//
// ====================================================================================
pub mod data;
pub mod log_file;
pub mod session;

// --- High-Level Stateful API ---
pub use session::{LibGmt, SessionHandle, SessionScope, GMT_NOTSET};

// --- Call Arguments and Scoped Resources ---
pub use data::{fixed_array, DataHandle, DataOptions};
pub use log_file::LogFile;

#[cfg(test)]
mod tests;
