//! This module provides observability for the binding layer.
//!
//! libgmt is opaque, so the only visibility we have is at the boundary: which
//! entry point was called, with which constants, and what it returned. The
//! `log_event!` macro records that as a structured key-value line through the
//! `log` facade, and `init_logger` installs an `env_logger` sink for callers
//! (the Python module among them) that have no logger of their own.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use log::LevelFilter;

use crate::error::Result;

/// Logs a structured key-value event string at debug level.
///
/// # Example
/// ```
/// use gmt_clib::log_event;
/// let status = 0;
/// log_event!("event" = "call_module", "module" = "psbasemap", "status" = status);
/// ```
#[macro_export]
macro_rules! log_event {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if $crate::log::log_enabled!($crate::log::Level::Debug) {
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            $crate::log::debug!("GMT_EVENT: {{ {} }}", parts.join(", "));
        }
    };
}

static LOGGER_INSTALLED: Mutex<bool> = Mutex::new(false);

/// Installs the global logger once per process and reports whether this call
/// did it. Later calls are no-ops that return `Ok(false)` and touch no files.
///
/// When `log_file` is given, records are appended to it instead of stderr.
pub fn init_logger(level: LevelFilter, log_file: Option<&Path>) -> Result<bool> {
    let mut installed = LOGGER_INSTALLED
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if *installed {
        return Ok(false);
    }

    let mut builder = env_logger::Builder::new();

    builder.is_test(false);
    builder.filter_level(level);

    // Custom formatter: just print the level and message
    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(buf, "[{}] {}", record.level(), record.args())?;
        buf.flush()?;
        Ok(())
    });

    if let Some(path) = log_file {
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // Another logger may already own the `log` facade; either way we are done.
    *installed = true;
    Ok(builder.try_init().is_ok())
}
