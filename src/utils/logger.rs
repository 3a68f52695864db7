//! Logger setup for the command line tool
//!
//! Library code only talks to the `log` facade. The binary routes it
//! through `env_logger`; `RUST_LOG` still overrides the defaults.

use log::LevelFilter;

/// Module whose `trace!` output carries the per-marker events
const MARKER_TRACE_MODULE: &str = "photometa::jpeg::observer";

/// Initializes the global logger
///
/// `verbose` raises the crate to `debug`; `trace_markers` additionally
/// enables the marker observer's trace output.
pub fn init_logger(verbose: bool, trace_markers: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("photometa", level)
        .format_timestamp(None)
        .format_target(false);
    if trace_markers {
        builder.filter_module(MARKER_TRACE_MODULE, LevelFilter::Trace);
    }
    builder.parse_default_env();

    if builder.try_init().is_err() {
        eprintln!("Warning: Global logger was already initialized");
    }
}
