//! Diagnostic logging on stderr.

use std::io::{self, IsTerminal};

use tracing_subscriber::filter::LevelFilter;

/// Level used for a given verbosity: warnings only, or everything down to
/// debug with `-v`.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Install the stderr subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for(verbose))
        .with_target(false)
        .without_time()
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .try_init();
}
