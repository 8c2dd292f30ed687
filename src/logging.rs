//! Log initialisation for the fetcher binary.
//!
//! Library code only uses the `log` macros; the binary installs `env_logger`
//! once at startup. `RUST_LOG` wins over the verbosity flags when set.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Map `-v`/`-q` counts to a default filter level.
///
/// Quiet beats verbose; the baseline is `info`.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger writing to stderr.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(level: LevelFilter) {
    let _ = Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format_timestamp_millis()
        .try_init();
}
