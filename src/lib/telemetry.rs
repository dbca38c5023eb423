//! Logging setup. Core modules emit `tracing` events; in the browser they reach
//! the devtools console through `tracing`'s `log` bridge and `console_log`, on
//! native targets through a `tracing-subscriber` formatter honoring `RUST_LOG`.

use tracing::Level;

/// Maps a `-v` style counter onto a tracing level.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the panic hook and console logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init(verbosity: u8) {
    console_error_panic_hook::set_once();

    let level = match level_for(verbosity) {
        Level::ERROR => log::Level::Error,
        Level::WARN => log::Level::Warn,
        Level::INFO => log::Level::Info,
        Level::DEBUG => log::Level::Debug,
        Level::TRACE => log::Level::Trace,
    };
    // A second init returns an error because the logger is already set.
    let _ = console_log::init_with_level(level);
}

/// Installs a global `fmt` subscriber. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(verbosity: u8) {
    use tracing_subscriber::{EnvFilter, filter::LevelFilter};

    // RUST_LOG, when set, overrides the verbosity default.
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level_for(verbosity)).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
