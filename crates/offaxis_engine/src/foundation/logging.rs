//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a default filter
///
/// `RUST_LOG` still wins when it is set; `level` is only the fallback
/// (for example the `log_level` of an [`EngineConfig`](crate::core::config::EngineConfig)).
/// Calling this more than once is harmless.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}
