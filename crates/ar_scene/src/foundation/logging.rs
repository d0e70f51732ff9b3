//! Logging utilities

pub use log::{debug, info, warn, error, trace};

/// Initialize logging with a fallback filter used when `RUST_LOG` is unset
///
/// Calling this more than once is harmless; later calls keep the first logger.
pub fn init_with_level(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}
