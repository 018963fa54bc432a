#![forbid(unsafe_code)]

//! Logging facade for host crates.
//!
//! Hosts log through `nestsheet_core::debug!` and `nestsheet_core::trace!`.
//! With the `tracing` feature these are the `tracing` macros; without it they
//! expand to nothing and their arguments are never evaluated.
//!
//! The widgets crate emits its spans through `tracing` directly behind its
//! own `tracing` feature.
//!
//! The `tracing-json` feature adds [`init_json_logging`], which installs a
//! JSON formatter filtered by `RUST_LOG` (falling back to a default
//! directive).

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Expands to nothing when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}

/// Failure to install the global JSON subscriber.
#[cfg(feature = "tracing-json")]
#[derive(Debug)]
pub struct LoggingInitError {
    message: String,
}

#[cfg(feature = "tracing-json")]
impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to install log subscriber: {}", self.message)
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for LoggingInitError {}

/// Install a global JSON log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_directive` (for example
/// `"nestsheet_widgets=debug"`) selects what is emitted. Fails if a global
/// subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(default_directive: &str) -> Result<(), LoggingInitError> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let layer = fmt::layer().json().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|err| LoggingInitError {
            message: err.to_string(),
        })
}
