//! Logging initialization.
//!
//! Installs a tracing-subscriber fmt layer on stderr, filtered by
//! `RUST_LOG` and defaulting to `warn`. Stdout is reserved for program
//! output.

use tracing_subscriber::util::TryInitError;

/// Configuration for logging initialization.
pub struct TelemetryConfig {
    /// Filter used when `RUST_LOG` is unset or unparseable.
    pub default_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_filter: "warn".to_string(),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber was already set.
pub fn init_telemetry(config: TelemetryConfig) -> Result<(), TryInitError> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
