use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable that overrides the configured log filter.
pub const LOG_FILTER_ENV: &str = "PLANTER_LOG";

/// Initialise the global tracing subscriber for a system binary.
///
/// * `default_filter`: filter used when `PLANTER_LOG` is not set, i.e. "info".
// NOTE: Calling this twice (tests, several components in one process) keeps
//       the first subscriber.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
