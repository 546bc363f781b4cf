//! Log filters for the stderr and JSON file layers.

use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Filter read from `env_var`, falling back to `default` when it is unset or empty.
///
/// Invalid directives are skipped with a warning on stderr.
pub fn env_filter(env_var: &str, default: LevelFilter) -> EnvFilter {
    let directives = std::env::var(env_var).unwrap_or_default();
    parse_filter(&directives, default)
}

fn parse_filter(directives: &str, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(directives)
}
