//! Development-time tracing for debugging navigation.
//!
//! Route transitions are logged at `debug`, redundant notifications at
//! `trace`, rejected navigation at `warn`. Output goes to stderr so it never
//! mixes with the JSON views printed on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directives used when `RUST_LOG` is unset or blank.
fn default_directives(verbose: bool) -> &'static str {
    if verbose { "warn,hashroute=debug" } else { "warn" }
}

/// `RUST_LOG` wins over `--verbose`; a blank value counts as unset.
fn route_filter(from_env: Option<&str>, verbose: bool) -> EnvFilter {
    match from_env.map(str::trim) {
        Some(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(default_directives(verbose)),
    }
}

/// Install the stderr subscriber.
///
/// # Example
/// ```bash
/// RUST_LOG=hashroute=trace hashroute replay navigate:about back
/// hashroute -v resolve '#contact'
/// ```
pub fn init(verbose: bool) {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = route_filter(from_env.as_deref(), verbose);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
