use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const APP_TARGET: &str = "sipplan";

/// Builds the filter directives. `RUST_LOG` is taken as given; `verbose`
/// additionally enables debug output for this crate.
fn filter_directives(verbose: bool, env: Option<&str>) -> String {
    let env = env.map(str::trim).filter(|directives| !directives.is_empty());
    match (verbose, env) {
        (true, Some(env)) => format!("{env},{APP_TARGET}=debug"),
        (true, None) => format!("{APP_TARGET}=debug"),
        (false, Some(env)) => env.to_string(),
        (false, None) => "off".to_string(),
    }
}

/// Installs the global subscriber, writing to stderr.
pub fn init_logging(verbose: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    // A malformed RUST_LOG falls back to the flag-only filter
    let filter = EnvFilter::try_new(filter_directives(verbose, env.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(verbose, None)));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
