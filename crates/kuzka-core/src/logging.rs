//! Logging setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Builds the filter directive for a verbosity level.
///
/// `target` is the crate whose logs the binary cares about (e.g. `kuzka_bot`).
pub fn filter_for(target: &str, verbose: u8) -> String {
    match verbose {
        0 => format!("{target}=info,kuzka_persistence=info,teloxide=warn"),
        1 => format!("{target}=debug,kuzka_persistence=debug,teloxide=info"),
        2 => format!("{target}=trace,kuzka_persistence=trace,teloxide=debug"),
        _ => "trace".to_string(),
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the `-v` count.
pub fn init(target: &str, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_for(target, verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
