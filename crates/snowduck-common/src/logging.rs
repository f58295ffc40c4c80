use tracing_subscriber::EnvFilter;

/// Installs the process-wide tracing subscriber. Call once, at process
/// start, before anything else logs.
///
/// `json` selects the structured-output formatter used when the process is
/// running under a log collector; the human formatter is used otherwise.
/// The filter defaults to `info` and is overridable via `RUST_LOG`.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
