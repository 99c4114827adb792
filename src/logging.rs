//! Logging setup.
//!
//! Logs go to stderr so stdout only ever carries results (prices, CSV).
//! `RUST_LOG` wins when set; otherwise `-v` selects `debug` and the default is
//! `warn`.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
