//! Diagnostic logging on stderr.
//!
//! The run log itself goes to stdout through the reporter; this is only for
//! operators chasing a misbehaving run. `RUST_LOG` wins when set.

use tracing_subscriber::EnvFilter;

pub fn init_tracing(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
