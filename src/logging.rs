use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn level(verbosity: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Send log events to stderr. `RUST_LOG` overrides the level picked from the command line.
pub fn init(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level(verbosity, quiet).to_string().to_lowercase()));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
