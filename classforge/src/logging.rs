use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter directive for a `-v` count. `RUST_LOG` wins when set.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

/// Install the stderr subscriber. Later calls are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let subscriber = fmt::fmt()
        .with_env_filter(filter)
        .with_ansi(use_color())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
