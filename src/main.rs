mod app;
mod catalog;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod source;
mod utils;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

use cli::Cli;
use config::Config;

/// `RUST_LOG` wins; otherwise warnings only, or everything from debug up.
fn env_filter(debug: bool) -> EnvFilter {
    let default = if debug { "debug" } else { "warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn init_tracing(debug: bool) -> reload::Handle<EnvFilter, Registry> {
    let (filter, handle) = reload::Layer::new(env_filter(debug));
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
    if let Err(e) = installed {
        eprintln!("Logging disabled: {e}");
    }
    handle
}

fn main() {
    let cli = Cli::parse();
    let filter = init_tracing(cli.debug);

    // Config is read after tracing is up so parse warnings are visible
    let config = Config::load();
    let cli = cli.with_config(&config);
    if cli.debug
        && let Err(e) = filter.reload(env_filter(true))
    {
        warn!(error = %e, "could not enable debug logging from config");
    }

    if let Err(e) = app::run(&cli, &config) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
