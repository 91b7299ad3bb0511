use std::io;
use std::process;

use serama::{cli, config::Config};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG: &str = "warn";

fn main() {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    init_tracing(&config);

    if let Err(e) = cli::run(&config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr. `SERAMA_LOG` wins over the config file's `log`.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("SERAMA_LOG").unwrap_or_else(|_| {
        let directives = config.log.as_deref().unwrap_or(DEFAULT_LOG);
        EnvFilter::try_new(directives).unwrap_or_else(|e| {
            eprintln!("ignoring invalid log filter '{directives}': {e}");
            EnvFilter::new(DEFAULT_LOG)
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
