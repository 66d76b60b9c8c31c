//! CLI entry point for askgpt.

mod app;
mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive.
const LOG_ENV: &str = "ASKGPT_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::Args::parse();
    init_tracing();
    let code = app::entry::run(args).await;
    std::process::exit(code);
}
