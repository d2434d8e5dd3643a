//! s3cli - a small S3 client
//!
//! Uploads, downloads, lists and deletes objects in one bucket of an
//! S3-compatible object store.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use s3cli::commands::{self, Cli};
use s3cli::exit_code::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG takes precedence over --debug
    let default_level = if cli.debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = tokio::select! {
        code = commands::execute(cli) => code,
        Ok(()) = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted");
            ExitCode::Interrupted
        }
    };

    std::process::exit(exit_code.as_i32());
}
