//! agora server entry point
//!
//! Parses CLI arguments and dispatches to the selected subcommand.
//! All setup (configuration, pool, schema, router) lives in the CLI
//! module; main only reports the failure and exits non-zero.

use agora::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
