//! Records API smoke test
//!
//! Logs into the records service, bumps a record's year and verifies the
//! change. Exits 0 when the record reads back the new year, 1 otherwise.

use std::error::Error as _;

use clap::Parser;
use record_smoke::cli::{self, Args};
use record_smoke::common::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    logging::init_cli(args.verbose);

    match cli::run(args).await {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("ERROR: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}
