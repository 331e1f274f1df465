//! CLI argument handling
//!
//! Every flag is optional. With none, the scenario runs against the fixed
//! local target.

use std::path::PathBuf;

use clap::Parser;

use crate::common::config::{Config, Overrides};
use crate::common::Result;
use crate::scenario::run_scenario;

#[derive(Parser, Debug)]
#[command(name = "record-smoke", about = "Smoke test for the records API")]
#[command(version, long_about = None)]
pub struct Args {
    /// Configuration file (default: platform config dir, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the service
    #[arg(long)]
    pub base_url: Option<String>,

    /// Login email
    #[arg(long)]
    pub email: Option<String>,

    /// Login password
    #[arg(long)]
    pub password: Option<String>,

    /// Id of the record to update
    #[arg(long)]
    pub record_id: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Fail when the login callback is not 2xx
    #[arg(long)]
    pub require_login: bool,

    /// Print the update payload and debug logs
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            record_id: self.record_id,
            timeout_secs: self.timeout,
            require_login: self.require_login,
        }
    }

    /// Resolve the effective configuration: flags, then file, then defaults
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        config.apply(self.overrides());
        Ok(config)
    }
}

/// Run the scenario for the parsed arguments; `Ok(true)` means it passed
pub async fn run(args: Args) -> Result<bool> {
    let config = args.config()?;
    tracing::debug!(
        base_url = %config.target.base_url,
        record_id = config.target.record_id,
        "Resolved target"
    );

    let report = run_scenario(&config, args.verbose).await?;
    Ok(report.passed)
}
