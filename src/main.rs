use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::error;

use pagewatch::error::CheckError;
use pagewatch::notifier::connect_smtp;
use pagewatch::utils::{setup_logging, validate_args};
use pagewatch::{Args, HttpFetcher, MonitorConfig};

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    validate_args(&args)?;

    let today = Local::now().date_naive();
    let config = MonitorConfig::from_args(&args);
    let fetcher = HttpFetcher::new(config.check.timeout)?;

    match pagewatch::run(&config, &fetcher, &connect_smtp, today) {
        Ok(_) => Ok(()),
        Err(e @ CheckError::Unreachable { .. }) => {
            println!("Both urls are invalid.");
            error!(action = "check", component = "page_check", error = %e, "No email sent");
            std::process::exit(1);
        }
        Err(e) => {
            error!(action = "check", component = "page_check", error = %e, "Error");
            std::process::exit(1);
        }
    }
}
