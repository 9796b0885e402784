use chrono::NaiveDate;
use std::time::Instant;
use tracing::info;

use crate::checker::{self, CheckOutcome};
use crate::config::MonitorConfig;
use crate::error::CheckError;
use crate::fetch::PageFetcher;
use crate::config::NotifyConfig;
use crate::notifier::{self, Mailer, Outcome};
use crate::report::{self, DeliveryReport};

#[derive(Debug)]
pub struct RunReport {
    pub check: CheckOutcome,
    pub outcome: Outcome,
    pub delivery: Option<DeliveryReport>,
}

/// One full run: check, print the status line, then notify. A fetch failure
/// returns before anything is stored, and `connect` is never called.
pub fn run(
    config: &MonitorConfig,
    fetcher: &dyn PageFetcher,
    connect: &dyn Fn(&NotifyConfig, &str, &str) -> anyhow::Result<Box<dyn Mailer>>,
    today: NaiveDate,
) -> Result<RunReport, CheckError> {
    let start_time = Instant::now();

    let check = checker::check(&config.check, fetcher)?;
    let outcome = Outcome::from_changed(check.changed);
    println!("{}", report::status_line(outcome, today));

    let delivery = if config.send_email {
        let delivery = notifier::run_notifications(&config.notify, connect, outcome, today);
        println!("{}", delivery.summary());
        Some(delivery)
    } else {
        info!(action = "skip", component = "notifier", "Email disabled by --no-email");
        None
    };

    info!(
        action = "complete",
        component = "monitor_run",
        outcome = ?outcome,
        duration_ms = start_time.elapsed().as_millis(),
        "Run completed"
    );

    Ok(RunReport {
        check,
        outcome,
        delivery,
    })
}
