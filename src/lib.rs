pub mod args;
pub mod checker;
pub mod config;
pub mod error;
pub mod fetch;
pub mod fingerprint;
pub mod monitor;
pub mod notifier;
pub mod params;
pub mod report;
pub mod state;
pub mod utils;

pub use args::Args;
pub use checker::{check, CheckOutcome};
pub use config::{CheckConfig, MonitorConfig, NotifyConfig};
pub use error::{CheckError, FetchError};
pub use fetch::{HttpFetcher, PageFetcher, PageSource};
pub use fingerprint::Fingerprint;
pub use monitor::{run, RunReport};
pub use notifier::{EmailTemplate, Mailer, Outcome, SmtpMailer};
pub use report::DeliveryReport;
