use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_PRIMARY_URL: &str =
    "https://www.coppercolorado.com/tickets-passes/season-passes/parking-pass-24-25-standalone";
pub const DEFAULT_FALLBACK_URL: &str =
    "https://www.coppercolorado.com/plan-your-trip/season-passes/parking-pass-25-26-standalone";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pagewatch",
    about = "Check whether a web page changed since the last run and email the result",
    version,
    long_about = None
)]
pub struct Args {
    /// Page to check first
    #[arg(long, default_value = DEFAULT_PRIMARY_URL)]
    pub primary_url: String,

    /// Page to check when the primary one is unreachable
    #[arg(long, default_value = DEFAULT_FALLBACK_URL)]
    pub fallback_url: String,

    /// File holding the fingerprint from the previous run
    #[arg(short, long, default_value = "website_hash.txt")]
    pub state_file: PathBuf,

    /// Recipient list, one address per line
    #[arg(long, default_value = "parameters/receivers.txt")]
    pub receivers: PathBuf,

    /// Sender address file
    #[arg(long, default_value = "parameters/sender.txt")]
    pub sender: PathBuf,

    /// Sender app password file
    #[arg(long, default_value = "parameters/sender_key.txt")]
    pub sender_key: PathBuf,

    /// SMTP relay host
    #[arg(long, default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP submission port (STARTTLS)
    #[arg(long, default_value_t = 587)]
    pub smtp_port: u16,

    /// Name used in email subjects and bodies
    #[arg(long, default_value = "Copper Parking")]
    pub site_name: String,

    /// Timeout for each HTTP request, in seconds
    #[arg(short, long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Check and print the status without sending email
    #[arg(long)]
    pub no_email: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
