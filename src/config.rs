use std::path::PathBuf;
use std::time::Duration;

use crate::args::Args;
use crate::params;

#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub primary_url: String,
    pub fallback_url: String,
    pub state_path: PathBuf,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct NotifyConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub site_name: String,
    pub sender: Option<String>,
    pub sender_key: Option<String>,
    pub recipients: Vec<String>,
}

/// Everything one run needs, resolved up front and passed down explicitly.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub check: CheckConfig,
    pub notify: NotifyConfig,
    pub send_email: bool,
}

impl MonitorConfig {
    /// Reads the recipient, sender and key files named by `args`.
    pub fn from_args(args: &Args) -> Self {
        let check = CheckConfig {
            primary_url: args.primary_url.clone(),
            fallback_url: args.fallback_url.clone(),
            state_path: args.state_file.clone(),
            timeout: Duration::from_secs(args.timeout_secs),
        };

        let notify = NotifyConfig {
            smtp_host: args.smtp_host.clone(),
            smtp_port: args.smtp_port,
            site_name: args.site_name.clone(),
            sender: params::load_first(&args.sender),
            sender_key: params::load_first(&args.sender_key),
            recipients: params::load_list(&args.receivers),
        };

        MonitorConfig {
            check,
            notify,
            send_email: !args.no_email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsString;
    use std::fs;

    #[test]
    fn loads_parameter_files() {
        let dir = tempfile::tempdir().unwrap();
        let receivers = dir.path().join("receivers.txt");
        let sender = dir.path().join("sender.txt");
        fs::write(&receivers, "# team\na@x.com\n\nb@x.com\n").unwrap();
        fs::write(&sender, "me@x.com\n").unwrap();

        let args = Args::parse_from(vec![
            OsString::from("pagewatch"),
            "--receivers".into(),
            receivers.into_os_string(),
            "--sender".into(),
            sender.into_os_string(),
            "--sender-key".into(),
            dir.path().join("missing.txt").into_os_string(),
            "--no-email".into(),
        ]);
        let config = MonitorConfig::from_args(&args);

        assert_eq!(config.notify.recipients, vec!["a@x.com", "b@x.com"]);
        assert_eq!(config.notify.sender.as_deref(), Some("me@x.com"));
        assert_eq!(config.notify.sender_key, None);
        assert!(!config.send_email);
        assert_eq!(config.check.timeout, Duration::from_secs(30));
    }
}
