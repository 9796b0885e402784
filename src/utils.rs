use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Logs go to stderr; stdout is reserved for the per-run status line.
/// `RUST_LOG` takes precedence over `--verbose`.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let timer = LocalTime::new(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second]"
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn validate_url(flag: &str, value: &str) -> anyhow::Result<()> {
    let url = Url::parse(value).map_err(|e| anyhow::anyhow!("{} is not a valid URL: {}", flag, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => anyhow::bail!("{} must use http or https, got '{}'", flag, other),
    }
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    validate_url("--primary-url", &args.primary_url)?;
    validate_url("--fallback-url", &args.fallback_url)?;

    if args.timeout_secs == 0 {
        anyhow::bail!("--timeout-secs must be greater than 0");
    }

    if args.smtp_port == 0 {
        anyhow::bail!("--smtp-port must be greater than 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Args;
    use clap::Parser;

    #[test]
    fn defaults_are_valid() {
        let args = Args::parse_from(["pagewatch"]);
        assert!(validate_args(&args).is_ok());
        assert_eq!(args.smtp_port, 587);
        assert_eq!(args.state_file.to_str(), Some("website_hash.txt"));
    }

    #[test]
    fn rejects_non_http_urls() {
        let args = Args::parse_from(["pagewatch", "--fallback-url", "ftp://example.com/page"]);
        let err = validate_args(&args).unwrap_err();
        assert!(err.to_string().contains("--fallback-url"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let args = Args::parse_from(["pagewatch", "--timeout-secs", "0"]);
        assert!(validate_args(&args).is_err());
    }
}
