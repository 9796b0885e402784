use std::time::Instant;
use tracing::info;

use crate::config::CheckConfig;
use crate::error::CheckError;
use crate::fetch::{fetch_with_fallback, PageFetcher, PageSource};
use crate::fingerprint::Fingerprint;
use crate::state::{self, StateLock};

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// A prior fingerprint existed and differs from the new one.
    pub changed: bool,
    pub fingerprint: Fingerprint,
    pub previous: Option<String>,
    pub source: PageSource,
}

/// Fetches the page, compares its fingerprint with the stored one and stores
/// the new fingerprint. The state file is left alone when neither URL responds.
pub fn check(config: &CheckConfig, fetcher: &dyn PageFetcher) -> Result<CheckOutcome, CheckError> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "page_check",
        "Starting page check"
    );

    let _lock = StateLock::acquire(&config.state_path)?;

    let page = fetch_with_fallback(fetcher, &config.primary_url, &config.fallback_url)?;
    let fingerprint = Fingerprint::of(&page.body);

    let previous = state::read_fingerprint(&config.state_path)?;
    state::write_fingerprint(&config.state_path, &fingerprint)?;

    let changed = previous
        .as_deref()
        .is_some_and(|prev| !fingerprint.matches(prev));

    info!(
        action = "complete",
        component = "page_check",
        changed = changed,
        first_run = previous.is_none(),
        source = ?page.source,
        duration_ms = start_time.elapsed().as_millis(),
        "Page check completed"
    );

    Ok(CheckOutcome {
        changed,
        fingerprint,
        previous,
        source: page.source,
    })
}
