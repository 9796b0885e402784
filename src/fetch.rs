use reqwest::blocking::Client;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::{CheckError, FetchError};

pub trait PageFetcher {
    /// Returns the raw body of a 2xx response.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let request_error = |e: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.client.get(url).send().map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(request_error)?;
        Ok(body.to_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
    Primary,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub source: PageSource,
    pub url: String,
    pub body: Vec<u8>,
}

/// Tries `primary`, then `fallback`. Only the failure of both is an error.
pub fn fetch_with_fallback(
    fetcher: &dyn PageFetcher,
    primary: &str,
    fallback: &str,
) -> Result<FetchedPage, CheckError> {
    let start_time = Instant::now();

    let primary_err = match fetcher.fetch(primary) {
        Ok(body) => return Ok(fetched(PageSource::Primary, primary, body, start_time)),
        Err(e) => {
            warn!(action = "fetch", component = "primary_url", url = primary, error = %e, "Primary URL failed, trying fallback");
            e
        }
    };

    match fetcher.fetch(fallback) {
        Ok(body) => Ok(fetched(PageSource::Fallback, fallback, body, start_time)),
        Err(fallback_err) => {
            warn!(action = "fetch", component = "fallback_url", url = fallback, error = %fallback_err, "Fallback URL failed");
            Err(CheckError::Unreachable {
                primary: primary_err,
                fallback: fallback_err,
            })
        }
    }
}

fn fetched(source: PageSource, url: &str, body: Vec<u8>, start_time: Instant) -> FetchedPage {
    info!(action = "complete", component = "page_fetch", source = ?source, url = url, body_bytes = body.len(), duration_ms = start_time.elapsed().as_millis(), "Fetched page");
    FetchedPage {
        source,
        url: url.to_string(),
        body,
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves canned bodies; unknown URLs fail with a connection error.
    #[derive(Default)]
    pub struct FakeFetcher {
        pages: HashMap<String, Result<Vec<u8>, u16>>,
        pub requested: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        pub fn with_page(mut self, url: &str, body: impl AsRef<[u8]>) -> Self {
            self.pages.insert(url.to_string(), Ok(body.as_ref().to_vec()));
            self
        }

        pub fn with_status(mut self, url: &str, status: u16) -> Self {
            self.pages.insert(url.to_string(), Err(status));
            self
        }
    }

    impl PageFetcher for FakeFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            match self.pages.get(url) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(FetchError::Status {
                    url: url.to_string(),
                    status: *status,
                }),
                None => Err(FetchError::Request {
                    url: url.to_string(),
                    reason: "connection refused".to_string(),
                }),
            }
        }
    }
}
