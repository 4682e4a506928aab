//! HTTP-based specification fetcher

use async_trait::async_trait;
use reqwest::Client;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::core::{Prompt, Result, Step};
use crate::generation::{RawSpecification, SpecFetcher};

/// Longest URL accepted as a specification source
pub const MAX_URL_LENGTH: usize = 2083;

/// Redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// Accept only absolute `http`/`https` URLs with a host.
///
/// Runs before any network access; a rejected URL never reaches the fetcher.
pub fn validate_url(raw: &str) -> Step<Url> {
    let raw = raw.trim();
    let invalid = || {
        Step::AwaitingInput(Prompt::InvalidUrl {
            url: raw.to_string(),
        })
    };

    if raw.is_empty() || raw.len() > MAX_URL_LENGTH {
        return invalid();
    }

    match Url::parse(raw) {
        Ok(url)
            if matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty()) =>
        {
            Step::Ready(url)
        }
        _ => invalid(),
    }
}

/// Fetches specifications from HTTP(S) URLs
pub struct HttpSpecFetcher {
    client: Client,
}

impl HttpSpecFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SpecFetcher for HttpSpecFetcher {
    async fn fetch(&self, url: &Url) -> RawSpecification {
        debug!(url = %url, "Fetching specification");

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to fetch specification");
                return RawSpecification::empty();
            }
        };

        // The body is used whatever the status; an error page simply yields no models.
        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Specification URL returned a non-success status");
        }

        match response.text().await {
            Ok(text) => RawSpecification::new(text),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read specification body");
                RawSpecification::empty()
            }
        }
    }
}
