//! Career listing and detail extraction for the TechGuide careers site.
//!
//! Two operations over plain HTTP GET + HTML parsing:
//! - [`list_careers`] finds the distinct career links on the site root
//! - [`fetch_details`] turns one career page into filtered [`DetailSection`]s
//!
//! Fetches are sequential and unretried; a transport or non-2xx failure
//! surfaces as a fetch error carrying the attempted URL, and the caller
//! decides whether to retry or skip.

mod extract;
mod lister;

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use careerguide_shared::{CareerGuideError, Result};

pub use extract::{SectionFilter, extract_sections, fetch_details};
pub use lister::list_careers;

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 3;

/// User-Agent string for scrape requests.
const USER_AGENT: &str = concat!("CareerGuide/", env!("CARGO_PKG_VERSION"));

/// Build a reqwest client with the transport hardening applied at this
/// boundary: fixed UA, limited redirects, conservative timeout.
pub fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| CareerGuideError::config(format!("failed to build HTTP client: {e}")))
}

/// Fetch a URL and return its body, mapping transport and non-2xx
/// responses to a fetch error carrying the URL. No retry is attempted.
pub(crate) async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    debug!(%url, "fetching page");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CareerGuideError::fetch(url, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CareerGuideError::fetch(url, format!("HTTP {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| CareerGuideError::fetch(url, format!("failed to read body: {e}")))
}
