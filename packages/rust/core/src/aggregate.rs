//! Context Aggregator: compose the lister and the detail extractor across
//! every listed career into one [`AggregatedContext`].

use reqwest::Client;
use tracing::{info, instrument, warn};
use url::Url;

use careerguide_scrape::{SectionFilter, fetch_details, list_careers};
use careerguide_shared::{AggregatedContext, CareerBlock, CareerFailure, Result};

// ---------------------------------------------------------------------------
// Failure policy
// ---------------------------------------------------------------------------

/// What to do when one career's detail fetch fails mid-aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Skip the failing career, record it in `failures`, keep going.
    #[default]
    SkipAndContinue,
    /// Abort the whole aggregation on the first failure.
    Abort,
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for aggregation runs.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each career's detail fetch resolves.
    fn career_fetched(&self, name: &str, current: usize, total: usize);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn career_fetched(&self, _name: &str, _current: usize, _total: usize) {}
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Build the full site context: one listing fetch, then one detail fetch
/// per career, strictly sequential and in listing order.
///
/// The listing fetch and the per-career fetches are not transactionally
/// consistent — a career can change or vanish between the two reads; that
/// window is accepted. Total latency is the sum of all round trips.
///
/// A listing failure always aborts. Per-career failures follow `policy`:
/// the default records them on the result and continues so one dead page
/// cannot empty the whole context.
#[instrument(skip_all, fields(base_url = %base_url, policy = ?policy))]
pub async fn build_context(
    client: &Client,
    base_url: &Url,
    filter: &SectionFilter,
    policy: FailurePolicy,
    progress: &dyn ProgressReporter,
) -> Result<AggregatedContext> {
    progress.phase("Listing careers");
    let careers = list_careers(client, base_url).await?;
    let total = careers.len();

    progress.phase("Fetching career details");
    let mut context = AggregatedContext::default();

    for (i, career) in careers.into_iter().enumerate() {
        let details = match Url::parse(&career.url) {
            Ok(url) => fetch_details(client, &url, filter).await,
            Err(e) => Err(careerguide_shared::CareerGuideError::validation(format!(
                "career URL {} did not parse: {e}",
                career.url
            ))),
        };

        progress.career_fetched(&career.name, i + 1, total);

        match details {
            Ok(sections) => context.blocks.push(CareerBlock { career, sections }),
            Err(e) => match policy {
                FailurePolicy::Abort => return Err(e),
                FailurePolicy::SkipAndContinue => {
                    warn!(career = %career.name, error = %e, "skipping career after fetch failure");
                    context.failures.push(CareerFailure {
                        career,
                        error: e.to_string(),
                    });
                }
            },
        }
    }

    info!(
        careers = context.blocks.len(),
        failures = context.failures.len(),
        "context aggregation complete"
    );

    Ok(context)
}
