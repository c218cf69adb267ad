//! Repository-feed source: the account's repository listing on the code host.
//!
//! One GET, no retries.  Whatever goes wrong surfaces as a [`FetchError`];
//! the caller keeps the static project cards in that case.

use std::time::Duration;

use tracing::{debug, info};

use super::{with_timeout, HttpTransport, RemoteProject};
use crate::error::FetchError;

/// Page size requested from the listing endpoint.
pub const PAGE_SIZE: u32 = 100;

/// Never show more projects than this, however many slots the page has.
pub const MAX_PROJECTS: usize = 6;

const ACCEPT: &str = "application/vnd.github+json";

/// The account whose repositories fill the project cards.
#[derive(Debug, Clone)]
pub struct RepositorySource {
    /// API root, e.g. `https://api.github.com`.
    pub api_base: String,
    pub account: String,
    pub timeout: Duration,
}

impl RepositorySource {
    pub fn new(api_base: impl Into<String>, account: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            account: account.into(),
            timeout,
        }
    }

    /// Most recently updated repositories first, one full page.
    pub fn listing_url(&self) -> String {
        format!(
            "{}/users/{}/repos?sort=updated&per_page={}",
            self.api_base,
            urlencoding::encode(&self.account),
            PAGE_SIZE
        )
    }

    /// Fetch the raw listing, unranked.
    pub async fn fetch(&self, transport: &dyn HttpTransport) -> Result<Vec<RemoteProject>, FetchError> {
        let url = self.listing_url();
        debug!(%url, "fetching repository listing");

        let response = with_timeout(self.timeout, transport.get(&url, ACCEPT)).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                status: response.status,
            });
        }

        let projects: Vec<RemoteProject> = serde_json::from_str(&response.body)?;
        info!(count = projects.len(), account = %self.account, "repository listing fetched");
        Ok(projects)
    }
}

/// Select what the project cards show: forks removed, ranked by
/// [`RemoteProject`]'s ordering, at most [`MAX_PROJECTS`].
pub fn rank(projects: Vec<RemoteProject>) -> Vec<RemoteProject> {
    let mut ranked: Vec<RemoteProject> = projects.into_iter().filter(|p| !p.is_fork).collect();
    ranked.sort();
    ranked.truncate(MAX_PROJECTS);
    ranked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
