//! Relay endpoints and the ordered fallback combinator.
//!
//! A relay is a public service that fetches a URL on the caller's behalf and
//! returns the upstream body verbatim.  The newsletter pipeline walks an
//! ordered list of them until one hands back something that looks like a
//! feed.

use std::future::Future;

use serde::Deserialize;

/// Placeholder substituted with the target URL.
const TARGET: &str = "{url}";

/// One way of reaching a target URL.
///
/// The template `{url}` alone means "fetch the target directly"; anything
/// else is a relay endpoint that receives the percent-encoded target in
/// place of the placeholder, e.g. `https://corsproxy.io/?{url}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Relay {
    template: String,
}

impl Relay {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn direct() -> Self {
        Self::new(TARGET)
    }

    pub fn is_direct(&self) -> bool {
        self.template == TARGET
    }

    /// Build the request URL that routes `target` through this relay.
    pub fn wrap(&self, target: &str) -> String {
        if self.is_direct() {
            return target.to_string();
        }
        self.template
            .replace(TARGET, &urlencoding::encode(target))
    }

    /// Host part of the template, for log lines.
    pub fn label(&self) -> &str {
        if self.is_direct() {
            return "direct";
        }
        let rest = self
            .template
            .split_once("://")
            .map_or(self.template.as_str(), |(_, rest)| rest);
        rest.split(['/', '?']).next().unwrap_or(rest)
    }
}

/// Try each candidate in order and return the first accepted result.
///
/// `attempt` both performs the work and validates it: an `Err` means "move
/// on to the next candidate".  Attempts are strictly sequential; candidate
/// `n + 1` is only started after candidate `n` has been rejected.  When
/// every candidate is rejected, all failures are returned in order.
pub async fn first_success<I, F, Fut, T, E>(candidates: I, mut attempt: F) -> Result<T, Vec<E>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut failures = Vec::new();
    for candidate in candidates {
        match attempt(candidate).await {
            Ok(value) => return Ok(value),
            Err(e) => failures.push(e),
        }
    }
    Err(failures)
}
