//! External content sources.
//!
//! Two sources feed the page: the code-hosting repository listing
//! ([`github`]) and the newsletter syndication feed ([`newsletter`]).  Both
//! talk to the network only through the [`HttpTransport`] trait, so tests can
//! script responses without touching a socket.
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory with a struct holding the source's
//!    configuration (account, endpoints, timeout).
//! 2. Give it an `async fn fetch(&self, transport: &dyn HttpTransport)` that
//!    returns normalised values or a typed error from [`crate::error`].
//! 3. Re-export it below and join it in [`crate::fetch::Pipelines::run`].

mod feed_entry;
mod github;
mod newsletter;
pub(crate) mod project;
mod relay;

pub use feed_entry::{first_image_src, FeedEntry};
pub use github::{rank, RepositorySource};
pub use newsletter::NewsletterSource;
pub use project::RemoteProject;
pub use relay::{first_success, Relay};

use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The only way sources reach the network.
///
/// Implementations must be shareable across tasks; both pipelines hold the
/// same transport.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET for `url` with the given `Accept` header.
    ///
    /// A non-2xx status is *not* an error at this level; only failures that
    /// prevent a response from arriving are.
    async fn get(&self, url: &str, accept: &str) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by a shared [`reqwest::Client`].
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// The code-hosting API rejects requests without a `User-Agent`.
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, accept: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, accept)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

/// Run `request` with an upper bound on how long it may take.
pub(crate) async fn with_timeout<F>(
    limit: Duration,
    request: F,
) -> Result<HttpResponse, TransportError>
where
    F: std::future::Future<Output = Result<HttpResponse, TransportError>>,
{
    tokio::time::timeout(limit, request)
        .await
        .map_err(|_| TransportError::Timeout(limit))?
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// What a scripted transport does for one request.
    pub enum Reply {
        Ok(u16, String),
        Fail(&'static str),
        Hang,
    }

    /// Answers requests from a queue and records every URL it was asked for.
    pub struct ScriptedTransport {
        replies: Mutex<VecDeque<Reply>>,
        pub requested: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        pub fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn get(&self, url: &str, _accept: &str) -> Result<HttpResponse, TransportError> {
            self.requested.lock().unwrap().push(url.to_string());
            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(Reply::Ok(status, body)) => Ok(HttpResponse { status, body }),
                Some(Reply::Fail(msg)) => Err(TransportError::Other(msg.to_string())),
                Some(Reply::Hang) => std::future::pending().await,
                None => Err(TransportError::Other("no scripted reply".into())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_covers_2xx_only() {
        let ok = HttpResponse { status: 204, body: String::new() };
        let redirect = HttpResponse { status: 301, body: String::new() };
        let missing = HttpResponse { status: 404, body: String::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!missing.is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn with_timeout_gives_up_on_a_hung_request() {
        let limit = Duration::from_secs(5);
        let result = with_timeout(limit, std::future::pending()).await;
        assert!(matches!(result, Err(TransportError::Timeout(d)) if d == limit));
    }
}
