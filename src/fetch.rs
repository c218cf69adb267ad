//! One-shot background fetching of both feeds.
//!
//! Both pipelines start together on a dedicated thread running a tokio
//! runtime, and each reports back over an [`mpsc`] channel as soon as it is
//! done.  Neither waits for the other and either may finish first.  Every
//! error is caught here, logged, and turned into a message that tells the
//! page which fallback to show; nothing propagates further.
//!
//! ## For contributors
//!
//! The pipelines run exactly once per process; there is no polling.  To add
//! a third feed, write a `run_*` function with the same shape and join it in
//! [`Pipelines::run`].

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use tracing::{info, warn};

use crate::page::Page;
use crate::source::{rank, FeedEntry, HttpTransport, NewsletterSource, RemoteProject, RepositorySource};

/// Messages sent from the fetch thread to whoever owns the page.
#[derive(Debug)]
pub enum FetchMsg {
    /// Ranked projects, ready for the slots.
    Projects(Vec<RemoteProject>),
    /// The listing could not be used; static cards stay.
    ProjectsFailed(String),
    /// Normalised newsletter entries, at most three.
    Posts(Vec<FeedEntry>),
    /// The newsletter could not be used; show the fallback block.
    PostsFailed { landing_page: String, reason: String },
}

impl FetchMsg {
    /// Apply this result to the page.
    pub fn apply(self, page: &mut Page) {
        match self {
            FetchMsg::Projects(ranked) => page.apply_projects(&ranked),
            FetchMsg::ProjectsFailed(_) => {}
            FetchMsg::Posts(entries) => page.apply_posts(&entries),
            FetchMsg::PostsFailed { landing_page, .. } => page.apply_posts_fallback(&landing_page),
        }
    }

    /// One-line summary for the status bar.
    pub fn summary(&self) -> String {
        match self {
            FetchMsg::Projects(ranked) => format!("Loaded {} projects", ranked.len()),
            FetchMsg::ProjectsFailed(e) => format!("Projects unavailable: {e}"),
            FetchMsg::Posts(entries) => format!("Loaded {} posts", entries.len()),
            FetchMsg::PostsFailed { reason, .. } => format!("Posts unavailable: {reason}"),
        }
    }
}

/// Repository pipeline: fetch, rank, or report failure.
pub async fn run_projects(source: &RepositorySource, transport: &dyn HttpTransport) -> FetchMsg {
    match source.fetch(transport).await {
        Ok(projects) => {
            let ranked = rank(projects);
            info!(shown = ranked.len(), "projects ranked");
            FetchMsg::Projects(ranked)
        }
        Err(e) => {
            warn!(error = %e, "error loading projects, keeping static cards");
            FetchMsg::ProjectsFailed(e.to_string())
        }
    }
}

/// Newsletter pipeline: relay chain, parse, or report failure.
pub async fn run_posts(source: &NewsletterSource, transport: &dyn HttpTransport) -> FetchMsg {
    match source.fetch(transport).await {
        Ok(entries) => FetchMsg::Posts(entries),
        Err(e) => {
            warn!(error = %e, "error loading newsletter posts, showing fallback");
            FetchMsg::PostsFailed {
                landing_page: source.landing_page(),
                reason: e.to_string(),
            }
        }
    }
}

/// Both pipelines and the transport they share.
pub struct Pipelines {
    pub repositories: RepositorySource,
    pub newsletter: NewsletterSource,
    pub transport: Arc<dyn HttpTransport>,
}

impl Pipelines {
    /// Run both pipelines concurrently, sending each result as it lands.
    pub async fn run(self, tx: mpsc::Sender<FetchMsg>) {
        let transport = self.transport.as_ref();
        let projects = async {
            let msg = run_projects(&self.repositories, transport).await;
            // If the receiver is gone nobody is showing the page anymore.
            let _ = tx.send(msg);
        };
        let posts = async {
            let msg = run_posts(&self.newsletter, transport).await;
            let _ = tx.send(msg);
        };
        tokio::join!(projects, posts);
    }

    /// Start the fetch thread.
    ///
    /// Returns a receiver that yields exactly two messages, one per pipeline.
    /// The channel closes once both have been sent.
    pub fn spawn(self) -> mpsc::Receiver<FetchMsg> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    warn!(error = %e, "could not start fetch runtime");
                    let reason = e.to_string();
                    let _ = tx.send(FetchMsg::ProjectsFailed(reason.clone()));
                    let _ = tx.send(FetchMsg::PostsFailed {
                        landing_page: self.newsletter.landing_page(),
                        reason,
                    });
                    return;
                }
            };
            runtime.block_on(self.run(tx));
        });

        rx
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
