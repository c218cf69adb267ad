//! The rendering target: the parts of the portfolio page the pipelines fill.
//!
//! * [`projects`] — fixed project slots, overwritten in place.
//! * [`writing`] — the newsletter container, whose cards are created here.
//! * [`html`] — serialises both into HTML fragments.
//!
//! The two halves are disjoint, so pipeline results can be applied in any
//! order.

pub mod html;
pub mod projects;
pub mod writing;

pub use projects::{ProjectCard, ProjectGrid, StaticProject, Tag};
pub use writing::{ClickOrigin, WritingSection};

use tracing::info;

use crate::source::{FeedEntry, RemoteProject};

/// Everything the pipelines are allowed to change.
#[derive(Debug, Clone)]
pub struct Page {
    pub projects: ProjectGrid,
    pub writing: WritingSection,
    /// Description for repositories that have none.
    pub default_description: String,
}

impl Page {
    pub fn new(owner_name: &str, statics: &[StaticProject]) -> Self {
        Self {
            projects: ProjectGrid::new(statics),
            writing: WritingSection::default(),
            default_description: format!("A project by {owner_name}"),
        }
    }

    pub fn apply_projects(&mut self, ranked: &[RemoteProject]) {
        let written = self.projects.populate(ranked, &self.default_description);
        info!(written, slots = self.projects.slots().len(), "project slots updated");
    }

    pub fn apply_posts(&mut self, entries: &[FeedEntry]) {
        if self.writing.show_posts(entries) {
            info!(count = entries.len(), "newsletter cards rendered");
        }
    }

    pub fn apply_posts_fallback(&mut self, landing_page: &str) {
        if self.writing.show_fallback(landing_page) {
            info!(%landing_page, "newsletter fallback shown");
        }
    }
}
