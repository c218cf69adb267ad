//! Project cards: the fixed slots the repository pipeline fills in place.
//!
//! The page ships with static cards.  When the repository listing arrives,
//! ranked entry `i` overwrites slot `i`; entries beyond the last slot are
//! dropped and slots beyond the last entry keep their static content.

use std::fmt;

use serde::Deserialize;
use tracing::debug;

use crate::source::RemoteProject;

/// Background used for unknown or missing languages.
pub const DEFAULT_GRADIENT: &str = "linear-gradient(135deg, #667eea 0%, #764ba2 100%)";

/// Card background for a repository's primary language.
///
/// Exact, case-sensitive match; everything else gets [`DEFAULT_GRADIENT`].
pub fn gradient_for(language: Option<&str>) -> &'static str {
    match language {
        Some("JavaScript") => "linear-gradient(135deg, #f7df1e 0%, #f0db4f 100%)",
        Some("Python") => "linear-gradient(135deg, #306998 0%, #ffd43b 100%)",
        Some("TypeScript") => "linear-gradient(135deg, #007acc 0%, #3178c6 100%)",
        Some("Java") => "linear-gradient(135deg, #f89820 0%, #5382a1 100%)",
        Some("C++") => "linear-gradient(135deg, #00599c 0%, #004482 100%)",
        Some("C") => "linear-gradient(135deg, #555555 0%, #283593 100%)",
        Some("HTML") => "linear-gradient(135deg, #e34c26 0%, #f06529 100%)",
        Some("CSS") => "linear-gradient(135deg, #264de4 0%, #2965f1 100%)",
        Some("Ruby") => "linear-gradient(135deg, #cc342d 0%, #e34c26 100%)",
        Some("Go") => "linear-gradient(135deg, #00add8 0%, #5dc9e2 100%)",
        Some("Rust") => "linear-gradient(135deg, #ce422b 0%, #e34c26 100%)",
        Some("PHP") => "linear-gradient(135deg, #777bb3 0%, #8892bf 100%)",
        Some("Swift") => "linear-gradient(135deg, #ffac45 0%, #f05138 100%)",
        Some("Kotlin") => "linear-gradient(135deg, #7f52ff 0%, #a97bff 100%)",
        _ => DEFAULT_GRADIENT,
    }
}

/// `my-cool_repo` → `My Cool Repo`.
///
/// Separators become spaces and the first character of every word is
/// upper-cased; the rest of each word is left as is.
pub fn display_title(raw: &str) -> String {
    raw.replace(['-', '_'], " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Most topics shown on one card.
const MAX_TOPIC_TAGS: usize = 3;

/// A chip under the card description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Language(String),
    Stars(u64),
    Topic(String),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Language(lang) => f.write_str(lang),
            Tag::Stars(n) => write!(f, "★ {n}"),
            Tag::Topic(topic) => f.write_str(topic),
        }
    }
}

/// Where a card's current content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOrigin {
    Static,
    Remote,
}

/// Static card content as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaticProject {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// One project slot on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub title: String,
    pub description: String,
    pub tags: Vec<Tag>,
    pub background: &'static str,
    /// Opens in a new browsing context without an opener reference.
    pub link: Option<String>,
    pub origin: CardOrigin,
}

impl ProjectCard {
    pub fn from_static(project: &StaticProject) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            tags: project.tags.iter().cloned().map(Tag::Topic).collect(),
            background: DEFAULT_GRADIENT,
            link: project.link.clone(),
            origin: CardOrigin::Static,
        }
    }

    pub fn from_remote(project: &RemoteProject, default_description: &str) -> Self {
        let description = project
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(default_description)
            .to_string();

        let mut tags = Vec::new();
        if let Some(lang) = &project.language {
            tags.push(Tag::Language(lang.clone()));
        }
        if project.star_count > 0 {
            tags.push(Tag::Stars(project.star_count));
        }
        tags.extend(
            project
                .topics
                .iter()
                .take(MAX_TOPIC_TAGS)
                .cloned()
                .map(Tag::Topic),
        );

        Self {
            title: display_title(&project.name),
            description,
            tags,
            background: gradient_for(project.language.as_deref()),
            link: Some(project.url.clone()),
            origin: CardOrigin::Remote,
        }
    }
}

/// The pre-existing project slots.
#[derive(Debug, Clone)]
pub struct ProjectGrid {
    slots: Vec<ProjectCard>,
    populated: bool,
}

impl ProjectGrid {
    pub fn new(statics: &[StaticProject]) -> Self {
        Self {
            slots: statics.iter().map(ProjectCard::from_static).collect(),
            populated: false,
        }
    }

    pub fn slots(&self) -> &[ProjectCard] {
        &self.slots
    }

    /// Overwrite slots with ranked projects, in order.
    ///
    /// Only the first call per load has any effect.  Returns the number of
    /// slots written.
    pub fn populate(&mut self, ranked: &[RemoteProject], default_description: &str) -> usize {
        if self.populated {
            debug!("project slots already populated, ignoring");
            return 0;
        }
        self.populated = true;

        let written = ranked.len().min(self.slots.len());
        if ranked.len() > written {
            debug!(dropped = ranked.len() - written, "more projects than slots");
        }
        for (slot, project) in self.slots.iter_mut().zip(ranked) {
            *slot = ProjectCard::from_remote(project, default_description);
        }
        written
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
