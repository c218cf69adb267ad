//! Runtime configuration.
//!
//! Values come from an optional TOML file, then from environment variables
//! (a `.env` file is honoured), then from built-in defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::gallery::Photo;
use crate::page::StaticProject;
use crate::source::{NewsletterSource, Relay, RepositorySource};
use crate::theme::ThemeStore;

/// Used when no `--config` is given and this file exists.
pub const DEFAULT_CONFIG_FILE: &str = "portfolio.toml";

const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Appears in the default project description.
    pub owner_name: String,
    pub github_user: String,
    pub github_api: String,
    pub substack_user: String,
    /// Tried in order.  `{url}` alone means a direct request.
    pub relays: Vec<Relay>,
    pub relay_timeout_secs: u64,
    /// Static content of the project slots; one entry per slot.
    pub projects: Vec<StaticProject>,
    pub photos: Vec<Photo>,
    /// Overrides the theme flag location.
    pub theme_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner_name: "Nikolas Neofytou".into(),
            github_user: "NikolasNeofytou".into(),
            github_api: DEFAULT_API_BASE.into(),
            substack_user: "nikolasneofytou".into(),
            relays: vec![
                Relay::direct(),
                Relay::new("https://api.allorigins.win/raw?url={url}"),
                Relay::new("https://corsproxy.io/?{url}"),
                Relay::new("https://api.codetabs.com/v1/proxy?quest={url}"),
            ],
            relay_timeout_secs: DEFAULT_RELAY_TIMEOUT_SECS,
            projects: default_projects(),
            photos: Vec::new(),
            theme_file: None,
        }
    }
}

fn default_projects() -> Vec<StaticProject> {
    (1..=6)
        .map(|n| StaticProject {
            title: format!("Project {n}"),
            description: "Project details are loading from GitHub.".into(),
            tags: vec!["HTML".into(), "CSS".into(), "JavaScript".into()],
            link: None,
        })
        .collect()
}

impl Config {
    /// Load from `path` (which must exist) or from [`DEFAULT_CONFIG_FILE`]
    /// if present, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(user) = env::var("PORTFOLIO_GITHUB_USER") {
            self.github_user = user;
        }
        if let Ok(api) = env::var("PORTFOLIO_GITHUB_API") {
            self.github_api = api;
        }
        if let Ok(user) = env::var("PORTFOLIO_SUBSTACK_USER") {
            self.substack_user = user;
        }
        if let Ok(secs) = env::var("PORTFOLIO_RELAY_TIMEOUT_SECS") {
            self.relay_timeout_secs = secs
                .parse()
                .with_context(|| format!("PORTFOLIO_RELAY_TIMEOUT_SECS={secs} is not a number"))?;
        }
        Ok(())
    }

    pub fn relay_timeout(&self) -> Duration {
        Duration::from_secs(self.relay_timeout_secs)
    }

    pub fn repository_source(&self) -> RepositorySource {
        RepositorySource::new(&self.github_api, &self.github_user, self.relay_timeout())
    }

    pub fn newsletter_source(&self) -> NewsletterSource {
        NewsletterSource::new(&self.substack_user, self.relays.clone(), self.relay_timeout())
    }

    pub fn theme_store(&self) -> ThemeStore {
        ThemeStore::new(
            self.theme_file
                .clone()
                .unwrap_or_else(ThemeStore::default_path),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_six_slots_and_direct_first() {
        let config = Config::default();
        assert_eq!(config.projects.len(), 6);
        assert!(config.relays[0].is_direct());
        assert_eq!(config.relays.len(), 4);
        assert_eq!(config.relay_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn toml_overrides_only_given_fields() {
        let config = Config::from_toml(
            r#"
            github_user = "octocat"
            relays = ["https://relay.test/?{url}"]

            [[projects]]
            title = "Only slot"
            description = "Static"

            [[photos]]
            src = "photos/sea.jpg"
            caption = "Sea"
            "#,
        )
        .unwrap();

        assert_eq!(config.github_user, "octocat");
        assert_eq!(config.substack_user, "nikolasneofytou");
        assert_eq!(config.relays, [Relay::new("https://relay.test/?{url}")]);
        assert_eq!(config.projects.len(), 1);
        assert!(config.projects[0].tags.is_empty());
        assert_eq!(config.photos[0].caption, "Sea");
    }

    #[test]
    fn sources_follow_config() {
        let config = Config {
            github_user: "octocat".into(),
            substack_user: "letters".into(),
            relay_timeout_secs: 2,
            ..Config::default()
        };

        let repos = config.repository_source();
        let news = config.newsletter_source();

        assert_eq!(
            repos.listing_url(),
            "https://api.github.com/users/octocat/repos?sort=updated&per_page=100"
        );
        assert_eq!(news.feed_url(), "https://letters.substack.com/feed");
        assert_eq!(news.timeout, Duration::from_secs(2));
    }

    #[test]
    fn unknown_keys_do_not_break_loading() {
        assert!(Config::from_toml("something_else = 1").is_ok());
    }
}
