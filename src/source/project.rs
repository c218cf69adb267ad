//! The repository descriptor returned by the code-hosting API.
//!
//! `RemoteProject` lives only for one fetch-render cycle: it is decoded from
//! the listing response, ranked, copied into a project slot and dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::cmp::Ordering;

/// A single repository, as far as the page cares about it.
///
/// ## Sorting
///
/// `RemoteProject` implements [`Ord`] as the display ranking: more stars
/// first, and among equal star counts the most recently updated first.
/// Projects equal on both keys compare `Equal`, so a stable sort keeps the
/// order the API returned them in.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct RemoteProject {
    /// Raw repository name, e.g. `weather-dashboard`.
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Canonical web URL of the repository.
    #[serde(rename = "html_url")]
    pub url: String,

    /// Primary language as reported by the host; `None` for empty repos.
    #[serde(default)]
    pub language: Option<String>,

    #[serde(rename = "stargazers_count", default)]
    pub star_count: u64,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub topics: Vec<String>,

    pub updated_at: DateTime<Utc>,

    #[serde(rename = "fork", default)]
    pub is_fork: bool,
}

/// The API sends `"topics": null` for some repositories.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Ordering — stars descending, then most recently updated
// ---------------------------------------------------------------------------

impl Ord for RemoteProject {
    fn cmp(&self, other: &Self) -> Ordering {
        // `other` first on both keys so that bigger/newer sorts earlier.
        other
            .star_count
            .cmp(&self.star_count)
            .then_with(|| other.updated_at.cmp(&self.updated_at))
    }
}

impl PartialOrd for RemoteProject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    /// Shorthand constructor for tests.
    pub fn make_project(name: &str, stars: u64, updated: DateTime<Utc>) -> RemoteProject {
        RemoteProject {
            name: name.to_string(),
            description: None,
            url: format!("https://github.com/someone/{name}"),
            language: None,
            star_count: stars,
            topics: Vec::new(),
            updated_at: updated,
            is_fork: false,
        }
    }

    pub fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn more_stars_sort_first() {
        let mut projects = vec![
            make_project("low", 1, day(20)),
            make_project("high", 40, day(1)),
            make_project("mid", 7, day(10)),
        ];
        projects.sort();

        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["high", "mid", "low"]);
    }

    #[test]
    fn equal_stars_fall_back_to_most_recent_update() {
        let mut projects = vec![
            make_project("older", 3, day(1)),
            make_project("newest", 3, day(28)),
            make_project("newer", 3, day(14)),
        ];
        projects.sort();

        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["newest", "newer", "older"]);
    }

    #[test]
    fn full_ties_compare_equal() {
        let a = make_project("a", 2, day(5));
        let b = make_project("b", 2, day(5));
        assert_eq!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn decodes_listing_entry() {
        let json = r#"{
            "name": "weather_dashboard",
            "description": null,
            "html_url": "https://github.com/someone/weather_dashboard",
            "language": "TypeScript",
            "stargazers_count": 12,
            "topics": null,
            "updated_at": "2025-02-11T09:30:00Z",
            "fork": true,
            "watchers": 12
        }"#;

        let project: RemoteProject = serde_json::from_str(json).unwrap();

        assert_eq!(project.name, "weather_dashboard");
        assert!(project.description.is_none());
        assert_eq!(project.language.as_deref(), Some("TypeScript"));
        assert_eq!(project.star_count, 12);
        assert!(project.topics.is_empty(), "null topics decode as empty");
        assert!(project.is_fork);
        assert_eq!(
            project.updated_at,
            Utc.with_ymd_and_hms(2025, 2, 11, 9, 30, 0).unwrap()
        );
    }
}
