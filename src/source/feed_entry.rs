//! A normalised newsletter entry and the markup helpers used to build it.
//!
//! Newsletter bodies arrive as HTML fragments.  The page shows a plain-text
//! excerpt and, when no explicit image is attached, the first inline image,
//! so both helpers parse the fragment with [`scraper`] rather than pattern
//! matching on tags.

use chrono::{DateTime, Utc};
use scraper::{Html, Selector};

/// Longest excerpt shown on a card, in characters, before the ellipsis.
pub const EXCERPT_LIMIT: usize = 150;

/// Shown when an entry's body has no visible text.
pub const EMPTY_EXCERPT: &str = "Click to read this article on Substack.";

/// Shown when an entry has no usable publish date.
pub const UNDATED: &str = "Recent";

/// One newsletter post, normalised from the syndication document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// `None` if the feed omitted the date or it could not be parsed.
    pub published_at: Option<DateTime<Utc>>,
    /// Body exactly as the feed carried it, markup included.
    pub raw_body_html: String,
    pub image_url: Option<String>,
}

impl FeedEntry {
    /// Plain-text teaser: markup stripped, trimmed, cut to
    /// [`EXCERPT_LIMIT`] characters with a trailing `...`.
    pub fn excerpt(&self) -> String {
        let text = strip_markup(&self.raw_body_html);
        let text = text.trim();
        if text.is_empty() {
            return EMPTY_EXCERPT.to_string();
        }
        if text.chars().count() > EXCERPT_LIMIT {
            let cut: String = text.chars().take(EXCERPT_LIMIT).collect();
            format!("{cut}...")
        } else {
            text.to_string()
        }
    }

    /// `Jan 5, 2024` style date, or [`UNDATED`].
    pub fn formatted_date(&self) -> String {
        self.published_at
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| UNDATED.to_string())
    }
}

/// Parse a feed date.  RSS uses RFC 2822; some generators emit RFC 3339.
pub(crate) fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Visible text of an HTML fragment, entities decoded.
pub fn strip_markup(html: &str) -> String {
    Html::parse_fragment(html)
        .root_element()
        .text()
        .collect()
}

/// `src` of the first `<img>` in an HTML fragment, if any.
pub fn first_image_src(html: &str) -> Option<String> {
    let selector = Selector::parse("img").ok()?;
    Html::parse_fragment(html)
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .find(|src| !src.trim().is_empty())
        .map(String::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
