//! The writing section: newsletter cards the pipeline creates itself.

use crate::source::FeedEntry;

/// One newsletter card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub title: String,
    pub link: String,
    pub date: String,
    pub excerpt: String,
    /// No image block is shown when this is `None`.
    pub image: Option<String>,
}

impl PostCard {
    pub fn from_entry(entry: &FeedEntry) -> Self {
        Self {
            title: entry.title.clone(),
            link: entry.link.clone(),
            date: entry.formatted_date(),
            excerpt: entry.excerpt(),
            image: entry.image_url.clone(),
        }
    }

    /// Where a click should navigate.
    ///
    /// The whole card is clickable, but clicks that start on the inner
    /// "read more" link or on the image are left to that element so the
    /// entry is not opened twice.
    pub fn click_target(&self, origin: ClickOrigin) -> Option<&str> {
        match origin {
            ClickOrigin::Card => Some(self.link.as_str()),
            ClickOrigin::Link | ClickOrigin::Image => None,
        }
    }
}

/// Which element of a card a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOrigin {
    Card,
    Link,
    Image,
}

/// Contents of the newsletter container.
///
/// Starts as `Loading` and moves to exactly one of the other states once
/// per load: either every card, or the single fallback block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WritingSection {
    #[default]
    Loading,
    Posts(Vec<PostCard>),
    Fallback {
        landing_page: String,
    },
}

impl WritingSection {
    /// Replace the container with one card per entry.  Returns `false` if
    /// the section has already been rendered.
    pub fn show_posts(&mut self, entries: &[FeedEntry]) -> bool {
        if *self != WritingSection::Loading {
            return false;
        }
        *self = WritingSection::Posts(entries.iter().map(PostCard::from_entry).collect());
        true
    }

    /// Replace the container with the block pointing at the newsletter page.
    pub fn show_fallback(&mut self, landing_page: impl Into<String>) -> bool {
        if *self != WritingSection::Loading {
            return false;
        }
        *self = WritingSection::Fallback {
            landing_page: landing_page.into(),
        };
        true
    }

    pub fn cards(&self) -> &[PostCard] {
        match self {
            WritingSection::Posts(cards) => cards,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str) -> FeedEntry {
        FeedEntry {
            title: title.into(),
            link: format!("https://someone.substack.com/p/{title}"),
            published_at: None,
            raw_body_html: "<p>Hi</p>".into(),
            image_url: None,
        }
    }

    #[test]
    fn card_click_opens_link_but_inner_elements_do_not() {
        let card = PostCard::from_entry(&entry("a"));
        assert_eq!(
            card.click_target(ClickOrigin::Card),
            Some("https://someone.substack.com/p/a")
        );
        assert_eq!(card.click_target(ClickOrigin::Link), None);
        assert_eq!(card.click_target(ClickOrigin::Image), None);
    }

    #[test]
    fn card_carries_derived_fields() {
        let card = PostCard::from_entry(&entry("a"));
        assert_eq!(card.date, "Recent");
        assert_eq!(card.excerpt, "Hi");
        assert!(card.image.is_none());
    }

    #[test]
    fn posts_render_once() {
        let mut section = WritingSection::default();
        assert!(section.show_posts(&[entry("a"), entry("b")]));
        assert_eq!(section.cards().len(), 2);

        assert!(!section.show_posts(&[entry("c")]));
        assert!(!section.show_fallback("https://someone.substack.com"));
        assert_eq!(section.cards()[0].title, "a");
    }

    #[test]
    fn fallback_replaces_loading_entirely() {
        let mut section = WritingSection::default();
        assert!(section.show_fallback("https://someone.substack.com"));
        assert!(section.cards().is_empty());
        assert_eq!(
            section,
            WritingSection::Fallback {
                landing_page: "https://someone.substack.com".into()
            }
        );
    }
}
