//! Newsletter-feed source: the account's RSS feed, reached through relays.
//!
//! The feed host does not always answer direct requests, so the canonical
//! feed URL is tried through an ordered list of [`Relay`]s.  A relay is
//! accepted only if it answers with a success status *and* a body that
//! contains a feed root element; anything else moves on to the next one.

use std::time::Duration;

use rss::{Channel, Item};
use tracing::{debug, info, warn};

use super::feed_entry::parse_published;
use super::{first_image_src, first_success, with_timeout, FeedEntry, HttpTransport, Relay};
use crate::error::{FeedError, RelayFailure};

/// Never render more posts than this.
pub const MAX_POSTS: usize = 3;

/// Title used when an entry has none.
pub const UNTITLED: &str = "Untitled Post";

/// Opening tags that identify a syndication document.  Case-sensitive.
const FEED_ROOT_MARKERS: [&str; 2] = ["<rss", "<feed"];

const ACCEPT: &str = "application/xml, text/xml, */*";

/// The newsletter account and how to reach its feed.
#[derive(Debug, Clone)]
pub struct NewsletterSource {
    pub account: String,
    /// Tried in order; see [`Relay`].
    pub relays: Vec<Relay>,
    /// Upper bound for each relay attempt.
    pub timeout: Duration,
}

impl NewsletterSource {
    pub fn new(account: impl Into<String>, relays: Vec<Relay>, timeout: Duration) -> Self {
        Self {
            account: account.into(),
            relays,
            timeout,
        }
    }

    pub fn feed_url(&self) -> String {
        format!("https://{}.substack.com/feed", self.account)
    }

    /// Public page of the newsletter, used as link fallback and in the
    /// failure block.
    pub fn landing_page(&self) -> String {
        format!("https://{}.substack.com", self.account)
    }

    /// Fetch, parse and normalise up to [`MAX_POSTS`] entries.
    pub async fn fetch(&self, transport: &dyn HttpTransport) -> Result<Vec<FeedEntry>, FeedError> {
        let body = self.fetch_document(transport).await?;
        self.parse_entries(&body)
    }

    /// Walk the relay chain and return the first body that looks like a feed.
    pub async fn fetch_document(&self, transport: &dyn HttpTransport) -> Result<String, FeedError> {
        let target = self.feed_url();
        let target = target.as_str();

        first_success(&self.relays, move |relay| self.try_relay(transport, relay, target))
            .await
            .map_err(|failures| FeedError::Unavailable { failures })
    }

    async fn try_relay(
        &self,
        transport: &dyn HttpTransport,
        relay: &Relay,
        target: &str,
    ) -> Result<String, RelayFailure> {
        let url = relay.wrap(target);
        let name = relay.label().to_string();
        debug!(relay = %name, %url, "requesting feed");

        let response = match with_timeout(self.timeout, transport.get(&url, ACCEPT)).await {
            Ok(response) => response,
            Err(source) => {
                warn!(relay = %name, error = %source, "relay request failed");
                return Err(RelayFailure::Transport { relay: name, source });
            }
        };

        if !response.is_success() {
            warn!(relay = %name, status = response.status, "relay returned an error status");
            return Err(RelayFailure::Status {
                relay: name,
                status: response.status,
            });
        }

        if !FEED_ROOT_MARKERS.iter().any(|m| response.body.contains(m)) {
            warn!(relay = %name, "relay body is not a feed");
            return Err(RelayFailure::NotAFeed { relay: name });
        }

        info!(relay = %name, bytes = response.body.len(), "feed document accepted");
        Ok(response.body)
    }

    /// Parse an accepted document into at most [`MAX_POSTS`] entries, in
    /// document order.
    ///
    /// This is a pure function (no I/O) so tests can exercise the field
    /// fallbacks without a transport.
    pub fn parse_entries(&self, body: &str) -> Result<Vec<FeedEntry>, FeedError> {
        let channel =
            Channel::read_from(body.as_bytes()).map_err(|e| FeedError::Empty(e.to_string()))?;

        if channel.items().is_empty() {
            return Err(FeedError::Empty("no posts found in feed".into()));
        }

        Ok(channel
            .items()
            .iter()
            .take(MAX_POSTS)
            .map(|item| self.normalise(item))
            .collect())
    }

    fn normalise(&self, item: &Item) -> FeedEntry {
        let title = non_empty(item.title()).unwrap_or_else(|| {
            debug!("entry has no title");
            UNTITLED.to_string()
        });

        let link = non_empty(item.link()).unwrap_or_else(|| {
            debug!(%title, "entry has no link, using landing page");
            self.landing_page()
        });

        let published_at = item.pub_date().and_then(|raw| {
            let parsed = parse_published(raw);
            if parsed.is_none() {
                debug!(%title, raw, "unparseable publish date");
            }
            parsed
        });

        let raw_body_html = non_empty(item.description())
            .or_else(|| non_empty(item.content()))
            .unwrap_or_default();

        let image_url = media_content_url(item)
            .or_else(|| image_enclosure_url(item))
            .or_else(|| first_image_src(&raw_body_html));

        FeedEntry {
            title,
            link,
            published_at,
            raw_body_html,
            image_url,
        }
    }
}

fn non_empty(field: Option<&str>) -> Option<String> {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// `<media:content url="...">`, the explicit media attachment.
fn media_content_url(item: &Item) -> Option<String> {
    item.extensions()
        .get("media")?
        .get("content")?
        .iter()
        .find_map(|ext| ext.attrs().get("url"))
        .filter(|url| !url.is_empty())
        .cloned()
}

/// `<enclosure>` whose MIME type is an image.
fn image_enclosure_url(item: &Item) -> Option<String> {
    item.enclosure()
        .filter(|enc| enc.mime_type().starts_with("image"))
        .map(|enc| enc.url())
        .filter(|url| !url.is_empty())
        .map(String::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::{Reply, ScriptedTransport};

    fn source() -> NewsletterSource {
        NewsletterSource::new(
            "someone",
            vec![
                Relay::new("https://relay-one.test/raw?url={url}"),
                Relay::new("https://relay-two.test/?{url}"),
                Relay::new("https://relay-three.test/proxy?quest={url}"),
            ],
            Duration::from_secs(5),
        )
    }

    fn feed(items: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"
     xmlns:content="http://purl.org/rss/1.0/modules/content/"
     xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>Someone's Newsletter</title>
    <link>https://someone.substack.com</link>
    <description>Notes</description>
    {items}
  </channel>
</rss>"#
        )
    }

    fn post(n: u32) -> String {
        format!(
            "<item><title>Post {n}</title><link>https://someone.substack.com/p/{n}</link>\
             <pubDate>0{n} Apr 2025 08:00:00 GMT</pubDate>\
             <description>Body {n}</description></item>"
        )
    }

    // -- relay chain ---------------------------------------------------------

    #[tokio::test]
    async fn second_relay_wins_when_first_is_not_a_feed() {
        let transport = ScriptedTransport::new(vec![
            Reply::Ok(200, "<html>blocked</html>".into()),
            Reply::Ok(200, feed(&post(1))),
            Reply::Ok(200, feed(&post(2))),
        ]);
        let src = source();

        let body = src.fetch_document(&transport).await.unwrap();

        assert!(body.contains("Post 1"));
        let requested = transport.requested();
        assert_eq!(requested.len(), 2, "third relay must not be attempted");
        assert_eq!(requested[0], src.relays[0].wrap(&src.feed_url()));
        assert_eq!(requested[1], src.relays[1].wrap(&src.feed_url()));
    }

    #[tokio::test]
    async fn transport_error_moves_on_to_next_relay() {
        let transport = ScriptedTransport::new(vec![
            Reply::Fail("dns failure"),
            Reply::Ok(502, "bad gateway <rss".into()),
            Reply::Ok(200, feed(&post(1))),
        ]);

        let entries = source().fetch(&transport).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(transport.requested().len(), 3);
    }

    #[tokio::test]
    async fn all_relays_failing_is_unavailable() {
        let transport = ScriptedTransport::new(vec![
            Reply::Fail("one"),
            Reply::Fail("two"),
            Reply::Fail("three"),
        ]);

        let err = source().fetch(&transport).await.unwrap_err();

        match err {
            FeedError::Unavailable { failures } => {
                assert_eq!(failures.len(), 3);
                assert!(failures
                    .iter()
                    .all(|f| matches!(f, RelayFailure::Transport { .. })));
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn marker_match_is_case_sensitive() {
        let transport = ScriptedTransport::new(vec![
            Reply::Ok(200, "<RSS></RSS>".into()),
            Reply::Ok(200, "<FEED/>".into()),
            Reply::Ok(200, "nothing".into()),
        ]);

        let err = source().fetch_document(&transport).await.unwrap_err();

        assert!(matches!(err, FeedError::Unavailable { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_relay_times_out_and_chain_continues() {
        let transport = ScriptedTransport::new(vec![Reply::Hang, Reply::Ok(200, feed(&post(1)))]);

        let entries = source().fetch(&transport).await.unwrap();

        assert_eq!(entries[0].title, "Post 1");
    }

    #[tokio::test]
    async fn direct_relay_requests_canonical_url() {
        let mut src = source();
        src.relays = vec![Relay::direct()];
        let transport = ScriptedTransport::new(vec![Reply::Ok(200, feed(&post(1)))]);

        src.fetch(&transport).await.unwrap();

        assert_eq!(transport.requested(), ["https://someone.substack.com/feed"]);
    }

    // -- parsing -------------------------------------------------------------

    #[test]
    fn takes_first_three_in_document_order() {
        let items: String = (1..=5).map(post).collect();

        let entries = source().parse_entries(&feed(&items)).unwrap();

        let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Post 1", "Post 2", "Post 3"]);
        assert_eq!(entries[0].formatted_date(), "Apr 1, 2025");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let body = feed("<item><pubDate>someday</pubDate></item>");

        let entries = source().parse_entries(&body).unwrap();
        let entry = &entries[0];

        assert_eq!(entry.title, "Untitled Post");
        assert_eq!(entry.link, "https://someone.substack.com");
        assert_eq!(entry.published_at, None);
        assert_eq!(entry.formatted_date(), "Recent");
        assert_eq!(entry.image_url, None);
        assert_eq!(entry.excerpt(), "Click to read this article on Substack.");
    }

    #[test]
    fn body_falls_back_to_encoded_content() {
        let body = feed(
            "<item><title>T</title><content:encoded><![CDATA[<p>Full text</p>]]></content:encoded></item>",
        );

        let entries = source().parse_entries(&body).unwrap();

        assert_eq!(entries[0].excerpt(), "Full text");
    }

    #[test]
    fn image_prefers_media_content() {
        let body = feed(
            r#"<item><title>T</title>
                <media:content url="https://cdn.test/media.jpg" medium="image"/>
                <enclosure url="https://cdn.test/enclosure.jpg" length="1" type="image/jpeg"/>
                <description><![CDATA[<img src="https://cdn.test/inline.jpg">]]></description>
            </item>"#,
        );

        let entries = source().parse_entries(&body).unwrap();

        assert_eq!(entries[0].image_url.as_deref(), Some("https://cdn.test/media.jpg"));
    }

    #[test]
    fn image_uses_enclosure_only_when_typed_as_image() {
        let audio = feed(
            r#"<item><title>T</title>
                <enclosure url="https://cdn.test/episode.mp3" length="1" type="audio/mpeg"/>
                <description><![CDATA[<p>x</p><img src="https://cdn.test/inline.jpg">]]></description>
            </item>"#,
        );
        let image = feed(
            r#"<item><title>T</title>
                <enclosure url="https://cdn.test/cover.png" length="1" type="image/png"/>
            </item>"#,
        );

        let from_audio = source().parse_entries(&audio).unwrap();
        let from_image = source().parse_entries(&image).unwrap();

        assert_eq!(from_audio[0].image_url.as_deref(), Some("https://cdn.test/inline.jpg"));
        assert_eq!(from_image[0].image_url.as_deref(), Some("https://cdn.test/cover.png"));
    }

    #[test]
    fn feed_without_items_is_empty() {
        let err = source().parse_entries(&feed("")).unwrap_err();
        assert!(matches!(err, FeedError::Empty(_)));
    }

    #[test]
    fn non_rss_document_is_empty() {
        let atom = r#"<?xml version="1.0"?><feed xmlns="http://www.w3.org/2005/Atom"><title>x</title></feed>"#;
        let err = source().parse_entries(atom).unwrap_err();
        assert!(matches!(err, FeedError::Empty(_)));
    }
}
