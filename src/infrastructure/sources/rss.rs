//! RSS 2.0 / Atom feed adapter

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roxmltree::{Document, Node, ParsingOptions};
use scraper::Html;

use crate::domain::news::Item;
use crate::domain::{DomainError, SourceAdapter};
use crate::infrastructure::http::HttpClientTrait;

/// Titles shorter than this are treated as malformed
pub const MIN_TITLE_CHARS: usize = 10;

/// Summary length before truncation
pub const SUMMARY_CHARS: usize = 140;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const FEED_ACCEPT: &str = "application/rss+xml,application/xml,text/xml";

/// One feed URL
#[derive(Debug, Clone)]
pub struct RssFeedAdapter {
    client: Arc<dyn HttpClientTrait>,
    url: String,
    source_name: String,
    items_per_feed: usize,
    timeout: Duration,
}

impl RssFeedAdapter {
    pub fn new(
        client: Arc<dyn HttpClientTrait>,
        url: impl Into<String>,
        source_name: impl Into<String>,
        items_per_feed: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            source_name: source_name.into(),
            items_per_feed,
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SourceAdapter<Item> for RssFeedAdapter {
    fn provider(&self) -> &str {
        &self.url
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn try_fetch(&self) -> Result<Vec<Item>, DomainError> {
        let now = Utc::now();
        let body = self
            .client
            .get_text(
                &self.url,
                &[("t", now.timestamp().to_string())],
                vec![("User-Agent", BROWSER_USER_AGENT), ("Accept", FEED_ACCEPT)],
            )
            .await?;

        parse_feed(&body, &self.source_name, self.items_per_feed, now)
    }
}

/// Parse an RSS or Atom document into at most `limit` items.
///
/// Only the first `limit` entries are considered; malformed ones among them are skipped
/// rather than replaced by later entries.
pub fn parse_feed(
    xml: &str,
    source_name: &str,
    limit: usize,
    fetched_at: DateTime<Utc>,
) -> Result<Vec<Item>, DomainError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)
        .map_err(|err| DomainError::parse(source_name, format!("invalid feed XML: {err}")))?;

    let items = doc
        .descendants()
        .filter(|node| matches!(node.tag_name().name(), "item" | "entry"))
        .take(limit)
        .filter_map(|node| parse_entry(node, source_name, fetched_at))
        .collect();

    Ok(items)
}

fn parse_entry(node: Node<'_, '_>, source_name: &str, fetched_at: DateTime<Utc>) -> Option<Item> {
    let title = child(node, &["title"]).map(text_of)?;
    let title = title.trim();

    if title.chars().count() < MIN_TITLE_CHARS {
        return None;
    }

    let url = child(node, &["link"])
        .and_then(|link| {
            link.attribute("href")
                .map(str::to_string)
                .or_else(|| Some(text_of(link)))
        })
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
        .unwrap_or_else(|| "#".to_string());

    let summary = child(node, &["description", "summary", "content"])
        .map(|desc| summarize(&text_of(desc)))
        .unwrap_or_default();

    let timestamp = child(node, &["pubDate", "published", "updated", "date"])
        .and_then(|date| parse_date(text_of(date).trim()))
        .unwrap_or(fetched_at);

    Some(Item::new(title, summary, url, source_name, timestamp))
}

fn child<'a, 'input>(node: Node<'a, 'input>, names: &[&str]) -> Option<Node<'a, 'input>> {
    names.iter().find_map(|name| {
        node.children()
            .find(|child| child.is_element() && child.tag_name().name() == *name)
    })
}

fn text_of(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Strip markup, collapse whitespace and cap the length
fn summarize(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let text: String = fragment.root_element().text().collect();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.chars().count() > SUMMARY_CHARS {
        let truncated: String = text.chars().take(SUMMARY_CHARS).collect();
        format!("{}...", truncated)
    } else {
        text
    }
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|date| date.with_timezone(&Utc))
        .ok()
}
