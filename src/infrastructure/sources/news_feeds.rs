//! Feed group producer - one chain step made of several feeds

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use super::rss::RssFeedAdapter;
use crate::domain::news::{normalize, Categorizer, Item};
use crate::domain::{DomainError, Producer, SourceAdapter};

/// Fetches every feed of a group concurrently and normalizes the concatenation.
///
/// Items keep feed order, so dedup retains the copy from the earliest-listed feed.
#[derive(Debug)]
pub struct NewsFeedGroup {
    name: String,
    feeds: Vec<RssFeedAdapter>,
    categorizer: Arc<Categorizer>,
    max_articles: usize,
}

impl NewsFeedGroup {
    pub fn new(
        name: impl Into<String>,
        feeds: Vec<RssFeedAdapter>,
        categorizer: Arc<Categorizer>,
        max_articles: usize,
    ) -> Self {
        Self {
            name: name.into(),
            feeds,
            categorizer,
            max_articles,
        }
    }

    pub fn feeds(&self) -> &[RssFeedAdapter] {
        &self.feeds
    }
}

#[async_trait]
impl Producer<Item> for NewsFeedGroup {
    fn name(&self) -> &str {
        &self.name
    }

    async fn produce(&self) -> Result<Vec<Item>, DomainError> {
        let batches = join_all(self.feeds.iter().map(|feed| feed.fetch())).await;
        let items: Vec<Item> = batches.into_iter().flatten().collect();

        Ok(normalize(items, &self.categorizer, self.max_articles))
    }
}
