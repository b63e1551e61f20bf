// src/articles/collection.rs
// =============================================================================
// Operations over the whole set of articles.
//
// get_all_articles:
// 1. list every slug
// 2. assemble all articles concurrently, at most `concurrency` at a time
// 3. keep what the current mode allows (see select_visible)
// 4. newest first
//
// If a single article fails, the whole call fails: no partial lists.
//
// Results depend on the clock (a scheduled article appears once its time
// has come), so each operation has an `_at(now)` form for tests and callers
// that want a fixed point in time.
// =============================================================================

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use super::store::ArticleStore;
use super::topics::count_topics;
use super::types::{Article, TopicCount};
use crate::config::Mode;
use crate::error::Result;
use crate::source::ContentSource;

impl<S: ContentSource> ArticleStore<S> {
    /// Every visible article, newest first, as of now.
    pub async fn get_all_articles(&self) -> Result<Vec<Article>> {
        self.get_all_articles_at(Utc::now()).await
    }

    /// Every article visible at `now`, newest first.
    pub async fn get_all_articles_at(&self, now: DateTime<Utc>) -> Result<Vec<Article>> {
        let slugs = self.list_all_slugs().await?;
        let limit = self.options.concurrency.max(1);

        // At most `limit` fetches in flight; results arrive in completion
        // order and get sorted below
        let articles: Vec<Article> = stream::iter(slugs)
            .map(|slug| async move { self.get_article_by_slug(&slug).await })
            .buffer_unordered(limit)
            // Stops at the first Err and drops the fetches still running
            .try_collect()
            .await?;

        let total = articles.len();
        let visible = select_visible(articles, self.options.mode, now);

        info!(
            total,
            visible = visible.len(),
            mode = ?self.options.mode,
            "Loaded articles"
        );

        Ok(visible)
    }

    /// Topic frequency table over the visible articles, as of now.
    pub async fn get_all_articles_topics(&self) -> Result<Vec<TopicCount>> {
        self.get_all_articles_topics_at(Utc::now()).await
    }

    /// Topic frequency table over the articles visible at `now`.
    pub async fn get_all_articles_topics_at(&self, now: DateTime<Utc>) -> Result<Vec<TopicCount>> {
        let articles = self.get_all_articles_at(now).await?;
        count_topics(&articles, &self.options.topic_locale)
    }
}

/// Applies the visibility rules of `mode` and sorts newest first.
///
/// Development keeps everything. Production keeps articles that are
/// published and whose `published_at` is not after `now`.
pub fn select_visible(articles: Vec<Article>, mode: Mode, now: DateTime<Utc>) -> Vec<Article> {
    let mut visible: Vec<Article> = if mode.is_development() {
        articles
    } else {
        articles
            .into_iter()
            .filter(|article| article.is_visible_at(now))
            .collect()
    };

    sort_newest_first(&mut visible);
    visible
}

/// Sorts by `published_at` descending; equal dates fall back to the slug so
/// the order never depends on fetch timing.
pub fn sort_newest_first(articles: &mut [Article]) {
    articles.sort_by(|a, b| {
        b.data
            .published_at
            .cmp(&a.data.published_at)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}
