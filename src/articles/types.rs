// src/articles/types.rs
// =============================================================================
// The records handed back to callers.
//
// Nothing here is mutated after it is built and nothing is cached: every
// call to the store produces fresh values.
// =============================================================================

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Normalized front matter of one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleData {
    pub title: String,
    pub emoji: String,
    /// Article kind, e.g. "tech" or "idea"
    #[serde(rename = "type")]
    pub kind: String,
    pub topics: Vec<String>,
    pub published: bool,
    /// Always set: taken from the front matter, or from the last commit
    /// that touched the file when the front matter has none
    pub published_at: DateTime<FixedOffset>,
}

/// One article: its public slug, Markdown body and metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub slug: String,
    /// Markdown body with the front matter removed
    pub content: String,
    pub data: ArticleData,
}

impl Article {
    /// Published and not scheduled for later than `now`.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.data.published && self.data.published_at <= now
    }
}

/// How many visible articles carry a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
    pub topic: String,
    pub count: usize,
}
