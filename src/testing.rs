// src/testing.rs
// =============================================================================
// In-memory ContentSource used by the unit tests.
//
// It counts calls so tests can check which requests the store made, and it
// can be told to fail the listing. With a fetch delay set, it also records
// how many content fetches were running at the same time.
// =============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::source::{ArticleFile, ContentSource};

#[derive(Debug, Default)]
pub struct StubSource {
    files: Vec<ArticleFile>,
    contents: HashMap<String, String>,
    commit_dates: HashMap<String, String>,
    fail_listing: bool,
    content_calls: AtomicUsize,
    commit_calls: AtomicUsize,
    fetch_delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `articles/<name>` to the listing with the given contents.
    pub fn with_file(mut self, name: &str, text: &str) -> Self {
        let path = format!("articles/{}", name);
        self.files.push(ArticleFile {
            name: name.to_string(),
            path: path.clone(),
        });
        self.contents.insert(path, text.to_string());
        self
    }

    /// Adds a listing entry with no contents behind it.
    pub fn with_listed_only(mut self, name: &str) -> Self {
        self.files.push(ArticleFile {
            name: name.to_string(),
            path: format!("articles/{}", name),
        });
        self
    }

    pub fn with_commit_date(mut self, name: &str, date: &str) -> Self {
        self.commit_dates
            .insert(format!("articles/{}", name), date.to_string());
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Makes every content fetch wait, so overlapping fetches can be seen.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Highest number of content fetches that were in progress at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn content_calls(&self) -> usize {
        self.content_calls.load(Ordering::SeqCst)
    }

    pub fn commit_calls(&self) -> usize {
        self.commit_calls.load(Ordering::SeqCst)
    }
}

/// Front matter + body for a test article.
pub fn article_text(title: &str, topics: &[&str], published: bool, published_at: Option<&str>) -> String {
    let topics = topics
        .iter()
        .map(|topic| format!("\"{}\"", topic))
        .collect::<Vec<_>>()
        .join(", ");
    let published_at = published_at
        .map(|value| format!("published_at: \"{}\"\n", value))
        .unwrap_or_default();

    format!(
        "---\ntitle: \"{}\"\nemoji: \"📝\"\ntype: \"tech\"\ntopics: [{}]\npublished: {}\n{}---\nBody of {}\n",
        title, topics, published, published_at, title
    )
}

#[async_trait]
impl ContentSource for StubSource {
    async fn list_article_files(&self) -> Result<Vec<ArticleFile>> {
        if self.fail_listing {
            return Err(Error::remote("GitHub API returned HTTP 500 for contents/articles"));
        }
        Ok(self.files.clone())
    }

    async fn fetch_file_content(&self, path: &str) -> Result<String> {
        self.content_calls.fetch_add(1, Ordering::SeqCst);

        // Track overlap: bump the counter, remember the highest value seen,
        // then hold the "request" open for the configured delay
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.contents
            .get(path)
            .cloned()
            .ok_or_else(|| Error::remote(format!("GitHub API returned HTTP 404 for {}", path)))
    }

    async fn fetch_last_commit_date(&self, path: &str) -> Result<String> {
        self.commit_calls.fetch_add(1, Ordering::SeqCst);
        self.commit_dates
            .get(path)
            .cloned()
            .ok_or_else(|| Error::remote(format!("No commits found for {}", path)))
    }
}
