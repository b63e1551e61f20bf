// src/source.rs
// =============================================================================
// The seam between "where articles live" and "what we do with them".
//
// ContentSource is the Remote Content Accessor: three read-only calls that
// each cost one network request. GitHubClient (src/github/) is the real
// implementation; tests plug in a stub so nothing touches the network.
// =============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One Markdown file found by listing the articles directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleFile {
    /// File name including extension, e.g. `hello-world.md`
    pub name: String,
    /// Path of the file inside the repository, e.g. `articles/hello-world.md`
    pub path: String,
}

/// Read-only access to the repository that holds the articles.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Lists the Markdown (`.md`) files in the articles directory.
    async fn list_article_files(&self) -> Result<Vec<ArticleFile>>;

    /// Fetches a file and returns its contents as UTF-8 text.
    async fn fetch_file_content(&self, path: &str) -> Result<String>;

    /// Returns the committer date of the most recent commit touching `path`,
    /// as ISO-8601 text.
    async fn fetch_last_commit_date(&self, path: &str) -> Result<String>;

    /// Directory (relative to the repository root) that holds the articles.
    fn articles_dir(&self) -> &str {
        "articles"
    }
}

#[async_trait]
impl<S: ContentSource + ?Sized> ContentSource for std::sync::Arc<S> {
    async fn list_article_files(&self) -> Result<Vec<ArticleFile>> {
        (**self).list_article_files().await
    }

    async fn fetch_file_content(&self, path: &str) -> Result<String> {
        (**self).fetch_file_content(path).await
    }

    async fn fetch_last_commit_date(&self, path: &str) -> Result<String> {
        (**self).fetch_last_commit_date(path).await
    }

    fn articles_dir(&self) -> &str {
        (**self).articles_dir()
    }
}

/// True if a file name has the Markdown extension we pick up.
pub fn is_markdown_file(name: &str) -> bool {
    name.ends_with(".md")
}
