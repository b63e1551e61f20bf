// src/articles/store.rs
// =============================================================================
// ArticleStore turns repository files into Article records.
//
// For one slug:
// 1. decode the slug back into a file stem -> "<articles dir>/<stem>.md"
// 2. fetch the file and split front matter from body
// 3. if the front matter has no published_at, ask for the date of the last
//    commit that touched the file (only then - it costs a request)
// 4. build the Article
//
// The store owns its ContentSource, so whoever constructs it decides which
// client (real GitHub or a test stub) is used. Any failure is returned as-is.
//
// The collection-wide operations live in collection.rs.
// =============================================================================

use tracing::debug;

use super::frontmatter::{parse_document, parse_timestamp};
use super::slug::{decode_slug, encode_slug};
use super::types::{Article, ArticleData};
use crate::config::CollectionOptions;
use crate::error::{Error, Result};
use crate::source::{is_markdown_file, ContentSource};

/// Reads articles out of a ContentSource.
#[derive(Debug)]
pub struct ArticleStore<S> {
    pub(super) source: S,
    pub(super) options: CollectionOptions,
}

impl<S: ContentSource> ArticleStore<S> {
    pub fn new(source: S, options: CollectionOptions) -> Self {
        Self { source, options }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn options(&self) -> &CollectionOptions {
        &self.options
    }

    /// Repository path of the article file with the given stem.
    pub fn article_path(&self, stem: &str) -> String {
        format!(
            "{}/{}.md",
            self.source.articles_dir().trim_matches('/'),
            stem
        )
    }

    /// One slug per Markdown file in the articles directory.
    pub async fn list_all_slugs(&self) -> Result<Vec<String>> {
        let files = self.source.list_article_files().await?;

        Ok(files
            .iter()
            .filter(|file| is_markdown_file(&file.name))
            .map(|file| encode_slug(&file.name))
            .collect())
    }

    /// Fetches and assembles the article behind `slug`.
    pub async fn get_article_by_slug(&self, slug: &str) -> Result<Article> {
        let stem = decode_slug(slug)?;
        let path = self.article_path(&stem);

        let markdown = self.source.fetch_file_content(&path).await?;
        let (front_matter, body) = parse_document(&markdown, &path)?;

        let published_at = match front_matter.published_at() {
            Some(value) => parse_timestamp(value, self.options.naive_offset).map_err(|reason| {
                Error::parse(&path, format!("invalid published_at {:?}: {}", value, reason))
            })?,
            None => {
                let date = self.source.fetch_last_commit_date(&path).await?;
                parse_timestamp(&date, self.options.naive_offset).map_err(|reason| {
                    Error::remote(format!(
                        "Commit date {:?} for {} is not a timestamp: {}",
                        date, path, reason
                    ))
                })?
            }
        };

        debug!(slug, %path, %published_at, "Assembled article");

        Ok(Article {
            slug: slug.to_string(),
            content: body.to_string(),
            data: ArticleData {
                title: front_matter.title,
                emoji: front_matter.emoji,
                kind: front_matter.kind,
                topics: front_matter.topics,
                published: front_matter.published,
                published_at,
            },
        })
    }
}
