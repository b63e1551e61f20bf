// src/lib.rs
// =============================================================================
// gh-articles: read Markdown articles straight out of a GitHub repository.
//
// A site generator builds one GitHubClient, hands it to an ArticleStore and
// asks for what it needs:
//
//   let client = GitHubClient::new(RepoConfig::new(token, "owner", "blog"))?;
//   let store = ArticleStore::new(client, CollectionOptions::default());
//
//   store.list_all_slugs().await?            every slug
//   store.get_article_by_slug(slug).await?   one article
//   store.get_all_articles().await?          visible articles, newest first
//   store.get_all_articles_topics().await?   topic frequency table
//
// Nothing is cached: every call goes back to the repository.
// =============================================================================

pub mod articles;
pub mod config;
pub mod error;
pub mod github;
pub mod source;

#[cfg(test)]
mod testing;

pub use articles::{Article, ArticleData, ArticleStore, TopicCount};
pub use config::{CollectionOptions, Mode};
pub use error::{Error, Result};
pub use github::{GitHubClient, RepoConfig};
pub use source::{ArticleFile, ContentSource};
