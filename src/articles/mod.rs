// src/articles/mod.rs
// =============================================================================
// Everything between "raw files in a repository" and "articles a site can
// render".
//
// Submodules:
// - slug: file name <-> public slug
// - frontmatter: YAML header vs. Markdown body, timestamp parsing
// - types: Article, ArticleData, TopicCount
// - store: ArticleStore, builds one article from one slug
// - collection: all articles (filtered + sorted) and the topic table
// - topics: topic counting with locale-aware ordering
//
// Data only flows one way: ContentSource -> store -> collection -> caller.
// =============================================================================

mod collection;
mod frontmatter;
mod slug;
mod store;
mod topics;
mod types;

pub use collection::{select_visible, sort_newest_first};
pub use frontmatter::{parse_document, parse_timestamp, split_front_matter, FrontMatter};
pub use slug::{decode_slug, encode_slug, strip_markdown_extension};
pub use store::ArticleStore;
pub use topics::count_topics;
pub use types::{Article, ArticleData, TopicCount};
