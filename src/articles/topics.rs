// src/articles/topics.rs
// =============================================================================
// Counts how many articles use each topic.
//
// Order: most used first; equal counts are ordered alphabetically using the
// collation rules of a locale (Japanese by default), not raw byte order.
// Byte order would put every kana and kanji after all Latin text in an
// arbitrary code-point order.
//
// Topics are compared exactly as written: "Rust" and "rust" are two topics.
// =============================================================================

use std::collections::HashMap;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;

use super::types::{Article, TopicCount};
use crate::error::{Error, Result};

/// Builds the topic frequency table for `articles`.
pub fn count_topics(articles: &[Article], locale: &str) -> Result<Vec<TopicCount>> {
    let collator = topic_collator(locale)?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for topic in articles.iter().flat_map(|article| article.data.topics.iter()) {
        *counts.entry(topic.as_str()).or_insert(0) += 1;
    }

    let mut topics: Vec<TopicCount> = counts
        .into_iter()
        .map(|(topic, count)| TopicCount {
            topic: topic.to_string(),
            count,
        })
        .collect();

    // The last tie-breaker only matters for strings the collator calls equal
    topics.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| collator.compare(&a.topic, &b.topic))
            .then_with(|| a.topic.cmp(&b.topic))
    });

    Ok(topics)
}

fn topic_collator(locale: &str) -> Result<Collator> {
    let parsed: Locale = locale
        .parse()
        .map_err(|e| Error::config(format!("Invalid topic locale '{}': {}", locale, e)))?;

    Collator::try_new(&parsed.into(), CollatorOptions::new())
        .map_err(|e| Error::config(format!("No collation data for locale '{}': {}", locale, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::articles::types::ArticleData;
    use chrono::DateTime;

    fn article(slug: &str, topics: &[&str]) -> Article {
        Article {
            slug: slug.to_string(),
            content: String::new(),
            data: ArticleData {
                title: slug.to_string(),
                emoji: "📝".to_string(),
                kind: "tech".to_string(),
                topics: topics.iter().map(|t| t.to_string()).collect(),
                published: true,
                published_at: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap(),
            },
        }
    }

    fn pairs(topics: &[TopicCount]) -> Vec<(&str, usize)> {
        topics.iter().map(|t| (t.topic.as_str(), t.count)).collect()
    }

    #[test]
    fn test_count_topics() {
        let articles = vec![
            article("one", &["a", "b"]),
            article("two", &["a"]),
            article("three", &["c"]),
        ];

        let topics = count_topics(&articles, "ja").unwrap();
        assert_eq!(pairs(&topics), vec![("a", 2), ("b", 1), ("c", 1)]);
    }

    #[test]
    fn test_ties_use_collation_not_bytes() {
        // Byte order would give "Zig" < "rust"; collation is case-insensitive
        // at the primary level so "rust" comes first
        let articles = vec![article("one", &["Zig", "rust"])];
        let topics = count_topics(&articles, "ja").unwrap();
        assert_eq!(pairs(&topics), vec![("rust", 1), ("Zig", 1)]);
    }

    #[test]
    fn test_japanese_topics() {
        let articles = vec![
            article("one", &["らいぶらり", "あいさつ", "かたかな"]),
            article("two", &["かたかな"]),
        ];

        let topics = count_topics(&articles, "ja").unwrap();
        assert_eq!(
            pairs(&topics),
            vec![("かたかな", 2), ("あいさつ", 1), ("らいぶらり", 1)]
        );
    }

    #[test]
    fn test_topics_are_case_sensitive() {
        let articles = vec![article("one", &["Rust"]), article("two", &["rust"])];
        let topics = count_topics(&articles, "ja").unwrap();
        assert_eq!(topics.len(), 2);
        assert!(topics.iter().all(|t| t.count == 1));
    }

    #[test]
    fn test_no_articles_no_topics() {
        assert!(count_topics(&[], "ja").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_locale() {
        let err = count_topics(&[], "not a locale!").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
