// src/config.rs
// =============================================================================
// Options that control how the article collection is built.
//
// RepoConfig (src/github/) says WHERE the articles live; CollectionOptions
// says WHAT we do with them once fetched. The CLI fills both from flags or
// environment variables (see src/cli.rs); library users build them directly.
// =============================================================================

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How many articles are fetched at the same time by default
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Locale used to order topics that have the same count
pub const DEFAULT_TOPIC_LOCALE: &str = "ja";

/// Execution mode.
///
/// Development shows every article (drafts and future posts included);
/// production only shows published articles whose date has arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl Mode {
    pub fn is_development(self) -> bool {
        self == Mode::Development
    }
}

/// Options for assembling and aggregating articles.
#[derive(Debug, Clone)]
pub struct CollectionOptions {
    /// Visibility rules (see Mode)
    pub mode: Mode,
    /// Upper bound on articles fetched at the same time (values below 1 act as 1)
    pub concurrency: usize,
    /// Offset applied to `published_at` values written without one,
    /// e.g. `2024-04-01 09:00`
    pub naive_offset: FixedOffset,
    /// BCP 47 locale for ordering topics with equal counts
    pub topic_locale: String,
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            concurrency: DEFAULT_CONCURRENCY,
            naive_offset: Utc.fix(),
            topic_locale: DEFAULT_TOPIC_LOCALE.to_string(),
        }
    }
}

/// Parses a UTC offset such as `+09:00`, `-0530`, `Z` or `UTC`.
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let invalid = || Error::config(format!("Invalid UTC offset '{}' (expected e.g. +09:00)", value));

    let (sign, rest) = match value.as_bytes().first() {
        Some(b'+') => (1, &value[1..]),
        Some(b'-') => (-1, &value[1..]),
        _ => return Err(invalid()),
    };

    // Accept both HH:MM and HHMM
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
