// src/articles/frontmatter.rs
// =============================================================================
// Splits an article into its YAML front matter and its Markdown body, and
// checks that the front matter has the fields we need.
//
//   ---
//   title: "Hello"
//   emoji: "👋"
//   type: "tech"
//   topics: ["rust", "github"]
//   published: true
//   published_at: 2024-04-01 09:00      <- optional
//   ---
//   Body starts here...
//
// Every field except published_at is required and must have the right type.
// A document without the opening `---` has no front matter at all, which
// therefore fails the same checks.
// =============================================================================

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::Deserialize;

use crate::error::{Error, Result};

const FENCE: &str = "---";

/// The front matter fields we read. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    pub emoji: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub topics: Vec<String>,
    pub published: bool,
    /// Raw text; `None` (missing, null or blank) means "use the commit date"
    #[serde(default)]
    pub published_at: Option<String>,
}

impl FrontMatter {
    /// published_at, treating a blank value like a missing one
    pub fn published_at(&self) -> Option<&str> {
        self.published_at
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Splits `text` into (front matter, body).
///
/// The front matter is empty when the document does not start with `---`.
/// `path` is only used in error messages.
pub fn split_front_matter<'a>(text: &'a str, path: &str) -> Result<(&'a str, &'a str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(rest) = strip_opening_fence(text) else {
        return Ok(("", text));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return Ok((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    Err(Error::parse(path, "front matter is missing its closing '---'"))
}

/// Splits and validates a whole article.
pub fn parse_document<'a>(text: &'a str, path: &str) -> Result<(FrontMatter, &'a str)> {
    let (header, body) = split_front_matter(text, path)?;

    if header.trim().is_empty() {
        return Err(Error::parse(path, "no front matter found"));
    }

    let front_matter: FrontMatter =
        serde_yaml::from_str(header).map_err(|e| Error::parse(path, e.to_string()))?;

    Ok((front_matter, body))
}

// Returns what follows the first line if that line is the fence
fn strip_opening_fence(text: &str) -> Option<&str> {
    let end = text.find('\n').map(|i| i + 1).unwrap_or(text.len());
    (text[..end].trim_end() == FENCE).then(|| &text[end..])
}

/// Parses a publication timestamp.
///
/// Accepts RFC 3339 (what GitHub returns for commits) and the shorter forms
/// people write by hand: `2024-04-01 09:00`, `2024-04-01T09:00:00`,
/// `2024-04-01`. Values without an offset are read in `naive_offset`.
pub fn parse_timestamp(
    value: &str,
    naive_offset: FixedOffset,
) -> std::result::Result<DateTime<FixedOffset>, String> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed);
    }

    for format in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M%:z"] {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }

    let naive = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ]
    .iter()
    .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    .or_else(|| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })
    .ok_or_else(|| "not a recognized date or date-time".to_string())?;

    naive_offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| "ambiguous local time".to_string())
}
