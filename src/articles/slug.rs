// src/articles/slug.rs
// =============================================================================
// Slugs are the public, URL-safe names of articles.
//
//   "hello world.md"  ->  "hello%20world"  ->  "hello world"
//    (file name)           (slug)               (stem, + ".md" = file name)
//
// Encoding keeps the same characters JavaScript's encodeURIComponent keeps
// (A-Z a-z 0-9 - _ . ! ~ * ' ( )), so slugs stay identical to the URLs a
// site has already published. Percent-encoding is injective, which is what
// makes decode_slug an exact inverse of encode_slug.
//
// Decoding is strict: a slug that encode_slug could never have produced is
// rejected instead of being turned into some other file name.
// =============================================================================

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{Error, Result};

// Everything except the encodeURIComponent unreserved marks gets escaped
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Removes a trailing `.md` or `.markdown` from a file name.
pub fn strip_markdown_extension(file_name: &str) -> &str {
    file_name
        .strip_suffix(".markdown")
        .or_else(|| file_name.strip_suffix(".md"))
        .unwrap_or(file_name)
}

/// Turns an article file name into its slug.
///
/// ```
/// use gh_articles::articles::encode_slug;
///
/// assert_eq!(encode_slug("hello world.md"), "hello%20world");
/// assert_eq!(encode_slug("rust-入門.md"), "rust-%E5%85%A5%E9%96%80");
/// ```
pub fn encode_slug(file_name: &str) -> String {
    utf8_percent_encode(strip_markdown_extension(file_name), COMPONENT).to_string()
}

/// Turns a slug back into the file stem it was made from.
///
/// Fails with [`Error::Decode`] on malformed `%` escapes, on bytes that are
/// not UTF-8, and on anything that does not decode to a plain file name.
pub fn decode_slug(slug: &str) -> Result<String> {
    check_escapes(slug).map_err(|reason| Error::decode(slug, reason))?;

    let stem = percent_decode_str(slug)
        .decode_utf8()
        .map_err(|e| Error::decode(slug, format!("not valid UTF-8: {}", e)))?
        .into_owned();

    check_stem(&stem).map_err(|reason| Error::decode(slug, reason))?;
    Ok(stem)
}

// percent_decode_str passes bad escapes through untouched; we want them loud
fn check_escapes(slug: &str) -> std::result::Result<(), String> {
    let bytes = slug.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(format!("malformed percent escape at byte {}", i));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

// The stem ends up as one segment of a repository path. Dot names and
// backslashes are fine there: ".md" is always appended, and the URL builder
// escapes everything else.
fn check_stem(stem: &str) -> std::result::Result<(), String> {
    if stem.contains(['/', '\0']) {
        return Err("decodes to something that is not a single file name".to_string());
    }
    Ok(())
}
