// src/github/client.rs
// =============================================================================
// Reads articles from a GitHub repository through the REST API.
//
// Three endpoints, all plain GET + JSON:
// - GET /repos/{owner}/{repo}/contents/{dir}        list the articles directory
// - GET /repos/{owner}/{repo}/contents/{path}       one file, base64-encoded
// - GET /repos/{owner}/{repo}/commits?path=..&per_page=1   latest commit for a file
//
// One reqwest Client is built up front and reused for every request
// (connection pooling). Whoever builds the GitHubClient hands it to the
// ArticleStore, so there is no hidden global client and tests can swap in a
// stub ContentSource instead.
//
// Failures are never retried. Listing and commit-date failures are logged
// here and then returned to the caller; content failures are just returned.
// =============================================================================

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use super::types::{CommitEntry, ContentEntry, FileContent};
use crate::error::{Error, Result};
use crate::source::{is_markdown_file, ArticleFile, ContentSource};

/// Public GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Directory that holds the articles unless configured otherwise
pub const DEFAULT_ARTICLES_DIR: &str = "articles";

/// Per-request timeout unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Which repository to read and how to authenticate.
#[derive(Clone)]
pub struct RepoConfig {
    /// Bearer token sent with every request
    pub token: String,
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
    /// API root, e.g. `https://api.github.com` or a GitHub Enterprise `/api/v3` URL
    pub api_url: String,
    /// Directory holding the articles, relative to the repository root
    pub articles_dir: String,
    /// Timeout applied to each request
    pub timeout: Duration,
}

impl RepoConfig {
    /// Config for `owner/name` on github.com with the default directory and timeout.
    pub fn new(token: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            owner: owner.into(),
            name: name.into(),
            api_url: DEFAULT_API_URL.to_string(),
            articles_dir: DEFAULT_ARTICLES_DIR.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// Hand-written so the token never ends up in logs
impl fmt::Debug for RepoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoConfig")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("api_url", &self.api_url)
            .field("articles_dir", &self.articles_dir)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// The GitHub-backed ContentSource.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base: Url,
    config: RepoConfig,
}

impl GitHubClient {
    /// Builds the HTTP client once: auth header, Accept header, User-Agent
    /// (GitHub rejects requests without one) and the request timeout.
    pub fn new(config: RepoConfig) -> Result<Self> {
        let base = Url::parse(&config.api_url)
            .map_err(|e| Error::config(format!("Invalid API URL '{}': {}", config.api_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::config(format!(
                "API URL '{}' cannot be used as a base URL",
                config.api_url
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token)).map_err(|_| {
            Error::config("GitHub token contains characters that are not allowed in an HTTP header")
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        // One client for every request: shared connection pool, and the
        // timeout covers the whole request including the body
        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::remote_with_source("Failed to create HTTP client", e))?;

        Ok(Self { http, base, config })
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    // Builds /repos/{owner}/{repo}/{segments...} under the API root.
    // Each piece is pushed as its own path segment so spaces, `#`, `?` and
    // non-ASCII file names are percent-encoded instead of breaking the URL.
    // Empty pieces are dropped, which also makes a leading `/` harmless.
    fn repo_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::config(format!("API URL '{}' cannot have a path", self.base)))?;
            path.pop_if_empty();
            path.extend(["repos", self.config.owner.as_str(), self.config.name.as_str()]);
            path.extend(
                segments
                    .iter()
                    .flat_map(|segment| segment.split('/'))
                    .filter(|segment| !segment.is_empty()),
            );
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GitHub API request");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::remote_with_source(format!("Request to {} failed", url), e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::remote(format!(
                "GitHub API returned HTTP {} for {}: {}",
                status.as_u16(),
                url,
                body.trim()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::remote_with_source(format!("Malformed response from {}", url), e))
    }

    async fn list_entries(&self) -> Result<Vec<ArticleFile>> {
        let url = self.repo_url(&["contents", self.config.articles_dir.as_str()])?;
        let entries: Vec<ContentEntry> = self.get_json(url).await?;

        Ok(entries
            .into_iter()
            .filter(|entry| entry.kind == "file" && is_markdown_file(&entry.name))
            .map(|entry| ArticleFile {
                name: entry.name,
                path: entry.path,
            })
            .collect())
    }

    async fn latest_commit_date(&self, path: &str) -> Result<String> {
        let mut url = self.repo_url(&["commits"])?;
        url.query_pairs_mut()
            .append_pair("path", path.trim_start_matches('/'))
            .append_pair("per_page", "1");

        // GitHub lists commits newest first; we take that ordering on trust
        let commits: Vec<CommitEntry> = self.get_json(url).await?;
        let latest = commits
            .into_iter()
            .next()
            .ok_or_else(|| Error::remote(format!("No commits found for {}", path)))?;

        latest
            .commit
            .committer
            .map(|committer| committer.date)
            .ok_or_else(|| Error::remote(format!("Latest commit for {} has no committer", path)))
    }
}

#[async_trait]
impl ContentSource for GitHubClient {
    async fn list_article_files(&self) -> Result<Vec<ArticleFile>> {
        self.list_entries().await.inspect_err(|e| {
            error!(error = %e, dir = %self.config.articles_dir, "Failed to fetch articles");
        })
    }

    async fn fetch_file_content(&self, path: &str) -> Result<String> {
        let url = self.repo_url(&["contents", path])?;
        let file: FileContent = self.get_json(url).await?;
        decode_content(&file, path)
    }

    async fn fetch_last_commit_date(&self, path: &str) -> Result<String> {
        self.latest_commit_date(path).await.inspect_err(|e| {
            error!(error = %e, path, "Failed to fetch article date");
        })
    }

    fn articles_dir(&self) -> &str {
        &self.config.articles_dir
    }
}

// Turns the contents API payload back into text.
// GitHub wraps the base64 at 60 columns, so whitespace goes before decoding.
fn decode_content(file: &FileContent, path: &str) -> Result<String> {
    match file.encoding.as_deref() {
        None | Some("base64") => {}
        Some(other) => {
            return Err(Error::remote(format!(
                "{} has content encoding '{}' (file too large for the contents API?)",
                path, other
            )))
        }
    }

    let cleaned: String = file
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| Error::remote_with_source(format!("Invalid base64 content for {}", path), e))?;

    String::from_utf8(bytes)
        .map_err(|e| Error::remote_with_source(format!("{} is not valid UTF-8", path), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GitHubClient {
        let mut config = RepoConfig::new("test-token", "octo", "blog");
        config.api_url = server.uri();
        GitHubClient::new(config).unwrap()
    }

    // Mimics GitHub: base64 broken into short lines
    fn wrapped_base64(text: &str) -> String {
        let encoded = STANDARD.encode(text);
        encoded
            .as_bytes()
            .chunks(20)
            .map(|chunk| std::str::from_utf8(chunk).unwrap())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_repo_url_encodes_segments() {
        let mut config = RepoConfig::new("t", "octo", "blog");
        config.api_url = "https://ghe.example.com/api/v3/".to_string();
        let client = GitHubClient::new(config).unwrap();

        let url = client.repo_url(&["contents", "/articles/hello world.md"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/octo/blog/contents/articles/hello%20world.md"
        );
    }

    #[test]
    fn test_invalid_api_url() {
        let mut config = RepoConfig::new("t", "octo", "blog");
        config.api_url = "not a url".to_string();
        let result = GitHubClient::new(config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = RepoConfig::new("super-secret", "octo", "blog");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("octo"));
    }

    #[test]
    fn test_decode_content_rejects_other_encodings() {
        let file = FileContent {
            content: String::new(),
            encoding: Some("none".to_string()),
        };
        let err = decode_content(&file, "articles/huge.md").unwrap_err();
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn test_list_article_files_keeps_markdown_files() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/blog/contents/articles"))
            .and(header("authorization", "Bearer test-token"))
            .and(header("accept", GITHUB_ACCEPT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "first.md", "path": "articles/first.md", "type": "file" },
                { "name": "cover.png", "path": "articles/cover.png", "type": "file" },
                { "name": "drafts.md", "path": "articles/drafts.md", "type": "dir" },
                { "name": "second.md", "path": "articles/second.md", "type": "file" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let files = client_for(&server).list_article_files().await.unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first.md", "second.md"]);
        assert_eq!(files[0].path, "articles/first.md");
    }

    #[tokio::test]
    async fn test_list_article_files_propagates_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/blog/contents/articles"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_article_files().await.unwrap_err();
        assert!(err.is_remote());
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_fetch_file_content_decodes_wrapped_base64() {
        let markdown = "---\ntitle: こんにちは\n---\nBody text\n";
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/blog/contents/articles/hello.md"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "hello.md",
                "encoding": "base64",
                "content": wrapped_base64(markdown)
            })))
            .mount(&server)
            .await;

        let text = client_for(&server)
            .fetch_file_content("/articles/hello.md")
            .await
            .unwrap();
        assert_eq!(text, markdown);
    }

    #[tokio::test]
    async fn test_fetch_file_content_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/blog/contents/articles/missing.md"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_file_content("articles/missing.md")
            .await
            .unwrap_err();
        assert!(err.is_remote());
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_fetch_last_commit_date() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/blog/commits"))
            .and(query_param("path", "articles/hello.md"))
            .and(query_param("per_page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "sha": "abc", "commit": { "committer": { "name": "octo", "date": "2024-03-01T12:00:00Z" } } }
            ])))
            .mount(&server)
            .await;

        let date = client_for(&server)
            .fetch_last_commit_date("articles/hello.md")
            .await
            .unwrap();
        assert_eq!(date, "2024-03-01T12:00:00Z");
    }

    #[tokio::test]
    async fn test_fetch_last_commit_date_without_commits_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/blog/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_last_commit_date("articles/new.md")
            .await
            .unwrap_err();
        assert!(err.is_remote());
        assert!(err.to_string().contains("No commits found"));
    }
}
