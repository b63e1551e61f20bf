// src/github/types.rs
// =============================================================================
// The slices of GitHub REST API responses that we actually read.
//
// serde ignores every field we don't declare, so these stay small.
// =============================================================================

use serde::Deserialize;

/// One entry of `GET /repos/{owner}/{repo}/contents/{dir}`
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    /// "file", "dir", "symlink" or "submodule"
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response of `GET /repos/{owner}/{repo}/contents/{path}` for a file
#[derive(Debug, Clone, Deserialize)]
pub struct FileContent {
    /// Base64 payload, wrapped with newlines every 60 characters
    #[serde(default)]
    pub content: String,
    /// Normally "base64"; "none" when the file is too large for this endpoint
    #[serde(default)]
    pub encoding: Option<String>,
}

/// One entry of `GET /repos/{owner}/{repo}/commits`
#[derive(Debug, Clone, Deserialize)]
pub struct CommitEntry {
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    /// GitHub sends null here for some imported commits
    pub committer: Option<CommitSignature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitSignature {
    pub date: String,
}
