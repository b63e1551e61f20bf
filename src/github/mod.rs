// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Currently implements:
// - Listing the Markdown files in the articles directory
// - Fetching a file's contents (base64 over the wire)
// - Looking up the date of the latest commit that touched a file
//
// GitHubClient implements crate::source::ContentSource, which is all the rest
// of the crate knows about.
// =============================================================================

mod client;
mod types;

pub use client::{
    GitHubClient, RepoConfig, DEFAULT_API_URL, DEFAULT_ARTICLES_DIR, DEFAULT_TIMEOUT,
};
