// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every repository/collection option can also come from an environment
// variable (GITHUB_TOKEN, REPO_OWNER, REPO_NAME, ...), so the same binary
// works in CI and in a shell with a .env loaded.
//
// The subcommands map one-to-one onto the library's read operations:
//   slugs | article <SLUG> | articles | topics
// =============================================================================

use std::time::Duration;

use chrono::FixedOffset;
use clap::{Args, Parser, Subcommand};

use gh_articles::config::{
    parse_utc_offset, CollectionOptions, Mode, DEFAULT_CONCURRENCY, DEFAULT_TOPIC_LOCALE,
};
use gh_articles::github::{RepoConfig, DEFAULT_API_URL, DEFAULT_ARTICLES_DIR, DEFAULT_TIMEOUT};

#[derive(Parser, Debug)]
#[command(
    name = "gh-articles",
    version,
    about = "Read Markdown articles with front matter from a GitHub repository",
    long_about = "gh-articles lists, fetches and aggregates the Markdown articles stored in a \
                  GitHub repository. Drafts and scheduled articles are hidden unless you run \
                  in development mode."
)]
pub struct Cli {
    #[command(flatten)]
    pub repo: RepoArgs,

    #[command(flatten)]
    pub collection: CollectionArgs,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which repository to read
#[derive(Args, Debug)]
pub struct RepoArgs {
    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Repository owner (user or organization)
    #[arg(long, env = "REPO_OWNER")]
    pub owner: String,

    /// Repository name
    #[arg(long = "repo", env = "REPO_NAME")]
    pub name: String,

    /// GitHub API root (change for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory in the repository that holds the articles
    #[arg(long, env = "ARTICLES_DIR", default_value = DEFAULT_ARTICLES_DIR)]
    pub articles_dir: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "ARTICLES_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

/// How articles are filtered, fetched and ordered
#[derive(Args, Debug)]
pub struct CollectionArgs {
    /// development shows drafts and scheduled articles too
    #[arg(long, env = "ARTICLES_MODE", value_enum, default_value_t = Mode::Production)]
    pub mode: Mode,

    /// How many articles to fetch at the same time
    #[arg(
        long,
        env = "ARTICLES_CONCURRENCY",
        default_value_t = DEFAULT_CONCURRENCY as u32,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub concurrency: u32,

    /// UTC offset for published_at values written without one (e.g. +09:00)
    #[arg(
        long,
        env = "ARTICLES_NAIVE_OFFSET",
        default_value = "+00:00",
        allow_hyphen_values = true,
        value_parser = parse_offset_arg
    )]
    pub naive_offset: FixedOffset,

    /// Locale used to order topics with the same count
    #[arg(long = "locale", env = "ARTICLES_TOPIC_LOCALE", default_value = DEFAULT_TOPIC_LOCALE)]
    pub topic_locale: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the slug of every article
    ///
    /// Example: gh-articles slugs
    Slugs {
        /// Output results in JSON format instead of plain lines
        #[arg(long)]
        json: bool,
    },

    /// Show one article
    ///
    /// Example: gh-articles article hello-world
    Article {
        /// Slug of the article (as printed by `slugs`)
        slug: String,

        /// Output the article as JSON
        #[arg(long)]
        json: bool,
    },

    /// List visible articles, newest first
    Articles {
        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show how many visible articles use each topic
    Topics {
        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl RepoArgs {
    pub fn to_config(&self) -> RepoConfig {
        RepoConfig {
            token: self.token.clone(),
            owner: self.owner.clone(),
            name: self.name.clone(),
            api_url: self.api_url.clone(),
            articles_dir: self.articles_dir.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl CollectionArgs {
    pub fn to_options(&self) -> CollectionOptions {
        CollectionOptions {
            mode: self.mode,
            concurrency: self.concurrency as usize,
            naive_offset: self.naive_offset,
            topic_locale: self.topic_locale.clone(),
        }
    }
}

fn parse_offset_arg(value: &str) -> Result<FixedOffset, String> {
    parse_utc_offset(value).map_err(|e| e.to_string())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[command(flatten)] do?
//    - It pulls the fields of another Args struct into this one
//    - RepoArgs and CollectionArgs stay separate types, but on the command
//      line they look like ordinary top-level flags
//
// 2. What does env = "..." do?
//    - If the flag is not given, clap reads the environment variable
//    - hide_env_values keeps the token out of --help output
//
// 3. Why a custom value_parser?
//    - clap only knows how to parse common types
//    - parse_offset_arg teaches it to turn "+09:00" into a FixedOffset, and
//      a bad value is reported like any other bad flag
// -----------------------------------------------------------------------------
