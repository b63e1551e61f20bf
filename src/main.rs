// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments (and their environment fallbacks) with clap
// 2. Set up logging (stderr, so --json output on stdout stays clean)
// 3. Build the GitHub client once and hand it to the ArticleStore
// 4. Dispatch to the subcommand handler and print the result
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use gh_articles::{Article, ArticleStore, ContentSource, GitHubClient, TopicCount};

#[tokio::main]
async fn main() {
    // Any error from run() is printed once and becomes exit code 2
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // A bad API URL or token fails here, before any request is sent
    let client = GitHubClient::new(cli.repo.to_config())?;
    let store = ArticleStore::new(client, cli.collection.to_options());

    // Each handler returns the exit code; errors bubble up to main
    match cli.command {
        Commands::Slugs { json } => handle_slugs(&store, json).await,
        Commands::Article { slug, json } => handle_article(&store, &slug, json).await,
        Commands::Articles { json } => handle_articles(&store, json).await,
        Commands::Topics { json } => handle_topics(&store, json).await,
    }
}

// RUST_LOG wins; otherwise our own crate at info (debug with --verbose)
fn init_logging(verbose: bool) {
    let default = if verbose {
        "gh_articles=debug"
    } else {
        "gh_articles=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn handle_slugs<S: ContentSource>(store: &ArticleStore<S>, json: bool) -> Result<i32> {
    let slugs = store.list_all_slugs().await?;

    if json {
        print_json(&slugs)?;
    } else {
        for slug in &slugs {
            println!("{}", slug);
        }
        println!();
        println!("📄 {} article(s)", slugs.len());
    }
    Ok(0)
}

async fn handle_article<S: ContentSource>(
    store: &ArticleStore<S>,
    slug: &str,
    json: bool,
) -> Result<i32> {
    let article = store.get_article_by_slug(slug).await?;

    if json {
        print_json(&article)?;
    } else {
        print_article(&article);
    }
    Ok(0)
}

async fn handle_articles<S: ContentSource>(store: &ArticleStore<S>, json: bool) -> Result<i32> {
    let articles = store.get_all_articles().await?;

    if json {
        print_json(&articles)?;
    } else {
        print_articles_table(&articles);
    }
    Ok(0)
}

async fn handle_topics<S: ContentSource>(store: &ArticleStore<S>, json: bool) -> Result<i32> {
    let topics = store.get_all_articles_topics().await?;

    if json {
        print_json(&topics)?;
    } else {
        print_topics_table(&topics);
    }
    Ok(0)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_article(article: &Article) {
    let data = &article.data;
    let status = if data.published { "published" } else { "draft" };

    println!("{} {}", data.emoji, data.title);
    println!("{}", "=".repeat(60));
    println!("slug:         {}", article.slug);
    println!("type:         {}", data.kind);
    println!("topics:       {}", data.topics.join(", "));
    println!("status:       {}", status);
    println!("published_at: {}", data.published_at.to_rfc3339());
    println!();
    println!("{}", article.content);
}

fn print_articles_table(articles: &[Article]) {
    println!("{:<27} {:<30} {:<40}", "PUBLISHED_AT", "SLUG", "TITLE");
    println!("{}", "=".repeat(97));

    for article in articles {
        println!(
            "{:<27} {:<30} {} {}",
            article.data.published_at.to_rfc3339(),
            truncate(&article.slug, 30),
            article.data.emoji,
            truncate(&article.data.title, 38)
        );
    }

    println!();
    println!("📊 {} article(s)", articles.len());
}

fn print_topics_table(topics: &[TopicCount]) {
    println!("{:<40} {:>6}", "TOPIC", "COUNT");
    println!("{}", "=".repeat(47));

    for topic in topics {
        println!("{:<40} {:>6}", truncate(&topic.topic, 40), topic.count);
    }

    println!();
    println!("🏷️  {} topic(s)", topics.len());
}

// Cuts on character boundaries; byte slicing would panic on multi-byte text
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
