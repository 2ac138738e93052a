//! CLI administration tool for shortlink.
//!
//! Manages links and inspects the database without going through the HTTP API.
//! Link operations run through the same services as the server, so allocation
//! and deletion behave identically.
//!
//! # Usage
//!
//! ```bash
//! # List the newest links
//! cargo run --bin admin -- links list
//!
//! # Shorten a URL with a generated or custom code
//! cargo run --bin admin -- links create https://example.com/a
//! cargo run --bin admin -- links create https://example.com/a --code promo24
//!
//! # Delete a link
//! cargo run --bin admin -- links delete promo24
//!
//! # Show totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection
//! - `CODE_MAX_ATTEMPTS`: attempt cap for generated codes

use shortlink::application::services::{CodeAllocator, LinkService};
use shortlink::config::Config;
use shortlink::domain::repositories::LinkStore;
use shortlink::infrastructure::persistence::PgLinkStore;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List links, newest first
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Links per page
        #[arg(short = 's', long, default_value_t = 25)]
        page_size: u32,
    },

    /// Create a short link
    Create {
        /// Destination URL (http or https)
        url: String,

        /// Custom code, 6-8 alphanumeric characters
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a link
    Delete {
        /// Code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, config: &Config) -> Result<()> {
    let store: Arc<dyn LinkStore> = Arc::new(PgLinkStore::new(Arc::new(pool.clone())));

    match action {
        LinkAction::List { page, page_size } => {
            list_links(LinkService::new(store), page, page_size).await?;
        }
        LinkAction::Create { url, code } => {
            let allocator = CodeAllocator::new(store, config.allocation_policy());
            create_link(allocator, url, code).await?;
        }
        LinkAction::Delete { code, yes } => {
            delete_link(LinkService::new(store), code, yes).await?;
        }
    }

    Ok(())
}

/// Lists one page of links.
///
/// # Output Format
///
/// ```text
/// 📋 Links (page 1)
///
///   Code      Clicks   Created            URL
///   ─────────────────────────────────────────────────────────────
///   promo24   12       2026-01-15 10:30   https://example.com/a
/// ```
async fn list_links(service: LinkService<dyn LinkStore>, page: u32, page_size: u32) -> Result<()> {
    println!(
        "{}",
        format!("📋 Links (page {page})").bright_blue().bold()
    );
    println!();

    let page_size = page_size.clamp(1, 1000);
    let offset = i64::from(page.max(1) - 1) * i64::from(page_size);

    let links = service
        .list_links(offset, i64::from(page_size))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<9} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<9} {:<8} {:<18} {}",
            link.code.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.url
        );
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Allocates a code for `url` and prints the resulting link.
async fn create_link(
    allocator: CodeAllocator<dyn LinkStore>,
    url: String,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    let link = allocator
        .allocate(&url, code.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created".green().bold());
    println!();
    println!("  Code: {}", link.code.bright_yellow().bold());
    println!("  URL:  {}", link.url.cyan());
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: LinkService<dyn LinkStore>, code: String, yes: bool) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(&code)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {}", code, e))?;

    println!("  Code:   {}", link.code.cyan());
    println!("  URL:    {}", link.url);
    println!("  Clicks: {}", link.clicks.to_string().bright_black());
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Displays link and click totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links_count, clicks_count): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(clicks), 0)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
