mod cache;
mod clipboard;
mod error;
mod fetch;
mod model;
mod parser;
mod registry;

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::error::ExtractError;
use crate::model::DocumentSnapshot;
use crate::registry::Registry;

#[derive(Parser)]
#[command(
    name = "faker_browse",
    about = "Browse and invoke generator methods documented on fakerjs.dev"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the API documentation page and cache the parsed snapshot
    Fetch {
        /// Documentation page to scrape
        #[arg(long, default_value = fetch::API_URL)]
        url: String,
    },
    /// List cached categories and their methods (fetches first if the cache is empty)
    List {
        /// Show a single category (e.g. "person")
        #[arg(short, long)]
        category: Option<String>,
        /// Show deprecated methods only
        #[arg(long)]
        deprecated: bool,
    },
    /// Invoke a generator method and copy the result to the clipboard
    Run {
        /// Dotted path, e.g. "person.firstName"
        path: String,
        /// Print the result without touching the clipboard
        #[arg(long)]
        no_copy: bool,
    },
    /// Open a method's documentation page in the default browser
    Open {
        /// Dotted path, e.g. "person.firstName"
        path: String,
    },
    /// Show cache status
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let conn = cache::connect()?;
    cache::init_schema(&conn)?;

    let result = match cli.command {
        Commands::Fetch { url } => cmd_fetch(&conn, &url).await,
        Commands::List {
            category,
            deprecated,
        } => cmd_list(&conn, category.as_deref(), deprecated).await,
        Commands::Run { path, no_copy } => cmd_run(&path, no_copy),
        Commands::Open { path } => cmd_open(&conn, &path),
        Commands::Stats => cmd_stats(&conn),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

async fn cmd_fetch(conn: &rusqlite::Connection, url: &str) -> anyhow::Result<()> {
    match fetch_with_cancel(url).await {
        Ok(snapshot) => {
            cache::save_snapshot(conn, &snapshot)?;
            print_fetch_summary(&snapshot);
            Ok(())
        }
        Err(ExtractError::Cancelled) => {
            println!("Fetch cancelled.");
            Ok(())
        }
        Err(e) => {
            // The prior snapshot stays displayed on failure; no retry.
            if let Some(cached) = cache::load_snapshot(conn)? {
                println!(
                    "Keeping cached snapshot from {} (faker {}).",
                    cached.cached_at, cached.snapshot.version
                );
            }
            Err(e).with_context(|| format!("fetching {url}"))
        }
    }
}

async fn cmd_list(
    conn: &rusqlite::Connection,
    category: Option<&str>,
    deprecated_only: bool,
) -> anyhow::Result<()> {
    let cached = match cache::load_snapshot(conn)? {
        Some(cached) => cached,
        None => {
            // Empty cache: fetch on start, like the first launch of the UI.
            let snapshot = match fetch_with_cancel(fetch::API_URL).await {
                Ok(snapshot) => snapshot,
                Err(ExtractError::Cancelled) => {
                    println!("Fetch cancelled.");
                    return Ok(());
                }
                Err(e) => return Err(e).context("fetching documentation page"),
            };
            cache::save_snapshot(conn, &snapshot)?;
            cache::load_snapshot(conn)?.context("snapshot missing after save")?
        }
    };

    render_list(&cached.snapshot, category, deprecated_only);
    Ok(())
}

fn cmd_run(path: &str, no_copy: bool) -> anyhow::Result<()> {
    let registry = Registry::new();
    let result = registry.invoke(path);
    println!("{result}");

    if !no_copy {
        match clipboard::copy(&result) {
            Ok(()) => eprintln!("(copied to clipboard)"),
            Err(e) => warn!("clipboard write failed: {e:#}"),
        }
    }
    Ok(())
}

fn cmd_open(conn: &rusqlite::Connection, path: &str) -> anyhow::Result<()> {
    let cached = cache::load_snapshot(conn)?
        .context("no cached snapshot; run 'fetch' first")?;
    let (category, method) = cached
        .snapshot
        .find_method(path)
        .with_context(|| format!("unknown method {path:?}; see 'list'"))?;

    let href = if method.api_url.is_empty() {
        &category.api_url
    } else {
        &method.api_url
    };
    let url = resolve_doc_url(href);
    open::that(&url).with_context(|| format!("opening {url}"))?;
    println!("Opened {url}");
    Ok(())
}

fn cmd_stats(conn: &rusqlite::Connection) -> anyhow::Result<()> {
    let version = cache::load_version(conn)?;
    match cache::load_snapshot(conn)? {
        None => println!("Cache is empty. Run 'fetch' first."),
        Some(cached) => {
            println!("Version:    {}", version.as_deref().unwrap_or(""));
            println!("Fetched:    {}", cached.cached_at);
            println!("Categories: {}", cached.snapshot.categories.len());
            println!("Methods:    {}", cached.snapshot.method_count());
            println!("Deprecated: {}", cached.snapshot.deprecated_count());
        }
    }
    Ok(())
}

/// Run one cancellable fetch with a spinner. Ctrl-C cancels the token; the
/// in-flight request is dropped, not awaited.
async fn fetch_with_cancel(url: &str) -> Result<DocumentSnapshot, ExtractError> {
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Fetching {url}"));

    let result = fetch::fetch_snapshot(url, cancel).await;
    spinner.finish_and_clear();
    result
}

fn print_fetch_summary(snapshot: &DocumentSnapshot) {
    println!(
        "Fetched faker {}: {} categories, {} methods ({} deprecated)",
        if snapshot.version.is_empty() {
            "(unknown version)"
        } else {
            snapshot.version.as_str()
        },
        snapshot.categories.len(),
        snapshot.method_count(),
        snapshot.deprecated_count(),
    );
}

fn render_list(snapshot: &DocumentSnapshot, category: Option<&str>, deprecated_only: bool) {
    if snapshot.version.is_empty() {
        println!("faker");
    } else {
        println!("faker {}", snapshot.version);
    }
    println!("{}", "-".repeat(72));

    let mut categories = 0usize;
    let mut methods = 0usize;

    for cat in &snapshot.categories {
        if let Some(filter) = category {
            if !cat.name.eq_ignore_ascii_case(filter) {
                continue;
            }
        }
        let entries: Vec<_> = cat
            .visible_methods()
            .filter(|m| !deprecated_only || m.deprecated)
            .collect();
        if entries.is_empty() {
            continue;
        }

        categories += 1;
        println!("\n{}  ({})", cat.name, cat.api_url);
        for entry in entries {
            methods += 1;
            println!(
                "  {:<28} {:<34} {}",
                truncate(&entry.name, 28),
                format!("{}.{}", cat.path_name(), entry.name),
                if entry.deprecated { "Deprecated" } else { "" }
            );
        }
    }

    println!(
        "\n{} categories, {} methods | run: faker_browse run <category.method>",
        categories, methods
    );
}

fn resolve_doc_url(href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", fetch::SITE_BASE, href)
    } else {
        format!("{}/{}", fetch::SITE_BASE, href)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_urls_resolve_against_site_base() {
        assert_eq!(
            resolve_doc_url("/api/person.html#firstname"),
            "https://fakerjs.dev/api/person.html#firstname"
        );
        assert_eq!(
            resolve_doc_url("https://example.com/x"),
            "https://example.com/x"
        );
        assert_eq!(resolve_doc_url("api/airline.html"), "https://fakerjs.dev/api/airline.html");
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("firstName", 28), "firstName");
        assert_eq!(truncate("abcdef", 4), "abcd...");
    }
}
