mod cli;
mod format;

use std::time::Duration;

use aggregator::MediaServerManager;
use anyhow::{bail, Context};
use clap::Parser;
use mediaserver::{MediaServerError, MediaServerType, MediaServersConfig, SearchResult};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Args, Command};
use crate::format::{format_bytes, format_duration, format_timestamp, media_type_icon};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = MediaServersConfig::from_env().context("Invalid media server configuration")?;
    let manager =
        MediaServerManager::new(&config).context("Cannot start without a media server")?;

    let configured = manager.get_server_types();
    let targets = match args.server {
        Some(server_type) if configured.contains(&server_type) => vec![server_type],
        Some(server_type) => return Err(MediaServerError::NotConfigured(server_type).into()),
        None => configured,
    };

    tracing::debug!("Running {:?} against {:?}", args.command, targets);

    match args.command {
        Command::Info => info(&manager, &targets).await,
        Command::Libraries => libraries(&manager, &targets).await,
        Command::Search { query, limit } => search(&manager, &targets, &query, limit).await,
        Command::Users => users(&manager, &targets).await,
        Command::Stats => stats(&manager, &targets).await,
    }
}

async fn info(manager: &MediaServerManager, targets: &[MediaServerType]) -> anyhow::Result<()> {
    let infos = manager.get_server_info_selected(targets).await;

    for server_type in targets {
        println!("== {} ==", server_type.display_name());
        match infos.get(server_type) {
            Some(info) => {
                println!("Name:     {}", info.name);
                println!("Version:  {}", info.version);
                if !info.os.is_empty() {
                    println!("System:   {} {}", info.os, info.arch);
                }
                if !info.local_address.is_empty() {
                    println!("Address:  {}", info.local_address);
                }
            }
            None => println!("Server unreachable"),
        }
        print_library_stats(manager, *server_type).await?;
        println!();
    }
    Ok(())
}

async fn libraries(
    manager: &MediaServerManager,
    targets: &[MediaServerType],
) -> anyhow::Result<()> {
    for server_type in targets {
        println!("== {} ==", server_type.display_name());
        print_library_stats(manager, *server_type).await?;
        println!();
    }
    Ok(())
}

async fn print_library_stats(
    manager: &MediaServerManager,
    server_type: MediaServerType,
) -> anyhow::Result<()> {
    let service = manager.library_stats(server_type)?;
    match service.get_libraries_with_stats().await {
        Ok(stats) if stats.is_empty() => println!("No libraries"),
        Ok(stats) => {
            for entry in stats.iter() {
                println!(
                    "{} {} ({} items)",
                    media_type_icon(&entry.library.media_type),
                    entry.library.name,
                    entry.item_count
                );
            }
        }
        Err(e) => println!("Library statistics unavailable: {}", e),
    }
    Ok(())
}

async fn search(
    manager: &MediaServerManager,
    targets: &[MediaServerType],
    query: &str,
    limit: usize,
) -> anyhow::Result<()> {
    let query = query.trim();
    if query.is_empty() {
        bail!("search query must not be empty");
    }

    let results = manager.search_selected(targets, query).await;
    println!("Results for \"{}\":\n", query);

    let mut found = false;
    for server_type in targets {
        let Some(hits) = results.get(server_type).filter(|hits| !hits.is_empty()) else {
            continue;
        };
        found = true;

        println!("== {} ==", server_type.display_name());
        for hit in hits.iter().take(limit) {
            print_search_result(hit);
        }
        if hits.len() > limit {
            println!("+ {} more results\n", hits.len() - limit);
        }
    }

    if !found {
        println!("Nothing found.");
    }
    Ok(())
}

fn print_search_result(hit: &SearchResult) {
    println!("* {}", hit.title);
    println!("  {} Type: {}", media_type_icon(&hit.item_type), hit.item_type);
    println!("  Library: {}", hit.library);
    if !hit.author.is_empty() {
        println!("  Author: {}", hit.author);
    }
    if hit.year > 0 {
        println!("  Year: {}", hit.year);
    }
    if !hit.genres.is_empty() {
        println!("  Genres: {}", hit.genres.join(", "));
    }
    if hit.run_time > 0 {
        let run_time = Duration::from_millis(hit.run_time.unsigned_abs());
        println!("  Runtime: {}", format_duration(run_time));
    }
    if hit.size > 0 {
        println!("  Size: {}", format_bytes(hit.size));
    }
    if let Some(added) = format_timestamp(hit.added_at).filter(|_| hit.added_at > 0) {
        println!("  Added: {}", added);
    }
    println!();
}

async fn users(manager: &MediaServerManager, targets: &[MediaServerType]) -> anyhow::Result<()> {
    for server_type in targets {
        println!("== {} ==", server_type.display_name());
        let service = manager.library_stats(*server_type)?;
        match service.get_users().await {
            Ok(users) => {
                for user in users {
                    let state = if user.is_active { "active" } else { "disabled" };
                    let seen = format_timestamp(user.last_seen)
                        .filter(|_| user.last_seen > 0)
                        .unwrap_or_else(|| "never".to_string());
                    println!(
                        "{} [{}] {}, last seen {}",
                        user.username, user.user_type, state, seen
                    );
                }
            }
            Err(e) => println!("Users unavailable: {}", e),
        }
        println!();
    }
    Ok(())
}

async fn stats(manager: &MediaServerManager, targets: &[MediaServerType]) -> anyhow::Result<()> {
    for server_type in targets {
        println!("== {} ==", server_type.display_name());
        let service = manager.library_stats(*server_type)?;
        match service.get_listening_stats().await {
            Ok(stats) => {
                let total = stats
                    .get("totalTime")
                    .and_then(|t| t.as_f64())
                    .and_then(|secs| Duration::try_from_secs_f64(secs).ok());
                if let Some(total) = total {
                    println!("Total listening time: {}", format_duration(total));
                }
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            Err(e) => println!("Listening statistics unavailable: {}", e),
        }
        println!();
    }
    Ok(())
}
