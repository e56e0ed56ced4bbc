//! gatesync CLI - diagnostics for the offline subsystem.
//!
//! `gatesync status` shows cache ages, session validity and the pending
//! queue; `gatesync drain` replays queued actions now; `gatesync clear-cache`
//! wipes the offline datasets.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gatesync::api::ApiClient;
use gatesync::auth::Session;
use gatesync::cache::{keys, FileStore, OfflineCache};
use gatesync::config::Config;
use gatesync::ops::HttpReplayer;
use gatesync::sync::PendingQueue;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn usage() -> ! {
    eprintln!("Usage: gatesync <status|drain|clear-cache>");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or_else(|| usage());

    let config = Config::load()?;
    let cache_dir = config.cache_dir()?;
    let store = Arc::new(FileStore::new(cache_dir.clone())?);
    let cache = OfflineCache::new(store.clone());
    let queue = PendingQueue::new(store);

    match command {
        "status" => {
            println!("backend: {}", config.api_base_url());

            let mut session = Session::new(cache_dir);
            session.load()?;
            match session.data.as_ref() {
                Some(data) => {
                    println!("session: valid (user {}, role {})", data.user_id, data.role)
                }
                None => println!("session: none or expired"),
            }

            println!("cached datasets:");
            for key in keys::ALL_DATASETS {
                let age = cache.age_of(key).unwrap_or_else(|| "never".to_string());
                println!("  {:28} {}", key, age);
            }

            let pending = queue.list();
            println!("pending actions: {}", pending.len());
            for action in &pending {
                println!("  {} {} ({})", action.timestamp, action.kind, action.id);
            }
        }
        "drain" => {
            let mut session = Session::new(cache_dir);
            if !session.load()? {
                anyhow::bail!("No valid session. Store a session token first.");
            }
            let token = session.token().unwrap_or_default().to_string();

            let api = ApiClient::new(config.api_base_url())?.with_token(token);
            let replayer = HttpReplayer::new(api);

            info!("Draining pending-action queue");
            let report = queue.drain(&replayer).await;
            println!(
                "drained: {} synced, {} still pending",
                report.succeeded.len(),
                report.failed.len()
            );
        }
        "clear-cache" => {
            if cache.clear_all() {
                println!("offline datasets cleared");
            } else {
                anyhow::bail!("Some cache entries could not be cleared");
            }
        }
        _ => usage(),
    }

    Ok(())
}
