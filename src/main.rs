//! Mini Cache - file cache demo
//!
//! Reads file paths from stdin, one per line, and looks each up through a
//! cache whose loader reads the file from disk. Prints the cache statistics
//! as JSON when input ends.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_cache::{spawn_refresh_task, CacheBuilder, Config, Event, SharedCache};

/// Main entry point for the Mini Cache demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the file cache with the configured limit and policy
/// 4. Start background refresh task if an interval is configured
/// 5. Look up every path read from stdin until EOF or Ctrl+C
/// 6. Print statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting Mini Cache");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: limit={}, policy={}, refresh_interval={}s",
        config.limit, config.policy, config.refresh_interval
    );

    let cache = CacheBuilder::from_config(&config)
        .loader(load_file)
        .weigher(|contents: &String| contents.len() as u64)
        .listener(Arc::new(|event: Event, path: &PathBuf| -> anyhow::Result<()> {
            debug!("{} {}", event, path.display());
            Ok(())
        }))
        .build();
    let cache = SharedCache::new(cache);

    let refresh_handle = (config.refresh_interval > 0)
        .then(|| spawn_refresh_task(cache.clone(), config.refresh_interval));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let path = line.trim();
                if path.is_empty() {
                    continue;
                }
                match cache.get_blocking(&PathBuf::from(path)).await? {
                    Some(contents) => info!("{}: {} bytes", path, contents.len()),
                    None => warn!("{}: not available", path),
                }
            }
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, stopping");
                break;
            }
        }
    }

    if let Some(handle) = refresh_handle {
        handle.abort();
    }

    let stats = cache.statistics().await;
    info!("Hit rate: {:.2}%", stats.hit_rate() * 100.0);
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

/// Reads a file for the cache. A missing file is "not found", any other I/O
/// failure is a loader error.
#[allow(clippy::ptr_arg)]
fn load_file(path: &PathBuf) -> anyhow::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(anyhow::Error::new(err).context(format!("reading {}", path.display()))),
    }
}
