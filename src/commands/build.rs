//! Build the static site

use anyhow::{bail, Result};
use notify::Watcher;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use super::check;
use crate::config::InvalidContentPolicy;
use crate::generator::Generator;
use crate::{Folio, CONFIG_FILE};

/// Build with the policy from the configuration
pub fn run(folio: &Folio) -> Result<()> {
    run_with_policy(folio, folio.config.on_invalid)
}

/// Build, deciding what invalid documents do with `policy`
pub fn run_with_policy(folio: &Folio, policy: InvalidContentPolicy) -> Result<()> {
    let start = Instant::now();
    tracing::debug!(
        "Output mode {:?}, build plugins {:?}",
        folio.config.output,
        folio.config.vite.plugins
    );

    let collections = folio.load_collections()?;
    tracing::info!(
        "Loaded {} posts and {} projects",
        collections.blog.len(),
        collections.projects.len()
    );

    if !collections.is_valid() {
        check::log_errors(&collections, policy);
        let count = collections.error_count();
        match policy {
            InvalidContentPolicy::Fail => {
                bail!("{} invalid document(s), build aborted", count)
            }
            InvalidContentPolicy::Warn => {
                tracing::warn!("Building without {} invalid document(s)", count);
            }
        }
    }

    let generator = Generator::new(folio)?;
    generator.generate(&collections)?;

    let duration = start.elapsed();
    tracing::info!("Built in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch content and configuration, rebuilding from scratch on change
pub fn watch(folio: &Folio, policy: Option<InvalidContentPolicy>) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if folio.content_dir.exists() {
        watcher.watch(&folio.content_dir, notify::RecursiveMode::Recursive)?;
    }

    let config_path = folio.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: only rebuild if more than 500ms since last rebuild
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, rebuilding...");
                    if let Err(e) = rebuild(folio, policy) {
                        tracing::error!("Build failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Re-read the configuration so edits to folio.yml take effect
fn rebuild(folio: &Folio, policy: Option<InvalidContentPolicy>) -> Result<()> {
    let fresh = Folio::new(&folio.base_dir)?;
    let policy = policy.unwrap_or(fresh.config.on_invalid);
    run_with_policy(&fresh, policy)
}
