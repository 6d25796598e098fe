//! Mapping file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::loader::{load_mapping, ConfigError};
use crate::observability::metrics;
use crate::routing::RewriterStore;

/// Watches the base mapping file and reloads it into a [`RewriterStore`].
pub struct MappingWatcher {
    path: PathBuf,
    store: Arc<RewriterStore>,
}

impl MappingWatcher {
    pub fn new(path: &Path, store: Arc<RewriterStore>) -> Self {
        Self {
            path: path.to_path_buf(),
            store,
        }
    }

    /// Load the file and swap it into the store.
    pub fn reload(&self) -> Result<(), ConfigError> {
        reload_into(&self.path, &self.store)
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for as long as reloads are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let store = Arc::clone(&self.store);
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Mapping file change detected, reloading...");
                        if let Err(e) = reload_into(&path, &store) {
                            tracing::error!(
                                "Failed to reload mapping: {}. Keeping current routes.",
                                e
                            );
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Mapping watcher started");
        Ok(watcher)
    }
}

fn reload_into(path: &Path, store: &RewriterStore) -> Result<(), ConfigError> {
    let mapping = match load_mapping(path) {
        Ok(mapping) => mapping,
        Err(e) => {
            // Compile failures are counted by the store itself.
            metrics::record_reload(false);
            return Err(e);
        }
    };
    store.reload(&mapping)?;
    Ok(())
}
