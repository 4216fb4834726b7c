//! Application state and initialization logic

use crate::config::Config;
use rate_rules::{load_rates_from_file, RateStore};
use std::sync::Arc;
use tracing::{error, info};

/// Application state shared across all handlers
pub struct AppState {
    /// Process-wide rate store; the matcher reads snapshots from it
    pub store: RateStore,
    pub config: Arc<Config>,
}

/// Create application state and populate the store from the configured
/// rates file. A missing or unreadable file is logged and the service
/// starts with an empty store; invalid individual entries are already
/// recovered inside the loader.
pub fn create_app_state(config: Config) -> Arc<AppState> {
    let store = RateStore::new();

    match load_rates_from_file(&config.rates.file, &store) {
        Ok(count) => info!("Initial rate set loaded: {} rules", count),
        Err(e) => error!(
            "Unable to retrieve rates from specified file {}: {:#}",
            config.rates.file.display(),
            e
        ),
    }

    Arc::new(AppState {
        store,
        config: Arc::new(config),
    })
}
