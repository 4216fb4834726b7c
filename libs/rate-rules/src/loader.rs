//! Initial rule population from a JSON file
//!
//! Reads `{"rates": [...]}` where each entry has the same shape as a bulk
//! replace entry. Loading is best-effort per entry: an invalid entry is
//! logged and skipped, the rest of the file still loads. This is
//! deliberately more lenient than the all-or-nothing bulk replace.

use crate::store::RateStore;
use crate::types::RawRateInput;
use crate::validator::validate;
use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(serde::Deserialize)]
struct RateFile {
    rates: Vec<Value>,
}

/// Load rules from `path` into `store`, returning how many were created.
///
/// A file that cannot be read or is not of the expected top-level shape is
/// an error for the caller to handle; individual invalid entries are
/// recovered locally.
pub fn load_rates_from_file(path: &Path, store: &RateStore) -> anyhow::Result<usize> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("unable to read rates file: {}", path.display()))?;
    let file: RateFile = serde_json::from_str(&text)
        .with_context(|| format!("malformed rates file: {}", path.display()))?;

    let mut loaded = 0;
    for (index, entry) in file.rates.into_iter().enumerate() {
        let raw: RawRateInput = match serde_json::from_value(entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Skipping rate entry {}: {}", index, e);
                continue;
            }
        };

        match validate(&raw) {
            Ok(draft) => {
                store.create(draft);
                loaded += 1;
            }
            Err(e) => warn!("Skipping rate entry {}: {}", index, e),
        }
    }

    info!("Loaded {} rates from {}", loaded, path.display());
    Ok(loaded)
}
