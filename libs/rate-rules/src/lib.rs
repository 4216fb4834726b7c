//! Rate Rules - Weekly Rate Rule Engine Library
//!
//! An in-memory rule engine for weekly recurring rate rules providing:
//! - Rule validation from wire-format input (time window, weekdays, timezone)
//! - Snapshot-based in-memory rule storage with monotonic id assignment
//! - Timezone-aware price matching for absolute time intervals
//! - Best-effort initial rule population from a JSON file
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  Validator  │────▶│  RateStore   │◀────│   Loader    │
//! │  (sanitize) │     │  (snapshots) │     │ (JSON file) │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                            │
//!                            ▼
//!                     ┌──────────────┐
//!                     │   Matcher    │
//!                     │  (price_for) │
//!                     └──────────────┘
//! ```

mod error;
mod loader;
mod matcher;
mod store;
pub mod types;
mod validator;

// Re-export public API
pub use error::{RateError, Result};
pub use loader::load_rates_from_file;
pub use matcher::price_for;
pub use store::RateStore;
pub use validator::validate;

// Re-export rule types for convenience
pub use types::{RateDraft, RateRepr, RawRateInput, Rule, TimeWindow, Weekday};
