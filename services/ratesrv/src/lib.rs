//! RateSrv Library
//!
//! HTTP transport for the rate-rules engine.
//!
//! ## Architecture
//!
//! This service is thin glue over `rate-rules`:
//! - `routes`: axum handlers for rule listing, bulk replace and price lookup
//! - `app`: shared application state and initial rule population
//! - `config`: figment-based configuration (defaults < YAML < env)

// Core modules
pub mod app;
pub mod config;
pub mod error;
pub mod routes;

// Re-export commonly used types
pub use error::{RatesrvError, Result};

// Re-export app state and initialization
pub use app::{create_app_state, AppState};

// Re-export route creation
pub use routes::create_routes;
