//! Rate Engine Error Types

use thiserror::Error;

/// Result type for rate operations
pub type Result<T> = std::result::Result<T, RateError>;

/// Rate engine errors.
///
/// An unavailable price is NOT represented here: `price_for` returns
/// `Option<i64>` and `None` is a normal, expected outcome.
#[derive(Debug, Error)]
pub enum RateError {
    /// Time window input not of the exact "HHMM-HHMM" shape
    #[error("Malformed time window: {0}")]
    MalformedTimeWindow(String),

    /// Weekday token outside the fixed vocabulary
    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),

    /// Timezone name not resolvable against the IANA database
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Price is not a JSON integer
    #[error("Invalid price type: {0}")]
    InvalidPriceType(String),

    /// Rate not found in the store
    #[error("Rate not found: {0}")]
    RateNotFound(u64),
}
