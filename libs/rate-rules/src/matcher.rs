//! Interval price matching
//!
//! Localizes a UTC-anchored query interval into each rule's timezone and
//! applies the weekday/time-window membership test. Ambiguity (more than
//! one matching rule) and no coverage both yield `None`.

use crate::types::{Rule, Weekday};
use chrono::{DateTime, Datelike, FixedOffset};
use tracing::debug;

/// Resolve the applicable price for an absolute time interval.
///
/// Rules are evaluated in store order. If the interval, viewed in ANY
/// rule's timezone, crosses a local calendar day boundary, the whole
/// lookup is unavailable immediately; no further rule is evaluated.
/// Otherwise a rule is a candidate when the localized start weekday is in
/// its day set and the localized start/end times fall within its window.
/// Exactly one candidate yields that rule's price; zero or several yield
/// `None` (unavailable), indistinguishable by design.
///
/// Zero-length and inverted intervals are not rejected; they flow through
/// the same comparisons and typically end up unavailable.
pub fn price_for(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    rates: &[Rule],
) -> Option<i64> {
    let mut candidates: Vec<&Rule> = Vec::new();

    for rate in rates {
        let loc_start = start.with_timezone(&rate.tz);
        let loc_end = end.with_timezone(&rate.tz);

        // An interval spanning a local day boundary makes the whole
        // lookup unavailable, not just this rule
        if loc_start.weekday() != loc_end.weekday() {
            debug!(
                rate_id = rate.id,
                tz = rate.tz.name(),
                "query interval crosses a local day boundary"
            );
            return None;
        }

        if !rate.days.contains(&Weekday::from_chrono(loc_start.weekday())) {
            continue;
        }

        if rate.window.start > loc_start.time() {
            continue;
        }

        if rate.window.end < loc_end.time() {
            continue;
        }

        candidates.push(rate);
    }

    match candidates.as_slice() {
        [rate] => Some(rate.price),
        _ => {
            debug!(count = candidates.len(), "no unique rate match");
            None
        }
    }
}
