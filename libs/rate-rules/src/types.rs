//! Rate rule type definitions
//!
//! Core types for rule validation, storage and matching:
//! - Weekday: closed weekday vocabulary with bidirectional token lookup
//! - TimeWindow: local time-of-day window parsed from "HHMM-HHMM"
//! - Rule: stored rule with store-assigned id
//! - RawRateInput / RateRepr: wire-format input and re-rendered output

use chrono::NaiveTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

// ============================================================================
// Weekday Vocabulary
// ============================================================================

/// Day of week, restricted to the fixed wire vocabulary
/// {mon, tues, wed, thurs, fri, sat, sun}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tues,
    Wed,
    Thurs,
    Fri,
    Sat,
    Sun,
}

/// Token table, ordered Mon..Sun (index = weekday number, Monday = 0)
const WEEKDAY_TOKENS: [(&str, Weekday); 7] = [
    ("mon", Weekday::Mon),
    ("tues", Weekday::Tues),
    ("wed", Weekday::Wed),
    ("thurs", Weekday::Thurs),
    ("fri", Weekday::Fri),
    ("sat", Weekday::Sat),
    ("sun", Weekday::Sun),
];

impl Weekday {
    /// Resolve a wire token to a weekday, `None` for anything outside the
    /// fixed vocabulary
    pub fn from_token(token: &str) -> Option<Self> {
        WEEKDAY_TOKENS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, day)| *day)
    }

    /// The wire token for this weekday
    pub fn token(self) -> &'static str {
        WEEKDAY_TOKENS[self as usize].0
    }

    /// Convert from the chrono weekday produced by localized timestamps
    pub fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tues,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thurs,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }
}

/// Render a weekday list back to its wire form ("mon,tues,...")
pub fn render_days(days: &[Weekday]) -> String {
    days.iter()
        .map(|day| day.token())
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// Time Window
// ============================================================================

/// Local time-of-day window, both bounds with seconds = 0.
///
/// No `start < end` invariant is enforced: an inverted window such as
/// `2000-0900` is accepted and simply never matches, because the matcher's
/// two window comparisons cannot both hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Inclusive lower bound for the localized interval start
    pub start: NaiveTime,

    /// Inclusive upper bound for the localized interval end
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Render back to the "HHMM-HHMM" wire form
    pub fn render(&self) -> String {
        format!(
            "{}-{}",
            self.start.format("%H%M"),
            self.end.format("%H%M")
        )
    }
}

// ============================================================================
// Rule
// ============================================================================

/// A validated rule that has not yet been assigned an id by the store
#[derive(Debug, Clone)]
pub struct RateDraft {
    /// Local time-of-day window
    pub window: TimeWindow,

    /// Applicable weekdays; non-empty, duplicates tolerated
    /// (matching is membership-based)
    pub days: Vec<Weekday>,

    /// Resolved IANA timezone
    pub tz: Tz,

    /// Price, any sign
    pub price: i64,
}

/// A stored rule. Created only through `RateStore::create`, never mutated
/// in place; updates are modeled as delete + recreate.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Store-assigned id, monotonically increasing, never reused
    pub id: u64,

    /// Local time-of-day window
    pub window: TimeWindow,

    /// Applicable weekdays
    pub days: Vec<Weekday>,

    /// Resolved IANA timezone
    pub tz: Tz,

    /// Price, any sign
    pub price: i64,
}

impl Rule {
    /// Re-render to the wire representation. `times`/`days`/`tz` round-trip
    /// through `validate` to a semantically equivalent rule.
    pub fn repr(&self) -> RateRepr {
        RateRepr {
            id: self.id,
            times: self.window.render(),
            days: render_days(&self.days),
            tz: self.tz.name().to_string(),
            price: self.price,
        }
    }
}

// ============================================================================
// Wire Shapes
// ============================================================================

/// Raw rule input as received on the wire (bulk replace body entries and
/// initial-load file entries share this shape)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRateInput {
    /// Time window, "HHMM-HHMM"
    pub times: String,

    /// Comma-separated weekday tokens, trailing comma tolerated
    pub days: String,

    /// IANA timezone name
    pub tz: String,

    /// Price; must be a JSON integer, any sign
    pub price: serde_json::Value,
}

/// Wire representation of a stored rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRepr {
    /// Store-assigned id
    pub id: u64,

    /// Time window, "HHMM-HHMM"
    pub times: String,

    /// Comma-separated weekday tokens
    pub days: String,

    /// IANA timezone name
    pub tz: String,

    /// Price
    pub price: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_token_round_trip() {
        for token in ["mon", "tues", "wed", "thurs", "fri", "sat", "sun"] {
            let day = Weekday::from_token(token).unwrap();
            assert_eq!(day.token(), token);
        }
        assert!(Weekday::from_token("monday").is_none());
        assert!(Weekday::from_token("").is_none());
        assert!(Weekday::from_token("Mon").is_none());
    }

    #[test]
    fn test_render_days() {
        assert_eq!(
            render_days(&[Weekday::Mon, Weekday::Wed, Weekday::Fri]),
            "mon,wed,fri"
        );
        assert_eq!(render_days(&[Weekday::Sun]), "sun");
    }

    #[test]
    fn test_time_window_render() {
        let window = TimeWindow {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(21, 30, 0).unwrap(),
        };
        assert_eq!(window.render(), "0900-2130");
    }
}
