//! Rule input validation
//!
//! Sanitizes raw wire-format rule input into a typed `RateDraft`. Pure
//! transformation: no side effects, no id assignment.

use crate::error::{RateError, Result};
use crate::types::{RateDraft, RawRateInput, TimeWindow, Weekday};
use chrono::NaiveTime;
use chrono_tz::Tz;

/// Validate a raw rule input into a draft ready for `RateStore::create`.
///
/// Checks, in order: time window shape, weekday tokens, timezone name,
/// price type. The first failing field determines the returned error.
pub fn validate(raw: &RawRateInput) -> Result<RateDraft> {
    let window = parse_time_window(&raw.times)?;
    let days = parse_weekdays(&raw.days)?;
    let tz = parse_timezone(&raw.tz)?;
    let price = raw
        .price
        .as_i64()
        .ok_or_else(|| RateError::InvalidPriceType(raw.price.to_string()))?;

    Ok(RateDraft {
        window,
        days,
        tz,
        price,
    })
}

/// Parse "HHMM-HHMM": exactly two dash-separated 4-digit tokens, each a
/// valid 00-23 hour / 00-59 minute combination. Seconds are always zero.
fn parse_time_window(input: &str) -> Result<TimeWindow> {
    let (start, end) = match input.split_once('-') {
        Some((start, end)) if !end.contains('-') => (start, end),
        _ => return Err(RateError::MalformedTimeWindow(input.to_string())),
    };

    Ok(TimeWindow {
        start: parse_hhmm(start)?,
        end: parse_hhmm(end)?,
    })
}

fn parse_hhmm(token: &str) -> Result<NaiveTime> {
    if token.len() != 4 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RateError::MalformedTimeWindow(token.to_string()));
    }

    // Both slices are pure ASCII digits at this point
    let hour: u32 = token[..2]
        .parse()
        .map_err(|_| RateError::MalformedTimeWindow(token.to_string()))?;
    let minute: u32 = token[2..]
        .parse()
        .map_err(|_| RateError::MalformedTimeWindow(token.to_string()))?;

    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| RateError::MalformedTimeWindow(token.to_string()))
}

/// Parse "tag,tag,...": one trailing comma is tolerated; every remaining
/// token must be in the weekday vocabulary. Duplicates are kept, matching
/// is membership-based so multiplicity does not affect results.
fn parse_weekdays(input: &str) -> Result<Vec<Weekday>> {
    let trimmed = input.strip_suffix(',').unwrap_or(input);
    if trimmed.is_empty() {
        return Err(RateError::UnknownWeekday(input.to_string()));
    }

    trimmed
        .split(',')
        .map(|token| {
            Weekday::from_token(token).ok_or_else(|| RateError::UnknownWeekday(token.to_string()))
        })
        .collect()
}

/// Resolve a timezone name against the IANA database
fn parse_timezone(input: &str) -> Result<Tz> {
    input
        .parse::<Tz>()
        .map_err(|_| RateError::UnknownTimezone(input.to_string()))
}
