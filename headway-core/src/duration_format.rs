//! Serde adapter for clock-style durations.
//!
//! Configuration documents write durations as `H:MM:SS` (for example
//! `0:05:00`). Reading is more forgiving: whole or fractional seconds as a
//! JSON number, `H:MM:SS`, `MM:SS`, an optional `N day(s), ` prefix and
//! anything [`jiff::SignedDuration`] parses itself (ISO 8601 such as `PT5M`
//! or the friendly `5m`) are all accepted.
//!
//! Use it with `#[serde(with = "headway_core::duration_format")]`.

use std::fmt;

use jiff::SignedDuration;
use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use thiserror::Error;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Errors raised while parsing a clock-style duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    /// The text did not match any supported layout.
    #[error("unrecognised duration `{text}`")]
    Unrecognised {
        /// Offending input.
        text: String,
    },
    /// A clock field was outside its range, e.g. 75 minutes.
    #[error("duration field `{field}` out of range in `{text}`")]
    FieldOutOfRange {
        /// Field name (`minutes` or `seconds`).
        field: &'static str,
        /// Offending input.
        text: String,
    },
}

/// Serialise a duration as `H:MM:SS`.
///
/// # Errors
///
/// Propagates serializer failures.
pub fn serialize<S>(duration: &SignedDuration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&format_clock(*duration))
}

/// Deserialise a duration from a number of seconds or a clock string.
///
/// # Errors
///
/// Fails when the input is neither a finite number nor a recognised string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<SignedDuration, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DurationVisitor)
}

/// Render a duration as `H:MM:SS`, prefixed with `-` when negative.
///
/// Sub-second precision is dropped.
///
/// # Examples
/// ```
/// use headway_core::duration_format::format_clock;
/// use jiff::SignedDuration;
///
/// assert_eq!(format_clock(SignedDuration::from_mins(5)), "0:05:00");
/// assert_eq!(format_clock(SignedDuration::from_secs(-3_725)), "-1:02:05");
/// ```
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "splitting whole seconds into clock fields"
)]
pub fn format_clock(duration: SignedDuration) -> String {
    let total = duration.as_secs();
    let sign = if total < 0 { "-" } else { "" };
    let seconds = total.unsigned_abs();
    let hours = seconds / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let rest = seconds % 60;
    format!("{sign}{hours}:{minutes:02}:{rest:02}")
}

/// Parse a clock-style duration.
///
/// # Errors
///
/// Returns [`DurationParseError`] when the text is not a supported layout.
///
/// # Examples
/// ```
/// use headway_core::duration_format::parse_clock;
/// use jiff::SignedDuration;
///
/// assert_eq!(parse_clock("0:05:00")?, SignedDuration::from_mins(5));
/// assert_eq!(parse_clock("1 day, 2:00:00")?, SignedDuration::from_hours(26));
/// assert_eq!(parse_clock("PT10M")?, SignedDuration::from_mins(10));
/// # Ok::<(), headway_core::duration_format::DurationParseError>(())
/// ```
pub fn parse_clock(text: &str) -> Result<SignedDuration, DurationParseError> {
    let trimmed = text.trim();
    if let Some(duration) = parse_colon_form(trimmed, text)? {
        return Ok(duration);
    }
    trimmed
        .parse::<SignedDuration>()
        .map_err(|_| DurationParseError::Unrecognised {
            text: text.to_owned(),
        })
}

fn parse_colon_form(
    trimmed: &str,
    original: &str,
) -> Result<Option<SignedDuration>, DurationParseError> {
    if !trimmed.contains(':') {
        return Ok(None);
    }
    let unrecognised = || DurationParseError::Unrecognised {
        text: original.to_owned(),
    };
    let (negative, unsigned) = trimmed
        .strip_prefix('-')
        .map_or((false, trimmed), |rest| (true, rest));
    let (days, clock) = split_days(unsigned).ok_or_else(unrecognised)?;

    let fields: Vec<&str> = clock.split(':').collect();
    let (hour_field, minute_field, seconds) = match fields.as_slice() {
        [h, m, s] => (parse_field(h), parse_field(m), *s),
        [m, s] => (Some(0), parse_field(m), *s),
        _ => return Err(unrecognised()),
    };
    let (hours, minutes) = hour_field.zip(minute_field).ok_or_else(unrecognised)?;
    let (whole_seconds, nanos) = parse_seconds(seconds).ok_or_else(unrecognised)?;
    if minutes >= SECONDS_PER_MINUTE {
        return Err(DurationParseError::FieldOutOfRange {
            field: "minutes",
            text: original.to_owned(),
        });
    }
    if whole_seconds >= SECONDS_PER_MINUTE {
        return Err(DurationParseError::FieldOutOfRange {
            field: "seconds",
            text: original.to_owned(),
        });
    }

    let total = days
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|d| hours.checked_mul(SECONDS_PER_HOUR)?.checked_add(d))
        .and_then(|t| minutes.checked_mul(SECONDS_PER_MINUTE)?.checked_add(t))
        .and_then(|t| t.checked_add(whole_seconds))
        .ok_or_else(unrecognised)?;
    let magnitude = SignedDuration::new(total, nanos);
    Ok(Some(if negative { -magnitude } else { magnitude }))
}

fn split_days(text: &str) -> Option<(i64, &str)> {
    let Some((day_part, clock)) = text.split_once(',') else {
        return Some((0, text));
    };
    let count = day_part
        .trim()
        .strip_suffix("days")
        .or_else(|| day_part.trim().strip_suffix("day"))?;
    Some((parse_field(count)?, clock.trim()))
}

fn parse_field(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

fn parse_seconds(text: &str) -> Option<(i64, i32)> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let seconds = parse_field(whole)?;
    if fraction.is_empty() {
        return Some((seconds, 0));
    }
    if fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let padded = format!("{fraction:0<9}");
    Some((seconds, padded.parse().ok()?))
}

struct DurationVisitor;

impl Visitor<'_> for DurationVisitor {
    type Value = SignedDuration;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number of seconds or an H:MM:SS duration")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(SignedDuration::from_secs(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        i64::try_from(value)
            .map(SignedDuration::from_secs)
            .map_err(|_| E::custom(format!("duration of {value} seconds is too large")))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        SignedDuration::try_from_secs_f64(value).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        parse_clock(value).map_err(E::custom)
    }
}
