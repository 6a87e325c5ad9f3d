//! Stop and route identifiers.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier used for stops and routes.
///
/// Configuration documents mix numeric and textual identifiers. Both forms
/// are kept distinct, so `3` and `"3"` round-trip unchanged.
///
/// # Examples
/// ```
/// use headway_core::Identifier;
///
/// assert_eq!(Identifier::parse_lenient("12"), Identifier::Number(12));
/// assert_eq!(
///     Identifier::parse_lenient("terminal"),
///     Identifier::Text("terminal".to_owned())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    /// Integer identifier.
    Number(i64),
    /// Free-form textual identifier.
    Text(String),
}

/// Identifier of a [`Stop`](crate::Stop).
pub type StopId = Identifier;

/// Identifier of a [`Route`](crate::Route).
pub type RouteId = Identifier;

impl Identifier {
    /// Interpret operator or CSV input, preferring the numeric form when the
    /// trimmed text is an integer.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_owned()), Self::Number)
    }
}

impl FromStr for Identifier {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Identifier {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for Identifier {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("7", Identifier::Number(7))]
    #[case(" -3 ", Identifier::Number(-3))]
    #[case("north", Identifier::Text("north".into()))]
    #[case("7a", Identifier::Text("7a".into()))]
    fn lenient_parsing_prefers_numbers(#[case] raw: &str, #[case] expected: Identifier) {
        assert_eq!(Identifier::parse_lenient(raw), expected);
    }

    #[rstest]
    fn numeric_and_textual_forms_stay_distinct() {
        let number: Identifier = serde_json::from_str("3").expect("number id");
        let text: Identifier = serde_json::from_str("\"3\"").expect("text id");
        assert_ne!(number, text);
        assert_eq!(serde_json::to_string(&number).expect("encode"), "3");
        assert_eq!(serde_json::to_string(&text).expect("encode"), "\"3\"");
    }
}
