//! Station identifier type.

use std::fmt;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// Longest identifier accepted; EVA numbers are usually 7 digits.
const MAX_LEN: usize = 10;

/// A numeric station identifier (EVA number) as used by the timetable feeds.
///
/// # Examples
///
/// ```
/// use timetable_board::domain::StationId;
///
/// let frankfurt = StationId::parse("8000105").unwrap();
/// assert_eq!(frankfurt.as_str(), "8000105");
///
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("80001O5").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier: 1 to 10 ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_LEN {
            return Err(InvalidStationId {
                reason: "must be at most 10 digits",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStationId {
                reason: "must contain only digits",
            });
        }

        Ok(StationId(s.to_string()))
    }

    /// Parse after trimming surrounding whitespace.
    pub fn parse_trimmed(s: &str) -> Result<Self, InvalidStationId> {
        Self::parse(s.trim())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn digits_roundtrip(s in "[0-9]{1,10}") {
            let id = StationId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        #[test]
        fn non_digit_rejected(prefix in "[0-9]{0,4}", bad in "[A-Za-z ]", suffix in "[0-9]{0,4}") {
            let s = format!("{prefix}{bad}{suffix}");
            prop_assert!(StationId::parse(&s).is_err());
        }
    }
}
