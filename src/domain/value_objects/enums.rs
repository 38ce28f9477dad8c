//! # Domain Enums
//!
//! Enumeration types for quote line items.
//!
//! - [`QuoteItemType`] - Part or service
//! - [`ParseEnumError`] - Error returned when parsing an enum from text
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a quote line item.
///
/// # Examples
///
/// ```
/// use oficina_quotes::domain::value_objects::QuoteItemType;
///
/// let part: QuoteItemType = "PART".parse().unwrap();
/// assert_eq!(part, QuoteItemType::Part);
/// assert_eq!(part.to_string(), "PART");
/// assert_eq!(part.label(), "Peça");
/// assert!("part".parse::<QuoteItemType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum QuoteItemType {
    /// Physical part or product.
    Part = 0,
    /// Labour or service.
    Service = 1,
}

impl QuoteItemType {
    /// All item types, in declaration order.
    pub const ALL: [Self; 2] = [Self::Part, Self::Service];

    /// Returns the wire name (`PART` / `SERVICE`).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Part => "PART",
            Self::Service => "SERVICE",
        }
    }

    /// Returns the label shown to shop customers.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Part => "Peça",
            Self::Service => "Serviço",
        }
    }
}

impl fmt::Display for QuoteItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteItemType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PART" => Ok(Self::Part),
            "SERVICE" => Ok(Self::Service),
            _ => Err(ParseEnumError::InvalidValue("QuoteItemType", s.to_string())),
        }
    }
}

/// Error returned when parsing an enum from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl ParseEnumError {
    /// Returns the rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidValue(_, value) => value,
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod quote_item_type {
        use super::*;

        #[test]
        fn parses_wire_names() {
            assert_eq!("PART".parse::<QuoteItemType>().unwrap(), QuoteItemType::Part);
            assert_eq!(
                "SERVICE".parse::<QuoteItemType>().unwrap(),
                QuoteItemType::Service
            );
        }

        #[test]
        fn rejects_other_spellings() {
            for raw in ["", "part", "service", "Part", " PART", "SERVICE "] {
                let err = raw.parse::<QuoteItemType>().unwrap_err();
                assert_eq!(err.value(), raw);
            }
        }

        #[test]
        fn rejects_unknown_value() {
            let err = "PAINT".parse::<QuoteItemType>().unwrap_err();
            assert_eq!(err.value(), "PAINT");
            assert_eq!(err.to_string(), "invalid QuoteItemType value: 'PAINT'");
        }

        #[test]
        fn labels() {
            assert_eq!(QuoteItemType::Part.label(), "Peça");
            assert_eq!(QuoteItemType::Service.label(), "Serviço");
        }

        #[test]
        fn serde_uses_wire_names() {
            let json = serde_json::to_string(&QuoteItemType::Service).unwrap();
            assert_eq!(json, "\"SERVICE\"");
            let back: QuoteItemType = serde_json::from_str("\"PART\"").unwrap();
            assert_eq!(back, QuoteItemType::Part);
        }
    }
}
