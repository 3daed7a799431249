//! Ticket price - fixed-point amount with two decimal places
//!
//! Stored as whole cents so arithmetic and comparisons are exact. On the wire
//! a price is a decimal string (`"12.50"`); numbers are accepted on input.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Non-negative ticket price in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(i64);

impl Price {
    /// Largest representable price: 99,999,999.99
    pub const MAX_CENTS: i64 = 9_999_999_999;

    /// Free admission
    pub const ZERO: Price = Price(0);

    /// Create a price from a cent amount
    pub fn from_cents(cents: i64) -> Result<Self, PriceParseError> {
        if cents < 0 {
            return Err(PriceParseError::Negative);
        }
        if cents > Self::MAX_CENTS {
            return Err(PriceParseError::TooLarge);
        }
        Ok(Self(cents))
    }

    /// Amount in cents
    #[inline]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_free(self) -> bool {
        self.0 == 0
    }
}

/// Error when parsing a price
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PriceParseError {
    #[error("price must be a decimal number")]
    InvalidFormat,

    #[error("price cannot have more than two decimal places")]
    TooPrecise,

    #[error("price cannot be negative")]
    Negative,

    #[error("price exceeds the maximum of 99999999.99")]
    TooLarge,
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('-') {
            return Err(PriceParseError::Negative);
        }

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PriceParseError::InvalidFormat);
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PriceParseError::InvalidFormat);
        }
        if frac.len() > 2 {
            return Err(PriceParseError::TooPrecise);
        }

        let whole: i64 = whole.parse().map_err(|_| PriceParseError::TooLarge)?;
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| PriceParseError::InvalidFormat)? * 10,
            _ => frac.parse().map_err(|_| PriceParseError::InvalidFormat)?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .ok_or(PriceParseError::TooLarge)?;

        Price::from_cents(cents)
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

// Deserialize from a decimal string or a JSON number
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct PriceVisitor;

        impl Visitor<'_> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative decimal price with at most two decimal places")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Price, E>
            where
                E: de::Error,
            {
                let cents = i64::try_from(value)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .ok_or_else(|| de::Error::custom(PriceParseError::TooLarge))?;
                Price::from_cents(cents).map_err(de::Error::custom)
            }

            fn visit_i64<E>(self, value: i64) -> Result<Price, E>
            where
                E: de::Error,
            {
                if value < 0 {
                    return Err(de::Error::custom(PriceParseError::Negative));
                }
                self.visit_u64(value as u64)
            }

            fn visit_f64<E>(self, value: f64) -> Result<Price, E>
            where
                E: de::Error,
            {
                // Route through the decimal parser so precision rules match strings
                value.to_string().parse().map_err(de::Error::custom)
            }

            fn visit_str<E>(self, value: &str) -> Result<Price, E>
            where
                E: de::Error,
            {
                value.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Price::from_cents(1250).unwrap().to_string(), "12.50");
        assert_eq!(Price::from_cents(7).unwrap().to_string(), "0.07");
        assert_eq!(Price::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("12".parse::<Price>().unwrap().cents(), 1200);
        assert_eq!("12.5".parse::<Price>().unwrap().cents(), 1250);
        assert_eq!("12.05".parse::<Price>().unwrap().cents(), 1205);
        assert_eq!(" 0.99 ".parse::<Price>().unwrap().cents(), 99);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!("-1".parse::<Price>(), Err(PriceParseError::Negative));
        assert_eq!("1.999".parse::<Price>(), Err(PriceParseError::TooPrecise));
        assert_eq!("abc".parse::<Price>(), Err(PriceParseError::InvalidFormat));
        assert_eq!(".5".parse::<Price>(), Err(PriceParseError::InvalidFormat));
        assert_eq!(
            "100000000.00".parse::<Price>(),
            Err(PriceParseError::TooLarge)
        );
    }

    #[test]
    fn test_json_is_string() {
        let price = Price::from_cents(4999).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"49.99\"");
    }

    #[test]
    fn test_json_accepts_numbers() {
        let price: Price = serde_json::from_str("25").unwrap();
        assert_eq!(price.cents(), 2500);

        let price: Price = serde_json::from_str("19.9").unwrap();
        assert_eq!(price.cents(), 1990);

        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
