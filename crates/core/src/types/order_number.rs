//! Order number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OrderNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderNumberError {
    /// The input does not start with [`OrderNumber::PREFIX`].
    #[error("order number must start with {prefix}")]
    MissingPrefix {
        /// Expected prefix.
        prefix: &'static str,
    },
    /// Nothing follows the prefix.
    #[error("order number has no digits after the prefix")]
    MissingDigits,
    /// Something other than an ASCII digit follows the prefix.
    #[error("order number may only contain digits after the prefix")]
    InvalidDigits,
}

/// A customer-facing order identifier.
///
/// Order numbers are the fixed prefix `BR` followed by epoch milliseconds,
/// e.g. `BR1718000000000`. They are stored and compared as plain strings.
///
/// ## Examples
///
/// ```
/// use bramanda_core::OrderNumber;
///
/// let number = OrderNumber::from_millis(1_718_000_000_000);
/// assert_eq!(number.as_str(), "BR1718000000000");
///
/// assert!(OrderNumber::parse("BR42").is_ok());
/// assert!(OrderNumber::parse("XY42").is_err());
/// assert!(OrderNumber::parse("BR").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Prefix shared by every order number.
    pub const PREFIX: &'static str = "BR";

    /// Build an order number from a millisecond timestamp.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(format!("{}{millis}", Self::PREFIX))
    }

    /// Parse an `OrderNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not start with the prefix or if the
    /// remainder is empty or contains non-digit characters.
    pub fn parse(s: &str) -> Result<Self, OrderNumberError> {
        let digits = s
            .strip_prefix(Self::PREFIX)
            .ok_or(OrderNumberError::MissingPrefix {
                prefix: Self::PREFIX,
            })?;

        if digits.is_empty() {
            return Err(OrderNumberError::MissingDigits);
        }

        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OrderNumberError::InvalidDigits);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `OrderNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderNumber {
    type Err = OrderNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for OrderNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for OrderNumber {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for OrderNumber {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for OrderNumber {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for OrderNumber {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_millis() {
        let number = OrderNumber::from_millis(1_700_000_000_123);
        assert_eq!(number.as_str(), "BR1700000000123");
    }

    #[test]
    fn test_from_millis_parses_back() {
        let number = OrderNumber::from_millis(7);
        assert_eq!(OrderNumber::parse(number.as_str()).unwrap(), number);
    }

    #[test]
    fn test_parse_missing_prefix() {
        assert!(matches!(
            OrderNumber::parse("1700000000123"),
            Err(OrderNumberError::MissingPrefix { .. })
        ));
        assert!(matches!(
            OrderNumber::parse("br123"),
            Err(OrderNumberError::MissingPrefix { .. })
        ));
    }

    #[test]
    fn test_parse_missing_digits() {
        assert_eq!(
            OrderNumber::parse("BR"),
            Err(OrderNumberError::MissingDigits)
        );
    }

    #[test]
    fn test_parse_invalid_digits() {
        assert_eq!(
            OrderNumber::parse("BR12a4"),
            Err(OrderNumberError::InvalidDigits)
        );
        assert_eq!(
            OrderNumber::parse("BR-12"),
            Err(OrderNumberError::InvalidDigits)
        );
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let number = OrderNumber::from_millis(55);
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"BR55\"");
    }

    #[test]
    fn test_eq_str() {
        let number = OrderNumber::from_millis(99);
        assert!(number == *"BR99");
        assert!(number != *"BR98");
    }
}
