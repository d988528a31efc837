//! Order item quantity type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is zero or negative.
    #[error("quantity must be a positive integer (got {0})")]
    NotPositive(i32),
}

/// A strictly positive order item quantity.
///
/// Order items with zero or negative quantities are meaningless and must be
/// rejected before anything is persisted, so the constructor enforces
/// positivity and the rest of the codebase can rely on it.
///
/// ## Examples
///
/// ```
/// use orders_core::Quantity;
///
/// assert!(Quantity::new(1).is_ok());
/// assert!(Quantity::new(250).is_ok());
///
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::new(-3).is_err());
/// ```
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Quantity(i32);

impl Quantity {
    /// Create a `Quantity` from an i32.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotPositive`] if the value is zero or
    /// negative.
    pub const fn new(value: i32) -> Result<Self, QuantityError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(QuantityError::NotPositive(value))
        }
    }

    /// Get the underlying i32 value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for i32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl TryFrom<i32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// Deserialization goes through the validating constructor so a request body
// can never smuggle in a non-positive quantity.
impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_quantities_accepted() {
        assert_eq!(Quantity::new(1).unwrap().get(), 1);
        assert_eq!(Quantity::new(i32::MAX).unwrap().get(), i32::MAX);
    }

    #[test]
    fn test_zero_rejected() {
        assert_eq!(Quantity::new(0), Err(QuantityError::NotPositive(0)));
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(Quantity::new(-5), Err(QuantityError::NotPositive(-5)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let quantity = Quantity::new(2).unwrap();
        let json = serde_json::to_string(&quantity).unwrap();
        assert_eq!(json, "2");

        let parsed: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, quantity);
    }

    #[test]
    fn test_deserialize_rejects_non_positive() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-1").is_err());
    }

    #[test]
    fn test_error_message_names_value() {
        let err = Quantity::new(-2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "quantity must be a positive integer (got -2)"
        );
    }
}
