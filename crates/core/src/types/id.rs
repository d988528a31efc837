//! Newtype IDs for type-safe entity references.
//!
//! Every persisted entity uses an `i32` surrogate key. The `define_id!`
//! macro wraps each key in its own type so a `CustomerId` can never be
//! passed where an `OrderId` is expected.

/// Macro to define a type-safe ID wrapper around `i32`.
///
/// The generated type carries:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `new()` / `as_i32()` and `From<i32>` / `Into<i32>` conversions
/// - `sqlx::Type` with `#[sqlx(transparent)]` when the `postgres` feature
///   is enabled, so IDs bind and decode as plain `INTEGER` columns
///
/// # Example
///
/// ```rust
/// # use orders_core::define_id;
/// define_id!(WidgetId);
///
/// let id = WidgetId::new(7);
/// assert_eq!(id.as_i32(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type))]
        #[cfg_attr(feature = "postgres", sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifies a customer.
    CustomerId
);
define_id!(
    /// Identifies a customer's address.
    AddressId
);
define_id!(
    /// Identifies a product in the catalog.
    ProductId
);
define_id!(
    /// Identifies an order.
    OrderId
);
define_id!(
    /// Identifies a single line item within an order.
    OrderItemId
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = OrderId::new(42);
        assert_eq!(id.as_i32(), 42);
        assert_eq!(i32::from(id), 42);
        assert_eq!(OrderId::from(42), id);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(CustomerId::new(7).to_string(), "7");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = ProductId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");

        let parsed: ProductId = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, id);
    }
}
