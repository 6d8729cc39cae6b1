//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a catalog listing.
///
/// Positive in well-formed data; normalization re-numbers anything that
/// arrives without a usable id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

/// Identifier of a placed order.
///
/// Orders are stamped with the epoch-millisecond time of placement, which
/// keeps ids unique for a single-counter shop and sortable by age.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $raw:ty, $name:literal) => {
        impl $t {
            pub const fn new(raw: $raw) -> Self {
                Self(raw)
            }

            pub const fn get(&self) -> $raw {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$raw> for $t {
            fn from(value: $raw) -> Self {
                Self(value)
            }
        }

        impl From<$t> for $raw {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.trim().parse::<$raw>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}

impl_int_newtype!(ItemId, u32, "ItemId");
impl_int_newtype!(OrderId, i64, "OrderId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_parses_with_surrounding_whitespace() {
        let id: ItemId = " 42 ".parse().unwrap();
        assert_eq!(id, ItemId::new(42));
    }

    #[test]
    fn item_id_rejects_non_numeric_text() {
        let err = "abc".parse::<ItemId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("ItemId")),
            other => panic!("Expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&OrderId::new(1700000000000)).unwrap();
        assert_eq!(json, "1700000000000");
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OrderId::new(1700000000000));
    }
}
