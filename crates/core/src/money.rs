//! Dollar amounts held as whole cents.

use core::iter::Sum;
use core::ops::{Add, AddAssign};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value_object::ValueObject;

/// A non-negative dollar amount, stored in cents.
///
/// Catalog files and order payloads carry prices as decimal dollars; they are
/// converted at the boundary so that arithmetic inside the domain is exact
/// and order-independent.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Money(cents)
    }

    /// Converts a decimal dollar amount, rounding to the nearest cent.
    ///
    /// Anything that is not a finite non-negative number becomes zero, the
    /// same fallback lenient catalog coercion applies to junk prices.
    pub fn from_dollars(dollars: f64) -> Self {
        if !dollars.is_finite() || dollars <= 0.0 {
            return Money(0);
        }
        Money((dollars * 100.0).round() as u64)
    }

    pub const fn cents(&self) -> u64 {
        self.0
    }

    pub fn to_dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Unit price extended by a quantity. Saturates instead of wrapping.
    pub fn times(&self, qty: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(qty)))
    }
}

impl ValueObject for Money {}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    /// Renders decimal dollars with exactly two cent digits, no symbol.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Whole-dollar amounts stay integers on the wire ("price": 45),
        // fractional ones become floats ("price": 45.5).
        if self.0 % 100 == 0 {
            serializer.serialize_u64(self.0 / 100)
        } else {
            serializer.serialize_f64(self.to_dollars())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dollars = f64::deserialize(deserializer)?;
        Ok(Money::from_dollars(dollars))
    }
}
