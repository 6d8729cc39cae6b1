//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects with **no identity** - they are defined
//! entirely by their attribute values.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two [`Money`]
/// amounts of the same cents are the same amount, while two orders with the
/// same fields but different ids are still different orders (entities).
///
/// To "modify" a value object, build a new one with the new values. Keeping
/// them immutable means they can be copied and shared freely.
///
/// ```
/// use treadstock_core::{Money, ValueObject};
///
/// fn assert_value<T: ValueObject>(_: &T) {}
///
/// let price = Money::from_dollars(45.0);
/// assert_value(&price);
/// assert_eq!(price, Money::from_cents(4500));
/// ```
///
/// [`Money`]: crate::Money
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
