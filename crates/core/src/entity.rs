//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Catalog listings and orders are entities: their fields change over time
/// but the record stays the same one as long as the id matches.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
