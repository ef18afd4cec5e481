//! Entity trait: identity + continuity across views.

/// Entity marker + minimal interface.
///
/// The selection controller locates the open product in its group by identity,
/// so anything that can be opened in a detail view is an entity.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
