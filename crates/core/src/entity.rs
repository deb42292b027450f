//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Two entities with the same identifier are the same entity, whatever their
/// other attributes hold. Implementors keep `PartialEq`/`Hash` consistent with
/// this by comparing identifiers only.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Identity comparison (ignores every non-identifier attribute).
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
