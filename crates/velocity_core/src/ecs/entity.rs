//! # Entity Management
//!
//! Entities are opaque 64-bit identifiers handed out by a monotonic counter.
//! An identifier is never issued twice during the life of a registry, even
//! after the entity it named has been removed.

use std::fmt;

use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity.
///
/// Zero is reserved as [`Entity::NULL`], "no entity". Every identifier the
/// registry issues is strictly greater than the one before it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Entity(u64);

impl Entity {
    /// Null/invalid entity.
    pub const NULL: Self = Self(0);

    /// Reconstructs an entity from its raw bits.
    ///
    /// Useful for collaborators that stored an id outside the world. The
    /// result is only meaningful if the registry actually issued it.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Checks if this is the null entity.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocates entity identifiers.
///
/// The counter only moves forward. There is no destroy operation here:
/// forgetting an entity's storage is the component store's job.
#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    /// Last identifier handed out (0 before the first).
    last: u64,
}

impl EntityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Allocates a never-before-issued entity. O(1).
    #[inline]
    pub fn create(&mut self) -> Entity {
        self.last += 1;
        Entity(self.last)
    }

    /// Number of identifiers issued so far.
    #[inline]
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.last
    }

    /// Whether `entity` came from this registry (alive or not).
    #[inline]
    #[must_use]
    pub const fn was_issued(&self, entity: Entity) -> bool {
        !entity.is_null() && entity.0 <= self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_entity() {
        assert!(Entity::NULL.is_null());
        assert_eq!(Entity::default(), Entity::NULL);
        assert_eq!(Entity::from_bits(0), Entity::NULL);
    }

    #[test]
    fn test_create_is_strictly_increasing() {
        let mut registry = EntityRegistry::new();
        let mut previous = Entity::NULL;
        for _ in 0..1000 {
            let e = registry.create();
            assert!(!e.is_null());
            assert!(e > previous);
            previous = e;
        }
        assert_eq!(registry.issued(), 1000);
    }

    #[test]
    fn test_was_issued() {
        let mut registry = EntityRegistry::new();
        let e = registry.create();
        assert!(registry.was_issued(e));
        assert!(!registry.was_issued(Entity::NULL));
        assert!(!registry.was_issued(Entity::from_bits(e.to_bits() + 1)));
    }

    #[test]
    fn test_bits_roundtrip() {
        let mut registry = EntityRegistry::new();
        let e = registry.create();
        assert_eq!(Entity::from_bits(e.to_bits()), e);
        assert_eq!(e.to_string(), "#1");
    }
}
