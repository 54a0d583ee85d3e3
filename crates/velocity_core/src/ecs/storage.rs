//! # Component Storage
//!
//! Every live entity owns one dense slot holding its named components.
//!
//! The storage uses an arena + index strategy:
//! - Slots live in one contiguous `Vec`, iteration is in slot order
//! - A freed slot is recycled for the next registered entity
//! - Entity identifiers are never recycled, only the storage behind them
//!
//! Absence is a normal outcome: lookups on unknown entities return `None`,
//! writes to unknown entities are no-ops.

use std::collections::{BTreeMap, HashMap};

use super::component::{ComponentKind, ComponentValue};
use super::entity::Entity;
use crate::error::SystemError;

/// One entity's components, keyed by name.
///
/// A `BTreeMap` keeps per-entity iteration order stable across processes.
type ComponentBag = BTreeMap<String, ComponentValue>;

#[derive(Clone, Debug, Default)]
struct Slot {
    /// Entity occupying this slot, or `Entity::NULL` when free.
    owner: Entity,
    components: ComponentBag,
}

/// Storage for every entity's named components.
///
/// The store exclusively owns all component values; callers get borrows or
/// clones. Nothing here fires callbacks.
#[derive(Clone, Debug, Default)]
pub struct ComponentStore {
    slots: Vec<Slot>,
    /// Indices of free slots, reused LIFO.
    free_slots: Vec<u32>,
    /// Entity to slot lookup.
    index: HashMap<Entity, u32>,
}

impl ComponentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for `capacity` entities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_slots: Vec::new(),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Gives `entity` a storage slot.
    ///
    /// # Returns
    ///
    /// `false` if the entity is null or already registered.
    pub fn register(&mut self, entity: Entity) -> bool {
        if entity.is_null() || self.index.contains_key(&entity) {
            return false;
        }

        let slot = if let Some(slot) = self.free_slots.pop() {
            self.slots[slot as usize].owner = entity;
            slot
        } else {
            let slot = self.slots.len() as u32;
            self.slots.push(Slot {
                owner: entity,
                components: ComponentBag::new(),
            });
            slot
        };

        self.index.insert(entity, slot);
        true
    }

    /// Whether `entity` currently has storage.
    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    /// Number of registered entities.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no entity is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    fn bag(&self, entity: Entity) -> Option<&ComponentBag> {
        let slot = *self.index.get(&entity)?;
        Some(&self.slots[slot as usize].components)
    }

    #[inline]
    fn bag_mut(&mut self, entity: Entity) -> Option<&mut ComponentBag> {
        let slot = *self.index.get(&entity)?;
        Some(&mut self.slots[slot as usize].components)
    }

    /// Attaches (or overwrites) the `name` component of `entity`.
    ///
    /// Silently ignored if the entity is not registered.
    ///
    /// # Returns
    ///
    /// `true` if the value was stored.
    pub fn add(&mut self, entity: Entity, name: &str, value: impl Into<ComponentValue>) -> bool {
        let Some(bag) = self.bag_mut(entity) else {
            return false;
        };

        let value = value.into();
        if let Some(existing) = bag.get_mut(name) {
            *existing = value;
        } else {
            bag.insert(name.to_owned(), value);
        }
        true
    }

    /// Looks up the `name` component of `entity`.
    ///
    /// `None` if the entity is unknown or has no such component.
    #[inline]
    #[must_use]
    pub fn get(&self, entity: Entity, name: &str) -> Option<&ComponentValue> {
        self.bag(entity)?.get(name)
    }

    /// Mutable lookup of the `name` component of `entity`.
    #[inline]
    pub fn get_mut(&mut self, entity: Entity, name: &str) -> Option<&mut ComponentValue> {
        self.bag_mut(entity)?.get_mut(name)
    }

    /// Typed lookup. `None` if absent or stored as a different kind.
    #[inline]
    #[must_use]
    pub fn get_as<T: ComponentKind>(&self, entity: Entity, name: &str) -> Option<T> {
        self.get(entity, name).and_then(T::from_value)
    }

    /// Typed lookup for systems that can't proceed without the component.
    ///
    /// # Errors
    ///
    /// [`SystemError::MissingComponent`] if absent,
    /// [`SystemError::UnexpectedKind`] if stored as a different kind.
    pub fn require<T: ComponentKind>(&self, entity: Entity, name: &str) -> Result<T, SystemError> {
        let value = self
            .get(entity, name)
            .ok_or_else(|| SystemError::MissingComponent {
                entity,
                name: name.to_owned(),
            })?;

        T::from_value(value).ok_or_else(|| SystemError::UnexpectedKind {
            entity,
            name: name.to_owned(),
            expected: T::KIND,
            found: value.kind(),
        })
    }

    /// Whether `entity` holds a `name` component.
    #[inline]
    #[must_use]
    pub fn has(&self, entity: Entity, name: &str) -> bool {
        self.get(entity, name).is_some()
    }

    /// Detaches the `name` component of `entity`, returning it.
    pub fn remove(&mut self, entity: Entity, name: &str) -> Option<ComponentValue> {
        self.bag_mut(entity)?.remove(name)
    }

    /// Deletes every component of `entity` and forgets its slot.
    ///
    /// Idempotent: unknown or already-removed entities are a no-op.
    ///
    /// # Returns
    ///
    /// `true` if the entity was registered.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        let Some(slot) = self.index.remove(&entity) else {
            return false;
        };

        let slot_ref = &mut self.slots[slot as usize];
        slot_ref.owner = Entity::NULL;
        // Keep the map's allocation around for the next occupant
        slot_ref.components.clear();
        self.free_slots.push(slot);
        true
    }

    /// Iterates over registered entities, in slot order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots
            .iter()
            .map(|s| s.owner)
            .filter(|e| !e.is_null())
    }

    /// Iterates over `(entity, value)` for every entity holding `name`.
    pub fn with_component<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (Entity, &'a ComponentValue)> + 'a {
        self.slots
            .iter()
            .filter(|s| !s.owner.is_null())
            .filter_map(move |s| s.components.get(name).map(|v| (s.owner, v)))
    }

    /// Iterates over every component of `entity`, ordered by name.
    pub fn components_of(
        &self,
        entity: Entity,
    ) -> impl Iterator<Item = (&str, &ComponentValue)> + '_ {
        self.bag(entity)
            .into_iter()
            .flat_map(|bag| bag.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::entity::EntityRegistry;

    fn store_with(n: usize) -> (ComponentStore, Vec<Entity>) {
        let mut registry = EntityRegistry::new();
        let mut store = ComponentStore::new();
        let entities = (0..n)
            .map(|_| {
                let e = registry.create();
                assert!(store.register(e));
                e
            })
            .collect();
        (store, entities)
    }

    #[test]
    fn test_add_then_get() {
        let (mut store, e) = store_with(1);
        assert!(store.add(e[0], "health", 100));
        assert_eq!(store.get(e[0], "health"), Some(&ComponentValue::Int(100)));
        assert_eq!(store.get_as::<i64>(e[0], "health"), Some(100));
    }

    #[test]
    fn test_last_write_wins() {
        let (mut store, e) = store_with(1);
        store.add(e[0], "health", 100);
        store.add(e[0], "health", 40);
        assert_eq!(store.get_as::<i64>(e[0], "health"), Some(40));
        assert_eq!(store.components_of(e[0]).count(), 1);
    }

    #[test]
    fn test_add_to_unregistered_is_noop() {
        let mut store = ComponentStore::new();
        let stranger = Entity::from_bits(99);
        assert!(!store.add(stranger, "health", 1));
        assert!(store.get(stranger, "health").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_register_rejects_null_and_duplicates() {
        let (mut store, e) = store_with(1);
        assert!(!store.register(Entity::NULL));
        assert!(!store.register(e[0]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_entity_is_idempotent_and_clears_data() {
        let (mut store, e) = store_with(2);
        store.add(e[0], "health", 5);
        store.add(e[1], "health", 6);

        assert!(store.remove_entity(e[0]));
        assert!(!store.remove_entity(e[0]));
        assert!(!store.contains(e[0]));
        assert!(store.get(e[0], "health").is_none());
        assert!(!store.add(e[0], "health", 7));
        assert_eq!(store.get_as::<i64>(e[1], "health"), Some(6));
    }

    #[test]
    fn test_freed_slot_does_not_leak_stale_data() {
        let (mut store, e) = store_with(1);
        store.add(e[0], "tag", "old");
        store.remove_entity(e[0]);

        // Next entity reuses the slot but must start empty
        let fresh = Entity::from_bits(e[0].to_bits() + 1);
        assert!(store.register(fresh));
        assert!(store.get(fresh, "tag").is_none());
        assert!(store.get(e[0], "tag").is_none());
        assert_eq!(store.entities().collect::<Vec<_>>(), vec![fresh]);
    }

    #[test]
    fn test_remove_single_component() {
        let (mut store, e) = store_with(1);
        store.add(e[0], "a", 1);
        store.add(e[0], "b", 2);
        assert_eq!(store.remove(e[0], "a"), Some(ComponentValue::Int(1)));
        assert_eq!(store.remove(e[0], "a"), None);
        assert!(store.has(e[0], "b"));
        assert!(store.contains(e[0]));
    }

    #[test]
    fn test_with_component_filters() {
        let (mut store, e) = store_with(3);
        store.add(e[1], "health", 10);
        let holders: Vec<_> = store.with_component("health").map(|(ent, _)| ent).collect();
        assert_eq!(holders, vec![e[1]]);
    }

    #[test]
    fn test_require_reports_missing_and_wrong_kind() {
        let (mut store, e) = store_with(1);
        store.add(e[0], "speed", 2.5);

        assert_eq!(store.require::<f64>(e[0], "speed"), Ok(2.5));
        assert!(matches!(
            store.require::<f64>(e[0], "mass"),
            Err(SystemError::MissingComponent { .. })
        ));
        assert!(matches!(
            store.require::<i64>(e[0], "speed"),
            Err(SystemError::UnexpectedKind { expected: "int", found: "float", .. })
        ));
    }

    #[test]
    fn test_get_mut_mutates_in_place() {
        let (mut store, e) = store_with(1);
        store.add(e[0], "count", 1);
        if let Some(ComponentValue::Int(n)) = store.get_mut(e[0], "count") {
            *n += 1;
        }
        assert_eq!(store.get_as::<i64>(e[0], "count"), Some(2));
    }
}
