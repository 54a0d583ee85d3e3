//! # ECS World
//!
//! The composition root: entity registry, component store and scheduler
//! behind one per-tick entry point. The world is the only thing that
//! creates or removes entities outside of a running tick, and the only
//! thing that drives systems.

use tracing::trace;

use super::component::{ComponentKind, ComponentValue};
use super::entity::{Entity, EntityRegistry};
use super::storage::ComponentStore;
use super::system::{Scheduler, System, TickContext};
use crate::camera::Camera;
use crate::error::TickError;
use crate::input::InputState;

/// Copy of the component state at some point in time.
///
/// Produced by [`World::snapshot`], consumed by [`World::restore`]. The
/// entity counter is deliberately not part of it.
#[derive(Clone, Debug)]
pub struct WorldSnapshot {
    components: ComponentStore,
}

/// The ECS World - container for all simulation state.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::new();
/// let ship = world.create_entity();
/// world.add_component(ship, "health", 3);
/// world.register_system(FnSystem::new("regen", |_dt, _ctx| Ok(())));
/// world.run_tick(FIXED_DT, &InputState::default(), &mut camera)?;
/// ```
#[derive(Debug, Default)]
pub struct World {
    registry: EntityRegistry,
    components: ComponentStore,
    scheduler: Scheduler,
    /// Ticks started so far.
    tick: u64,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty world with storage pre-sized for `capacity` entities.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            components: ComponentStore::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Creates a new entity with no components.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.registry.create();
        self.components.register(entity);
        entity
    }

    /// Attaches (or overwrites) a named component. No-op on unknown entities.
    pub fn add_component(
        &mut self,
        entity: Entity,
        name: &str,
        value: impl Into<ComponentValue>,
    ) -> bool {
        self.components.add(entity, name, value)
    }

    /// Looks up a named component.
    #[must_use]
    pub fn get_component(&self, entity: Entity, name: &str) -> Option<&ComponentValue> {
        self.components.get(entity, name)
    }

    /// Typed lookup of a named component.
    #[must_use]
    pub fn get_component_as<T: ComponentKind>(&self, entity: Entity, name: &str) -> Option<T> {
        self.components.get_as(entity, name)
    }

    /// Mutable lookup of a named component.
    pub fn get_component_mut(&mut self, entity: Entity, name: &str) -> Option<&mut ComponentValue> {
        self.components.get_mut(entity, name)
    }

    /// Detaches a named component.
    pub fn remove_component(&mut self, entity: Entity, name: &str) -> Option<ComponentValue> {
        self.components.remove(entity, name)
    }

    /// Removes an entity and all of its components. Idempotent.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        self.components.remove_entity(entity)
    }

    /// Whether `entity` is alive.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.components.contains(entity)
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.components.len()
    }

    /// Number of entity identifiers ever issued.
    #[must_use]
    pub const fn entities_issued(&self) -> u64 {
        self.registry.issued()
    }

    /// Read-only view of every component, for renderers and other readers.
    #[must_use]
    pub const fn components(&self) -> &ComponentStore {
        &self.components
    }

    /// Mutable component access for setup code outside a tick.
    pub fn components_mut(&mut self) -> &mut ComponentStore {
        &mut self.components
    }

    /// Appends a system to the run order.
    pub fn register_system<S: System + 'static>(&mut self, system: S) {
        self.scheduler.register(system);
    }

    /// Appends an already-boxed system to the run order.
    pub fn register_boxed_system(&mut self, system: Box<dyn System>) {
        self.scheduler.register_boxed(system);
    }

    /// Number of registered systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.scheduler.len()
    }

    /// Names of the registered systems, in run order.
    pub fn system_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.scheduler.names()
    }

    /// Number of ticks started so far (failed ones included).
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Runs every system once with `dt`, in registration order.
    ///
    /// `input` is the snapshot latched for this tick; `camera` is handed to
    /// systems for reading and for triggering shakes. Advancing the camera
    /// itself is the frame driver's job.
    ///
    /// # Errors
    ///
    /// Returns the first system failure. Systems after it don't run, and
    /// whatever earlier systems wrote stays written.
    pub fn run_tick(
        &mut self,
        dt: f64,
        input: &InputState,
        camera: &mut Camera,
    ) -> Result<(), TickError> {
        let tick = self.tick;
        self.tick += 1;
        trace!(tick, dt, systems = self.scheduler.len(), "running tick");

        let mut ctx = TickContext::new(
            tick,
            &mut self.registry,
            &mut self.components,
            input,
            camera,
        );
        self.scheduler.run_tick(dt, &mut ctx)
    }

    /// Captures the current component state.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            components: self.components.clone(),
        }
    }

    /// Rolls component state back to `snapshot`.
    ///
    /// The entity counter keeps its current value, so identifiers handed out
    /// after the snapshot are never issued again.
    pub fn restore(&mut self, snapshot: WorldSnapshot) {
        self.components = snapshot.components;
    }
}
