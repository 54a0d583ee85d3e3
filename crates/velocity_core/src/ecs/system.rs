//! # Systems and Scheduling
//!
//! A system is anything that can advance by a time delta. The scheduler
//! keeps systems in registration order and runs each exactly once per tick,
//! synchronously, with the same delta.
//!
//! There is no snapshot isolation between systems: a write made by an
//! earlier system is visible to every later system in the same tick.

use tracing::{debug, error};

use super::entity::{Entity, EntityRegistry};
use super::storage::ComponentStore;
use crate::camera::Camera;
use crate::error::{SystemResult, TickError};
use crate::input::InputState;

/// Everything a system may touch during one tick.
///
/// Input is only reachable through a shared reference: systems read it, the
/// input poller writes it before the tick starts.
pub struct TickContext<'w> {
    tick: u64,
    registry: &'w mut EntityRegistry,
    input: &'w InputState,
    /// Component storage shared by all systems.
    pub components: &'w mut ComponentStore,
    /// Viewport and screen shake.
    pub camera: &'w mut Camera,
}

impl<'w> TickContext<'w> {
    /// Assembles a context from its parts.
    pub fn new(
        tick: u64,
        registry: &'w mut EntityRegistry,
        components: &'w mut ComponentStore,
        input: &'w InputState,
        camera: &'w mut Camera,
    ) -> Self {
        Self {
            tick,
            registry,
            input,
            components,
            camera,
        }
    }

    /// Number of the tick being run (0 for the first).
    #[inline]
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Latched input for this tick.
    #[inline]
    #[must_use]
    pub const fn input(&self) -> &InputState {
        self.input
    }

    /// Creates an entity and gives it storage. Visible to later systems
    /// in the same tick.
    pub fn spawn(&mut self) -> Entity {
        let entity = self.registry.create();
        self.components.register(entity);
        entity
    }

    /// Removes `entity` and all of its components. No-op if already gone.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        self.components.remove_entity(entity)
    }
}

/// A unit of per-tick behavior.
pub trait System {
    /// Advances this system by `dt` seconds.
    ///
    /// # Errors
    ///
    /// A returned error stops the rest of the tick's pass.
    fn update(&mut self, dt: f64, ctx: &mut TickContext<'_>) -> SystemResult;

    /// Name used in logs and errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Adapts a closure into a [`System`].
///
/// ```rust,ignore
/// world.register_system(FnSystem::new("gravity", |dt, ctx| {
///     // ...
///     Ok(())
/// }));
/// ```
pub struct FnSystem<F> {
    name: String,
    func: F,
}

impl<F> FnSystem<F>
where
    F: FnMut(f64, &mut TickContext<'_>) -> SystemResult,
{
    /// Wraps `func` under `name`.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> System for FnSystem<F>
where
    F: FnMut(f64, &mut TickContext<'_>) -> SystemResult,
{
    fn update(&mut self, dt: f64, ctx: &mut TickContext<'_>) -> SystemResult {
        (self.func)(dt, ctx)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered list of systems.
///
/// Append-only: no deduplication, no priorities, no removal.
#[derive(Default)]
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `system` after every system already registered.
    pub fn register<S: System + 'static>(&mut self, system: S) {
        self.register_boxed(Box::new(system));
    }

    /// Appends an already-boxed system.
    pub fn register_boxed(&mut self, system: Box<dyn System>) {
        debug!(
            system = system.name(),
            index = self.systems.len(),
            "registered system"
        );
        self.systems.push(system);
    }

    /// Number of registered systems.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether no system is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Names of the registered systems, in run order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.systems.iter().map(|s| s.name())
    }

    /// Runs every system once, in registration order, with the same `dt`.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::SystemFailed`] for the first system that fails.
    /// Systems after it are not run. Panics inside a system are not caught
    /// here; they unwind to the caller.
    pub fn run_tick(&mut self, dt: f64, ctx: &mut TickContext<'_>) -> Result<(), TickError> {
        for (index, system) in self.systems.iter_mut().enumerate() {
            if let Err(source) = system.update(dt, ctx) {
                error!(
                    system = system.name(),
                    index,
                    tick = ctx.tick(),
                    error = %source,
                    "system failed, aborting tick"
                );
                return Err(TickError::SystemFailed {
                    system: system.name().to_owned(),
                    index,
                    tick: ctx.tick(),
                    source,
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
