//! # VELOCITY Core
//!
//! Deterministic Entity Component System (ECS) for a fixed-step arcade
//! simulation:
//! - Entities are never-reused 64-bit ids
//! - Any entity may hold any named component
//! - Systems tick in registration order with a fixed delta
//! - Randomness comes from seeded sources, never from a global generator
//!
//! ## Tick Order
//!
//! The frame driver owns the real-time loop. Each tick it latches input,
//! advances the [`Camera`], then calls [`World::run_tick`]. Nothing in this
//! crate reads the clock, spawns threads or blocks.
//!
//! ## Example
//!
//! ```rust,ignore
//! use velocity_core::{Camera, FnSystem, InputState, World};
//!
//! let mut world = World::new();
//! let ship = world.create_entity();
//! world.add_component(ship, "health", 3);
//! world.register_system(FnSystem::new("noop", |_dt, _ctx| Ok(())));
//!
//! let mut camera = Camera::new();
//! camera.advance(1.0 / 60.0);
//! world.run_tick(1.0 / 60.0, &InputState::default(), &mut camera)?;
//! ```

#![deny(unsafe_code)]

pub mod camera;
pub mod ecs;
pub mod error;
pub mod input;
pub mod rng;

pub use camera::{Camera, CameraState, SHAKE_EPSILON};
pub use ecs::{
    ComponentKind, ComponentStore, ComponentValue, Entity, EntityRegistry, FnSystem, Scheduler,
    System, TickContext, World, WorldSnapshot,
};
pub use error::{SystemError, SystemResult, TickError};
pub use input::{Action, InputState};
pub use rng::DeterministicSource;
