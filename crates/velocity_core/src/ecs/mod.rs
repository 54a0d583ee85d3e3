//! # Entity Component System
//!
//! A small, deterministic ECS.
//!
//! ## Design Philosophy
//!
//! - Entity ids come from a monotonic counter and are never reused
//! - Components are named, tagged values stored in dense per-entity slots
//! - Systems run in registration order, once per tick, on one thread
//! - Absence is a value (`None`), not an error

mod component;
mod entity;
mod storage;
mod system;
mod world;

pub use component::{ComponentKind, ComponentValue};
pub use entity::{Entity, EntityRegistry};
pub use storage::ComponentStore;
pub use system::{FnSystem, Scheduler, System, TickContext};
pub use world::{World, WorldSnapshot};
