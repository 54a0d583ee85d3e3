//! # Seeded Demonstration
//!
//! A small set of systems for headless runs and soak tests:
//!
//! | System   | Reads                      | Writes                          |
//! |----------|----------------------------|---------------------------------|
//! | spawner  | tick, input                | new entities, camera shake      |
//! | drift    | `position`, `velocity`     | `position`, `velocity`          |
//! | lifetime | `lifetime`                 | `lifetime`, removes entities    |
//!
//! Every random draw comes from a [`DeterministicSource`] seeded from the
//! run seed, so two runs with the same seed and input produce the same world.

use std::str::FromStr;

use tracing::debug;
use velocity_core::{DeterministicSource, Entity, System, SystemResult, TickContext, World};
use velocity_shared::{ConfigError, GameConfig, Vec2};

/// Component names used by the demonstration.
pub mod names {
    /// `Vec2` world position.
    pub const POSITION: &str = "position";
    /// `Vec2` velocity in units per second.
    pub const VELOCITY: &str = "velocity";
    /// `Float` seconds left to live.
    pub const LIFETIME: &str = "lifetime";
    /// `Flag` set on entities spawned by the fire action.
    pub const PROJECTILE: &str = "projectile";
}

/// Stream id of the spawner's source. Sits far above any wave number so
/// it never replays a wave's sequence.
pub const SPAWN_STREAM: u64 = 1 << 48;

/// How entities behave at the arena edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ArenaMode {
    /// Leaving one edge re-enters from the opposite one.
    #[default]
    Wrap,
    /// Edges are walls; velocity reflects.
    Bounded,
}

impl FromStr for ArenaMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrap" => Ok(Self::Wrap),
            "bounded" => Ok(Self::Bounded),
            other => Err(ConfigError::Invalid(format!(
                "gameplay.arena_mode must be \"wrap\" or \"bounded\", got {other:?}"
            ))),
        }
    }
}

/// Rectangular play area anchored at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    /// Width and height.
    pub size: Vec2,
    /// Edge behavior.
    pub mode: ArenaMode,
}

impl Arena {
    /// Builds the arena from display size and `gameplay.arena_mode`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an unknown arena mode.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            size: Vec2::new(
                f64::from(config.display.width),
                f64::from(config.display.height),
            ),
            mode: config.gameplay.arena_mode.parse()?,
        })
    }

    /// Applies the edge rule to one body.
    #[must_use]
    pub fn confine(&self, position: Vec2, velocity: Vec2) -> (Vec2, Vec2) {
        match self.mode {
            ArenaMode::Wrap => (
                Vec2::new(wrap(position.x, self.size.x), wrap(position.y, self.size.y)),
                velocity,
            ),
            ArenaMode::Bounded => {
                let (x, vx) = reflect(position.x, velocity.x, self.size.x);
                let (y, vy) = reflect(position.y, velocity.y, self.size.y);
                (Vec2::new(x, y), Vec2::new(vx, vy))
            }
        }
    }
}

fn wrap(p: f64, max: f64) -> f64 {
    let wrapped = p.rem_euclid(max);
    // rem_euclid of a tiny negative rounds up to `max`
    if wrapped >= max {
        0.0
    } else {
        wrapped
    }
}

fn reflect(p: f64, v: f64, max: f64) -> (f64, f64) {
    if p < 0.0 {
        (0.0, v.abs())
    } else if p > max {
        (max, -v.abs())
    } else {
        (p, v)
    }
}

/// Spawns a drifting body every `interval` ticks and a projectile on fire.
pub struct Spawner {
    rng: DeterministicSource,
    arena: Arena,
    interval: u64,
    max_speed: f64,
    lifetime: (f64, f64),
}

impl Spawner {
    /// Creates a spawner drawing from the run seed's spawn stream.
    #[must_use]
    pub fn new(seed: u64, arena: Arena) -> Self {
        Self {
            rng: DeterministicSource::for_stream(seed, SPAWN_STREAM),
            arena,
            interval: 30,
            max_speed: 120.0,
            lifetime: (1.0, 4.0),
        }
    }

    /// Ticks between spawns (at least 1).
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    fn spawn_body(&mut self, ctx: &mut TickContext<'_>) -> Entity {
        let position = Vec2::new(
            self.rng.range_f64(0.0, self.arena.size.x),
            self.rng.range_f64(0.0, self.arena.size.y),
        );
        let velocity = Vec2::new(
            self.rng.range_f64(-self.max_speed, self.max_speed),
            self.rng.range_f64(-self.max_speed, self.max_speed),
        );
        let lifetime = self.rng.range_f64(self.lifetime.0, self.lifetime.1);

        let e = ctx.spawn();
        ctx.components.add(e, names::POSITION, position);
        ctx.components.add(e, names::VELOCITY, velocity);
        ctx.components.add(e, names::LIFETIME, lifetime);
        e
    }
}

impl System for Spawner {
    fn update(&mut self, _dt: f64, ctx: &mut TickContext<'_>) -> SystemResult {
        if ctx.tick() % self.interval == 0 {
            let e = self.spawn_body(ctx);
            debug!(tick = ctx.tick(), entity = %e, "spawned body");
        }

        if ctx.input().fire {
            let center = self.arena.size * 0.5;
            let e = ctx.spawn();
            ctx.components.add(e, names::POSITION, center);
            ctx.components.add(e, names::VELOCITY, Vec2::new(0.0, -self.max_speed * 3.0));
            ctx.components.add(e, names::LIFETIME, 0.5);
            ctx.components.add(e, names::PROJECTILE, true);
            ctx.camera.shake(4.0, 0.15);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "spawner"
    }
}

/// Integrates `position` by `velocity` and applies the arena edge rule.
pub struct Drift {
    arena: Arena,
}

impl Drift {
    /// Creates the system for `arena`.
    #[must_use]
    pub const fn new(arena: Arena) -> Self {
        Self { arena }
    }
}

impl System for Drift {
    fn update(&mut self, dt: f64, ctx: &mut TickContext<'_>) -> SystemResult {
        let movers: Vec<(Entity, Vec2)> = ctx
            .components
            .with_component(names::VELOCITY)
            .filter_map(|(e, v)| v.as_vec2().map(|v| (e, v)))
            .collect();

        for (e, velocity) in movers {
            let position = ctx.components.require::<Vec2>(e, names::POSITION)?;
            let (position, velocity) = self.arena.confine(position + velocity * dt, velocity);
            ctx.components.add(e, names::POSITION, position);
            ctx.components.add(e, names::VELOCITY, velocity);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "drift"
    }
}

/// Counts `lifetime` down and removes entities that run out.
#[derive(Default)]
pub struct Lifetime;

impl System for Lifetime {
    fn update(&mut self, dt: f64, ctx: &mut TickContext<'_>) -> SystemResult {
        let mortal: Vec<(Entity, f64)> = ctx
            .components
            .with_component(names::LIFETIME)
            .filter_map(|(e, v)| v.as_float().map(|t| (e, t)))
            .collect();

        for (e, left) in mortal {
            let left = left - dt;
            if left <= 0.0 {
                ctx.despawn(e);
            } else {
                ctx.components.add(e, names::LIFETIME, left);
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "lifetime"
    }
}

/// Registers spawner, drift and lifetime on `world`, in that order.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for an unknown arena mode.
pub fn install(world: &mut World, config: &GameConfig) -> Result<(), ConfigError> {
    let arena = Arena::from_config(config)?;
    world.register_system(Spawner::new(config.gameplay.seed, arena));
    world.register_system(Drift::new(arena));
    world.register_system(Lifetime);
    Ok(())
}
