//! World state and session lifecycle
//!
//! The world owns every live body, the cannon, score, magazine and banner.
//! It is created once per session and handed explicitly to whoever drives
//! the tick loop.

use std::collections::HashSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Arena, Body, BodyId, BodyKind, TARGET_PALETTE};
use super::collision::{Resolver, removal_set};
use super::emitter::Emitter;
use super::scoreboard::{Banner, Scoreboard};
use crate::consts::*;
use crate::error::{Result, SimError};
use crate::settings::GameConfig;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Targets remain
    Playing,
    /// Every target is gone; firing is rejected until restart
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) config: GameConfig,
    pub(crate) arena: Arena,
    /// Live bodies in insertion order
    pub(crate) bodies: Vec<Body>,
    pub(crate) emitter: Emitter,
    pub(crate) score: i64,
    pub(crate) bullet_budget: u32,
    pub(crate) banner: Option<Banner>,
    pub(crate) phase: GamePhase,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl World {
    /// Create a session and seed its targets
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let arena = Arena::new(config.arena_width, config.arena_height);
        let emitter = Self::home_emitter(&config);
        let mut world = Self {
            rng: Pcg32::seed_from_u64(config.seed),
            bullet_budget: config.bullet_budget,
            arena,
            emitter,
            bodies: Vec::new(),
            score: 0,
            banner: None,
            phase: GamePhase::Playing,
            time_ticks: 0,
            next_id: 1,
            config,
        };
        world.seed_targets(world.config.seed_count)?;
        log::info!(
            "New world {}x{} with {} targets, {} bullets (seed {})",
            world.arena.width,
            world.arena.height,
            world.target_count(),
            world.bullet_budget,
            world.config.seed
        );
        Ok(world)
    }

    /// Cannon centered on the floor
    fn home_emitter(config: &GameConfig) -> Emitter {
        Emitter::new(Vec2::new(config.arena_width / 2.0, 0.0), &config.emitter)
    }

    /// Allocate a new body ID
    pub fn next_body_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Start a fresh session with the same config
    pub fn restart(&mut self) -> Result<()> {
        log::info!("Restarting game (final score {})", self.score);
        self.bodies.clear();
        self.score = 0;
        self.bullet_budget = self.config.bullet_budget;
        self.banner = None;
        self.phase = GamePhase::Playing;
        self.emitter = Self::home_emitter(&self.config);
        self.seed_targets(self.config.seed_count)?;
        Ok(())
    }

    /// Drop `count` targets in from the floor at random positions and sizes
    pub fn seed_targets(&mut self, count: u32) -> Result<Vec<BodyId>> {
        let mut ids = Vec::with_capacity(count as usize);
        for i in 0..count {
            let radius = TARGET_MIN_RADIUS + self.rng.random::<f32>() * TARGET_RADIUS_SPREAD;
            let x = self.rng.random::<f32>() * (self.arena.width - radius);
            let color = TARGET_PALETTE[self.rng.random_range(0..TARGET_PALETTE.len())];
            let vel = Vec2::new(1.0 + i as f32, TARGET_LAUNCH_VY);

            let id = self.next_body_id();
            let body = Body::target(id, Vec2::new(x, radius), vel, radius)?.with_color(color);
            self.bodies.push(body);
            ids.push(id);
        }
        if count > 0 && self.phase == GamePhase::GameOver {
            self.phase = GamePhase::Playing;
        }
        Ok(ids)
    }

    /// Add a body built elsewhere; it receives a fresh id
    pub fn spawn(&mut self, mut body: Body) -> BodyId {
        let id = self.next_body_id();
        body.id = id;
        self.bodies.push(body);
        id
    }

    /// Add a restrained target
    pub fn spawn_target(&mut self, pos: Vec2, vel: Vec2, radius: f32) -> Result<BodyId> {
        let id = self.next_body_id();
        self.bodies.push(Body::target(id, pos, vel, radius)?);
        Ok(id)
    }

    /// Fire the cannon
    pub fn fire(&mut self) -> Result<BodyId> {
        if self.phase == GamePhase::GameOver {
            return Err(SimError::GameOver);
        }
        if self.bullet_budget == 0 {
            return Err(SimError::OutOfAmmo);
        }
        let id = self.next_body_id();
        self.bodies.push(self.emitter.launch(id));
        self.bullet_budget -= 1;
        log::debug!("Fired bullet {} ({} left)", id, self.bullet_budget);
        Ok(id)
    }

    /// Remove bodies by id in one pass. Unknown ids are ignored.
    pub fn remove_bodies(&mut self, ids: &[BodyId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let doomed = removal_set(ids);
        let before = self.bodies.len();
        self.bodies.retain(|b| !doomed.contains(&b.id));
        before - self.bodies.len()
    }

    /// Drop every body already marked dead
    pub(crate) fn sweep_dead(&mut self) -> usize {
        let before = self.bodies.len();
        self.bodies.retain(|b| b.alive);
        before - self.bodies.len()
    }

    /// Assert body invariants in debug builds; repair them in release
    pub(crate) fn enforce_invariants(&mut self) {
        debug_assert!(
            self.bodies.iter().all(|b| b.radius > 0.0),
            "live body with non-positive radius"
        );
        debug_assert!(
            {
                let mut ids: Vec<_> = self.bodies.iter().map(|b| b.id).collect();
                ids.sort_unstable();
                ids.windows(2).all(|w| w[0] != w[1])
            },
            "duplicate live body ids"
        );
        self.bodies.retain(|b| b.radius > 0.0);
        let mut seen = HashSet::with_capacity(self.bodies.len());
        self.bodies.retain(|b| {
            let first = seen.insert(b.id);
            if !first {
                log::warn!("Dropping body with duplicate id {}", b.id);
            }
            first
        });
    }

    pub(crate) fn resolver(&self) -> Resolver {
        Resolver::new(self.config.overlap, self.config.approach)
    }

    // === Read accessors ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Input surface: angle, power and thrust live on the cannon
    pub fn emitter_mut(&mut self) -> &mut Emitter {
        &mut self.emitter
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn bullets_remaining(&self) -> u32 {
        self.bullet_budget
    }

    pub fn target_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.kind == BodyKind::Target).count()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            score: self.score,
            bullets_remaining: self.bullet_budget,
            target_count: self.target_count(),
        }
    }

    /// The banner, if it is still showing at `now_ms`
    pub fn banner_at(&self, now_ms: f64) -> Option<&Banner> {
        self.banner.as_ref().filter(|b| b.is_visible(now_ms))
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self, now_ms: f64) -> WorldSnapshot {
        WorldSnapshot {
            bodies: self
                .bodies
                .iter()
                .map(|b| BodyView {
                    id: b.id,
                    kind: b.kind,
                    pos: b.pos,
                    radius: b.radius,
                    color: b.color,
                })
                .collect(),
            emitter: EmitterPose {
                base: self.emitter.pos,
                nozzle: self.emitter.nozzle(),
                angle: self.emitter.angle,
                power: self.emitter.power,
            },
            scoreboard: self.scoreboard(),
            banner: self.banner_at(now_ms).cloned(),
            phase: self.phase,
            arena_width: self.arena.width,
            arena_height: self.arena.height,
        }
    }
}

/// A body as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub id: BodyId,
    pub kind: BodyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
}

/// Cannon pose for drawing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmitterPose {
    pub base: Vec2,
    pub nozzle: Vec2,
    pub angle: f32,
    pub power: f32,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub bodies: Vec<BodyView>,
    pub emitter: EmitterPose,
    pub scoreboard: Scoreboard,
    pub banner: Option<Banner>,
    pub phase: GamePhase,
    pub arena_width: f32,
    pub arena_height: f32,
}
