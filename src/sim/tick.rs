//! Per-tick simulation step
//!
//! The host calls `tick` once per display refresh with the current clock.
//! Velocities are in units per tick, so the tick itself is the time step.

use super::body::{AdvanceOutcome, BodyId};
use super::collision::{Contact, HitEvent};
use super::scoreboard::Banner;
use super::state::{GamePhase, World};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New cannon angle in degrees
    pub aim: Option<f32>,
    /// New bullet power
    pub power: Option<f32>,
    /// New horizontal force on the cannon (-1 left, +1 right, 0 none)
    pub thrust: Option<f32>,
    /// Fire one bullet (click/tap/space)
    pub fire: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub fired: Option<BodyId>,
    /// Bodies that left the arena
    pub lost: Vec<BodyId>,
    /// Bodies consumed by hits
    pub destroyed: Vec<BodyId>,
    pub contacts: Vec<Contact>,
    pub hits: Vec<HitEvent>,
    /// Net score change this tick
    pub score_delta: i64,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput, now_ms: f64) -> TickReport {
    let mut report = TickReport::default();
    let scoring = world.phase == GamePhase::Playing;

    // Input
    if let Some(angle) = input.aim {
        world.emitter.aim(angle);
    }
    if let Some(power) = input.power {
        world.emitter.set_power(power);
    }
    if let Some(thrust) = input.thrust {
        world.emitter.force_x = thrust;
    }
    if input.fire {
        match world.fire() {
            Ok(id) => report.fired = Some(id),
            Err(e) => log::debug!("Fire rejected: {}", e),
        }
    }

    world.time_ticks += 1;

    // Motion
    let arena = world.arena;
    let gravity = world.config.gravity;
    for body in world.bodies.iter_mut().filter(|b| b.alive) {
        let outcome = body.advance(&arena, &gravity);
        if outcome.is_lost() {
            report.lost.push(body.id);
            if outcome == AdvanceOutcome::LostBelow && scoring {
                // Every dropped body costs a point
                report.score_delta -= 1;
            }
            log::debug!(
                "{:?} {} lost at ({:.1}, {:.1})",
                body.kind,
                body.id,
                body.pos.x,
                body.pos.y
            );
        }
    }
    world.sweep_dead();

    // Collisions
    let resolver = world.resolver();
    let collisions = resolver.resolve(&mut world.bodies);
    if scoring {
        report.score_delta += collisions.score_delta;
        if let Some(hit) = collisions.last_hit() {
            world.banner = Some(Banner::for_hit(hit, now_ms, world.config.banner_ms));
        }
    }
    world.remove_bodies(&collisions.removed);
    world.enforce_invariants();

    world.score += report.score_delta;
    report.destroyed = collisions.removed;
    report.contacts = collisions.contacts;
    report.hits = collisions.hits;

    // Cannon
    world.emitter.advance(arena.width);

    // Game over check
    if world.phase == GamePhase::Playing && world.target_count() == 0 {
        world.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks: score {}, {} bullets left",
            world.time_ticks,
            world.score,
            world.bullet_budget
        );
    }

    // Banner expiry
    if world
        .banner
        .as_ref()
        .is_some_and(|b| b.expires_at_ms <= now_ms)
    {
        world.banner = None;
    }

    report
}

impl World {
    /// Advance one tick with no player input
    pub fn step(&mut self, now_ms: f64) -> TickReport {
        tick(self, &TickInput::default(), now_ms)
    }
}
