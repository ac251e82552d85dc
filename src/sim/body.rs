//! Bodies: targets and bullets
//!
//! A body moves in arena space (y-up) with velocity measured in units per
//! tick. Boundary handling depends on whether the body is restrained.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::settings::GravityProfile;

/// Stable identity for a body, unique among live bodies of a world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a body is, for collision classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Target,
    Bullet,
}

/// Arena bounds a body moves within
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Highest y a body may reach before it bounces or is lost
    #[inline]
    pub fn ceiling(&self) -> f32 {
        self.height * CEILING_OVERSHOOT
    }
}

/// Result of a single `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Still in play (possibly after bouncing)
    InPlay,
    /// Left through the left or right wall
    LostSide,
    /// Dropped through the floor; costs the player a point
    LostBelow,
    /// Flew over the ceiling allowance
    LostAbove,
}

impl AdvanceOutcome {
    pub fn is_lost(&self) -> bool {
        !matches!(self, AdvanceOutcome::InPlay)
    }
}

/// Fill palette for targets (0xRRGGBB)
pub const TARGET_PALETTE: [u32; 6] = [
    0xFF0000, // red
    0x0000FF, // blue
    0x008000, // green
    0xFFA500, // orange
    0x800080, // purple
    0xFFFF00, // yellow
];

pub const BULLET_COLOR: u32 = 0x000000;

/// A simulated circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Assigned by the world on spawn; read through `id()`
    pub(crate) id: BodyId,
    pub kind: BodyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub density: f32,
    /// Bounce off the arena edges instead of leaving it
    pub restrained: bool,
    pub alive: bool,
    pub color: u32,
}

impl Body {
    /// Create a body, rejecting radii that would break hit scoring
    pub fn new(id: BodyId, kind: BodyKind, pos: Vec2, vel: Vec2, radius: f32) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::InvalidRadius(radius));
        }
        let (density, restrained, color) = match kind {
            BodyKind::Target => (TARGET_DENSITY, true, TARGET_PALETTE[0]),
            BodyKind::Bullet => (BULLET_DENSITY, false, BULLET_COLOR),
        };
        Ok(Self {
            id,
            kind,
            pos,
            vel,
            radius,
            density,
            restrained,
            alive: true,
            color,
        })
    }

    #[inline]
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// A restrained target
    pub fn target(id: BodyId, pos: Vec2, vel: Vec2, radius: f32) -> Result<Self> {
        Self::new(id, BodyKind::Target, pos, vel, radius)
    }

    /// An unrestrained bullet with the fixed bullet radius
    pub fn bullet(id: BodyId, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            kind: BodyKind::Bullet,
            pos,
            vel,
            radius: BULLET_RADIUS,
            density: BULLET_DENSITY,
            restrained: false,
            alive: true,
            color: BULLET_COLOR,
        }
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_restrained(mut self, restrained: bool) -> Self {
        self.restrained = restrained;
        self
    }

    #[inline]
    pub fn is_target(&self) -> bool {
        self.kind == BodyKind::Target
    }

    #[inline]
    pub fn is_bullet(&self) -> bool {
        self.kind == BodyKind::Bullet
    }

    /// Apply gravity, integrate one tick and enforce the arena boundary.
    ///
    /// Restrained bodies bounce softly: the reflected velocity is applied once
    /// more rather than clamping to the wall, so a fast body can sit slightly
    /// outside the arena for a tick. Unrestrained bodies are marked dead.
    pub fn advance(&mut self, arena: &Arena, gravity: &GravityProfile) -> AdvanceOutcome {
        self.vel.y -= gravity.decel(self.density, self.radius);
        self.pos += self.vel;

        let mut outcome = AdvanceOutcome::InPlay;

        if self.pos.x > arena.width || self.pos.x < 0.0 {
            if self.restrained {
                self.vel.x = -self.vel.x;
                self.pos.x += self.vel.x;
            } else {
                self.alive = false;
                outcome = AdvanceOutcome::LostSide;
            }
        }

        if self.pos.y < 0.0 {
            if self.restrained {
                self.vel.y = -self.vel.y;
                self.pos.y += self.vel.y;
            } else {
                self.alive = false;
                outcome = AdvanceOutcome::LostBelow;
            }
        } else if self.pos.y > arena.ceiling() {
            if self.restrained {
                self.vel.y = -self.vel.y;
                self.pos.y -= arena.ceiling();
            } else {
                self.alive = false;
                if outcome == AdvanceOutcome::InPlay {
                    outcome = AdvanceOutcome::LostAbove;
                }
            }
        }

        outcome
    }

    /// Point value of hitting this body: floor(100 / radius)
    #[inline]
    pub fn hit_value(&self) -> i64 {
        debug_assert!(self.radius > 0.0, "hit_value on non-positive radius");
        (HIT_VALUE_NUMERATOR / self.radius.max(f32::EPSILON)).floor() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARENA: Arena = Arena {
        width: 100.0,
        height: 100.0,
    };
    const NO_GRAVITY: GravityProfile = GravityProfile::Constant { decel: 0.0 };

    fn target_at(x: f32, y: f32, vx: f32, vy: f32) -> Body {
        Body::target(BodyId(1), Vec2::new(x, y), Vec2::new(vx, vy), 20.0).unwrap()
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert!(matches!(
            Body::target(BodyId(1), Vec2::ZERO, Vec2::ZERO, 0.0),
            Err(SimError::InvalidRadius(_))
        ));
        assert!(Body::target(BodyId(1), Vec2::ZERO, Vec2::ZERO, -3.0).is_err());
        assert!(Body::target(BodyId(1), Vec2::ZERO, Vec2::ZERO, f32::NAN).is_err());
    }

    #[test]
    fn test_density_scaled_gravity() {
        let mut body = target_at(50.0, 50.0, 0.0, 0.0);
        body.advance(&ARENA, &GravityProfile::DensityScaled);
        let expected = -(TARGET_DENSITY * 20.0 * GRAVITY);
        assert!((body.vel.y - expected).abs() < 1e-6);
        assert!((body.pos.y - (50.0 + expected)).abs() < 1e-5);
    }

    #[test]
    fn test_restrained_side_bounce_is_soft() {
        let mut body = target_at(98.0, 50.0, 5.0, 0.0);
        let outcome = body.advance(&ARENA, &NO_GRAVITY);
        assert_eq!(outcome, AdvanceOutcome::InPlay);
        assert_eq!(body.vel.x, -5.0);
        // 98 + 5 = 103, bounced back once to 98
        assert_eq!(body.pos.x, 98.0);
        assert!(body.alive);
    }

    #[test]
    fn test_restrained_floor_bounce() {
        let mut body = target_at(50.0, 2.0, 0.0, -5.0);
        body.advance(&ARENA, &NO_GRAVITY);
        assert_eq!(body.vel.y, 5.0);
        assert_eq!(body.pos.y, 2.0);
        assert!(body.alive);
    }

    #[test]
    fn test_restrained_ceiling_wraps_down() {
        let mut body = target_at(50.0, 148.0, 0.0, 5.0);
        body.advance(&ARENA, &NO_GRAVITY);
        assert_eq!(body.vel.y, -5.0);
        assert!((body.pos.y - 3.0).abs() < 1e-5);
        assert!(body.alive);
    }

    #[test]
    fn test_unrestrained_lost_below() {
        let mut body = target_at(50.0, 2.0, 0.0, -5.0).with_restrained(false);
        let outcome = body.advance(&ARENA, &NO_GRAVITY);
        assert_eq!(outcome, AdvanceOutcome::LostBelow);
        assert!(!body.alive);
    }

    #[test]
    fn test_unrestrained_lost_side_and_above() {
        let mut body = Body::bullet(BodyId(2), Vec2::new(99.0, 50.0), Vec2::new(5.0, 0.0));
        assert_eq!(body.advance(&ARENA, &NO_GRAVITY), AdvanceOutcome::LostSide);
        assert!(!body.alive);

        let mut body = Body::bullet(BodyId(3), Vec2::new(50.0, 149.0), Vec2::new(0.0, 5.0));
        assert_eq!(body.advance(&ARENA, &NO_GRAVITY), AdvanceOutcome::LostAbove);
        assert!(!body.alive);
    }

    #[test]
    fn test_corner_exit_reports_floor_loss() {
        let mut body = Body::bullet(BodyId(4), Vec2::new(1.0, 1.0), Vec2::new(-5.0, -5.0));
        assert_eq!(body.advance(&ARENA, &NO_GRAVITY), AdvanceOutcome::LostBelow);
    }

    #[test]
    fn test_hit_value() {
        assert_eq!(target_at(0.0, 0.0, 0.0, 0.0).hit_value(), 5);
        let small = Body::target(BodyId(5), Vec2::ZERO, Vec2::ZERO, 12.0).unwrap();
        assert_eq!(small.hit_value(), 8);
    }

    #[test]
    fn test_bullet_defaults() {
        let bullet = Body::bullet(BodyId(9), Vec2::ZERO, Vec2::X);
        assert!(bullet.is_bullet());
        assert!(!bullet.restrained);
        assert_eq!(bullet.radius, BULLET_RADIUS);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn restrained_bodies_never_die(
                x in 0.0f32..100.0,
                y in 0.0f32..150.0,
                vx in -40.0f32..40.0,
                vy in -40.0f32..40.0,
            ) {
                let mut body = target_at(x, y, vx, vy);
                let outcome = body.advance(&ARENA, &GravityProfile::DensityScaled);
                prop_assert!(body.alive);
                prop_assert_eq!(outcome, AdvanceOutcome::InPlay);
            }

            #[test]
            fn unrestrained_dies_only_on_exit(
                x in 0.0f32..100.0,
                y in 0.0f32..150.0,
                vx in -40.0f32..40.0,
                vy in -40.0f32..40.0,
            ) {
                let mut body = Body::bullet(BodyId(7), Vec2::new(x, y), Vec2::new(vx, vy));
                body.advance(&ARENA, &NO_GRAVITY);
                let exited = body.pos.x < 0.0
                    || body.pos.x > ARENA.width
                    || body.pos.y < 0.0
                    || body.pos.y > ARENA.ceiling();
                prop_assert_eq!(!body.alive, exited);
            }
        }
    }
}
