//! Cannon Gallery - a 2D cannon-and-targets arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, scoring, lifecycle)
//! - `renderer`: Drawing-surface abstraction fed from world snapshots
//! - `settings`: Data-driven game configuration
//! - `error`: Error types shared by the simulation and config layers

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::GameConfig;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Gravitational constant used by the density-scaled gravity profile
    pub const GRAVITY: f32 = 9.8;

    /// Arena defaults (matches the original 1600x960 canvas)
    pub const ARENA_WIDTH: f32 = 1600.0;
    pub const ARENA_HEIGHT: f32 = 960.0;
    /// Bodies may rise this far above the arena (as a multiple of its height)
    pub const CEILING_OVERSHOOT: f32 = 1.5;

    /// Target defaults
    pub const TARGET_DENSITY: f32 = 0.001;
    pub const TARGET_MIN_RADIUS: f32 = 12.0;
    pub const TARGET_RADIUS_SPREAD: f32 = 20.0;
    pub const TARGET_LAUNCH_VY: f32 = 15.0;
    pub const SEED_COUNT: u32 = 10;

    /// Bullet defaults
    pub const BULLET_DENSITY: f32 = 0.001;
    pub const BULLET_RADIUS: f32 = 15.0;
    pub const BULLET_BUDGET: u32 = 100;

    /// Hit resolution
    pub const HIT_SHRINK: f32 = 5.0;
    pub const DESTROY_RADIUS: f32 = 10.0;
    pub const HIT_KICK_VY: f32 = 5.0;
    pub const HIT_VALUE_NUMERATOR: f32 = 100.0;

    /// Banner lifetime after a scoring hit (milliseconds)
    pub const BANNER_MS: f64 = 2000.0;
    /// Banner offset from the struck target
    pub const BANNER_OFFSET_X: f32 = -50.0;
    pub const BANNER_OFFSET_Y: f32 = -20.0;

    /// Emitter (cannon) defaults
    pub const EMITTER_ANGLE: f32 = 90.0;
    pub const EMITTER_POWER: f32 = 5.0;
    pub const EMITTER_LENGTH: f32 = 40.0;
    pub const EMITTER_FRICTION_X: f32 = 0.1;
    pub const EMITTER_MAX_SPEED_X: f32 = 10.0;

    /// Fixed host tick rate used by the native runner
    pub const TICK_MS: f64 = 1000.0 / 60.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit direction for an angle in degrees (0° = +x, 90° = +y)
#[inline]
pub fn heading(angle_deg: f32) -> Vec2 {
    let theta = angle_deg.to_radians();
    Vec2::new(theta.cos(), theta.sin())
}
