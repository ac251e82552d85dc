//! The player's cannon
//!
//! Sits on the arena floor, slides horizontally under an applied force with
//! friction, and launches bullets from the tip of its barrel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, BodyId};
use crate::settings::EmitterConfig;
use crate::{heading, normalize_degrees};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emitter {
    /// Base of the barrel
    pub pos: Vec2,
    /// Barrel angle in degrees, 0 = arena right
    pub angle: f32,
    /// Launch speed of bullets (units/tick)
    pub power: f32,
    pub length: f32,
    /// Horizontal push applied every tick (set from input)
    pub force_x: f32,
    pub friction_x: f32,
    pub vel_x: f32,
    pub max_speed_x: f32,
    pub vel_y: f32,
    pub mobile_x: bool,
    pub mobile_y: bool,
}

impl Emitter {
    pub fn new(pos: Vec2, config: &EmitterConfig) -> Self {
        Self {
            pos,
            angle: normalize_degrees(config.angle),
            power: config.power,
            length: config.length,
            force_x: 0.0,
            friction_x: config.friction_x,
            vel_x: 0.0,
            max_speed_x: config.max_speed_x,
            vel_y: 0.0,
            mobile_x: config.mobile_x,
            mobile_y: config.mobile_y,
        }
    }

    /// Unit vector the barrel points along
    #[inline]
    pub fn direction(&self) -> Vec2 {
        heading(self.angle)
    }

    /// Tip of the barrel, where bullets appear
    #[inline]
    pub fn nozzle(&self) -> Vec2 {
        self.pos + self.direction() * self.length
    }

    pub fn aim(&mut self, angle_deg: f32) {
        if angle_deg.is_finite() {
            self.angle = normalize_degrees(angle_deg);
        }
    }

    pub fn set_power(&mut self, power: f32) {
        if power.is_finite() {
            self.power = power.max(0.0);
        }
    }

    /// Move one tick
    pub fn advance(&mut self, arena_width: f32) {
        if self.mobile_x {
            self.vel_x += self.force_x;

            if self.vel_x.abs() <= self.friction_x {
                self.vel_x = 0.0;
            } else {
                self.vel_x -= self.friction_x * self.vel_x.signum();
            }
            self.vel_x = self.vel_x.clamp(-self.max_speed_x, self.max_speed_x);

            self.pos.x += self.vel_x;
            if self.pos.x > arena_width {
                self.pos.x = arena_width;
                self.vel_x = 0.0;
            } else if self.pos.x < 0.0 {
                self.pos.x = 0.0;
                self.vel_x = 0.0;
            }
        }
        if self.mobile_y {
            self.pos.y += self.vel_y;
        }
    }

    /// Build the bullet this cannon would fire right now
    pub fn launch(&self, id: BodyId) -> Body {
        Body::bullet(id, self.nozzle(), self.direction() * self.power)
    }
}
