//! Game configuration
//!
//! Loaded from a JSON file by the native runner; every field has a default
//! matching the original arcade tuning.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// How gravity decelerates a body each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GravityProfile {
    /// `vy -= density * radius * 9.8` (big bodies fall faster)
    #[default]
    DensityScaled,
    /// `vy -= decel` regardless of size
    Constant { decel: f32 },
}

impl GravityProfile {
    /// Velocity lost this tick for a body of the given density and radius
    #[inline]
    pub fn decel(&self, density: f32, radius: f32) -> f32 {
        match *self {
            GravityProfile::DensityScaled => density * radius * GRAVITY,
            GravityProfile::Constant { decel } => decel,
        }
    }
}

/// Broad overlap test used by the collision resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapTest {
    /// Axis-aligned boxes around each circle; looser than true overlap
    #[default]
    BoundingBox,
    /// Exact circle-circle distance test
    Circle,
}

impl OverlapTest {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlapTest::BoundingBox => "bounding_box",
            OverlapTest::Circle => "circle",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bounding_box" | "box" | "aabb" => Some(OverlapTest::BoundingBox),
            "circle" => Some(OverlapTest::Circle),
            _ => None,
        }
    }
}

/// Decides whether two overlapping targets bounce off each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApproachTest {
    /// One target must sit strictly up-and-right of the other.
    /// Diagonal pairs (up-left / down-right) never bounce.
    #[default]
    UpperRight,
    /// Bounce whenever the targets are closing on each other
    RelativeVelocity,
}

impl ApproachTest {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApproachTest::UpperRight => "upper_right",
            ApproachTest::RelativeVelocity => "relative_velocity",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "upper_right" | "quadrant" => Some(ApproachTest::UpperRight),
            "relative_velocity" | "velocity" => Some(ApproachTest::RelativeVelocity),
            _ => None,
        }
    }
}

/// Cannon tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Starting angle in degrees (90 = straight up)
    pub angle: f32,
    /// Bullet speed (units/tick)
    pub power: f32,
    /// Barrel length; bullets spawn at its tip
    pub length: f32,
    pub friction_x: f32,
    pub max_speed_x: f32,
    pub mobile_x: bool,
    pub mobile_y: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            angle: EMITTER_ANGLE,
            power: EMITTER_POWER,
            length: EMITTER_LENGTH,
            friction_x: EMITTER_FRICTION_X,
            max_speed_x: EMITTER_MAX_SPEED_X,
            mobile_x: true,
            mobile_y: false,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Session ===
    /// Targets created on start/restart
    pub seed_count: u32,
    /// Bullets available per session
    pub bullet_budget: u32,
    /// RNG seed for target placement
    pub seed: u64,
    /// How long the hit banner stays up (ms)
    pub banner_ms: f64,

    // === Physics ===
    pub gravity: GravityProfile,
    pub overlap: OverlapTest,
    pub approach: ApproachTest,

    pub emitter: EmitterConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            seed_count: SEED_COUNT,
            bullet_budget: BULLET_BUDGET,
            seed: 0,
            banner_ms: BANNER_MS,
            gravity: GravityProfile::default(),
            overlap: OverlapTest::default(),
            approach: ApproachTest::default(),
            emitter: EmitterConfig::default(),
        }
    }
}

impl GameConfig {
    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.arena_width.is_finite() && self.arena_width > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "arena_width must be positive, got {}",
                self.arena_width
            )));
        }
        if !(self.arena_height.is_finite() && self.arena_height > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "arena_height must be positive, got {}",
                self.arena_height
            )));
        }
        // Seeded targets pick x in [0, width - radius)
        if self.arena_width <= TARGET_MIN_RADIUS + TARGET_RADIUS_SPREAD {
            return Err(SimError::InvalidConfig(format!(
                "arena_width {} is too narrow for targets",
                self.arena_width
            )));
        }
        if !(self.banner_ms.is_finite() && self.banner_ms >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "banner_ms must be non-negative, got {}",
                self.banner_ms
            )));
        }
        if let GravityProfile::Constant { decel } = self.gravity {
            if !decel.is_finite() {
                return Err(SimError::InvalidConfig("gravity decel must be finite".into()));
            }
        }
        let e = &self.emitter;
        if !(e.power.is_finite() && e.power >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "emitter power must be non-negative, got {}",
                e.power
            )));
        }
        if !(e.angle.is_finite() && e.length.is_finite()) {
            return Err(SimError::InvalidConfig("emitter pose must be finite".into()));
        }
        if !(e.friction_x >= 0.0 && e.max_speed_x >= 0.0) {
            return Err(SimError::InvalidConfig(
                "emitter friction and max speed must be non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from disk. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let config = Self::from_json(&json)?;
                log::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Apply a `name=value` command-line override for a resolver mode
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        let unknown = || SimError::InvalidConfig(format!("unknown {} mode '{}'", name, value));
        match name {
            "overlap" => {
                self.overlap = OverlapTest::parse(value).ok_or_else(unknown)?;
                log::info!("Overlap test: {}", self.overlap.as_str());
            }
            "approach" => {
                self.approach = ApproachTest::parse(value).ok_or_else(unknown)?;
                log::info!("Approach test: {}", self.approach.as_str());
            }
            _ => {
                return Err(SimError::InvalidConfig(format!("unknown option '{}'", name)));
            }
        }
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "seed_count": 3, "overlap": "circle" }"#).unwrap();
        assert_eq!(config.seed_count, 3);
        assert_eq!(config.overlap, OverlapTest::Circle);
        assert_eq!(config.bullet_budget, BULLET_BUDGET);
        assert_eq!(config.gravity, GravityProfile::DensityScaled);
    }

    #[test]
    fn test_constant_gravity_json() {
        let config =
            GameConfig::from_json(r#"{ "gravity": { "kind": "constant", "decel": 0.25 } }"#)
                .unwrap();
        assert_eq!(config.gravity, GravityProfile::Constant { decel: 0.25 });
        assert_eq!(config.gravity.decel(123.0, 456.0), 0.25);
    }

    #[test]
    fn test_rejects_bad_arena() {
        let err = GameConfig::from_json(r#"{ "arena_width": -5.0 }"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SimError::Parse(_)));
    }

    #[test]
    fn test_density_scaled_decel() {
        let g = GravityProfile::DensityScaled;
        assert!((g.decel(0.001, 20.0) - 0.196).abs() < 1e-6);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(OverlapTest::parse("AABB"), Some(OverlapTest::BoundingBox));
        assert_eq!(ApproachTest::parse("velocity"), Some(ApproachTest::RelativeVelocity));
        assert_eq!(ApproachTest::parse("nope"), None);
        assert_eq!(ApproachTest::UpperRight.as_str(), "upper_right");
    }

    #[test]
    fn test_set_option_switches_resolver_modes() {
        let mut config = GameConfig::default();
        config.set_option("overlap", "circle").unwrap();
        config.set_option("approach", "Velocity").unwrap();
        assert_eq!(config.overlap, OverlapTest::Circle);
        assert_eq!(config.approach, ApproachTest::RelativeVelocity);

        let err = config.set_option("overlap", "square").unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
        assert!(config.set_option("gravity", "off").is_err());
        // A rejected value leaves the previous mode in place
        assert_eq!(config.overlap, OverlapTest::Circle);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "cannon_gallery_config_{}.json",
            std::process::id()
        ));
        let mut config = GameConfig::default();
        config.seed = 42;
        config.approach = ApproachTest::RelativeVelocity;
        config.save(&path).unwrap();

        let loaded = GameConfig::load(&path).unwrap();
        assert_eq!(loaded.seed, 42);
        assert_eq!(loaded.approach, ApproachTest::RelativeVelocity);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = GameConfig::load("/definitely/not/here/config.json").unwrap();
        assert_eq!(config.seed_count, SEED_COUNT);
    }
}
