//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick is the only unit of time
//! - Seeded RNG only
//! - Stable iteration order (insertion order of bodies)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod emitter;
pub mod scoreboard;
pub mod state;
pub mod tick;

pub use body::{AdvanceOutcome, Arena, Body, BodyId, BodyKind};
pub use collision::{CollisionReport, Contact, Effect, HitEvent, Resolver, overlaps};
pub use emitter::Emitter;
pub use scoreboard::{Banner, Scoreboard};
pub use state::{BodyView, EmitterPose, GamePhase, World, WorldSnapshot};
pub use tick::{TickInput, TickReport, tick};
