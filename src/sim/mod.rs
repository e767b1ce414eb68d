//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame time comes from the caller
//! - Seeded RNG only
//! - Stable iteration order (bricks and power-ups in insertion order)
//! - No rendering, audio or platform dependencies

pub mod ball;
pub mod collision;
pub mod effects;
pub mod entity;
pub mod level;
pub mod particles;
pub mod powerup;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use collision::{Collision, Direction, box_overlap, circle_box_collision};
pub use effects::{EffectRegistry, PostEffects};
pub use entity::{Entity, Spatial};
pub use level::{Level, LevelError, Tile, TileGrid, parse_tile_grid};
pub use particles::{Particle, ParticleGenerator};
pub use powerup::{PowerUp, PowerUpKind};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{process_input, tick, update};
