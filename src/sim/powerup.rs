//! Falling power-up collectibles
//!
//! A destroyed brick may drop one power-up. It falls until the paddle
//! catches it (then it is active for its duration) or it leaves the bottom of
//! the play area.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Spatial};
use crate::consts::{POWERUP_SIZE, POWERUP_V0};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

/// Per-kind constants
#[derive(Debug, Clone, Copy)]
pub struct PowerUpInfo {
    pub color: Vec3,
    /// Seconds the effect lasts once caught
    pub duration: f32,
    /// One-in-`odds` chance in the spawn chain
    pub odds: u32,
}

impl PowerUpKind {
    /// Spawn chain order
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    pub const fn info(self) -> PowerUpInfo {
        match self {
            PowerUpKind::Speed => PowerUpInfo {
                color: Vec3::new(0.5, 0.5, 1.0),
                duration: 0.0,
                odds: 20,
            },
            PowerUpKind::Sticky => PowerUpInfo {
                color: Vec3::new(1.0, 0.5, 1.0),
                duration: 5.0,
                odds: 19,
            },
            PowerUpKind::PassThrough => PowerUpInfo {
                color: Vec3::new(0.5, 1.0, 0.5),
                duration: 3.0,
                odds: 18,
            },
            PowerUpKind::PadSizeIncrease => PowerUpInfo {
                color: Vec3::new(1.0, 0.6, 0.4),
                duration: 3.0,
                odds: 17,
            },
            PowerUpKind::Confuse => PowerUpInfo {
                color: Vec3::new(1.0, 0.3, 0.3),
                duration: 3.0,
                odds: 8,
            },
            PowerUpKind::Chaos => PowerUpInfo {
                color: Vec3::new(0.9, 0.25, 0.25),
                duration: 3.0,
                odds: 7,
            },
        }
    }

    /// Dense index for per-kind tables
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "speed",
            PowerUpKind::Sticky => "sticky",
            PowerUpKind::PassThrough => "pass_through",
            PowerUpKind::PadSizeIncrease => "pad_size_increase",
            PowerUpKind::Confuse => "confuse",
            PowerUpKind::Chaos => "chaos",
        }
    }
}

/// A power-up entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub entity: Entity,
    pub kind: PowerUpKind,
    /// Seconds left once active
    pub duration: f32,
    /// Caught by the paddle and not yet expired
    pub active: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        let info = kind.info();
        Self {
            entity: Entity::new(pos, POWERUP_SIZE)
                .with_color(info.color)
                .with_velocity(POWERUP_V0),
            kind,
            duration: info.duration,
            active: false,
        }
    }

    /// Finished with: fell off-screen, or caught and expired
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.entity.destroyed && !self.active
    }
}

impl Spatial for PowerUp {
    fn entity(&self) -> &Entity {
        &self.entity
    }
}

/// Roll the spawn chain for a brick destroyed at `pos`.
///
/// Each kind gets an independent one-in-`odds` roll, in chain order, and the
/// first success wins. The effective chances are therefore ~5% for each of
/// the first four kinds, ~10% for confuse and chaos, and ~60% for nothing.
pub fn roll_spawn<R: Rng + ?Sized>(rng: &mut R, pos: Vec2) -> Option<PowerUp> {
    PowerUpKind::ALL
        .into_iter()
        .find(|kind| roll_dice(rng, kind.info().odds))
        .map(|kind| PowerUp::new(kind, pos))
}

/// True with probability `1 / range`
fn roll_dice<R: Rng + ?Sized>(rng: &mut R, range: u32) -> bool {
    rng.random_range(0..range) == 0
}
