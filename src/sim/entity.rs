//! Shared spatial state for everything placed on the playfield
//!
//! Bricks, the paddle, the ball and power-ups all embed an [`Entity`]. The
//! position is the top-left corner of the entity's axis-aligned box.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::WHITE;

/// Position, size and motion of a playfield object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    /// Box extent (both components > 0)
    pub size: Vec2,
    pub vel: Vec2,
    /// Presentation tint
    pub color: Vec3,
    /// Solid entities are never destroyed by the ball
    pub solid: bool,
    /// Destroyed entities are skipped by collision checks until cleaned up
    pub destroyed: bool,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0, "entity size must be positive");
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            color: WHITE,
            solid: false,
            destroyed: false,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }
}

/// Anything that exposes an [`Entity`], so collision and rendering code can
/// treat bricks, paddle, ball and power-ups uniformly.
pub trait Spatial {
    fn entity(&self) -> &Entity;
}

impl Spatial for Entity {
    fn entity(&self) -> &Entity {
        self
    }
}
