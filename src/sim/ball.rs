//! The ball: a circle riding on an [`Entity`] box of side `2 * radius`

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Spatial};
use crate::WHITE;
use crate::consts::ACCELERATION;

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub entity: Entity,
    pub radius: f32,
    /// Follows the paddle and ignores integration
    pub stuck: bool,
    /// Catching the ball on the paddle sticks it again
    pub sticky: bool,
    /// Breakable bricks don't reflect the ball
    pub pass_through: bool,
}

impl Ball {
    /// A new ball starts stuck to the paddle
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        Self {
            entity: Entity::new(pos, Vec2::splat(radius * 2.0)).with_velocity(vel),
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.entity.pos + Vec2::splat(self.radius)
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.entity.pos = center - Vec2::splat(self.radius);
    }

    /// Semi-implicit Euler step, then bounce off the left, right and top walls.
    ///
    /// There is no floor: falling out of the bottom is handled by the session.
    pub fn integrate(&mut self, dt: f32, area_width: f32) {
        if self.stuck {
            return;
        }

        let e = &mut self.entity;
        e.pos += dt * e.vel + 0.5 * ACCELERATION * dt * dt;
        e.vel += dt * ACCELERATION;

        if e.pos.x <= 0.0 {
            e.vel.x = e.vel.x.abs();
            e.pos.x = 0.0;
        } else if e.pos.x + e.size.x >= area_width {
            e.vel.x = -e.vel.x.abs();
            e.pos.x = area_width - e.size.x;
        }
        if e.pos.y <= 0.0 {
            e.vel.y = e.vel.y.abs();
            e.pos.y = 0.0;
        }
    }

    /// Put the ball back on the paddle with all power-up flags cleared
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.entity.pos = pos;
        self.entity.vel = vel;
        self.entity.color = WHITE;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }
}

impl Spatial for Ball {
    fn entity(&self) -> &Entity {
        &self.entity
    }
}
