//! Collision detection for boxes and the ball
//!
//! Every playfield object is an axis-aligned box. The ball is tested as a
//! circle against a box: the closest point on the box to the ball center
//! gives a penetration vector, which classifies the hit face and yields the
//! exact depth needed to push the ball back out.

use glam::Vec2;

use super::ball::Ball;
use super::entity::{Entity, Spatial};
use crate::consts::SEPARATION_SKIN;

/// Nearest compass direction of a penetration vector (screen space, +y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Checked in this order; the first maximum wins ties
    const COMPASS: [(Direction, Vec2); 4] = [
        (Direction::Up, Vec2::new(0.0, 1.0)),
        (Direction::Right, Vec2::new(1.0, 0.0)),
        (Direction::Down, Vec2::new(0.0, -1.0)),
        (Direction::Left, Vec2::new(-1.0, 0.0)),
    ];

    /// Direction whose unit vector has the largest dot product with `target`
    pub fn closest(target: Vec2) -> Self {
        let mut best = Direction::Up;
        let mut max = f32::NEG_INFINITY;
        for (dir, unit) in Self::COMPASS {
            let dot = unit.dot(target);
            if dot > max {
                max = dot;
                best = dir;
            }
        }
        best
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// A circle-vs-box hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub direction: Direction,
    /// Closest point on the box minus the ball center
    pub penetration: Vec2,
}

/// Inclusive AABB overlap: touching edges count as overlapping
pub fn box_overlap<A: Spatial + ?Sized, B: Spatial + ?Sized>(a: &A, b: &B) -> bool {
    let (a, b) = (a.entity(), b.entity());
    let col_x = a.right() >= b.left() && b.right() >= a.left();
    let col_y = a.bottom() >= b.top() && b.bottom() >= a.top();
    col_x && col_y
}

/// Circle-vs-box test; `None` when the ball does not reach the box
pub fn circle_box_collision(ball: &Ball, block: &Entity) -> Option<Collision> {
    let ball_center = ball.center();
    let half = block.half_extents();
    let box_center = block.center();
    let offset = (ball_center - box_center).clamp(-half, half);
    let closest = box_center + offset;
    let penetration = closest - ball_center;

    if penetration.length() <= ball.radius {
        Some(Collision {
            direction: Direction::closest(penetration),
            penetration,
        })
    } else {
        None
    }
}

/// Reflect the ball off a box face and push it out along the hit axis
pub fn bounce_off(ball: &mut Ball, hit: &Collision) {
    let e = &mut ball.entity;
    if hit.direction.is_horizontal() {
        e.vel.x = -e.vel.x;
        let depth = ball.radius - hit.penetration.x.abs() + SEPARATION_SKIN;
        match hit.direction {
            Direction::Left => e.pos.x += depth,
            _ => e.pos.x -= depth,
        }
    } else {
        e.vel.y = -e.vel.y;
        let depth = ball.radius - hit.penetration.y.abs() + SEPARATION_SKIN;
        match hit.direction {
            Direction::Up => e.pos.y -= depth,
            _ => e.pos.y += depth,
        }
    }
}

/// Paddle deflection: the contact point sets the outgoing angle, the speed
/// is kept and the ball always leaves upward.
///
/// `fraction` runs from -1 at the paddle's left edge to +1 at its right edge.
pub fn paddle_deflect(velocity: Vec2, fraction: f32, base_speed_x: f32, strength: f32) -> Vec2 {
    let speed = velocity.length();
    let up = velocity.y.abs().max(f32::EPSILON);
    let deflected = Vec2::new(base_speed_x * fraction * strength, -up);
    deflected.normalize_or(Vec2::NEG_Y) * speed
}
