//! Timed power-up effects
//!
//! Each caught power-up keeps its own countdown. The registry counts how many
//! are live per kind and only reverts a kind's effect when its last instance
//! expires, so overlapping catches extend the effect.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::entity::Entity;
use super::powerup::{PowerUp, PowerUpKind};
use super::state::GameEvent;
use crate::WHITE;
use crate::consts::{PAD_SIZE_INCREMENT, PADDLE_SIZE, SPEED_MULTIPLIER};

/// Paddle tint while sticky is active
pub const STICKY_TINT: Vec3 = Vec3::new(1.0, 0.5, 1.0);
/// Ball tint while pass-through is active
pub const PASS_THROUGH_TINT: Vec3 = Vec3::new(1.0, 0.5, 0.5);

/// Full-screen post-processing switches consumed by the renderer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEffects {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
}

/// Everything a power-up effect can touch
pub struct EffectTargets<'a> {
    pub ball: &'a mut Ball,
    pub paddle: &'a mut Entity,
    pub post: &'a mut PostEffects,
}

/// Apply/revert pair for one power-up kind
#[derive(Clone, Copy)]
pub struct EffectHandlers {
    pub apply: fn(&mut EffectTargets<'_>),
    pub revert: fn(&mut EffectTargets<'_>),
}

/// Indexed by [`PowerUpKind::index`]
const HANDLERS: [EffectHandlers; 6] = [
    // Speed: permanent, nothing to undo
    EffectHandlers {
        apply: |t| t.ball.entity.vel *= SPEED_MULTIPLIER,
        revert: |_| {},
    },
    EffectHandlers {
        apply: |t| {
            t.ball.sticky = true;
            t.paddle.color = STICKY_TINT;
        },
        revert: |t| {
            t.ball.sticky = false;
            t.paddle.color = WHITE;
        },
    },
    EffectHandlers {
        apply: |t| {
            t.ball.pass_through = true;
            t.ball.entity.color = PASS_THROUGH_TINT;
        },
        revert: |t| {
            t.ball.pass_through = false;
            t.ball.entity.color = WHITE;
        },
    },
    EffectHandlers {
        apply: |t| {
            if t.paddle.size.x == PADDLE_SIZE.x {
                t.paddle.size.x += PAD_SIZE_INCREMENT;
            }
        },
        revert: |t| t.paddle.size = PADDLE_SIZE,
    },
    EffectHandlers {
        apply: |t| t.post.confuse = true,
        revert: |t| t.post.confuse = false,
    },
    EffectHandlers {
        apply: |t| t.post.chaos = true,
        revert: |t| t.post.chaos = false,
    },
];

impl PowerUpKind {
    #[inline]
    pub fn handlers(self) -> &'static EffectHandlers {
        &HANDLERS[self.index()]
    }
}

/// Live instance count per power-up kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectRegistry {
    counts: [u32; 6],
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn count(&self, kind: PowerUpKind) -> u32 {
        self.counts[kind.index()]
    }

    #[inline]
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.count(kind) > 0
    }

    /// Apply `kind`'s effect and count one more live instance of it
    pub fn activate(&mut self, kind: PowerUpKind, targets: &mut EffectTargets<'_>) {
        (kind.handlers().apply)(targets);
        self.counts[kind.index()] += 1;
        log::debug!("Power-up {} active (x{})", kind.name(), self.count(kind));
    }

    /// Move every power-up, count down the active ones and drop spent ones
    pub fn tick(
        &mut self,
        powerups: &mut Vec<PowerUp>,
        dt: f32,
        targets: &mut EffectTargets<'_>,
        events: &mut Vec<GameEvent>,
    ) {
        for powerup in powerups.iter_mut() {
            powerup.entity.pos += powerup.entity.vel * dt;
            if !powerup.active {
                continue;
            }

            powerup.duration -= dt;
            if powerup.duration <= 0.0 {
                powerup.active = false;
                self.expire(powerup.kind, targets);
                events.push(GameEvent::PowerUpExpired(powerup.kind));
            }
        }
        powerups.retain(|p| !p.is_spent());
    }

    fn expire(&mut self, kind: PowerUpKind, targets: &mut EffectTargets<'_>) {
        let count = &mut self.counts[kind.index()];
        debug_assert!(*count > 0, "{} expired with no live instance", kind.name());
        *count = count.saturating_sub(1);
        if *count == 0 {
            (kind.handlers().revert)(targets);
            log::debug!("Power-up {} expired", kind.name());
        }
    }

    /// Drop every power-up and revert every effect
    pub fn clear(&mut self, powerups: &mut Vec<PowerUp>, targets: &mut EffectTargets<'_>) {
        powerups.clear();
        for kind in PowerUpKind::ALL {
            (kind.handlers().revert)(targets);
        }
        self.counts = [0; 6];
    }

    /// Re-apply the ball flags of still-running effects after a ball reset
    pub fn restore_ball_flags(&self, ball: &mut Ball) {
        if self.is_active(PowerUpKind::Sticky) {
            ball.sticky = true;
        }
        if self.is_active(PowerUpKind::PassThrough) {
            ball.pass_through = true;
            ball.entity.color = PASS_THROUGH_TINT;
        }
    }
}
