//! Game session state
//!
//! One [`GameState`] owns everything the simulation mutates: the paddle, the
//! ball, the levels, the falling and active power-ups, lives and the phase.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::effects::{EffectRegistry, EffectTargets, PostEffects};
use super::entity::Entity;
use super::level::{Level, LevelError};
use super::particles::ParticleGenerator;
use super::powerup::{PowerUp, PowerUpKind};
use crate::centered;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level selection
    Menu,
    /// Playing
    Active,
    /// Level cleared, waiting to go back to the menu
    Win,
}

/// Things that happened during a frame, for audio and the app layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    GameStarted { level: usize },
    LevelSelected(usize),
    BrickDestroyed { pos: Vec2 },
    SolidHit,
    PaddleHit,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    LifeLost { remaining: u32 },
    GameOver,
    LevelCleared,
    ReturnedToMenu,
    QuitRequested,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub lives: u32,
    /// Index into `levels` of the selected level
    pub level_index: usize,
    pub levels: Vec<Level>,
    pub paddle: Entity,
    pub ball: Ball,
    /// Falling and active power-ups, in spawn order
    pub powerups: Vec<PowerUp>,
    pub effects: EffectRegistry,
    pub post: PostEffects,
    /// Seconds of screen shake left
    pub shake_time: f32,
    pub particles: ParticleGenerator,
    /// Events since the last [`GameState::take_events`]
    pub events: Vec<GameEvent>,
    /// Play area
    pub width: f32,
    pub height: f32,
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Start a session in the menu with the first level selected
    pub fn new(width: f32, height: f32, levels: Vec<Level>, seed: u64) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }

        let paddle = Entity::new(paddle_start(width, height, PADDLE_SIZE.x), PADDLE_SIZE);
        let ball = Ball::new(ball_start(&paddle), BALL_RADIUS, BALL_V0);

        Ok(Self {
            phase: GamePhase::Menu,
            lives: STARTING_LIVES,
            level_index: 0,
            levels,
            paddle,
            ball,
            powerups: Vec::new(),
            effects: EffectRegistry::new(),
            post: PostEffects::default(),
            shake_time: 0.0,
            particles: ParticleGenerator::new(PARTICLE_COUNT),
            events: Vec::new(),
            width,
            height,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Session over the embedded levels; bricks fill the top half of the area
    pub fn with_builtin_levels(width: f32, height: f32, seed: u64) -> Result<Self, LevelError> {
        let levels = Level::builtin(width, height / 2.0)?;
        Self::new(width, height, levels, seed)
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.level_index]
    }

    /// Cycle the selected level forward or back, wrapping
    pub fn select_level(&mut self, forward: bool) {
        let n = self.levels.len();
        self.level_index = if forward {
            (self.level_index + 1) % n
        } else {
            (self.level_index + n - 1) % n
        };
        log::info!("Selected level {} ({})", self.level_index, self.level().name);
        self.events.push(GameEvent::LevelSelected(self.level_index));
    }

    /// Paddle back to the bottom center, ball stuck on top of it.
    ///
    /// Paddle size and tints belong to running effects and are left alone;
    /// ball flags of running effects are restored after the ball reset.
    pub fn reset_player(&mut self) {
        self.paddle.pos = paddle_start(self.width, self.height, self.paddle.size.x);
        self.ball.reset(ball_start(&self.paddle), BALL_V0);
        self.effects.restore_ball_flags(&mut self.ball);
    }

    /// Restore lives and rebuild the selected level's bricks
    pub fn reset_level(&mut self) {
        self.lives = STARTING_LIVES;
        self.levels[self.level_index].reload();
    }

    /// Drop every power-up and switch every effect off
    pub fn clear_powerups(&mut self) {
        let mut targets = EffectTargets {
            ball: &mut self.ball,
            paddle: &mut self.paddle,
            post: &mut self.post,
        };
        self.effects.clear(&mut self.powerups, &mut targets);
    }

    /// Apply a caught power-up's effect
    pub fn activate_power_up(&mut self, kind: PowerUpKind) {
        let mut targets = EffectTargets {
            ball: &mut self.ball,
            paddle: &mut self.paddle,
            post: &mut self.post,
        };
        self.effects.activate(kind, &mut targets);
        log::info!("Collected {} power-up", kind.name());
        self.events.push(GameEvent::PowerUpCollected(kind));
    }

    /// Drain this frame's events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Paddle resting on the bottom edge, horizontally centered
fn paddle_start(width: f32, height: f32, paddle_width: f32) -> Vec2 {
    Vec2::new(centered(width, paddle_width), height - PADDLE_SIZE.y)
}

/// Ball sitting on top of the paddle's center
fn ball_start(paddle: &Entity) -> Vec2 {
    paddle.pos + Vec2::new(paddle.size.x * 0.5 - BALL_RADIUS, -BALL_RADIUS * 2.0)
}
