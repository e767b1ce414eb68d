//! Brickfall - the simulation core of a block-breaking arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (physics, collisions, power-ups, game state)
//! - `renderer`: Rendering collaborator interface and per-frame scene submission
//! - `audio`: Audio collaborator interface and event-to-sound mapping
//! - `input`: Keyboard state with edge-triggered key handling
//! - `settings`: Data-driven configuration

pub mod audio;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Default play area dimensions (pixels)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Number of selectable levels
    pub const NUM_LEVELS: usize = 4;
    /// Lives at the start of a run
    pub const STARTING_LIVES: u32 = 3;

    /// Paddle defaults
    pub const PADDLE_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    /// Horizontal paddle speed (pixels/s)
    pub const PADDLE_VELOCITY: f32 = 500.0;
    /// Horizontal speed multiplier applied to the paddle contact fraction
    pub const PADDLE_BOUNCE_STRENGTH: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const BALL_V0: Vec2 = Vec2::new(100.0, -350.0);

    /// Constant acceleration applied during integration (pixels/s², +y is down)
    pub const ACCELERATION: Vec2 = Vec2::new(0.0, 100.0);

    /// Power-up defaults
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_V0: Vec2 = Vec2::new(0.0, 150.0);
    /// Multiplier applied to ball velocity by the speed power-up
    pub const SPEED_MULTIPLIER: f32 = 1.2;
    /// Width added to a default-sized paddle by the paddle-size power-up
    pub const PAD_SIZE_INCREMENT: f32 = 50.0;

    /// Screen shake pulse after hitting a solid brick (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Extra distance added when pushing the ball out of a brick, so the
    /// inclusive overlap test does not fire again on the next check
    pub const SEPARATION_SKIN: f32 = 1.0e-3;

    /// Ball trail particle pool
    pub const PARTICLE_COUNT: usize = 500;
    pub const PARTICLES_PER_FRAME: usize = 2;
}

/// Untinted sprite color
pub const WHITE: Vec3 = Vec3::ONE;

/// Left edge x-position that centers something of `size` in `width`
#[inline]
pub fn centered(width: f32, size: f32) -> f32 {
    width * 0.5 - size * 0.5
}
