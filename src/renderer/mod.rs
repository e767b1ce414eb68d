//! Rendering collaborator interface
//!
//! The simulation never draws. Each frame the app hands the session to
//! [`draw_scene`], which submits sprites, post-processing switches and text
//! to whatever [`Renderer`] backs the window.

use glam::{Vec2, Vec3, Vec4};

use crate::WHITE;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, PostEffects, PowerUpKind, Spatial};

/// Side of a trail particle quad (pixels)
const PARTICLE_SIZE: f32 = 10.0;

/// Textures the scene is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    SolidBlock,
    Block,
    Paddle,
    Ball,
    Particle,
    PowerUp(PowerUpKind),
}

impl Sprite {
    /// Asset name of the texture
    pub fn texture_name(self) -> &'static str {
        match self {
            Sprite::Background => "background",
            Sprite::SolidBlock => "block_solid",
            Sprite::Block => "block_breakable",
            Sprite::Paddle => "paddle",
            Sprite::Ball => "ball",
            Sprite::Particle => "particle",
            Sprite::PowerUp(kind) => match kind {
                PowerUpKind::Speed => "tex_speed",
                PowerUpKind::Sticky => "tex_sticky",
                PowerUpKind::PassThrough => "tex_pass",
                PowerUpKind::PadSizeIncrease => "tex_size",
                PowerUpKind::Confuse => "tex_confuse",
                PowerUpKind::Chaos => "tex_chaos",
            },
        }
    }
}

/// Drawing backend
pub trait Renderer {
    /// Queue a tinted, rotated sprite; `pos` is the top-left corner
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, size: Vec2, rotation: f32, color: Vec4);

    fn render_text(&mut self, text: &str, pos: Vec2, scale: f32, color: Vec3);

    /// Resolve the scene drawn so far with the given full-screen effects
    fn apply_post_effects(&mut self, effects: PostEffects, time: f32);
}

/// Submit one frame of the session.
///
/// Draw order: background, bricks, paddle, falling power-ups, particles,
/// ball, lives counter. The scene is then post-processed and the phase
/// banners are drawn on top, unaffected by the effects.
pub fn draw_scene<R: Renderer + ?Sized>(
    state: &GameState,
    settings: &Settings,
    renderer: &mut R,
    time: f32,
) {
    renderer.draw_sprite(
        Sprite::Background,
        Vec2::ZERO,
        Vec2::new(state.width, state.height),
        0.0,
        Vec4::ONE,
    );

    for brick in state.level().bricks.iter().filter(|b| !b.destroyed) {
        let sprite = if brick.solid {
            Sprite::SolidBlock
        } else {
            Sprite::Block
        };
        draw_entity(renderer, sprite, brick);
    }

    draw_entity(renderer, Sprite::Paddle, &state.paddle);

    for powerup in state.powerups.iter().filter(|p| !p.entity.destroyed) {
        draw_entity(renderer, Sprite::PowerUp(powerup.kind), powerup);
    }

    for particle in state.particles.alive() {
        // Shades above 1 saturate
        let rgb = particle.color.truncate().min(Vec3::ONE);
        renderer.draw_sprite(
            Sprite::Particle,
            particle.pos,
            Vec2::splat(PARTICLE_SIZE),
            0.0,
            rgb.extend(particle.color.w.max(0.0)),
        );
    }

    draw_entity(renderer, Sprite::Ball, &state.ball);

    renderer.render_text(
        &format!("Lives: {}", state.lives),
        Vec2::new(5.0, 5.0),
        0.5,
        WHITE,
    );

    let mut post = state.post;
    if !settings.effective_screen_shake() {
        post.shake = false;
    }
    renderer.apply_post_effects(post, time);

    let mid = state.height / 2.0;
    match state.phase {
        GamePhase::Menu => {
            renderer.render_text("Press ENTER to start", Vec2::new(250.0, mid - 20.0), 0.5, WHITE);
            renderer.render_text(
                "Press W or S to select level",
                Vec2::new(235.0, mid + 20.0),
                0.4,
                WHITE,
            );
        }
        GamePhase::Win => {
            renderer.render_text(
                "You WON!!!",
                Vec2::new(320.0, mid - 20.0),
                0.5,
                Vec3::new(0.0, 1.0, 0.0),
            );
            renderer.render_text(
                "Press ENTER to retry or ESC to quit",
                Vec2::new(130.0, mid + 20.0),
                0.5,
                Vec3::new(1.0, 1.0, 0.0),
            );
        }
        GamePhase::Active => {}
    }
}

fn draw_entity<R: Renderer + ?Sized>(renderer: &mut R, sprite: Sprite, object: &impl Spatial) {
    let entity = object.entity();
    renderer.draw_sprite(sprite, entity.pos, entity.size, 0.0, entity.color.extend(1.0));
}
