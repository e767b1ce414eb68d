//! Per-frame simulation
//!
//! A frame is [`process_input`] followed by [`update`]. Both take the frame's
//! `dt` in seconds; the core does not clamp it.

use glam::Vec2;

use super::collision::{bounce_off, box_overlap, circle_box_collision, paddle_deflect};
use super::effects::EffectTargets;
use super::powerup::{PowerUpKind, roll_spawn};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::input::{Key, Keyboard};

/// Run one full frame: input, then simulation
pub fn tick(state: &mut GameState, keys: &mut Keyboard, dt: f32) {
    process_input(state, keys, dt);
    update(state, dt);
}

/// Apply the player's keys for the current phase
pub fn process_input(state: &mut GameState, keys: &mut Keyboard, dt: f32) {
    if keys.take_press(Key::Escape) {
        state.events.push(GameEvent::QuitRequested);
    }

    match state.phase {
        GamePhase::Menu => {
            if keys.take_press(Key::Enter) {
                state.phase = GamePhase::Active;
                log::info!("Starting level {} ({})", state.level_index, state.level().name);
                state.events.push(GameEvent::GameStarted {
                    level: state.level_index,
                });
            }
            if keys.take_press(Key::W) {
                state.select_level(true);
            }
            if keys.take_press(Key::S) {
                state.select_level(false);
            }
        }
        GamePhase::Active => {
            let step = PADDLE_VELOCITY * dt;
            let max_x = (state.width - state.paddle.size.x).max(0.0);
            let old_x = state.paddle.pos.x;

            if keys.is_down(Key::A) {
                state.paddle.pos.x = (old_x - step).max(0.0);
            }
            if keys.is_down(Key::D) {
                state.paddle.pos.x = (state.paddle.pos.x + step).min(max_x);
            }

            // A stuck ball rides along with the paddle
            if state.ball.stuck {
                state.ball.entity.pos.x += state.paddle.pos.x - old_x;
            }
            if keys.is_down(Key::Space) {
                state.ball.stuck = false;
            }
        }
        GamePhase::Win => {
            if keys.take_press(Key::Enter) {
                state.post.chaos = false;
                state.phase = GamePhase::Menu;
                state.events.push(GameEvent::ReturnedToMenu);
            }
        }
    }
}

/// Advance the simulation by `dt` seconds
pub fn update(state: &mut GameState, dt: f32) {
    state.ball.integrate(dt, state.width);

    collide_bricks(state);
    collide_paddle(state);
    collide_powerups(state);

    let offset = Vec2::splat(state.ball.radius / 2.0);
    state.particles.update(
        dt,
        &state.ball.entity,
        PARTICLES_PER_FRAME,
        offset,
        &mut state.rng,
    );

    let mut targets = EffectTargets {
        ball: &mut state.ball,
        paddle: &mut state.paddle,
        post: &mut state.post,
    };
    state
        .effects
        .tick(&mut state.powerups, dt, &mut targets, &mut state.events);

    if state.shake_time > 0.0 {
        state.shake_time -= dt;
        if state.shake_time <= 0.0 {
            state.post.shake = false;
        }
    }

    if state.ball.entity.pos.y >= state.height {
        lose_life(state);
    }

    if state.phase == GamePhase::Active && state.level().cleared() {
        win(state);
    }
}

/// Ball against every live brick of the current level, in brick order
fn collide_bricks(state: &mut GameState) {
    let level = &mut state.levels[state.level_index];
    for brick in level.bricks.iter_mut().filter(|b| !b.destroyed) {
        let Some(hit) = circle_box_collision(&state.ball, brick) else {
            continue;
        };

        if brick.solid {
            state.shake_time = SHAKE_DURATION;
            state.post.shake = true;
            state.events.push(GameEvent::SolidHit);
        } else {
            brick.destroyed = true;
            state.events.push(GameEvent::BrickDestroyed { pos: brick.pos });
            if let Some(powerup) = roll_spawn(&mut state.rng, brick.pos) {
                log::debug!("Spawned {} power-up", powerup.kind.name());
                state.events.push(GameEvent::PowerUpSpawned(powerup.kind));
                state.powerups.push(powerup);
            }
        }

        if state.ball.pass_through && !brick.solid {
            continue;
        }
        bounce_off(&mut state.ball, &hit);
    }
}

/// Deflect a free ball off the paddle and leave it resting on top
fn collide_paddle(state: &mut GameState) {
    if state.ball.stuck || circle_box_collision(&state.ball, &state.paddle).is_none() {
        return;
    }

    let paddle = &state.paddle;
    let half_width = paddle.size.x * 0.5;
    let fraction = (state.ball.center().x - paddle.center().x) / half_width;

    let ball = &mut state.ball;
    ball.entity.vel = paddle_deflect(
        ball.entity.vel,
        fraction,
        BALL_V0.x,
        PADDLE_BOUNCE_STRENGTH,
    );
    ball.entity.pos.y = paddle.top() - ball.entity.size.y - SEPARATION_SKIN;
    ball.stuck = ball.sticky;
    state.events.push(GameEvent::PaddleHit);
}

/// Falling power-ups either leave the area or get caught by the paddle
fn collide_powerups(state: &mut GameState) {
    let mut caught: Vec<PowerUpKind> = Vec::new();
    for powerup in state.powerups.iter_mut().filter(|p| !p.entity.destroyed) {
        if powerup.entity.top() >= state.height {
            powerup.entity.destroyed = true;
        } else if box_overlap(&state.paddle, &*powerup) {
            powerup.entity.destroyed = true;
            powerup.active = true;
            caught.push(powerup.kind);
        }
    }

    for kind in caught {
        state.activate_power_up(kind);
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    log::info!("Life lost, {} left", state.lives);
    state.events.push(GameEvent::LifeLost {
        remaining: state.lives,
    });

    if state.lives == 0 {
        log::info!("Game over");
        state.clear_powerups();
        state.reset_level();
        state.phase = GamePhase::Menu;
        state.events.push(GameEvent::GameOver);
    }
    state.reset_player();
}

fn win(state: &mut GameState) {
    log::info!("Level {} ({}) cleared", state.level_index, state.level().name);
    state.clear_powerups();
    state.reset_level();
    state.reset_player();
    state.post.chaos = true;
    state.phase = GamePhase::Win;
    state.events.push(GameEvent::LevelCleared);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{Level, parse_tile_grid};
    use crate::sim::powerup::PowerUp;

    const DT: f32 = 0.01;

    fn state_with(grid: &str) -> GameState {
        let mut level = Level::new("test", 800.0, 300.0);
        level.load(parse_tile_grid(grid).unwrap());
        let mut spare = Level::new("spare", 800.0, 300.0);
        spare.load(parse_tile_grid("2").unwrap());
        let third = spare.clone();
        GameState::new(800.0, 600.0, vec![level, spare, third], 1234).unwrap()
    }

    /// Free ball just below the first brick column, moving up
    fn launch_under_first_brick(state: &mut GameState) {
        state.phase = GamePhase::Active;
        state.ball.stuck = false;
        state.ball.set_center(Vec2::new(133.0, 310.0));
        state.ball.entity.vel = Vec2::new(0.0, -350.0);
    }

    #[test]
    fn test_breaking_a_brick_rolls_the_spawn_chain() {
        let mut state = state_with("2 0 2");
        launch_under_first_brick(&mut state);
        let expected = roll_spawn(&mut state.rng.clone(), Vec2::ZERO).map(|p| p.kind);

        update(&mut state, DT);

        assert!(state.level().bricks[0].destroyed);
        assert!(!state.level().bricks[1].destroyed);
        assert!(state.ball.entity.vel.y > 0.0, "ball should be reflected");
        assert!(state.powerups.len() <= 1);
        assert_eq!(state.powerups.first().map(|p| p.kind), expected);
        assert_eq!(state.phase, GamePhase::Active);

        let events = state.take_events();
        assert_eq!(events[0], GameEvent::BrickDestroyed { pos: Vec2::ZERO });
        if let Some(kind) = expected {
            assert_eq!(events[1], GameEvent::PowerUpSpawned(kind));
        }
    }

    #[test]
    fn test_pass_through_keeps_velocity() {
        let mut state = state_with("2 0 2");
        launch_under_first_brick(&mut state);
        state.ball.pass_through = true;
        let expected = roll_spawn(&mut state.rng.clone(), Vec2::ZERO).map(|p| p.kind);

        update(&mut state, DT);

        assert!(state.level().bricks[0].destroyed);
        assert!(state.ball.entity.vel.y < 0.0, "ball should keep going up");
        assert_eq!(state.powerups.first().map(|p| p.kind), expected);
    }

    #[test]
    fn test_solid_brick_shakes_and_survives() {
        let mut state = state_with("1 0 2");
        launch_under_first_brick(&mut state);
        state.ball.pass_through = true;

        update(&mut state, DT);

        assert!(!state.level().bricks[0].destroyed);
        assert!(state.ball.entity.vel.y > 0.0, "solid bricks always reflect");
        assert!(state.post.shake);
        assert!((state.shake_time - (SHAKE_DURATION - DT)).abs() < 1e-6);
        assert!(state.powerups.is_empty());
        assert!(state.take_events().contains(&GameEvent::SolidHit));

        state.ball.stuck = true;
        update(&mut state, SHAKE_DURATION);
        assert!(!state.post.shake);
    }

    #[test]
    fn test_sticky_paddle_catches_ball() {
        let mut state = state_with("2 0 2");
        state.phase = GamePhase::Active;
        state.activate_power_up(PowerUpKind::Sticky);
        state.ball.stuck = false;
        state.ball.set_center(Vec2::new(360.0, 569.5));
        state.ball.entity.vel = Vec2::new(0.0, 200.0);

        update(&mut state, DT);

        assert!(state.ball.stuck);
        assert!(state.ball.entity.vel.y < 0.0);
        assert!(state.ball.entity.vel.x < 0.0, "left of center deflects left");
        assert!(!box_overlap(&state.ball, &state.paddle));
        assert!((state.ball.entity.bottom() - state.paddle.top()).abs() < 0.01);
        assert_eq!(state.ball.center().x, 360.0);
        assert!(state.take_events().contains(&GameEvent::PaddleHit));
    }

    #[test]
    fn test_paddle_bounce_keeps_speed() {
        let mut state = state_with("2 0 2");
        state.phase = GamePhase::Active;
        state.ball.stuck = false;
        state.ball.set_center(Vec2::new(440.0, 569.5));
        state.ball.entity.vel = Vec2::new(30.0, 300.0);

        update(&mut state, DT);

        let vel = state.ball.entity.vel;
        let speed_before = Vec2::new(30.0, 300.0 + 100.0 * DT).length();
        assert!(!state.ball.stuck);
        assert!((vel.length() - speed_before).abs() < 1e-2);
        assert!(vel.y < 0.0 && vel.x > 0.0);
    }

    #[test]
    fn test_catching_a_powerup() {
        let mut state = state_with("2 0 2");
        state.powerups.push(PowerUp::new(PowerUpKind::Sticky, Vec2::new(370.0, 570.0)));

        update(&mut state, DT);

        assert_eq!(state.powerups.len(), 1);
        assert!(state.powerups[0].active);
        assert!(state.powerups[0].entity.destroyed);
        assert!(state.ball.sticky);
        assert_eq!(state.effects.count(PowerUpKind::Sticky), 1);
        assert!(
            state
                .take_events()
                .contains(&GameEvent::PowerUpCollected(PowerUpKind::Sticky))
        );
    }

    #[test]
    fn test_powerup_leaving_the_area_is_dropped() {
        let mut state = state_with("2 0 2");
        state.powerups.push(PowerUp::new(PowerUpKind::Chaos, Vec2::new(10.0, 600.0)));

        update(&mut state, DT);

        assert!(state.powerups.is_empty());
        assert!(!state.effects.is_active(PowerUpKind::Chaos));
    }

    #[test]
    fn test_losing_a_life_resets_the_player_only() {
        let mut state = state_with("2 0 2");
        state.phase = GamePhase::Active;
        state.activate_power_up(PowerUpKind::Sticky);
        state.powerups.push(PowerUp::new(PowerUpKind::Confuse, Vec2::new(10.0, 100.0)));
        state.levels[0].bricks[0].destroyed = true;
        state.ball.stuck = false;
        state.ball.entity.pos = Vec2::new(100.0, 610.0);
        state.ball.entity.vel = Vec2::new(0.0, 300.0);
        state.take_events();

        update(&mut state, DT);

        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Active);
        assert!(state.ball.stuck);
        assert_eq!(state.ball.entity.pos, Vec2::new(387.5, 555.0));
        assert!(state.ball.sticky, "running effects survive a lost life");
        assert_eq!(state.powerups.len(), 1);
        assert!(state.levels[0].bricks[0].destroyed);
        assert_eq!(state.take_events(), vec![GameEvent::LifeLost { remaining: 2 }]);
    }

    #[test]
    fn test_last_life_returns_to_menu() {
        let mut state = state_with("2 0 2");
        state.phase = GamePhase::Active;
        state.lives = 1;
        state.activate_power_up(PowerUpKind::PadSizeIncrease);
        state.powerups.push(PowerUp::new(PowerUpKind::Confuse, Vec2::new(10.0, 100.0)));
        state.levels[0].bricks[0].destroyed = true;
        state.ball.stuck = false;
        state.ball.entity.pos = Vec2::new(100.0, 610.0);

        update(&mut state, DT);

        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(state.powerups.is_empty());
        assert_eq!(state.paddle.size, PADDLE_SIZE);
        assert!(state.level().bricks.iter().all(|b| !b.destroyed));
        assert!(state.take_events().contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_clearing_the_level_wins() {
        let mut state = state_with("2 0 2");
        launch_under_first_brick(&mut state);
        state.levels[0].bricks[1].destroyed = true;
        state.powerups.push(PowerUp::new(PowerUpKind::Speed, Vec2::new(600.0, 100.0)));

        update(&mut state, DT);

        assert_eq!(state.phase, GamePhase::Win);
        assert!(state.post.chaos);
        assert!(state.powerups.is_empty());
        assert!(state.ball.stuck);
        assert!(state.level().bricks.iter().all(|b| !b.destroyed));
        assert!(state.take_events().contains(&GameEvent::LevelCleared));

        let mut keys = Keyboard::new();
        keys.press(Key::Enter);
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(!state.post.chaos);

        // Still held: the menu must not start the level
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_menu_level_selection_is_edge_triggered() {
        let mut state = state_with("2 0 2");
        let mut keys = Keyboard::new();

        keys.press(Key::W);
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.level_index, 1);
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.level_index, 1);

        keys.release(Key::W);
        keys.press(Key::W);
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.level_index, 2);

        keys.release(Key::W);
        keys.press(Key::W);
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.level_index, 0);

        keys.press(Key::S);
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.level_index, 2);

        keys.press(Key::Enter);
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.phase, GamePhase::Active);
        assert!(
            state
                .take_events()
                .contains(&GameEvent::GameStarted { level: 2 })
        );
    }

    #[test]
    fn test_paddle_moves_and_drags_stuck_ball() {
        let mut state = state_with("2 0 2");
        state.phase = GamePhase::Active;
        let mut keys = Keyboard::new();

        keys.press(Key::D);
        process_input(&mut state, &mut keys, 0.1);
        assert_eq!(state.paddle.pos.x, 400.0);
        assert_eq!(state.ball.entity.pos.x, 437.5);

        process_input(&mut state, &mut keys, 1.0);
        assert_eq!(state.paddle.pos.x, 700.0);
        assert_eq!(state.ball.entity.pos.x, 737.5);

        keys.release(Key::D);
        keys.press(Key::A);
        process_input(&mut state, &mut keys, 2.0);
        assert_eq!(state.paddle.pos.x, 0.0);
        assert_eq!(state.ball.entity.pos.x, 37.5);

        keys.release(Key::A);
        keys.press(Key::Space);
        process_input(&mut state, &mut keys, DT);
        assert!(!state.ball.stuck);

        keys.release(Key::Space);
        keys.press(Key::D);
        process_input(&mut state, &mut keys, 0.1);
        assert_eq!(state.paddle.pos.x, 50.0);
        assert_eq!(state.ball.entity.pos.x, 37.5, "free ball is not dragged");
    }

    #[test]
    fn test_movement_keys_ignored_outside_play() {
        let mut state = state_with("2 0 2");
        let mut keys = Keyboard::new();
        keys.press(Key::A);
        keys.press(Key::Space);
        process_input(&mut state, &mut keys, 0.1);
        assert_eq!(state.paddle.pos.x, 350.0);
        assert!(state.ball.stuck);
    }

    #[test]
    fn test_escape_requests_quit_once() {
        let mut state = state_with("2 0 2");
        let mut keys = Keyboard::new();
        keys.press(Key::Escape);
        process_input(&mut state, &mut keys, DT);
        process_input(&mut state, &mut keys, DT);
        assert_eq!(state.take_events(), vec![GameEvent::QuitRequested]);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let mut state = GameState::with_builtin_levels(800.0, 600.0, 77).unwrap();
            let mut keys = Keyboard::new();
            keys.press(Key::Enter);
            tick(&mut state, &mut keys, 1.0 / 60.0);
            keys.release(Key::Enter);
            keys.press(Key::Space);
            let mut events = Vec::new();
            for frame in 0..600 {
                if frame % 90 == 0 {
                    keys.release(Key::A);
                    keys.press(Key::D);
                } else if frame % 45 == 0 {
                    keys.release(Key::D);
                    keys.press(Key::A);
                }
                tick(&mut state, &mut keys, 1.0 / 60.0);
                events.extend(state.take_events());
            }
            (state.ball.entity.pos, state.lives, state.powerups.len(), events)
        };
        assert_eq!(run(), run());
    }
}
