//! Brickfall entry point
//!
//! Headless runner: loads settings and levels, then drives the simulation
//! with an autopilot at a fixed frame rate, feeding events to the audio
//! manager and each frame to a renderer that only counts draw calls.
//!
//! Usage: `brickfall [settings.json] [frames]`

use std::time::{SystemTime, UNIX_EPOCH};

use glam::{Vec2, Vec3, Vec4};

use brickfall::audio::{AudioManager, SilentSink};
use brickfall::input::{Key, Keyboard};
use brickfall::renderer::{Renderer, Sprite, draw_scene};
use brickfall::sim::{GameEvent, GamePhase, GameState, LevelError, PostEffects, tick};
use brickfall::Settings;

const DEFAULT_SETTINGS_PATH: &str = "brickfall.json";
const DEFAULT_FRAMES: u64 = 60 * 60;
const FRAME_DT: f32 = 1.0 / 60.0;

/// Renderer that tallies what a frame submitted
#[derive(Debug, Default)]
struct FrameStats {
    sprites: usize,
    texts: usize,
    post: PostEffects,
}

impl Renderer for FrameStats {
    fn draw_sprite(&mut self, _sprite: Sprite, _pos: Vec2, _size: Vec2, _rotation: f32, _color: Vec4) {
        self.sprites += 1;
    }

    fn render_text(&mut self, text: &str, _pos: Vec2, _scale: f32, _color: Vec3) {
        log::trace!("text: {text}");
        self.texts += 1;
    }

    fn apply_post_effects(&mut self, effects: PostEffects, _time: f32) {
        self.post = effects;
    }
}

/// Game instance holding all state
struct Game {
    state: GameState,
    keys: Keyboard,
    audio: AudioManager<SilentSink>,
    settings: Settings,
    time: f32,
    quit: bool,
}

impl Game {
    fn new(settings: Settings, seed: u64) -> Result<Self, LevelError> {
        let mut state = GameState::with_builtin_levels(settings.width, settings.height, seed)?;

        if let Some(dir) = &settings.level_dir {
            for (i, level) in state.levels.iter_mut().enumerate() {
                let path = dir.join(format!("level{i}.txt"));
                if let Err(e) = level.load_file(&path) {
                    log::warn!("Keeping built-in level {i}: {}: {e}", path.display());
                }
            }
        }

        let mut audio = AudioManager::from_settings(SilentSink, &settings);
        audio.start_music();

        Ok(Self {
            state,
            keys: Keyboard::new(),
            audio,
            settings,
            time: 0.0,
            quit: false,
        })
    }

    /// Stand-in for a player: start levels and keep the paddle under the ball
    fn autopilot(&mut self) {
        for key in [Key::Enter, Key::Space, Key::A, Key::D] {
            self.keys.release(key);
        }

        match self.state.phase {
            GamePhase::Menu | GamePhase::Win => self.keys.press(Key::Enter),
            GamePhase::Active => {
                if self.state.ball.stuck {
                    self.keys.press(Key::Space);
                }
                let target = self.state.ball.center().x;
                let paddle = self.state.paddle.center().x;
                if target < paddle - 10.0 {
                    self.keys.press(Key::A);
                } else if target > paddle + 10.0 {
                    self.keys.press(Key::D);
                }
            }
        }
    }

    fn update(&mut self, raw_dt: f32) {
        let dt = self.settings.frame_dt(raw_dt);
        self.time += dt;

        self.autopilot();
        tick(&mut self.state, &mut self.keys, dt);

        let events = self.state.take_events();
        self.audio.handle_events(&events);
        for event in &events {
            match event {
                GameEvent::QuitRequested => self.quit = true,
                GameEvent::LevelCleared => log::info!("Won with {} lives left", self.state.lives),
                _ => log::trace!("{event:?}"),
            }
        }
    }

    fn render(&self) -> FrameStats {
        let mut stats = FrameStats::default();
        draw_scene(&self.state, &self.settings, &mut stats, self.time);
        stats
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(1)
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let settings = Settings::load(&settings_path);
    let seed = if settings.seed == 0 {
        clock_seed()
    } else {
        settings.seed
    };
    log::info!("Brickfall starting with seed {seed}");

    let mut game = match Game::new(settings, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to start: {e}");
            std::process::exit(1);
        }
    };

    let mut stats = FrameStats::default();
    for frame in 0..frames {
        game.update(FRAME_DT);
        stats = game.render();
        if game.quit {
            log::info!("Quit requested at frame {frame}");
            break;
        }
    }

    log::info!(
        "Finished: phase {:?}, level {}, {} lives, {} bricks left, last frame {} sprites / {} texts (post {:?})",
        game.state.phase,
        game.state.level_index,
        game.state.lives,
        game.state.level().remaining(),
        stats.sprites,
        stats.texts,
        stats.post,
    );
}
