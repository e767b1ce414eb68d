//! Audio collaborator interface
//!
//! The simulation reports what happened as [`GameEvent`]s. The app feeds
//! them to an [`AudioManager`], which picks the sound, applies volume and
//! mute, and hands it to the platform's [`AudioSink`]. Playback is
//! fire-and-forget: a sink failure never reaches the game.

use thiserror::Error;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Errors an audio backend may report
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio device unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to play '{name}': {reason}")]
    Playback { name: String, reason: String },
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Breakable brick destroyed
    BrickBreak,
    /// Ball hits a solid brick
    SolidHit,
    /// Ball hits paddle
    PaddleHit,
    /// Power-up caught
    PowerUp,
    /// Background music, looped
    Music,
}

impl SoundEffect {
    /// Asset file name
    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::BrickBreak => "bleep.mp3",
            SoundEffect::SolidHit => "solid.wav",
            SoundEffect::PaddleHit => "bleep.wav",
            SoundEffect::PowerUp => "powerup.wav",
            SoundEffect::Music => "breakout.mp3",
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BrickDestroyed { .. } => Some(SoundEffect::BrickBreak),
            GameEvent::SolidHit => Some(SoundEffect::SolidHit),
            GameEvent::PaddleHit => Some(SoundEffect::PaddleHit),
            GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUp),
            _ => None,
        }
    }

    fn is_music(self) -> bool {
        self == SoundEffect::Music
    }
}

/// Platform audio backend
pub trait AudioSink {
    fn play(&mut self, name: &str, volume: f32, looping: bool) -> Result<(), AudioError>;
}

/// Sink that plays nothing, for headless runs
#[derive(Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, name: &str, _volume: f32, _looping: bool) -> Result<(), AudioError> {
        log::trace!("(silent) {name}");
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        let mut audio = Self::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        self.master_volume * channel
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }

        if let Err(e) = self.sink.play(effect.file_name(), vol, effect.is_music()) {
            log::debug!("Audio error: {e}");
        }
    }

    /// Start the looping background track
    pub fn start_music(&mut self) {
        self.play(SoundEffect::Music);
    }

    /// Play the sounds for one frame's events, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
