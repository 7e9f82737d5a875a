//! Audio cues
//!
//! The simulation reports "collect" and "hurt" events; the `AudioManager`
//! applies volume settings and hands them to a platform `AudioBackend`.
//! Playback is fire-and-forget: backend failures are logged and dropped.

use crate::error::CollaboratorError;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Anything other than a negative object caught
    Collect,
    /// Negative object caught
    Hurt,
}

/// Looping background music transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicState {
    Playing,
    Paused,
    Stopped,
}

/// Platform audio output
pub trait AudioBackend {
    /// Trigger a one-shot effect at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), CollaboratorError>;
    /// Change the background music transport
    fn set_music(&mut self, state: MusicState, volume: f32) -> Result<(), CollaboratorError>;
}

/// Backend that only logs (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), CollaboratorError> {
        log::trace!("sfx {effect:?} @ {volume:.2}");
        Ok(())
    }

    fn set_music(&mut self, state: MusicState, volume: f32) -> Result<(), CollaboratorError> {
        log::trace!("music {state:?} @ {volume:.2}");
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    music: MusicState,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(LogAudio))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            music: MusicState::Stopped,
        }
    }

    /// Create a manager with volumes taken from settings
    pub fn with_settings(backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
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

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn music(&self) -> MusicState {
        self.music
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play(effect, vol) {
            log::warn!("Failed to play {effect:?}: {e}");
        }
    }

    pub fn start_music(&mut self) {
        self.set_music(MusicState::Playing);
    }

    pub fn pause_music(&mut self) {
        if self.music == MusicState::Playing {
            self.set_music(MusicState::Paused);
        }
    }

    pub fn stop_music(&mut self) {
        self.set_music(MusicState::Stopped);
    }

    fn set_music(&mut self, state: MusicState) {
        if self.music == state {
            return;
        }
        self.music = state;
        let vol = if self.muted { 0.0 } else { self.master_volume };
        if let Err(e) = self.backend.set_music(state, vol) {
            log::warn!("Failed to switch music to {state:?}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        played: Rc<RefCell<Vec<(SoundEffect, f32)>>>,
        fail: bool,
    }

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), CollaboratorError> {
            if self.fail {
                return Err(CollaboratorError::Unavailable { collaborator: "audio" });
            }
            self.played.borrow_mut().push((effect, volume));
            Ok(())
        }

        fn set_music(&mut self, _state: MusicState, _volume: f32) -> Result<(), CollaboratorError> {
            if self.fail {
                return Err(CollaboratorError::Unavailable { collaborator: "audio" });
            }
            Ok(())
        }
    }

    #[test]
    fn test_volume_applied() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Box::new(Recorder {
            played: played.clone(),
            fail: false,
        }));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::Collect);
        assert_eq!(*played.borrow(), vec![(SoundEffect::Collect, 0.25)]);
    }

    #[test]
    fn test_muted_skips_backend() {
        let played = Rc::new(RefCell::new(Vec::new()));
        let mut audio = AudioManager::new(Box::new(Recorder {
            played: played.clone(),
            fail: false,
        }));
        audio.set_muted(true);
        audio.play(SoundEffect::Hurt);
        assert!(played.borrow().is_empty());
    }

    #[test]
    fn test_backend_failure_is_swallowed() {
        let mut audio = AudioManager::new(Box::new(Recorder {
            fail: true,
            ..Default::default()
        }));
        audio.play(SoundEffect::Hurt);
        audio.start_music();
        assert_eq!(audio.music(), MusicState::Playing);
    }

    #[test]
    fn test_music_transport() {
        let mut audio = AudioManager::default();
        audio.pause_music();
        assert_eq!(audio.music(), MusicState::Stopped);
        audio.start_music();
        audio.pause_music();
        assert_eq!(audio.music(), MusicState::Paused);
        audio.stop_music();
        assert_eq!(audio.music(), MusicState::Stopped);
    }
}
