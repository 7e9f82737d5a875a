//! Game driver
//!
//! Owns one session plus its collaborators. Each frame it converts real time
//! into fixed simulation steps, runs them, and forwards the resulting events
//! to the renderer and audio. Collaborator failures are logged, never fatal.

use crate::audio::{AudioManager, SoundEffect};
use crate::error::CollaboratorError;
use crate::leaderboard::ScoreSubmission;
use crate::platform::FrameClock;
use crate::renderer::{BasketView, Renderer};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Result of running one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Session still running
    Running,
    /// Session paused (unfocused)
    Paused,
    /// Session ended during this frame (reported once)
    GameOver { final_score: u32 },
    /// Session ended on an earlier frame
    Ended,
}

/// Game instance holding all state
pub struct Game {
    state: GameState,
    clock: FrameClock,
    renderer: Box<dyn Renderer>,
    audio: AudioManager,
    input: TickInput,
    mute_on_blur: bool,
    game_over_reported: bool,
}

impl Game {
    /// Start a new session
    pub fn new(
        seed: u64,
        settings: &Settings,
        renderer: Box<dyn Renderer>,
        audio: AudioManager,
    ) -> Self {
        log::info!("Starting session with seed {seed}");
        let mut game = Self {
            state: GameState::new(seed, settings),
            clock: FrameClock::new(),
            renderer,
            audio,
            input: TickInput::default(),
            mute_on_blur: settings.mute_on_blur,
            game_over_reported: false,
        };
        game.audio.start_music();
        game.dispatch_events();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    /// Let the demo autopilot steer the basket
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Deliver one tilt sample from the input sensor
    pub fn on_tilt(&mut self, sample: f32) {
        self.state.apply_tilt(sample);
        self.dispatch_events();
    }

    /// Run the simulation for a frame at real time `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        let steps = self.clock.advance(now_ms);
        self.run_steps(steps)
    }

    /// Run exactly one simulation step (headless runs)
    pub fn step(&mut self) -> FrameOutcome {
        self.run_steps(1)
    }

    fn run_steps(&mut self, steps: u32) -> FrameOutcome {
        for _ in 0..steps {
            if self.state.phase != GamePhase::Playing {
                break;
            }
            tick(&mut self.state, &self.input);
        }
        self.dispatch_events()
    }

    /// Screen lost focus: freeze the session and silence audio
    pub fn focus_lost(&mut self) {
        self.clock.focus_lost();
        if self.state.pause() {
            self.audio.pause_music();
            if self.mute_on_blur {
                self.audio.set_muted(true);
            }
        }
    }

    /// Screen regained focus: resume where the session left off
    pub fn focus_gained(&mut self) {
        self.clock.focus_gained();
        if self.state.resume() {
            self.audio.set_muted(false);
            self.audio.start_music();
        }
    }

    /// Final score once the session has ended
    pub fn final_score(&self) -> Option<u32> {
        self.state.is_over().then_some(self.state.score)
    }

    /// Submission handle for the final score (None while still playing)
    pub fn submission(&self) -> Option<ScoreSubmission> {
        self.final_score().map(ScoreSubmission::new)
    }

    /// Forward pending simulation events to collaborators
    fn dispatch_events(&mut self) -> FrameOutcome {
        let mut outcome = match self.state.phase {
            GamePhase::Playing => FrameOutcome::Running,
            GamePhase::Paused => FrameOutcome::Paused,
            GamePhase::GameOver => FrameOutcome::Ended,
        };

        for event in self.state.drain_events() {
            let result = match event {
                GameEvent::ObjectSpawned { id, kind, pos } => {
                    self.renderer.create_object(id, kind, pos)
                }
                GameEvent::ObjectMoved { id, pos } => self.renderer.position_object(id, pos),
                GameEvent::ObjectRemoved { id, .. } => self.renderer.remove_object(id),
                GameEvent::BasketChanged {
                    x,
                    y,
                    width,
                    height,
                    lean,
                } => self.renderer.update_basket(BasketView {
                    x,
                    y,
                    width,
                    height,
                    lean,
                }),
                GameEvent::HudChanged { score, lives } => self.renderer.update_hud(score, lives),
                GameEvent::Collected { .. } => {
                    self.audio.play(SoundEffect::Collect);
                    Ok(())
                }
                GameEvent::Hurt => {
                    self.audio.play(SoundEffect::Hurt);
                    Ok(())
                }
                GameEvent::EffectStarted(effect) => {
                    log::debug!("Effect started: {effect:?}");
                    Ok(())
                }
                GameEvent::EffectEnded(effect) => {
                    log::debug!("Effect ended: {effect:?}");
                    Ok(())
                }
                GameEvent::GameOver { final_score } => {
                    self.audio.stop_music();
                    if !self.game_over_reported {
                        self.game_over_reported = true;
                        outcome = FrameOutcome::GameOver { final_score };
                    }
                    Ok(())
                }
            };
            report(result);
        }

        outcome
    }
}

fn report(result: Result<(), CollaboratorError>) {
    if let Err(e) = result {
        log::warn!("Renderer error: {e}");
    }
}
