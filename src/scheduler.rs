//! Animation-frame loop driving one game session
//!
//! The host owns the real frame primitive (`requestAnimationFrame` on web).
//! The scheduler owns the token of the single pending request: the host arms it
//! after requesting a frame, `stop` hands it back for cancellation, and a
//! callback carrying any other token is ignored. Each callback decides whether
//! to continue from the session phase alone.

use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::settings::Settings;
use crate::sim::{EnemyKind, HeldDirections, MoveDirection, Session, TickOutcome, tick};

/// Host handle of a pending animation-frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameToken(pub i32);

/// Coarse loop state as seen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopPhase {
    /// No session has been started yet
    Idle,
    Running,
    GameOver,
}

/// Final result handed to the host once per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub killer: EnemyKind,
    pub level: u32,
    pub elapsed_ms: f64,
    /// How long the host waits before showing the score prompt
    pub prompt_delay_ms: u32,
}

/// What the host should do after a frame callback
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Request the next frame and arm its token
    Continue,
    /// Run ended this frame: render the explosion, schedule the score prompt
    GameOver(GameOverReport),
    /// Stale or cancelled callback; do nothing
    Ignored,
}

pub struct FrameScheduler {
    settings: Settings,
    session: Option<Session>,
    held: HeldDirections,
    /// Timestamp of the previous callback (None on a session's first frame)
    last_render: Option<f64>,
    pending: Option<FrameToken>,
    game_over_reported: bool,
}

impl FrameScheduler {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            session: None,
            held: HeldDirections::default(),
            last_render: None,
            pending: None,
            game_over_reported: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    pub fn held(&self) -> HeldDirections {
        self.held
    }

    pub fn phase(&self) -> LoopPhase {
        match &self.session {
            None => LoopPhase::Idle,
            Some(s) if s.is_running() => LoopPhase::Running,
            Some(_) => LoopPhase::GameOver,
        }
    }

    /// Whether a frame request is outstanding
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Seed for the next session: the configured one, else `fallback`
    pub fn next_seed(&self, fallback: u64) -> u64 {
        self.settings.seed.unwrap_or(fallback)
    }

    /// Replace the session with a fresh one. Enemies stay hidden until spawned
    /// and any running loop keeps running.
    pub fn reset(&mut self, seed: u64, container: Rect) {
        log::info!("Reset game (seed {})", seed);
        self.session = Some(Session::new(seed, container, &self.settings));
        self.held = HeldDirections::default();
        self.last_render = None;
        self.game_over_reported = false;
    }

    /// Reset, spawn enemies and get ready to loop. Returns a still-pending
    /// request the host must cancel before requesting the first frame.
    pub fn initialize(&mut self, seed: u64, container: Rect) -> Option<FrameToken> {
        log::info!("Initialize game");
        self.reset(seed, container);
        if let Some(session) = self.session.as_mut() {
            session.spawn_enemies();
        }
        self.pending.take()
    }

    /// Record the host's request for the next frame
    pub fn arm(&mut self, token: FrameToken) {
        self.pending = Some(token);
    }

    /// Stop the loop. Returns the pending request for the host to cancel.
    pub fn stop(&mut self) -> Option<FrameToken> {
        log::info!("Stop game");
        self.pending.take()
    }

    /// Arrow key down. Returns false for keys the game ignores.
    pub fn press(&mut self, key: &str) -> bool {
        self.set_key(key, true)
    }

    /// Arrow key up. Returns false for keys the game ignores.
    pub fn release(&mut self, key: &str) -> bool {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: &str, held: bool) -> bool {
        match MoveDirection::from_key(key) {
            Some(direction) => {
                self.held.set(direction, held);
                true
            }
            None => false,
        }
    }

    /// Animation-frame callback
    pub fn on_frame(&mut self, token: FrameToken, timestamp: f64) -> FrameOutcome {
        if self.pending != Some(token) {
            log::trace!("Ignoring stale frame {:?}", token);
            return FrameOutcome::Ignored;
        }
        self.pending = None;

        let Some(session) = self.session.as_mut() else {
            return FrameOutcome::Ignored;
        };

        let progress = match self.last_render {
            Some(last) => timestamp - last,
            None => 0.0,
        };
        if self.last_render != Some(timestamp) {
            if let TickOutcome::Collision(kind) = tick(session, self.held, progress) {
                log::debug!("Hit by {}", kind.as_str());
            }
        }
        self.last_render = Some(timestamp);

        if session.is_running() {
            return FrameOutcome::Continue;
        }
        if self.game_over_reported {
            return FrameOutcome::Ignored;
        }
        self.game_over_reported = true;

        log::info!("Collision detected: Game Over");
        let Some(killer) = session.killer else {
            return FrameOutcome::Ignored;
        };
        session.player.explode();
        if let Some(enemy) = session.enemies.iter_mut().find(|e| e.kind == killer) {
            enemy.visible = false;
        }

        FrameOutcome::GameOver(GameOverReport {
            killer,
            level: session.clock.level(),
            elapsed_ms: session.clock.elapsed_ms(),
            prompt_delay_ms: self.settings.score_prompt_delay_ms,
        })
    }
}
