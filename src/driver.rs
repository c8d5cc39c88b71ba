//! Frame-driven game loop.
//!
//! The host calls [`Driver::frame`] once per displayed frame with a
//! monotonic timestamp.  Two [`Cadence`]s decide whether the alien tick
//! and the missile tick are due; the alien tick always runs first.  The
//! driver also owns the game's phase and the single start/pause control.

use std::time::Duration;

use log::{info, warn};
use rand::Rng;

use crate::canvas::Surface;
use crate::compute::{self, GameState, TickOutcome};
use crate::config::GameConfig;
use crate::registry::EntityId;
use crate::store::ScoreStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// What the host should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Schedule another frame.
    Rearm,
    /// The game just ended on this frame.
    GameOver,
    /// Nothing is running; frames are no-ops until the control is used.
    Suspended,
}

/// Fixed-interval accumulator for one subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cadence {
    interval: Duration,
    last: Duration,
}

impl Cadence {
    pub fn new(interval: Duration) -> Self {
        Cadence {
            interval,
            last: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last(&self) -> Duration {
        self.last
    }

    pub fn rebaseline(&mut self, now: Duration) {
        self.last = now;
    }

    /// Push the baseline forward by a stretch of time that must not count.
    pub fn skip(&mut self, suspended: Duration) {
        self.last += suspended;
    }

    /// True (and re-baselined to `now`) once a full interval has elapsed.
    pub fn due(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

pub struct Driver<S, P, R> {
    state: GameState<S>,
    store: P,
    rng: R,
    phase: Phase,
    aliens: Cadence,
    missiles: Cadence,
    paused_at: Option<Duration>,
    best: u32,
}

impl<S: Surface, P: ScoreStore, R: Rng> Driver<S, P, R> {
    pub fn new(config: GameConfig, surface: S, store: P, rng: R) -> Self {
        let aliens = Cadence::new(config.timing.alien_interval());
        let missiles = Cadence::new(config.timing.missile_interval());
        let best = store.best().unwrap_or_else(|e| {
            warn!("could not read best score: {}", e);
            0
        });
        Driver {
            state: compute::init_state(config, surface),
            store,
            rng,
            phase: Phase::Idle,
            aliens,
            missiles,
            paused_at: None,
            best,
        }
    }

    pub fn state(&self) -> &GameState<S> {
        &self.state
    }

    pub fn surface(&self) -> &S {
        self.state.stage.surface()
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn best_score(&self) -> u32 {
        self.best
    }

    pub fn speed(&self) -> u32 {
        self.state.speed
    }

    pub fn alien_cadence(&self) -> &Cadence {
        &self.aliens
    }

    pub fn missile_cadence(&self) -> &Cadence {
        &self.missiles
    }

    // ── Control ──────────────────────────────────────────────────────────────

    /// The one button: start, pause, resume, or clear a finished game.
    pub fn toggle(&mut self, now: Duration) -> Phase {
        match self.phase {
            Phase::Idle => self.start(now),
            Phase::Running => self.pause(now),
            Phase::Paused => self.resume(now),
            Phase::GameOver => self.teardown(),
        }
        self.phase
    }

    pub fn start(&mut self, now: Duration) {
        compute::reset(&mut self.state);
        compute::place_turret(&mut self.state);
        self.best = self.store.best().unwrap_or_else(|e| {
            warn!("could not read best score: {}", e);
            self.best
        });
        self.aliens.rebaseline(now);
        self.missiles.rebaseline(now);
        self.paused_at = None;
        self.phase = Phase::Running;
        info!("game started at speed {}", self.state.speed);
    }

    pub fn pause(&mut self, now: Duration) {
        if self.phase != Phase::Running {
            return;
        }
        self.paused_at = Some(now);
        self.phase = Phase::Paused;
        info!("game paused");
    }

    /// Resume without crediting the paused stretch to either cadence.
    pub fn resume(&mut self, now: Duration) {
        if self.phase != Phase::Paused {
            return;
        }
        if let Some(paused_at) = self.paused_at.take() {
            let suspended = now.saturating_sub(paused_at);
            self.aliens.skip(suspended);
            self.missiles.skip(suspended);
        }
        self.phase = Phase::Running;
        info!("game resumed");
    }

    /// Back to an empty, idle board.
    pub fn teardown(&mut self) {
        compute::reset(&mut self.state);
        self.paused_at = None;
        self.phase = Phase::Idle;
    }

    /// Turn the speed dial.  Locked while a game is in progress.
    pub fn set_speed(&mut self, speed: u32) -> bool {
        if matches!(self.phase, Phase::Running | Phase::Paused) {
            return false;
        }
        self.state.speed = self.state.config.speed.snap(speed);
        true
    }

    pub fn press(&mut self, alien: EntityId) -> Option<EntityId> {
        if self.phase != Phase::Running {
            return None;
        }
        compute::press_alien(&mut self.state, alien)
    }

    // ── Frame ────────────────────────────────────────────────────────────────

    pub fn frame(&mut self, now: Duration) -> FrameOutcome {
        if self.phase != Phase::Running {
            return FrameOutcome::Suspended;
        }

        if self.aliens.due(now)
            && compute::alien_tick(&mut self.state, &mut self.rng) == TickOutcome::GameOver
        {
            self.finish();
            return FrameOutcome::GameOver;
        }

        if self.missiles.due(now) {
            compute::missile_tick(&mut self.state);
        }

        FrameOutcome::Rearm
    }

    fn finish(&mut self) {
        self.phase = Phase::GameOver;
        let score = self.state.score;
        if score > self.best {
            self.best = score;
            if let Err(e) = self.store.set_best(score) {
                warn!("could not save best score {}: {}", score, e);
            }
            info!("new best score {}", score);
        }
    }
}
