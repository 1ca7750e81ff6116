//! The touch picker state machine.
//!
//! ```text
//! idle ──(>1 touches)──> countdown ──(expiry)──> picked ──(all lifted)──> display-winner
//!  ^                        │                                                  │
//!  └────(≤1 touches)────────┘                                                  │
//!  └────────────────────────────(new touch)────────────────────────────────────┘
//! ```
//!
//! Touch events and timer expiries both enter through `&mut self` methods, so
//! the machine is always driven from one thread. The expiry for a session can
//! still arrive after a touch event cancelled or restarted that session; such
//! expiries are ignored.

use crate::config::{PickerConfig, PALETTE};
use crate::countdown::{CountdownSession, SessionId, TimerCommand};
use crate::render::{self, RenderModel};
use crate::tracker::{self, Role, TouchId, TouchSnapshot, TrackedTouch};
use log::{debug, info, warn};
use rand::distr::Uniform;
use rand_distr::Distribution;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PickerState {
    #[default]
    Idle,
    Countdown,
    Picked,
    DisplayWinner,
}

impl fmt::Display for PickerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PickerState::Idle => "idle",
            PickerState::Countdown => "countdown",
            PickerState::Picked => "picked",
            PickerState::DisplayWinner => "display-winner",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct TouchPicker {
    config: PickerConfig,
    state: PickerState,
    trackers: Vec<TrackedTouch>,
    countdown: Option<CountdownSession>,
    /// Winning touch at its last known position
    winner: Option<TrackedTouch>,
    /// Set once the winning finger leaves the surface. Browsers recycle
    /// identifiers, so a later touch with the same id is not the winner.
    winner_lifted: bool,
    next_session: SessionId,
}

impl Default for TouchPicker {
    fn default() -> Self {
        Self::new(PickerConfig::default())
    }
}

impl TouchPicker {
    pub fn new(config: PickerConfig) -> Self {
        Self {
            config,
            state: PickerState::Idle,
            trackers: Vec::new(),
            countdown: None,
            winner: None,
            winner_lifted: false,
            next_session: 0,
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn trackers(&self) -> &[TrackedTouch] {
        &self.trackers
    }

    pub fn winner(&self) -> Option<TouchId> {
        self.winner.map(|w| w.id)
    }

    /// Live countdown session, present only in the `Countdown` state.
    pub fn countdown(&self) -> Option<&CountdownSession> {
        self.countdown.as_ref()
    }

    /// Feed the touches active after a start/move/end/cancel event.
    ///
    /// Returns the timer change the host must carry out, if any.
    pub fn on_touches(&mut self, snapshot: &TouchSnapshot, now_ms: f64) -> Option<TimerCommand> {
        let previous = self.trackers.len();
        let count = snapshot.len();

        let command = match self.state {
            PickerState::Idle => {
                if count > 1 {
                    Some(self.begin_countdown(now_ms))
                } else {
                    None
                }
            }
            PickerState::Countdown => {
                if count == previous {
                    None
                } else if count > 1 {
                    Some(self.restart_countdown(previous, count, now_ms))
                } else {
                    Some(self.cancel_countdown(count))
                }
            }
            PickerState::Picked => {
                if count == 0 {
                    info!("All fingers lifted, showing winner {:?}", self.winner());
                    self.state = PickerState::DisplayWinner;
                }
                None
            }
            PickerState::DisplayWinner => {
                if count > 0 {
                    info!("New touch, starting a fresh round");
                    self.state = PickerState::Idle;
                    self.clear_winner();
                }
                None
            }
        };

        if let Some(w) = self.winner {
            if !self.winner_lifted && !snapshot.points().iter().any(|p| p.id == w.id) {
                debug!("Winner {} lifted at ({}, {})", w.id, w.x, w.y);
                self.winner_lifted = true;
            }
        }

        self.trackers = tracker::track(snapshot, &PALETTE, self.winner());
        if self.winner_lifted {
            self.trackers
                .iter_mut()
                .filter(|t| t.role == Role::Winner)
                .for_each(|t| t.role = Role::Loser);
        } else if let Some(current) = self.winner.and_then(|w| self.trackers.iter().find(|t| t.id == w.id)) {
            self.winner = Some(*current);
        }
        command
    }

    /// Handle the expiry of `session`.
    ///
    /// Returns `false` when the expiry is stale: the machine has left the
    /// countdown, or the session was restarted since the timer was armed.
    pub fn on_expire<R: rand::Rng + ?Sized>(&mut self, session: SessionId, rng: &mut R) -> bool {
        let live = match (&self.state, &self.countdown) {
            (PickerState::Countdown, Some(current)) => current.id() == session,
            _ => false,
        };
        if !live {
            warn!("Ignoring stale expiry for session {} in state {}", session, self.state);
            return false;
        }

        self.countdown = None;

        let Some(index) = pick_index(self.trackers.len(), rng) else {
            warn!("Countdown expired with no touches, back to idle");
            self.state = PickerState::Idle;
            return true;
        };

        let winner_id = self.trackers[index].id;
        info!("Picked touch {} out of {}", winner_id, self.trackers.len());
        self.state = PickerState::Picked;
        self.trackers = self
            .trackers
            .iter()
            .map(|t| TrackedTouch {
                role: if t.id == winner_id {
                    Role::Winner
                } else {
                    Role::Loser
                },
                ..*t
            })
            .collect();
        self.winner = Some(self.trackers[index]);
        self.winner_lifted = false;
        true
    }

    /// Abandon the round and return to `Idle`.
    pub fn reset(&mut self) -> Option<TimerCommand> {
        let command = self.countdown.take().map(|_| TimerCommand::Disarm);
        self.state = PickerState::Idle;
        self.clear_winner();
        self.trackers.iter_mut().for_each(|t| t.role = Role::Neutral);
        command
    }

    pub fn render(&self, now_ms: f64) -> RenderModel {
        let remaining_ms = self.countdown.as_ref().map(|s| s.remaining_ms(now_ms));
        RenderModel {
            state: self.state,
            trackers: self.trackers.clone(),
            winner: self.winner,
            remaining_ms,
            countdown_label: remaining_ms.map(render::countdown_label),
            background: render::background_color(
                self.config.background,
                self.state,
                self.countdown.as_ref(),
                self.trackers.len(),
                now_ms,
            ),
            tracker_size_px: self.config.tracker_size_px,
            debug_lines: self
                .config
                .debug_overlay
                .then(|| render::debug_lines(&self.trackers)),
        }
    }

    fn clear_winner(&mut self) {
        self.winner = None;
        self.winner_lifted = false;
    }

    fn allocate_session(&mut self) -> SessionId {
        let id = self.next_session;
        self.next_session = self.next_session.wrapping_add(1);
        id
    }

    fn begin_countdown(&mut self, now_ms: f64) -> TimerCommand {
        let id = self.allocate_session();
        let duration = self.config.countdown_ms;
        info!("Countdown {} started ({} ms)", id, duration);
        self.countdown = Some(CountdownSession::start(id, now_ms, duration));
        self.state = PickerState::Countdown;
        TimerCommand::Arm {
            session: id,
            after_ms: duration,
        }
    }

    fn restart_countdown(&mut self, previous: usize, count: usize, now_ms: f64) -> TimerCommand {
        let id = self.allocate_session();
        let duration = self.config.countdown_ms;
        debug!("Touch count {} -> {}, restarting countdown as {}", previous, count, id);
        match self.countdown.as_mut() {
            Some(session) => session.restart(id, now_ms),
            None => self.countdown = Some(CountdownSession::start(id, now_ms, duration)),
        }
        TimerCommand::Arm {
            session: id,
            after_ms: duration,
        }
    }

    fn cancel_countdown(&mut self, count: usize) -> TimerCommand {
        if let Some(session) = self.countdown.take() {
            info!("Countdown {} cancelled, {} touch(es) left", session.id(), count);
        }
        self.state = PickerState::Idle;
        TimerCommand::Disarm
    }
}

/// Uniform index in `[0, n)`, or `None` when there is nothing to pick.
fn pick_index<R: rand::Rng + ?Sized>(n: usize, rng: &mut R) -> Option<usize> {
    let dist = Uniform::new(0, n).ok()?;
    Some(dist.sample(rng))
}
