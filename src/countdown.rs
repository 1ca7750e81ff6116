//! Countdown sessions and the host timer contract.
//!
//! The picker keeps the session bookkeeping itself and hands the host a
//! [`TimerCommand`] whenever the pending expiry must change. Each session gets
//! a fresh [`SessionId`] so an expiry that was already queued for an older
//! session can be recognised and dropped.

use serde::Serialize;

pub type SessionId = u32;

/// A running (or paused) countdown. Times are milliseconds on the host clock.
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownSession {
    id: SessionId,
    started_at_ms: f64,
    duration_ms: u32,
    running: bool,
}

impl CountdownSession {
    pub fn start(id: SessionId, now_ms: f64, duration_ms: u32) -> Self {
        Self {
            id,
            started_at_ms: now_ms,
            duration_ms,
            running: true,
        }
    }

    /// Reset elapsed time to zero under a new id.
    pub fn restart(&mut self, id: SessionId, now_ms: f64) {
        self.id = id;
        self.started_at_ms = now_ms;
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed time clamped to `[0, duration]`.
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.started_at_ms).clamp(0.0, self.duration_ms as f64)
    }

    pub fn remaining_ms(&self, now_ms: f64) -> u32 {
        (self.duration_ms as f64 - self.elapsed_ms(now_ms)).ceil() as u32
    }

    /// Fraction of the countdown already spent, in `[0, 1]`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        self.elapsed_ms(now_ms) / self.duration_ms as f64
    }
}

/// Instruction for the host timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TimerCommand {
    /// Schedule expiry of `session` after `after_ms`, replacing anything pending.
    #[serde(rename_all = "camelCase")]
    Arm { session: SessionId, after_ms: u32 },
    /// Cancel the pending expiry, if any.
    Disarm,
}

/// Host timer able to deliver one expiry at a time.
pub trait ExpiryTimer {
    fn arm(&mut self, session: SessionId, after_ms: u32);

    fn disarm(&mut self);

    fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::Arm { session, after_ms } => self.arm(session, after_ms),
            TimerCommand::Disarm => self.disarm(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_counts_down_and_clamps() {
        let session = CountdownSession::start(1, 1_000.0, 4_000);

        assert_eq!(session.remaining_ms(1_000.0), 4_000);
        assert_eq!(session.remaining_ms(2_500.0), 2_500);
        assert_eq!(session.remaining_ms(9_000.0), 0);
        // clock skew before the start never inflates the countdown
        assert_eq!(session.remaining_ms(500.0), 4_000);
    }

    #[test]
    fn restart_resets_elapsed_time() {
        let mut session = CountdownSession::start(1, 0.0, 4_000);
        assert_eq!(session.remaining_ms(3_000.0), 1_000);

        session.restart(2, 3_000.0);

        assert_eq!(session.id(), 2);
        assert_eq!(session.remaining_ms(3_000.0), 4_000);
        assert!(session.is_running());
    }

    #[test]
    fn pause_stops_but_allows_restart() {
        let mut session = CountdownSession::start(1, 0.0, 4_000);
        session.pause();
        assert!(!session.is_running());

        session.restart(5, 100.0);
        assert!(session.is_running());
        assert_eq!(session.progress(100.0), 0.0);
    }

    #[derive(Default)]
    struct Recorder {
        armed: Option<(SessionId, u32)>,
    }

    impl ExpiryTimer for Recorder {
        fn arm(&mut self, session: SessionId, after_ms: u32) {
            self.armed = Some((session, after_ms));
        }

        fn disarm(&mut self) {
            self.armed = None;
        }
    }

    #[test]
    fn commands_carry_a_kind_tag() {
        let arm = serde_json::to_value(TimerCommand::Arm { session: 3, after_ms: 4_000 }).unwrap();
        assert_eq!(arm, serde_json::json!({ "kind": "arm", "session": 3, "afterMs": 4000 }));

        let disarm = serde_json::to_value(TimerCommand::Disarm).unwrap();
        assert_eq!(disarm, serde_json::json!({ "kind": "disarm" }));
    }

    #[test]
    fn apply_dispatches_commands() {
        let mut timer = Recorder::default();
        timer.apply(TimerCommand::Arm { session: 7, after_ms: 4_000 });
        assert_eq!(timer.armed, Some((7, 4_000)));

        timer.apply(TimerCommand::Arm { session: 8, after_ms: 4_000 });
        assert_eq!(timer.armed, Some((8, 4_000)));

        timer.apply(TimerCommand::Disarm);
        assert_eq!(timer.armed, None);
    }
}
