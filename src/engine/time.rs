//! Per-move time budgeting from the xboard clock.
//!
//! The clock is kept in centiseconds, matching the protocol. Budgets are
//! deliberately conservative: the search only checks the clock between
//! iterative depths, so a depth can overrun its slice and the budget must
//! absorb that.

use std::time::Duration;

/// Floor of the per-move thinking budget.
pub const BASE_TIME: Duration = Duration::from_millis(600);

/// Ceiling of the per-move thinking budget.
pub const MAX_TIME: Duration = Duration::from_millis(1200);

/// Budget cap while in panic.
pub const PANIC_TIME: Duration = Duration::from_millis(200);

/// Session length the counter resets to once it runs out.
pub const DEFAULT_MOVES_PER_SESSION: u32 = 40;

/// One minute per side, the default control.
pub const DEFAULT_CLOCK_CS: u64 = 6_000;

/// Engine-side view of the game clock.
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Our remaining time in centiseconds.
    pub remaining_cs: u64,
    /// Opponent's remaining time; tracked for completeness.
    pub opponent_cs: u64,
    pub increment_cs: u64,
    pub moves_to_go: u32,
    pub sudden_death: bool,
}

impl GameClock {
    #[must_use]
    pub fn new() -> Self {
        GameClock {
            remaining_cs: DEFAULT_CLOCK_CS,
            opponent_cs: DEFAULT_CLOCK_CS,
            increment_cs: 0,
            moves_to_go: DEFAULT_MOVES_PER_SESSION,
            sudden_death: false,
        }
    }

    /// Back to the default control (new game).
    pub fn reset(&mut self) {
        *self = GameClock::new();
    }

    /// Apply a `level` command: conventional session control.
    pub fn set_level(&mut self, moves_per_session: u32, base_minutes: u32, increment_sec: u32) {
        self.moves_to_go = moves_per_session.max(1);
        self.remaining_cs = u64::from(base_minutes) * 60 * 100;
        self.opponent_cs = self.remaining_cs;
        self.increment_cs = u64::from(increment_sec) * 100;
        self.sudden_death = false;
    }

    /// Apply an `st` command: sudden death on a per-move seconds clock.
    pub fn set_sudden_death(&mut self, seconds: u32) {
        self.remaining_cs = u64::from(seconds) * 100;
        self.opponent_cs = self.remaining_cs;
        self.sudden_death = true;
    }

    pub fn set_remaining(&mut self, cs: u64) {
        self.remaining_cs = cs;
    }

    pub fn set_opponent(&mut self, cs: u64) {
        self.opponent_cs = cs;
    }

    fn seconds_left(&self) -> f64 {
        self.remaining_cs as f64 / 100.0
    }

    /// Whether the clock is critical enough to cut thinking to the bone.
    #[must_use]
    pub fn in_panic(&self) -> bool {
        let left = self.seconds_left();
        (self.sudden_death && left < 3.0)
            || left < 2.0
            || left / f64::from(self.moves_to_go.max(1)) < 0.25
    }

    /// Thinking budget for the next move: an even share of the remaining
    /// time, clamped to `[BASE_TIME, MAX_TIME]`, and capped hard in panic.
    #[must_use]
    pub fn per_move_budget(&self) -> Duration {
        let share = self.seconds_left() / f64::from(self.moves_to_go.max(1));
        let clamped = share.max(BASE_TIME.as_secs_f64());
        let mut budget = Duration::from_secs_f64(clamped).min(MAX_TIME);
        if self.in_panic() {
            budget = budget.min(PANIC_TIME);
        }
        budget
    }

    /// Charge an elapsed search to the clock and advance the move counter.
    pub fn consume(&mut self, elapsed: Duration) {
        let spent_cs = (elapsed.as_secs_f64() * 100.0) as u64;
        self.remaining_cs = self.remaining_cs.saturating_sub(spent_cs);
        if self.moves_to_go > 1 {
            self.moves_to_go -= 1;
        } else {
            self.moves_to_go = DEFAULT_MOVES_PER_SESSION;
        }
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}
