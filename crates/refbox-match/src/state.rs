//! Match state aggregate and the effects that mutate it.
//!
//! [`MatchState`] is the single source of truth that scoreboards and robot
//! control loops read. It changes only through [`MatchState::apply_effect`]
//! and the collaborator setters it forwards to.

use std::time::Instant;

use refbox_protocol::{RefCommand, Side};
use serde::{Deserialize, Serialize};

use crate::clock::Stopwatch;

/// Current phase of active refereeing control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    #[default]
    Halted,
    Stopped,
    Running,
    BeforeKickoff(Side),
    Kickoff(Side),
    BeforePenalty(Side),
    Penalty(Side),
    DirectFreeKick(Side),
    IndirectFreeKick(Side),
}

/// Coarse match segment, independent of [`PlayState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    NotStarted,
    FirstHalf,
    HalfTime,
    SecondHalf,
    Overtime1,
    Overtime2,
    PenaltyShootout,
}

/// Identifies one of the three clocks owned by [`MatchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockId {
    Match,
    Timeout(Side),
}

/// Disciplinary card counters, also used as an additive delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardCounts {
    pub yellow_a: u32,
    pub red_a: u32,
    pub yellow_b: u32,
    pub red_b: u32,
}

impl CardCounts {
    /// A single yellow card for `side`.
    pub fn yellow(side: Side) -> Self {
        match side {
            Side::A => Self {
                yellow_a: 1,
                ..Self::default()
            },
            Side::B => Self {
                yellow_b: 1,
                ..Self::default()
            },
        }
    }

    /// A single red card for `side`.
    pub fn red(side: Side) -> Self {
        match side {
            Side::A => Self {
                red_a: 1,
                ..Self::default()
            },
            Side::B => Self {
                red_b: 1,
                ..Self::default()
            },
        }
    }
}

/// A single side effect produced by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    SetPlayState(PlayState),
    SetGameTime(GamePhase),
    StartClock(ClockId),
    PauseClock(ClockId),
    UnpauseClock(ClockId),
    /// Signed goal delta for each side.
    AddGoal { a: i32, b: i32 },
    AddCard(CardCounts),
}

/// The owned, mutated match aggregate.
#[derive(Debug, Clone, Default)]
pub struct MatchState {
    play_state: PlayState,
    game_time: GamePhase,
    score_a: i32,
    score_b: i32,
    cards: CardCounts,
    match_clock: Stopwatch,
    timeout_a: Stopwatch,
    timeout_b: Stopwatch,
    refbox_command: Option<RefCommand>,
}

/// Serializable point-in-time view of a [`MatchState`] for display consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub play_state: PlayState,
    pub game_time: GamePhase,
    pub score_a: i32,
    pub score_b: i32,
    pub cards: CardCounts,
    pub match_elapsed_ms: u64,
    pub timeout_a_elapsed_ms: u64,
    pub timeout_b_elapsed_ms: u64,
    /// Last referee command accepted by the listener.
    pub refbox_command: Option<RefCommand>,
}

impl MatchState {
    /// Fresh match: halted, not started, zero scores, idle clocks.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    pub fn game_time(&self) -> GamePhase {
        self.game_time
    }

    pub fn score_a(&self) -> i32 {
        self.score_a
    }

    pub fn score_b(&self) -> i32 {
        self.score_b
    }

    pub fn cards(&self) -> CardCounts {
        self.cards
    }

    pub fn clock(&self, id: ClockId) -> &Stopwatch {
        match id {
            ClockId::Match => &self.match_clock,
            ClockId::Timeout(Side::A) => &self.timeout_a,
            ClockId::Timeout(Side::B) => &self.timeout_b,
        }
    }

    pub fn clock_mut(&mut self, id: ClockId) -> &mut Stopwatch {
        match id {
            ClockId::Match => &mut self.match_clock,
            ClockId::Timeout(Side::A) => &mut self.timeout_a,
            ClockId::Timeout(Side::B) => &mut self.timeout_b,
        }
    }

    pub fn match_clock(&self) -> &Stopwatch {
        &self.match_clock
    }

    /// Last referee command accepted by the listener, if any.
    pub fn refbox_command(&self) -> Option<RefCommand> {
        self.refbox_command
    }

    /// Record the raw command that is about to be applied.
    pub fn set_refbox_command(&mut self, command: RefCommand) {
        self.refbox_command = Some(command);
    }

    pub fn set_play_state(&mut self, state: PlayState) {
        self.play_state = state;
    }

    pub fn set_game_time(&mut self, phase: GamePhase) {
        self.game_time = phase;
    }

    /// Add signed deltas to both scores. Scores may go negative.
    pub fn add_goal(&mut self, delta_a: i32, delta_b: i32) {
        self.score_a += delta_a;
        self.score_b += delta_b;
    }

    pub fn add_card(&mut self, yellow_a: u32, red_a: u32, yellow_b: u32, red_b: u32) {
        self.cards.yellow_a += yellow_a;
        self.cards.red_a += red_a;
        self.cards.yellow_b += yellow_b;
        self.cards.red_b += red_b;
    }

    /// Apply one effect, using the current instant for clock operations.
    pub fn apply_effect(&mut self, effect: Effect) {
        self.apply_effect_at(effect, Instant::now());
    }

    /// Apply one effect with an explicit clock instant.
    pub fn apply_effect_at(&mut self, effect: Effect, now: Instant) {
        match effect {
            Effect::SetPlayState(state) => self.set_play_state(state),
            Effect::SetGameTime(phase) => self.set_game_time(phase),
            Effect::StartClock(id) => self.clock_mut(id).start_at(now),
            Effect::PauseClock(id) => self.clock_mut(id).pause_at(now),
            Effect::UnpauseClock(id) => self.clock_mut(id).unpause_at(now),
            Effect::AddGoal { a, b } => self.add_goal(a, b),
            Effect::AddCard(c) => self.add_card(c.yellow_a, c.red_a, c.yellow_b, c.red_b),
        }
    }

    /// Capture a serializable view of the match at `now`.
    pub fn snapshot_at(&self, now: Instant) -> MatchSnapshot {
        let ms = |sw: &Stopwatch| sw.elapsed_at(now).as_millis() as u64;
        MatchSnapshot {
            play_state: self.play_state,
            game_time: self.game_time,
            score_a: self.score_a,
            score_b: self.score_b,
            cards: self.cards,
            match_elapsed_ms: ms(&self.match_clock),
            timeout_a_elapsed_ms: ms(&self.timeout_a),
            timeout_b_elapsed_ms: ms(&self.timeout_b),
            refbox_command: self.refbox_command,
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        self.snapshot_at(Instant::now())
    }
}
