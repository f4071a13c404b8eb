//! Referee signal state machine.
//!
//! [`transition`] is a pure function from the current [`MatchState`] and a
//! [`RefereeSignal`] to the list of [`Effect`]s that signal causes. It never
//! mutates anything, so every rule can be checked by inspecting the returned
//! effects. [`MatchState::apply_signal`] runs the transition and applies it.
//!
//! Card and goal signals change exactly their own counter by one. There is no
//! cascade into the other card or goal counters.

use std::time::Instant;

use refbox_protocol::{RefereeSignal, Side};
use tracing::debug;

use crate::state::{CardCounts, ClockId, Effect, GamePhase, MatchState, PlayState};

/// Compute the effects of `signal` against `state`.
///
/// Every signal is accepted in every state. Combinations without a rule
/// produce no effects.
pub fn transition(state: &MatchState, signal: RefereeSignal) -> Vec<Effect> {
    let mut effects = Vec::new();

    match signal {
        RefereeSignal::Start => {
            effects.push(Effect::SetPlayState(PlayState::Running));
            effects.push(start_or_resume(state, ClockId::Match));
        }

        RefereeSignal::Stop => {
            // Pause only the first running timeout clock, side A first. A
            // second running clock is left alone, as the legacy listener does.
            if let Some(side) = [Side::A, Side::B]
                .into_iter()
                .find(|&side| state.clock(ClockId::Timeout(side)).is_running())
            {
                effects.push(Effect::PauseClock(ClockId::Timeout(side)));
            }
            effects.push(Effect::SetPlayState(PlayState::Stopped));
        }

        RefereeSignal::Halt => {
            effects.push(Effect::SetPlayState(PlayState::Halted));
            effects.push(Effect::PauseClock(ClockId::Match));
        }

        RefereeSignal::Cancel => {}

        RefereeSignal::Ready => {
            let next = match state.play_state() {
                PlayState::BeforeKickoff(side) => Some(PlayState::Kickoff(side)),
                PlayState::BeforePenalty(side) => Some(PlayState::Penalty(side)),
                _ => None,
            };
            if let Some(next) = next {
                effects.push(Effect::SetPlayState(next));
            }
            if !state.match_clock().has_started() {
                effects.push(Effect::StartClock(ClockId::Match));
            }
        }

        RefereeSignal::Kickoff(side) => {
            effects.push(Effect::SetPlayState(PlayState::BeforeKickoff(side)));
        }
        RefereeSignal::DirectFreeKick(side) => {
            effects.push(Effect::SetPlayState(PlayState::DirectFreeKick(side)));
        }
        RefereeSignal::IndirectFreeKick(side) => {
            effects.push(Effect::SetPlayState(PlayState::IndirectFreeKick(side)));
        }
        RefereeSignal::Penalty(side) => {
            effects.push(Effect::SetPlayState(PlayState::BeforePenalty(side)));
        }

        RefereeSignal::Timeout(side) => {
            effects.push(start_or_resume(state, ClockId::Timeout(side)));
            effects.push(Effect::PauseClock(ClockId::Match));
        }

        RefereeSignal::YellowCard(side) => effects.push(Effect::AddCard(CardCounts::yellow(side))),
        RefereeSignal::RedCard(side) => effects.push(Effect::AddCard(CardCounts::red(side))),
        RefereeSignal::Goal(side) => effects.push(goal_delta(side, 1)),
        RefereeSignal::GoalDecrement(side) => effects.push(goal_delta(side, -1)),

        RefereeSignal::BeginFirstHalf => effects.push(Effect::SetGameTime(GamePhase::FirstHalf)),
        RefereeSignal::BeginHalfTime => effects.push(Effect::SetGameTime(GamePhase::HalfTime)),
        RefereeSignal::BeginSecondHalf => effects.push(Effect::SetGameTime(GamePhase::SecondHalf)),
        RefereeSignal::BeginOvertime1 => effects.push(Effect::SetGameTime(GamePhase::Overtime1)),
        RefereeSignal::BeginOvertime2 => effects.push(Effect::SetGameTime(GamePhase::Overtime2)),
        RefereeSignal::BeginPenaltyShootout => {
            effects.push(Effect::SetGameTime(GamePhase::PenaltyShootout))
        }

        RefereeSignal::Unknown => {
            debug!("unknown referee signal, match state unchanged");
        }
    }

    effects
}

/// Start a clock the first time, resume it afterwards.
fn start_or_resume(state: &MatchState, id: ClockId) -> Effect {
    if state.clock(id).has_started() {
        Effect::UnpauseClock(id)
    } else {
        Effect::StartClock(id)
    }
}

fn goal_delta(side: Side, delta: i32) -> Effect {
    match side {
        Side::A => Effect::AddGoal { a: delta, b: 0 },
        Side::B => Effect::AddGoal { a: 0, b: delta },
    }
}

impl MatchState {
    /// Apply `signal` and return the effects that were performed.
    pub fn apply_signal(&mut self, signal: RefereeSignal) -> Vec<Effect> {
        self.apply_signal_at(signal, Instant::now())
    }

    /// Like [`apply_signal`](Self::apply_signal) with an explicit clock instant.
    pub fn apply_signal_at(&mut self, signal: RefereeSignal, now: Instant) -> Vec<Effect> {
        let effects = transition(self, signal);
        for &effect in &effects {
            self.apply_effect_at(effect, now);
        }
        effects
    }
}
