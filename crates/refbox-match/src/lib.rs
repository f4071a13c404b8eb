//! Match state for a referee-driven game: play state, game phase, score,
//! cards, and the match and timeout clocks, plus the state machine that
//! turns referee signals into state changes.

pub mod clock;
pub mod machine;
pub mod state;

pub use clock::Stopwatch;
pub use machine::transition;
pub use state::{CardCounts, ClockId, Effect, GamePhase, MatchSnapshot, MatchState, PlayState};
