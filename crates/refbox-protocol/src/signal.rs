//! Semantic referee signals and the command-to-signal lookup.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::RefCommand;

/// One of the two teams on the field.
///
/// Side A is the yellow team and side B the blue team in the legacy protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

/// The named referee intent behind a protocol command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefereeSignal {
    Start,
    Stop,
    Halt,
    Ready,
    Cancel,
    Timeout(Side),
    Kickoff(Side),
    DirectFreeKick(Side),
    IndirectFreeKick(Side),
    Penalty(Side),
    Goal(Side),
    GoalDecrement(Side),
    YellowCard(Side),
    RedCard(Side),
    BeginFirstHalf,
    BeginHalfTime,
    BeginSecondHalf,
    BeginOvertime1,
    BeginOvertime2,
    BeginPenaltyShootout,
    /// The command has no semantic meaning for the match state.
    Unknown,
}

impl RefereeSignal {
    /// Map a protocol command to its signal.
    ///
    /// Pure lookup, independent of match state. Commands without a signal
    /// (including bytes outside the alphabet) yield [`RefereeSignal::Unknown`].
    pub fn from_command(command: RefCommand) -> Self {
        use RefCommand as C;

        match command {
            C::Start => Self::Start,
            C::Stop => Self::Stop,
            C::Halt => Self::Halt,
            C::Ready => Self::Ready,
            C::Cancel => Self::Cancel,
            C::TimeoutYellow => Self::Timeout(Side::A),
            C::TimeoutBlue => Self::Timeout(Side::B),
            C::KickoffYellow => Self::Kickoff(Side::A),
            C::KickoffBlue => Self::Kickoff(Side::B),
            C::DirectYellow => Self::DirectFreeKick(Side::A),
            C::DirectBlue => Self::DirectFreeKick(Side::B),
            C::IndirectYellow => Self::IndirectFreeKick(Side::A),
            C::IndirectBlue => Self::IndirectFreeKick(Side::B),
            C::PenaltyYellow => Self::Penalty(Side::A),
            C::PenaltyBlue => Self::Penalty(Side::B),
            C::GoalYellow => Self::Goal(Side::A),
            C::GoalBlue => Self::Goal(Side::B),
            C::SubgoalYellow => Self::GoalDecrement(Side::A),
            C::SubgoalBlue => Self::GoalDecrement(Side::B),
            C::YellowCardYellow => Self::YellowCard(Side::A),
            C::YellowCardBlue => Self::YellowCard(Side::B),
            C::RedCardYellow => Self::RedCard(Side::A),
            C::RedCardBlue => Self::RedCard(Side::B),
            C::FirstHalf => Self::BeginFirstHalf,
            C::HalfTime => Self::BeginHalfTime,
            C::SecondHalf => Self::BeginSecondHalf,
            C::Overtime1 => Self::BeginOvertime1,
            C::Overtime2 => Self::BeginOvertime2,
            C::PenaltyShootout => Self::BeginPenaltyShootout,
            C::TimeoutEnd | C::Restart | C::Unknown(_) => {
                debug!(byte = command.to_byte(), "unknown referee command byte");
                Self::Unknown
            }
        }
    }

    /// Decode a raw wire byte straight to a signal.
    pub fn from_byte(byte: u8) -> Self {
        Self::from_command(RefCommand::from_byte(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_start_stop_halt() {
        assert_eq!(RefereeSignal::from_byte(b's'), RefereeSignal::Start);
        assert_eq!(RefereeSignal::from_byte(b'S'), RefereeSignal::Stop);
        assert_eq!(RefereeSignal::from_byte(b'H'), RefereeSignal::Halt);
        assert_eq!(RefereeSignal::from_byte(b' '), RefereeSignal::Ready);
        assert_eq!(RefereeSignal::from_byte(b'c'), RefereeSignal::Cancel);
    }

    #[test]
    fn test_team_commands_map_to_sides() {
        assert_eq!(
            RefereeSignal::from_byte(b't'),
            RefereeSignal::Timeout(Side::A)
        );
        assert_eq!(
            RefereeSignal::from_byte(b'T'),
            RefereeSignal::Timeout(Side::B)
        );
        assert_eq!(
            RefereeSignal::from_byte(b'f'),
            RefereeSignal::DirectFreeKick(Side::A)
        );
        assert_eq!(
            RefereeSignal::from_byte(b'I'),
            RefereeSignal::IndirectFreeKick(Side::B)
        );
        assert_eq!(
            RefereeSignal::from_byte(b'D'),
            RefereeSignal::GoalDecrement(Side::B)
        );
        assert_eq!(
            RefereeSignal::from_byte(b'r'),
            RefereeSignal::RedCard(Side::A)
        );
    }

    #[test]
    fn test_half_markers() {
        assert_eq!(RefereeSignal::from_byte(b'1'), RefereeSignal::BeginFirstHalf);
        assert_eq!(RefereeSignal::from_byte(b'h'), RefereeSignal::BeginHalfTime);
        assert_eq!(RefereeSignal::from_byte(b'2'), RefereeSignal::BeginSecondHalf);
        assert_eq!(RefereeSignal::from_byte(b'o'), RefereeSignal::BeginOvertime1);
        assert_eq!(RefereeSignal::from_byte(b'O'), RefereeSignal::BeginOvertime2);
        assert_eq!(
            RefereeSignal::from_byte(b'a'),
            RefereeSignal::BeginPenaltyShootout
        );
    }

    #[test]
    fn test_commands_without_signal_are_unknown() {
        assert_eq!(RefereeSignal::from_byte(b'z'), RefereeSignal::Unknown);
        assert_eq!(RefereeSignal::from_byte(b'n'), RefereeSignal::Unknown);
        assert_eq!(RefereeSignal::from_byte(0), RefereeSignal::Unknown);
        assert_eq!(RefereeSignal::from_byte(0xFF), RefereeSignal::Unknown);
    }

    #[test]
    fn test_signal_alphabet_is_covered() {
        let signals: HashSet<RefereeSignal> = RefCommand::ALL
            .iter()
            .map(|&c| RefereeSignal::from_command(c))
            .filter(|s| *s != RefereeSignal::Unknown)
            .collect();
        // 5 control + 9 team pairs + 6 half markers
        assert_eq!(signals.len(), 5 + 9 * 2 + 6);
    }
}
