//! Raw protocol command alphabet.
//!
//! The legacy referee box sends one ASCII byte per command. Team-specific
//! commands come in lowercase/uppercase pairs: lowercase for the yellow team
//! (side A), uppercase for the blue team (side B).

use serde::{Deserialize, Serialize};

/// A protocol command as it arrives on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefCommand {
    Halt,
    Stop,
    Ready,
    Start,
    Cancel,
    FirstHalf,
    HalfTime,
    SecondHalf,
    Overtime1,
    Overtime2,
    PenaltyShootout,
    TimeoutYellow,
    TimeoutBlue,
    TimeoutEnd,
    KickoffYellow,
    KickoffBlue,
    PenaltyYellow,
    PenaltyBlue,
    DirectYellow,
    DirectBlue,
    IndirectYellow,
    IndirectBlue,
    GoalYellow,
    GoalBlue,
    SubgoalYellow,
    SubgoalBlue,
    YellowCardYellow,
    YellowCardBlue,
    RedCardYellow,
    RedCardBlue,
    Restart,
    /// Any byte outside the protocol alphabet.
    Unknown(u8),
}

impl RefCommand {
    /// Every known command, in protocol order.
    pub const ALL: [RefCommand; 31] = [
        Self::Halt,
        Self::Stop,
        Self::Ready,
        Self::Start,
        Self::Cancel,
        Self::FirstHalf,
        Self::HalfTime,
        Self::SecondHalf,
        Self::Overtime1,
        Self::Overtime2,
        Self::PenaltyShootout,
        Self::TimeoutYellow,
        Self::TimeoutBlue,
        Self::TimeoutEnd,
        Self::KickoffYellow,
        Self::KickoffBlue,
        Self::PenaltyYellow,
        Self::PenaltyBlue,
        Self::DirectYellow,
        Self::DirectBlue,
        Self::IndirectYellow,
        Self::IndirectBlue,
        Self::GoalYellow,
        Self::GoalBlue,
        Self::SubgoalYellow,
        Self::SubgoalBlue,
        Self::YellowCardYellow,
        Self::YellowCardBlue,
        Self::RedCardYellow,
        Self::RedCardBlue,
        Self::Restart,
    ];

    /// Resolve a wire byte. Never fails; unrecognised bytes become
    /// [`RefCommand::Unknown`].
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'H' => Self::Halt,
            b'S' => Self::Stop,
            b' ' => Self::Ready,
            b's' => Self::Start,
            b'c' => Self::Cancel,
            b'1' => Self::FirstHalf,
            b'h' => Self::HalfTime,
            b'2' => Self::SecondHalf,
            b'o' => Self::Overtime1,
            b'O' => Self::Overtime2,
            b'a' => Self::PenaltyShootout,
            b't' => Self::TimeoutYellow,
            b'T' => Self::TimeoutBlue,
            b'z' => Self::TimeoutEnd,
            b'k' => Self::KickoffYellow,
            b'K' => Self::KickoffBlue,
            b'p' => Self::PenaltyYellow,
            b'P' => Self::PenaltyBlue,
            b'f' => Self::DirectYellow,
            b'F' => Self::DirectBlue,
            b'i' => Self::IndirectYellow,
            b'I' => Self::IndirectBlue,
            b'g' => Self::GoalYellow,
            b'G' => Self::GoalBlue,
            b'd' => Self::SubgoalYellow,
            b'D' => Self::SubgoalBlue,
            b'y' => Self::YellowCardYellow,
            b'Y' => Self::YellowCardBlue,
            b'r' => Self::RedCardYellow,
            b'R' => Self::RedCardBlue,
            b'n' => Self::Restart,
            other => Self::Unknown(other),
        }
    }

    /// The wire byte for this command.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::Halt => b'H',
            Self::Stop => b'S',
            Self::Ready => b' ',
            Self::Start => b's',
            Self::Cancel => b'c',
            Self::FirstHalf => b'1',
            Self::HalfTime => b'h',
            Self::SecondHalf => b'2',
            Self::Overtime1 => b'o',
            Self::Overtime2 => b'O',
            Self::PenaltyShootout => b'a',
            Self::TimeoutYellow => b't',
            Self::TimeoutBlue => b'T',
            Self::TimeoutEnd => b'z',
            Self::KickoffYellow => b'k',
            Self::KickoffBlue => b'K',
            Self::PenaltyYellow => b'p',
            Self::PenaltyBlue => b'P',
            Self::DirectYellow => b'f',
            Self::DirectBlue => b'F',
            Self::IndirectYellow => b'i',
            Self::IndirectBlue => b'I',
            Self::GoalYellow => b'g',
            Self::GoalBlue => b'G',
            Self::SubgoalYellow => b'd',
            Self::SubgoalBlue => b'D',
            Self::YellowCardYellow => b'y',
            Self::YellowCardBlue => b'Y',
            Self::RedCardYellow => b'r',
            Self::RedCardBlue => b'R',
            Self::Restart => b'n',
            Self::Unknown(byte) => byte,
        }
    }
}

impl From<u8> for RefCommand {
    fn from(byte: u8) -> Self {
        Self::from_byte(byte)
    }
}
