//! Fixed-length referee box datagram.
//!
//! Every referee broadcast is exactly six bytes:
//!
//! ```text
//! +---------+---------+---------+---------+-------------------+
//! | command | counter | score_a | score_b | time_remaining    |
//! | u8      | u8      | u8      | u8      | u16 big-endian    |
//! +---------+---------+---------+---------+-------------------+
//! ```
//!
//! The score bytes are per team colour, not per side: `score_a` is the blue
//! team's goal count (side B) and `score_b` the yellow team's (side A). Use
//! [`RefboxPacket::goals`] to read them by [`Side`].
//!
//! The command byte is not validated here. Unknown bytes are carried through
//! and resolved later by [`RefCommand::from_byte`](crate::RefCommand::from_byte).

use crate::Side;

/// Size in bytes of a referee datagram on the wire.
pub const PACKET_LEN: usize = 6;

/// A decoded referee datagram. Lives for one listener cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefboxPacket {
    /// Raw protocol command byte.
    pub command: u8,
    /// Wrapping sequence counter, incremented by the referee box per command.
    pub command_counter: u8,
    /// Wire byte 2: goals of the blue team (side B).
    pub score_a: u8,
    /// Wire byte 3: goals of the yellow team (side A).
    pub score_b: u8,
    /// Remaining time in the current phase, in seconds.
    pub time_remaining: u16,
}

/// Errors produced when a byte slice cannot be read as a [`RefboxPacket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PacketError {
    /// The slice was not exactly [`PACKET_LEN`] bytes long.
    #[error("expected 6 bytes, got {0}")]
    InvalidLength(usize),
}

impl TryFrom<&[u8]> for RefboxPacket {
    type Error = PacketError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let raw: &[u8; PACKET_LEN] = bytes
            .try_into()
            .map_err(|_| PacketError::InvalidLength(bytes.len()))?;

        Ok(Self {
            command: raw[0],
            command_counter: raw[1],
            score_a: raw[2],
            score_b: raw[3],
            time_remaining: u16::from_be_bytes([raw[4], raw[5]]),
        })
    }
}

impl RefboxPacket {
    /// Decode the first `len` bytes of `buf`.
    ///
    /// Returns `None` for any length other than [`PACKET_LEN`]. Partial reads
    /// and unrelated payloads are routine on a shared multicast group, so this
    /// is not reported as an error.
    pub fn decode(buf: &[u8], len: usize) -> Option<Self> {
        if len != PACKET_LEN {
            return None;
        }
        buf.get(..len).and_then(|bytes| Self::try_from(bytes).ok())
    }

    /// Goals the referee box reports for `side`.
    pub fn goals(&self, side: Side) -> u8 {
        match side {
            Side::A => self.score_b,
            Side::B => self.score_a,
        }
    }

    /// Encode into the six-byte wire layout.
    pub fn to_bytes(&self) -> [u8; PACKET_LEN] {
        let time = self.time_remaining.to_be_bytes();
        [
            self.command,
            self.command_counter,
            self.score_a,
            self.score_b,
            time[0],
            time[1],
        ]
    }
}
