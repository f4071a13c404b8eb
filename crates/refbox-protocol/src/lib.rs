//! Referee box wire protocol: datagram decoding, the raw command alphabet,
//! and the mapping from commands to semantic referee signals.

pub mod command;
pub mod packet;
pub mod signal;

pub use command::RefCommand;
pub use packet::{PACKET_LEN, PacketError, RefboxPacket};
pub use signal::{RefereeSignal, Side};
