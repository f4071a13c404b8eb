//! UDP transport for the referee box: socket setup, the datagram source
//! contract, and the listener that deduplicates packets and drives the match.

pub mod listener;
pub mod socket;
pub mod source;

pub use listener::{LastCommand, RECV_BUFFER_LEN, RefboxListener};
pub use socket::{DEFAULT_GROUP, DEFAULT_PORT, SocketConfig, SocketError, create_socket};
pub use source::DatagramSource;
