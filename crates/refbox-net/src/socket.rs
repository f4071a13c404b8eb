//! UDP socket creation for the referee broadcast.
//!
//! The referee box multicasts to a well-known group. [`create_socket`] binds
//! the port on all interfaces, joins the group, and puts the socket into
//! non-blocking mode so a read on an empty queue returns `WouldBlock`
//! instead of stalling the polling loop. A unicast address is bound directly,
//! which is handy for a referee box running on the same host.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};

use socket2::{Domain, Protocol, Socket, Type};

/// Default multicast group of the legacy referee box.
pub const DEFAULT_GROUP: Ipv4Addr = Ipv4Addr::new(224, 5, 23, 1);

/// Default referee box port.
pub const DEFAULT_PORT: u16 = 10001;

/// Socket options for the referee listener.
#[derive(Debug, Clone)]
pub struct SocketConfig {
    /// Multicast group to join, or a unicast address to bind. Default: 224.5.23.1.
    pub address: Ipv4Addr,
    /// UDP port. Default: 10001.
    pub port: u16,
    /// Local interface used for the multicast membership. Default: any.
    pub interface: Ipv4Addr,
    /// Enable `SO_REUSEADDR` so several listeners can share the port. Default: true.
    pub reuse_addr: bool,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_GROUP,
            port: DEFAULT_PORT,
            interface: Ipv4Addr::UNSPECIFIED,
            reuse_addr: true,
        }
    }
}

/// Errors raised while setting up the referee socket.
#[derive(Debug, thiserror::Error)]
pub enum SocketError {
    /// Joining the multicast group failed.
    #[error("failed to join multicast group {group} on {interface}: {source}")]
    JoinMulticast {
        group: Ipv4Addr,
        interface: Ipv4Addr,
        #[source]
        source: std::io::Error,
    },

    /// Any other socket I/O error (create, option, bind).
    #[error("socket I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create, bind, and configure a non-blocking UDP socket.
pub fn create_socket(config: &SocketConfig) -> Result<UdpSocket, SocketError> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;

    if config.reuse_addr {
        socket.set_reuse_address(true)?;
    }

    let multicast = config.address.is_multicast();
    let bind_ip = if multicast {
        Ipv4Addr::UNSPECIFIED
    } else {
        config.address
    };
    let bind_addr = SocketAddr::V4(SocketAddrV4::new(bind_ip, config.port));
    socket.bind(&bind_addr.into())?;

    if multicast {
        socket
            .join_multicast_v4(&config.address, &config.interface)
            .map_err(|source| SocketError::JoinMulticast {
                group: config.address,
                interface: config.interface,
                source,
            })?;
    }

    socket.set_nonblocking(true)?;
    Ok(socket.into())
}
