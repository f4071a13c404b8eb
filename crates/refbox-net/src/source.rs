//! Datagram source abstraction consumed by the listener.

use std::io;
use std::net::UdpSocket;

/// A non-blocking source of whole datagrams.
///
/// `recv` copies one datagram into `buf` and returns its length. When no
/// datagram is queued it must return an error of kind
/// [`io::ErrorKind::WouldBlock`] rather than block, so that draining the
/// queue always terminates.
pub trait DatagramSource {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl DatagramSource for UdpSocket {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        UdpSocket::recv(self, buf)
    }
}

impl<S: DatagramSource + ?Sized> DatagramSource for Box<S> {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).recv(buf)
    }
}
