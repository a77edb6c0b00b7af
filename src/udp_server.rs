//! UDP Server module
//!
//! This module provides the echo service: one datagram socket on a fixed port and a
//! receive/reply loop that answers every datagram to the address it came from.

use log::{info, error, debug, trace};
use std::io;
use std::net::{SocketAddr, SocketAddrV4, UdpSocket};

use crate::config::{UdpServerConfig, MAX_PAYLOAD_LEN, REPLY_BUFFER_SIZE, REPLY_PAYLOAD_LIMIT, RX_BUFFER_SIZE};
use crate::error::{Error, Result};

/// Connectionless endpoint the echo loop reads from and replies through
pub trait DatagramSocket {
    /// Block until a datagram arrives; bytes beyond `buf.len()` are discarded
    fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)>;

    /// Send one datagram to `addr`
    fn send_to(&self, buf: &[u8], addr: SocketAddr) -> io::Result<usize>;
}

impl DatagramSocket for UdpSocket {
    fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        UdpSocket::recv_from(self, buf)
    }

    fn send_to(&self, buf: &[u8], addr: SocketAddr) -> io::Result<usize> {
        UdpSocket::send_to(self, buf, addr)
    }
}

/// Build the reply for one payload: prefix followed by at most
/// [`REPLY_PAYLOAD_LIMIT`] payload bytes.
///
/// The content stays one byte short of [`REPLY_BUFFER_SIZE`], so an oversized
/// prefix cuts the reply rather than overflowing it.
pub fn format_reply(prefix: &str, payload: &[u8]) -> heapless::Vec<u8, REPLY_BUFFER_SIZE> {
    let mut reply = heapless::Vec::new();
    let payload = &payload[..payload.len().min(REPLY_PAYLOAD_LIMIT)];

    for part in [prefix.as_bytes(), payload] {
        let room = (REPLY_BUFFER_SIZE - 1).saturating_sub(reply.len());
        let take = part.len().min(room);
        // Cannot fail: `take` is bounded by the remaining capacity
        let _ = reply.extend_from_slice(&part[..take]);
    }

    reply
}

/// UDP Server
///
/// Owns the socket for its whole life. After [`UdpServer::bind`] the server is moved
/// into the worker thread, which is the only reader and writer of the socket.
pub struct UdpServer<S = UdpSocket> {
    /// Socket the server answers on
    socket: S,
    /// UDP server configuration
    config: UdpServerConfig,
}

impl UdpServer<UdpSocket> {
    /// Create the socket and bind it to the configured address and port
    pub fn bind(config: UdpServerConfig) -> Result<Self> {
        let bind_address = SocketAddrV4::new(config.bind_address, config.port);
        let socket = UdpSocket::bind(bind_address)
            .map_err(|e| Error::UdpError(format!("Failed to bind to {}: {}", bind_address, e)))?;

        info!("UDP server listening on {}", bind_address);

        Ok(Self::with_socket(socket, config))
    }

    /// Address the socket is actually bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket.local_addr()
            .map_err(|e| Error::UdpError(format!("Failed to get local address: {}", e)))
    }
}

impl<S: DatagramSocket> UdpServer<S> {
    /// Wrap an already open socket
    pub fn with_socket(socket: S, config: UdpServerConfig) -> Self {
        Self { socket, config }
    }

    /// Receive one datagram and answer it
    ///
    /// Returns the sender the reply went to. A receive failure is returned as an
    /// error; the send result is not checked.
    pub fn serve_one(&self, rx_buffer: &mut [u8; RX_BUFFER_SIZE]) -> Result<SocketAddr> {
        let (len, source_addr) = self.socket.recv_from(&mut rx_buffer[..MAX_PAYLOAD_LEN])
            .map_err(|e| Error::UdpError(format!("Receive failed: {}", e)))?;
        let payload = &rx_buffer[..len];

        info!("Received {} bytes from {}: {}", len, source_addr, String::from_utf8_lossy(payload));
        if log::log_enabled!(log::Level::Trace) {
            let hex_str: String = payload.iter()
                .map(|b| format!("{:02X} ", b))
                .collect();
            trace!("UDP <- {} (hex): {}", source_addr, hex_str);
        }

        let reply = format_reply(self.config.reply_prefix, payload);
        // Best effort, no delivery check
        let _ = self.socket.send_to(&reply, source_addr);
        debug!("Replied {} bytes to {}", reply.len(), source_addr);

        Ok(source_addr)
    }

    /// Run the receive/reply loop forever
    ///
    /// Receive errors are logged and the loop goes straight back to receiving.
    pub fn run(&self) -> ! {
        info!("UDP echo loop started");

        let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
        loop {
            if let Err(e) = self.serve_one(&mut rx_buffer) {
                error!("{}", e);
            }
        }
    }
}
