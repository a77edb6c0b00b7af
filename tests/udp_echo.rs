use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::thread;
use std::time::Duration;

use agrokurs_ap::config::UdpServerConfig;
use agrokurs_ap::udp_server::UdpServer;

const PREFIX: &str = "Сообщение получено: ";

/// Start the echo loop on an ephemeral loopback port
fn start_server() -> SocketAddr {
    let config = UdpServerConfig {
        bind_address: Ipv4Addr::LOCALHOST,
        port: 0,
        ..UdpServerConfig::default()
    };
    let server = UdpServer::bind(config).unwrap();
    let addr = server.local_addr().unwrap();
    thread::spawn(move || server.run());
    addr
}

fn client() -> UdpSocket {
    let socket = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    socket.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    socket
}

fn exchange(client: &UdpSocket, server: SocketAddr, payload: &[u8]) -> Vec<u8> {
    client.send_to(payload, server).unwrap();
    let mut buf = [0u8; 512];
    let (len, from) = client.recv_from(&mut buf).unwrap();
    assert_eq!(from, server);
    buf[..len].to_vec()
}

#[test]
fn hello_is_acknowledged() {
    let server = start_server();
    let reply = exchange(&client(), server, b"hello");
    assert_eq!(String::from_utf8(reply).unwrap(), "Сообщение получено: hello");
}

#[test]
fn empty_datagram_is_acknowledged_with_prefix_only() {
    let server = start_server();
    let reply = exchange(&client(), server, b"");
    assert_eq!(reply, PREFIX.as_bytes());
}

#[test]
fn oversized_datagram_is_cut_to_127_bytes() {
    let server = start_server();
    let payload: Vec<u8> = (0..200u32).map(|i| b'0' + (i % 10) as u8).collect();

    let reply = exchange(&client(), server, &payload);

    let mut expected = PREFIX.as_bytes().to_vec();
    expected.extend_from_slice(&payload[..127]);
    assert_eq!(reply, expected);
}

#[test]
fn replies_follow_each_client() {
    let server = start_server();
    let first = client();
    let second = client();

    first.send_to(b"one", server).unwrap();
    second.send_to(b"two", server).unwrap();

    let mut buf = [0u8; 512];
    let (len, _) = second.recv_from(&mut buf).unwrap();
    assert_eq!(&buf[..len], format!("{PREFIX}two").as_bytes());
    let (len, _) = first.recv_from(&mut buf).unwrap();
    assert_eq!(&buf[..len], format!("{PREFIX}one").as_bytes());
}

#[test]
fn server_keeps_answering() {
    let server = start_server();
    let client = client();
    for i in 0..5 {
        let message = format!("message {i}");
        let reply = exchange(&client, server, message.as_bytes());
        assert_eq!(reply, format!("{PREFIX}{message}").into_bytes());
    }
}

#[test]
fn binding_a_taken_port_fails() {
    let taken = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    let config = UdpServerConfig {
        bind_address: Ipv4Addr::LOCALHOST,
        port: taken.local_addr().unwrap().port(),
        ..UdpServerConfig::default()
    };
    assert!(UdpServer::bind(config).is_err());
}
