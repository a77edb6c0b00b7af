use heapless::String;
use std::net::Ipv4Addr;

/// Capacity of the worker's receive buffer
pub const RX_BUFFER_SIZE: usize = 128;
/// Largest payload read per datagram; one byte of the receive buffer stays reserved
pub const MAX_PAYLOAD_LEN: usize = RX_BUFFER_SIZE - 1;
/// Capacity of the worker's reply buffer
pub const REPLY_BUFFER_SIZE: usize = 256;
/// At most this many payload bytes are echoed back
pub const REPLY_PAYLOAD_LIMIT: usize = 128;

/// WiFi access point configuration
#[derive(Debug, Clone)]
pub struct WiFiConfig {
    /// SSID for access point mode
    pub ap_ssid: String<32>,
    /// WiFi channel for access point mode
    pub ap_channel: u8,
    /// Maximum number of associated stations
    pub ap_max_connections: u16,
    /// Hide the SSID from beacons
    pub ap_hidden: bool,
    /// Beacon interval in milliseconds
    pub beacon_interval_ms: u16,
    /// Static address of the access point interface
    pub ap_ip: Ipv4Addr,
    /// Netmask prefix length of the access point subnet
    pub ap_netmask_bits: u8,
}

impl Default for WiFiConfig {
    fn default() -> Self {
        Self {
            ap_ssid: String::try_from("Agrokurs_wifi").unwrap_or_default(),
            ap_channel: 4,
            ap_max_connections: 4,
            ap_hidden: false,
            beacon_interval_ms: 100,
            ap_ip: Ipv4Addr::new(192, 168, 0, 1),
            ap_netmask_bits: 24,
        }
    }
}

impl WiFiConfig {
    /// Gateway handed to stations over DHCP; the access point routes for its own subnet
    pub fn gateway(&self) -> Ipv4Addr {
        self.ap_ip
    }

    /// Dotted form of the subnet mask, for logging
    pub fn netmask(&self) -> Ipv4Addr {
        let bits = u32::from(self.ap_netmask_bits.min(32));
        let mask = u32::MAX.checked_shl(32 - bits).unwrap_or(0);
        Ipv4Addr::from(mask)
    }
}

/// UDP echo server configuration
#[derive(Debug, Clone)]
pub struct UdpServerConfig {
    /// Bind address for the UDP socket
    pub bind_address: Ipv4Addr,
    /// Port for the UDP socket
    pub port: u16,
    /// Text placed in front of every echoed payload
    pub reply_prefix: &'static str,
    /// Name of the worker thread
    pub worker_name: &'static str,
    /// Stack size of the worker thread in bytes
    pub worker_stack_size: usize,
}

impl Default for UdpServerConfig {
    fn default() -> Self {
        Self {
            bind_address: Ipv4Addr::UNSPECIFIED,
            port: 4445,
            reply_prefix: "Сообщение получено: ",
            worker_name: "udp_server",
            worker_stack_size: 8192,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// WiFi configuration
    pub wifi: WiFiConfig,
    /// UDP server configuration
    pub udp_server: UdpServerConfig,
}

/// Create a new application configuration with default values
pub fn create_config() -> AppConfig {
    AppConfig::default()
}
