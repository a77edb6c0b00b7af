//! Station events module
//!
//! Association and disassociation notifications from the access point, and
//! the log lines they produce.

use log::info;
use std::fmt;

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::WifiEvent;

/// Hardware (MAC) address of a station
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacAddr(pub [u8; 6]);

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}", a, b, c, d, e, g)
    }
}

/// A change in the set of stations associated with the access point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationEvent {
    /// A station joined and was given an association ID
    Connected { mac: MacAddr, aid: u16 },
    /// A station left
    Disconnected { mac: MacAddr, aid: u16 },
}

impl StationEvent {
    /// Pick the station events out of the WiFi event stream
    #[cfg(target_os = "espidf")]
    pub fn from_wifi_event(event: &WifiEvent<'_>) -> Option<Self> {
        match event {
            WifiEvent::ApStaConnected(sta) => Some(Self::Connected {
                mac: MacAddr(sta.mac()),
                aid: sta.aid(),
            }),
            WifiEvent::ApStaDisconnected(sta) => Some(Self::Disconnected {
                mac: MacAddr(sta.mac()),
                aid: sta.aid(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for StationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationEvent::Connected { mac, aid } => {
                write!(f, "Station {} connected, AID={}", mac, aid)
            }
            StationEvent::Disconnected { mac, aid } => {
                write!(f, "Station {} disconnected, AID={}", mac, aid)
            }
        }
    }
}

/// Event loop callback: log the station and its association ID
pub fn log_station_event(event: &StationEvent) {
    info!("{}", event);
}
