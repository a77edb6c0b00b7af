//! WiFi module
//!
//! Starts the open access point on a static subnet and hooks station events
//! into the log.

use esp_idf_svc::{
    eventloop::{EspSubscription, EspSystemEventLoop, System},
    hal::modem::Modem,
    ipv4::{self, Mask, RouterConfiguration, Subnet},
    netif::{EspNetif, NetifConfiguration, NetifStack},
    nvs::EspDefaultNvsPartition,
    wifi::{AccessPointConfiguration, AuthMethod, Configuration, EspWifi, WifiDriver, WifiEvent},
};
use esp_idf_sys::{
    esp, esp_wifi_get_config, esp_wifi_set_config, wifi_cipher_type_t_WIFI_CIPHER_TYPE_NONE,
    wifi_config_t, wifi_interface_t_WIFI_IF_AP,
};
use log::{info, warn};

use crate::config::WiFiConfig;
use crate::error::{Error, Result};
use crate::events::{log_station_event, StationEvent};

/// Running access point
///
/// Dropping it stops the radio and unsubscribes the station event logger.
pub struct AccessPoint {
    /// WiFi driver with the station and access point interfaces
    wifi: EspWifi<'static>,
    /// Keeps the station event callback registered
    _events: EspSubscription<'static, System>,
}

impl AccessPoint {
    /// Configure and start the access point
    pub fn start(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
        config: &WiFiConfig,
    ) -> Result<Self> {
        let events = sysloop.subscribe::<WifiEvent, _>(|event| {
            if let Some(station_event) = StationEvent::from_wifi_event(&event) {
                log_station_event(&station_event);
            }
        })?;

        let driver = WifiDriver::new(modem, sysloop, Some(nvs))?;

        // Router mode pins the interface address and restarts the DHCP server with it
        let ap_netif = EspNetif::new_with_conf(&NetifConfiguration {
            ip_configuration: Some(ipv4::Configuration::Router(RouterConfiguration {
                subnet: Subnet {
                    gateway: config.gateway(),
                    mask: Mask(config.ap_netmask_bits),
                },
                dhcp_enabled: true,
                dns: None,
                secondary_dns: None,
            })),
            ..NetifConfiguration::wifi_default_router()
        })?;

        let mut wifi = EspWifi::wrap_all(driver, EspNetif::new(NetifStack::Sta)?, ap_netif)?;

        info!("Setting up WiFi AP with SSID: {}", config.ap_ssid);

        wifi.set_configuration(&Configuration::AccessPoint(AccessPointConfiguration {
            ssid: config.ap_ssid.clone(),
            ssid_hidden: config.ap_hidden,
            channel: config.ap_channel,
            auth_method: AuthMethod::None,
            max_connections: config.ap_max_connections,
            ..Default::default()
        }))
        .map_err(|e| Error::WiFiError(format!("Failed to configure access point: {}", e)))?;

        Self::apply_radio_settings(config)?;

        wifi.start()
            .map_err(|e| Error::WiFiError(format!("Failed to start access point: {}", e)))?;

        info!(
            "WiFi AP started. SSID: {} channel: {} (open network, no password)",
            config.ap_ssid, config.ap_channel
        );

        let access_point = Self { wifi, _events: events };
        access_point.log_ip_info(config);

        Ok(access_point)
    }

    /// Beacon interval and cipher/PMF settings not covered by `AccessPointConfiguration`
    fn apply_radio_settings(config: &WiFiConfig) -> Result<()> {
        // SAFETY: `wifi_config_t` is a plain C union; all-zero is a valid value
        let mut raw: wifi_config_t = unsafe { core::mem::zeroed() };

        // SAFETY: the driver is initialized and the AP interface is configured above
        unsafe {
            esp!(esp_wifi_get_config(wifi_interface_t_WIFI_IF_AP, &mut raw))?;
            raw.ap.beacon_interval = config.beacon_interval_ms;
            raw.ap.pairwise_cipher = wifi_cipher_type_t_WIFI_CIPHER_TYPE_NONE;
            raw.ap.pmf_cfg.required = false;
            esp!(esp_wifi_set_config(wifi_interface_t_WIFI_IF_AP, &mut raw))?;
        }

        Ok(())
    }

    fn log_ip_info(&self, config: &WiFiConfig) {
        match self.wifi.ap_netif().get_ip_info() {
            Ok(ap_info) => {
                info!("AP IP address: {}/{} (netmask {})", ap_info.ip, config.ap_netmask_bits, config.netmask());
                info!("Connect to WiFi SSID '{}' (no password)", config.ap_ssid);
            }
            Err(e) => warn!("Failed to get AP IP address: {}", e),
        }
    }
}
