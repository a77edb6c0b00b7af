#[cfg(target_os = "espidf")]
use esp_idf_sys as _; // If using the `binstart` feature of `esp-idf-sys`, always keep this module imported
use log::{info, error};
use agrokurs_ap::{
    config::{AppConfig, create_config},
    logging,
    udp_server::UdpServer,
};

#[cfg(target_os = "espidf")]
use std::{thread, time::Duration};
#[cfg(target_os = "espidf")]
use agrokurs_ap::{
    error::{require, Error, Result},
    storage::StorageManager,
    wifi::AccessPoint,
};
#[cfg(target_os = "espidf")]
use esp_idf_hal::peripherals::Peripherals;
#[cfg(target_os = "espidf")]
use esp_idf_svc::eventloop::EspSystemEventLoop;

#[cfg(target_os = "espidf")]
fn main() {
    // Initialize the ESP-IDF system
    esp_idf_sys::link_patches();

    require("Logger init", logging::init(), restart);
    info!("ESP32 starting up...");

    let config = create_config();
    info!("Configuration loaded");

    let peripherals = require("Peripherals init", Peripherals::take().map_err(Error::from), restart);
    info!("Peripherals initialized");

    require("Startup", run(peripherals, config), restart);
}

/// Reset the chip; startup failures have no degraded mode
#[cfg(target_os = "espidf")]
#[allow(unreachable_code)]
fn restart() -> ! {
    error!("Restarting...");
    unsafe {
        esp_idf_sys::esp_restart();
    }
    // esp_restart() does not return
    loop {}
}

/// Bring up storage and the access point, then start the echo service
#[cfg(target_os = "espidf")]
fn run(peripherals: Peripherals, config: AppConfig) -> Result<()> {
    let storage = StorageManager::new()?;
    let sysloop = EspSystemEventLoop::take()?;

    let _access_point = AccessPoint::start(peripherals.modem, sysloop, storage.partition(), &config.wifi)?;
    info!("WiFi initialization complete");

    start_udp_server(&config);

    // The access point lives as long as this task does
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

/// Host build: only the echo service, on the host network stack
#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    logging::init()?;

    let config: AppConfig = create_config();
    info!("Starting host echo service on port {}", config.udp_server.port);

    let server = UdpServer::bind(config.udp_server).map_err(|e| {
        error!("UDP server not started: {}", e);
        e
    })?;
    server.run()
}

/// Bind the socket and hand it to the worker thread
///
/// A bind or spawn failure is logged and leaves the service down; the access point
/// keeps running.
#[cfg(target_os = "espidf")]
fn start_udp_server(config: &AppConfig) {
    let server = match UdpServer::bind(config.udp_server.clone()) {
        Ok(server) => server,
        Err(e) => {
            error!("UDP server not started: {}", e);
            return;
        }
    };

    if let Err(e) = spawn_worker(server, config) {
        error!("UDP server not started: {}", e);
        return;
    }

    // 给UDP服务器时间启动
    thread::sleep(Duration::from_millis(100));
    info!("==================================================");
    info!("UDP echo service ready on {}:{}", config.wifi.ap_ip, config.udp_server.port);
    info!("==================================================");
}

#[cfg(target_os = "espidf")]
fn spawn_worker(server: UdpServer, config: &AppConfig) -> Result<()> {
    thread::Builder::new()
        .name(config.udp_server.worker_name.into())
        .stack_size(config.udp_server.worker_stack_size)
        .spawn(move || server.run())?;

    Ok(())
}
