// 导出模块
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod udp_server;

#[cfg(target_os = "espidf")]
pub mod storage;
#[cfg(target_os = "espidf")]
pub mod wifi;

// 重新导出一些公共接口，使它们可以直接从 crate 根访问
pub use udp_server::UdpServer;
#[cfg(target_os = "espidf")]
pub use wifi::AccessPoint;
