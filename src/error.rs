use log::error;
use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Everything that can go wrong while bringing the access point up or serving datagrams
#[derive(Debug)]
pub enum Error {
    /// Socket or thread failure reported by the OS
    Io(io::Error),
    /// An ESP-IDF call returned a non-OK `esp_err_t`
    EspError(String),
    /// Access point could not be configured or started
    WiFiError(String),
    /// NVS partition could not be initialized
    StorageError(String),
    /// Echo socket could not be bound or read
    UdpError(String),
    /// Anything else, usually carried over from `anyhow`
    General(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::EspError(msg) => write!(f, "ESP-IDF error: {}", msg),
            Error::WiFiError(msg) => write!(f, "WiFi error: {}", msg),
            Error::StorageError(msg) => write!(f, "Storage error: {}", msg),
            Error::UdpError(msg) => write!(f, "UDP error: {}", msg),
            Error::General(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::General(err.to_string())
    }
}

#[cfg(target_os = "espidf")]
impl From<esp_idf_sys::EspError> for Error {
    fn from(err: esp_idf_sys::EspError) -> Self {
        Error::EspError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Unwrap the result of a startup step the firmware cannot run without
///
/// On failure the error is logged and `halt` takes over; on the device that resets
/// the chip.
pub fn require<T>(step: &str, result: Result<T>, halt: fn() -> !) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            error!("Fatal: {} failed: {}", step, e);
            halt()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn halt() -> ! {
        panic!("halted");
    }

    #[test]
    fn display_names_the_failing_layer() {
        let err = Error::UdpError("Failed to bind to 0.0.0.0:4445".to_string());
        assert_eq!(err.to_string(), "UDP error: Failed to bind to 0.0.0.0:4445");

        let err = Error::StorageError("no free pages".to_string());
        assert_eq!(err.to_string(), "Storage error: no free pages");
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err: Error = io::Error::new(io::ErrorKind::AddrInUse, "in use").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.source().is_some());
        assert!(Error::General("x".into()).source().is_none());
    }

    #[test]
    fn require_passes_successful_steps_through() {
        assert_eq!(require("storage init", Ok(7), halt), 7);
    }

    #[test]
    #[should_panic(expected = "halted")]
    fn require_halts_on_storage_failure() {
        let failed: Result<()> = Err(Error::StorageError("partition missing".into()));
        require("storage init", failed, halt);
    }

    #[test]
    #[should_panic(expected = "halted")]
    fn require_halts_on_access_point_failure() {
        let failed: Result<u8> = Err(Error::WiFiError("set_configuration".into()));
        let _ = require("access point start", failed, halt);
    }
}
