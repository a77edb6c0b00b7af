//! Storage module
//!
//! Brings up the default non-volatile storage (NVS) partition the WiFi driver
//! keeps its calibration and configuration data in.

use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::info;

use crate::error::{Error, Result};

/// Owner of the initialized default NVS partition
pub struct StorageManager {
    /// NVS partition handle
    partition: EspDefaultNvsPartition,
}

impl StorageManager {
    /// Initialize the default NVS partition
    ///
    /// A partition without free pages or written by a newer NVS version is erased and
    /// initialized again by `EspDefaultNvsPartition::take`. Anything else is an error.
    pub fn new() -> Result<Self> {
        let partition = EspDefaultNvsPartition::take()
            .map_err(|e| Error::StorageError(format!("Failed to initialize default NVS partition: {}", e)))?;

        info!("NVS partition initialized");

        Ok(Self { partition })
    }

    /// Handle to the partition for the WiFi driver
    pub fn partition(&self) -> EspDefaultNvsPartition {
        self.partition.clone()
    }
}
