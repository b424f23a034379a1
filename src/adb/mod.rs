//! ADB (Android Debug Bridge) access to an attached device's identity.

mod connection;

pub use connection::{ADBConnection, AdbError, ConnectionType, DeviceInfo};

use crate::platform::{DeviceIdentity, PlatformInfo};

const PROP_MANUFACTURER: &str = "ro.product.manufacturer";
const PROP_BRAND: &str = "ro.product.brand";

/// Reports the manufacturer of a device reachable over ADB.
///
/// Any ADB failure (no binary, no device, unauthorized) is logged and reported
/// as an unavailable platform.
#[derive(Debug, Clone, Default)]
pub struct AdbPlatform {
    connection: ADBConnection,
    device_id: Option<String>,
}

impl AdbPlatform {
    pub fn new(connection: ADBConnection) -> Self {
        Self {
            connection,
            device_id: None,
        }
    }

    /// Target a specific device in multi-device setups.
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }
}

impl PlatformInfo for AdbPlatform {
    fn device_identity(&self) -> Option<DeviceIdentity> {
        let device_id = self.device_id.as_deref();

        let manufacturer = match self.connection.get_prop(device_id, PROP_MANUFACTURER) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read {} over adb: {}", PROP_MANUFACTURER, e);
                return None;
            }
        };
        let brand = self
            .connection
            .get_prop(device_id, PROP_BRAND)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to read {} over adb: {}", PROP_BRAND, e);
                None
            });

        Some(DeviceIdentity::new(brand, manufacturer))
    }
}
