//! ADB device listing and system property queries.

use std::process::Command;
use thiserror::Error;

/// Type of ADB connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionType {
    Usb,
    Wifi,
    Remote,
}

/// Information about a connected device.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub device_id: String,
    pub status: String,
    pub connection_type: ConnectionType,
    pub model: Option<String>,
}

/// ADB errors.
#[derive(Error, Debug)]
pub enum AdbError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Command execution failed: {0}")]
    CommandFailed(String),
    #[error("Device not found: {0}")]
    DeviceNotFound(String),
}

/// Thin wrapper around the `adb` executable.
///
/// # Example
/// ```rust,no_run
/// use dontkillmyapp::adb::ADBConnection;
///
/// let conn = ADBConnection::new();
/// let devices = conn.list_devices();
/// let manufacturer = conn.get_prop(None, "ro.product.manufacturer");
/// ```
#[derive(Debug, Clone)]
pub struct ADBConnection {
    adb_path: String,
}

impl Default for ADBConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl ADBConnection {
    /// Create a connection using `adb` from `PATH`.
    pub fn new() -> Self {
        Self {
            adb_path: "adb".to_string(),
        }
    }

    /// Create a connection with a custom ADB path.
    pub fn with_path(adb_path: impl Into<String>) -> Self {
        Self {
            adb_path: adb_path.into(),
        }
    }

    /// List all connected devices.
    pub fn list_devices(&self) -> Result<Vec<DeviceInfo>, AdbError> {
        let output = Command::new(&self.adb_path)
            .args(["devices", "-l"])
            .output()
            .map_err(|e| AdbError::CommandFailed(e.to_string()))?;

        Ok(parse_device_list(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Read a system property from a device.
    ///
    /// Returns `Ok(None)` when the property is unset.
    ///
    /// # Arguments
    /// * `device_id` - Optional ADB device ID for multi-device setups.
    /// * `name` - Property name, e.g. `ro.product.manufacturer`.
    pub fn get_prop(&self, device_id: Option<&str>, name: &str) -> Result<Option<String>, AdbError> {
        let prefix = self.adb_prefix(device_id);

        let output = Command::new(&prefix[0])
            .args(&prefix[1..])
            .args(["shell", "getprop", name])
            .output()
            .map_err(|e| AdbError::CommandFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim().to_string();
            return Err(if message.contains("not found") || message.contains("no devices") {
                AdbError::DeviceNotFound(device_id.unwrap_or("default").to_string())
            } else {
                AdbError::Connection(message)
            });
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    /// Check if the adb executable can be run.
    pub fn is_running(&self) -> bool {
        Command::new(&self.adb_path)
            .args(["devices"])
            .output()
            .is_ok()
    }

    fn adb_prefix(&self, device_id: Option<&str>) -> Vec<String> {
        match device_id {
            Some(id) => vec![self.adb_path.clone(), "-s".to_string(), id.to_string()],
            None => vec![self.adb_path.clone()],
        }
    }
}

/// Parse the output of `adb devices -l`.
pub(crate) fn parse_device_list(stdout: &str) -> Vec<DeviceInfo> {
    let mut devices = Vec::new();

    for line in stdout.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('*') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() >= 2 {
            let device_id = parts[0].to_string();
            let status = parts[1].to_string();

            let connection_type = if device_id.contains(':') {
                ConnectionType::Remote
            } else if parts.iter().any(|p| p.starts_with("usb:")) {
                ConnectionType::Usb
            } else {
                ConnectionType::Wifi
            };

            let model = parts
                .iter()
                .find(|p| p.starts_with("model:"))
                .map(|m| m.trim_start_matches("model:").replace('_', " "));

            devices.push(DeviceInfo {
                device_id,
                status,
                connection_type,
                model,
            });
        }
    }

    devices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adb_connection_new() {
        let conn = ADBConnection::new();
        assert_eq!(conn.adb_path, "adb");
    }

    #[test]
    fn test_missing_adb_is_not_running() {
        let conn = ADBConnection::with_path("/nonexistent/dontkillmyapp-adb");
        assert!(!conn.is_running());
    }

    #[test]
    fn test_adb_prefix() {
        let conn = ADBConnection::with_path("/opt/android/adb");
        assert_eq!(conn.adb_prefix(None), vec!["/opt/android/adb"]);
        assert_eq!(
            conn.adb_prefix(Some("device123")),
            vec!["/opt/android/adb", "-s", "device123"]
        );
    }

    #[test]
    fn test_parse_device_list() {
        let stdout = "List of devices attached\n\
            * daemon started successfully\n\
            R58M123ABC     device usb:1-1 product:beyond1 model:SM_G973F device:beyond1\n\
            192.168.1.20:5555 device product:venus model:M2011K2G\n\
            \n";

        let devices = parse_device_list(stdout);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].device_id, "R58M123ABC");
        assert_eq!(devices[0].connection_type, ConnectionType::Usb);
        assert_eq!(devices[0].model.as_deref(), Some("SM G973F"));
        assert_eq!(devices[1].connection_type, ConnectionType::Remote);
        assert_eq!(devices[1].status, "device");
    }

    #[test]
    fn test_get_prop_missing_adb() {
        let conn = ADBConnection::with_path("/nonexistent/adb-binary");
        assert!(matches!(
            conn.get_prop(None, "ro.product.brand"),
            Err(AdbError::CommandFailed(_))
        ));
    }
}
