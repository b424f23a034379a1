//! Host platform capability: reporting the device's brand and manufacturer.

/// Identity strings reported by the host device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub brand: Option<String>,
    pub manufacturer: Option<String>,
}

impl DeviceIdentity {
    pub fn new(brand: Option<String>, manufacturer: Option<String>) -> Self {
        Self {
            brand,
            manufacturer,
        }
    }

    /// The manufacturer if reported, otherwise the brand.
    ///
    /// Blank strings count as absent.
    pub fn device_maker(&self) -> Option<&str> {
        non_blank(&self.manufacturer).or_else(|| non_blank(&self.brand))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Source of the device identity.
///
/// Returning `None` means the host cannot report one (not an Android device,
/// no device attached, missing binding). Callers treat that as "unknown".
pub trait PlatformInfo: Send + Sync {
    fn device_identity(&self) -> Option<DeviceIdentity>;
}

/// A host that never reports a device.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl PlatformInfo for Unavailable {
    fn device_identity(&self) -> Option<DeviceIdentity> {
        None
    }
}

/// A host with a fixed identity, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct FixedPlatform {
    identity: DeviceIdentity,
}

impl FixedPlatform {
    pub fn new(identity: DeviceIdentity) -> Self {
        Self { identity }
    }

    pub fn manufacturer(manufacturer: impl Into<String>) -> Self {
        Self::new(DeviceIdentity::new(None, Some(manufacturer.into())))
    }

    pub fn brand(brand: impl Into<String>) -> Self {
        Self::new(DeviceIdentity::new(Some(brand.into()), None))
    }
}

impl PlatformInfo for FixedPlatform {
    fn device_identity(&self) -> Option<DeviceIdentity> {
        Some(self.identity.clone())
    }
}
