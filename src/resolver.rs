//! Manufacturer resolution with an optional test override.

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::{PoisonError, RwLock};

use crate::platform::{PlatformInfo, Unavailable};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize a manufacturer name into a dataset key.
///
/// Lowercases, trims, and collapses each whitespace run into one hyphen,
/// e.g. `"Samsung Electronics"` becomes `"samsung-electronics"`.
pub fn normalize_manufacturer(raw: &str) -> String {
    WHITESPACE_RUN
        .replace_all(raw.trim(), "-")
        .to_lowercase()
}

/// Determines the effective manufacturer key for lookups.
///
/// An override set with [`set_override`](Self::set_override) takes
/// precedence over whatever the platform reports. The override lives in a
/// lock so the resolver can be shared across threads.
///
/// # Example
/// ```rust
/// use dontkillmyapp::platform::FixedPlatform;
/// use dontkillmyapp::ManufacturerResolver;
///
/// let resolver = ManufacturerResolver::new(FixedPlatform::manufacturer("Xiaomi"));
/// assert_eq!(resolver.resolve_manufacturer(), "xiaomi");
///
/// resolver.set_override(Some("Samsung Electronics"));
/// assert_eq!(resolver.resolve_manufacturer(), "samsung-electronics");
/// ```
pub struct ManufacturerResolver {
    platform: Box<dyn PlatformInfo>,
    override_manufacturer: RwLock<Option<String>>,
}

impl Default for ManufacturerResolver {
    fn default() -> Self {
        Self::new(Unavailable)
    }
}

impl std::fmt::Debug for ManufacturerResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManufacturerResolver")
            .field("override_manufacturer", &self.override_value())
            .finish_non_exhaustive()
    }
}

impl ManufacturerResolver {
    /// Create a resolver backed by the given platform.
    pub fn new(platform: impl PlatformInfo + 'static) -> Self {
        Self {
            platform: Box::new(platform),
            override_manufacturer: RwLock::new(None),
        }
    }

    /// Start with an override already in place.
    pub fn with_override(self, manufacturer: impl AsRef<str>) -> Self {
        self.set_override(Some(manufacturer.as_ref()));
        self
    }

    /// Set or clear the override. Values are normalized before storage.
    pub fn set_override(&self, manufacturer: Option<&str>) {
        let value = manufacturer.map(normalize_manufacturer);
        match &value {
            Some(v) => tracing::debug!("Manufacturer override set to '{}'", v),
            None => tracing::debug!("Manufacturer override cleared"),
        }
        *self
            .override_manufacturer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = value;
    }

    pub fn clear_override(&self) {
        self.set_override(None);
    }

    /// The normalized override, if one is set.
    pub fn override_value(&self) -> Option<String> {
        self.override_manufacturer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_override_active(&self) -> bool {
        self.override_manufacturer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Normalized manufacturer reported by the platform, ignoring any override.
    ///
    /// Empty when the platform cannot report one.
    pub fn detected_manufacturer(&self) -> String {
        self.platform
            .device_identity()
            .as_ref()
            .and_then(|identity| identity.device_maker())
            .map(normalize_manufacturer)
            .unwrap_or_default()
    }

    /// The override if active, otherwise the detected manufacturer.
    ///
    /// An empty string signals an unknown manufacturer.
    pub fn resolve_manufacturer(&self) -> String {
        if let Some(value) = self.override_value() {
            return value;
        }
        let detected = self.detected_manufacturer();
        if detected.is_empty() {
            tracing::debug!("Platform did not report a manufacturer");
        }
        detected
    }

    /// Whether the resolved manufacturer is one of `known`.
    pub fn is_known_manufacturer(&self, known: &[&str]) -> bool {
        let manufacturer = self.resolve_manufacturer();
        known.iter().any(|k| *k == manufacturer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{DeviceIdentity, FixedPlatform};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_normalize_manufacturer() {
        assert_eq!(normalize_manufacturer("Samsung Electronics"), "samsung-electronics");
        assert_eq!(normalize_manufacturer("HMD  \t Global"), "hmd-global");
        assert_eq!(normalize_manufacturer(" OnePlus "), "oneplus");
        assert_eq!(normalize_manufacturer(""), "");
    }

    #[test]
    fn test_override_roundtrip() {
        let resolver = ManufacturerResolver::default();
        assert!(!resolver.is_override_active());
        assert_eq!(resolver.override_value(), None);

        resolver.set_override(Some("Samsung Electronics"));
        assert!(resolver.is_override_active());
        assert_eq!(resolver.override_value().as_deref(), Some("samsung-electronics"));
        assert_eq!(resolver.resolve_manufacturer(), "samsung-electronics");

        resolver.set_override(None);
        assert!(!resolver.is_override_active());
    }

    #[test]
    fn test_override_beats_platform() {
        let resolver = ManufacturerResolver::new(FixedPlatform::manufacturer("Google"))
            .with_override("xiaomi");
        assert_eq!(resolver.resolve_manufacturer(), "xiaomi");
        assert_eq!(resolver.detected_manufacturer(), "google");

        resolver.clear_override();
        assert_eq!(resolver.resolve_manufacturer(), "google");
    }

    #[test]
    fn test_platform_brand_fallback() {
        let identity = DeviceIdentity::new(Some("Sony Mobile".into()), None);
        let resolver = ManufacturerResolver::new(FixedPlatform::new(identity));
        assert_eq!(resolver.resolve_manufacturer(), "sony-mobile");
    }

    #[test]
    fn test_unavailable_platform_is_empty() {
        let resolver = ManufacturerResolver::default();
        assert_eq!(resolver.resolve_manufacturer(), "");
    }

    #[test]
    fn test_is_known_manufacturer() {
        let resolver = ManufacturerResolver::new(FixedPlatform::manufacturer("Huawei"));
        assert!(resolver.is_known_manufacturer(&["samsung", "huawei"]));
        assert!(!resolver.is_known_manufacturer(&["samsung"]));
    }

    #[test]
    fn test_concurrent_override_never_tears() {
        let resolver = Arc::new(ManufacturerResolver::default());
        let writers: Vec<_> = ["samsung", "xiaomi"]
            .into_iter()
            .map(|name| {
                let resolver = Arc::clone(&resolver);
                thread::spawn(move || {
                    for _ in 0..500 {
                        resolver.set_override(Some(name));
                    }
                })
            })
            .collect();

        for _ in 0..500 {
            let value = resolver.resolve_manufacturer();
            assert!(value.is_empty() || value == "samsung" || value == "xiaomi");
        }
        for writer in writers {
            writer.join().unwrap();
        }
    }
}
