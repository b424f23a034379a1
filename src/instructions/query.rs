//! Resolver-driven lookups and the aggregated instructions query.

use serde::Serialize;

use super::placeholder::{substitute_optional, DEFAULT_APP_NAME};
use crate::dataset::{DeviceDataset, DeviceRecord};
use crate::resolver::{normalize_manufacturer, ManufacturerResolver};

/// Options for [`background_instructions`].
#[derive(Debug, Clone, Default)]
pub struct InstructionOptions {
    /// Manufacturer to look up instead of the resolved one.
    pub manufacturer: Option<String>,
    /// Name substituted for app-name placeholders.
    pub app_name: Option<String>,
}

impl InstructionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }
}

/// Result of [`background_instructions`].
///
/// A manufacturer without a record is reported with `found: false`, never as
/// an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundInstructions {
    pub found: bool,
    /// Display name when found, otherwise the manufacturer key that was looked up.
    pub manufacturer_name: Option<String>,
    pub instructions_html: Option<String>,
    pub developer_instructions_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub award: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// Whether the resolver's manufacturer override was active.
    pub test_mode_active: bool,
}

impl BackgroundInstructions {
    fn not_found(manufacturer: String, test_mode_active: bool) -> Self {
        Self {
            found: false,
            manufacturer_name: (!manufacturer.is_empty()).then_some(manufacturer),
            instructions_html: None,
            developer_instructions_html: None,
            award: None,
            position: None,
            explanation: None,
            test_mode_active,
        }
    }

    /// Build a found result from a record, substituting `app_name`.
    pub fn from_record(record: &DeviceRecord, app_name: &str, test_mode_active: bool) -> Self {
        Self {
            found: true,
            manufacturer_name: Some(record.name.clone()),
            instructions_html: substitute_optional(record.user_solution_html.as_deref(), app_name),
            developer_instructions_html: substitute_optional(
                record.developer_solution_html.as_deref(),
                app_name,
            ),
            award: record.award,
            position: record.position,
            explanation: record.explanation.clone(),
            test_mode_active,
        }
    }
}

/// Look up the record for the manufacturer the resolver reports.
///
/// Returns `None` when the manufacturer is unknown or has no record.
pub fn lookup_for_current_device<'a>(
    dataset: &'a DeviceDataset,
    resolver: &ManufacturerResolver,
) -> Option<&'a DeviceRecord> {
    let manufacturer = resolver.resolve_manufacturer();
    if manufacturer.is_empty() {
        return None;
    }
    dataset.lookup_by_manufacturer(&manufacturer)
}

/// Collect the instructions for a manufacturer, ready for display.
///
/// `options.manufacturer`, when given and non-blank, is looked up directly;
/// otherwise the resolver decides (override first, then the platform).
pub fn background_instructions(
    dataset: &DeviceDataset,
    resolver: &ManufacturerResolver,
    options: &InstructionOptions,
) -> BackgroundInstructions {
    let app_name = options.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME);
    let test_mode_active = resolver.is_override_active();

    let manufacturer = options
        .manufacturer
        .as_deref()
        .map(normalize_manufacturer)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| resolver.resolve_manufacturer());

    match dataset.lookup_by_manufacturer(&manufacturer) {
        Some(record) => BackgroundInstructions::from_record(record, app_name, test_mode_active),
        None => {
            tracing::debug!("No background instructions for '{}'", manufacturer);
            BackgroundInstructions::not_found(manufacturer, test_mode_active)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FixedPlatform;

    fn dataset() -> DeviceDataset {
        DeviceDataset::from_entries([
            (
                "xiaomi",
                DeviceRecord::new("Xiaomi")
                    .with_alias("redmi")
                    .with_user_solution(r"Open [[Yy]our app\] and lock it")
                    .with_developer_solution(r"Ask users to enable autostart for \[[Yy]our app\]"),
            ),
            ("aosp", DeviceRecord::new("Stock Android")),
        ])
    }

    #[test]
    fn test_override_end_to_end() {
        let resolver = ManufacturerResolver::default().with_override("xiaomi");
        let result = background_instructions(
            &dataset(),
            &resolver,
            &InstructionOptions::new().with_app_name("Foo"),
        );

        assert!(result.found);
        assert_eq!(result.manufacturer_name.as_deref(), Some("Xiaomi"));
        assert_eq!(result.instructions_html.as_deref(), Some("Open Foo and lock it"));
        assert_eq!(
            result.developer_instructions_html.as_deref(),
            Some("Ask users to enable autostart for Foo")
        );
        assert!(result.test_mode_active);
    }

    #[test]
    fn test_unknown_manufacturer() {
        let resolver = ManufacturerResolver::default();
        let result = background_instructions(
            &dataset(),
            &resolver,
            &InstructionOptions::new().with_manufacturer("acme"),
        );

        assert!(!result.found);
        assert_eq!(result.manufacturer_name.as_deref(), Some("acme"));
        assert!(result.instructions_html.is_none());
        assert!(result.developer_instructions_html.is_none());
        assert!(!result.test_mode_active);
    }

    #[test]
    fn test_supplied_manufacturer_routes_lookup() {
        let resolver = ManufacturerResolver::new(FixedPlatform::manufacturer("Google"))
            .with_override("aosp");
        let result = background_instructions(
            &dataset(),
            &resolver,
            &InstructionOptions::new().with_manufacturer("Redmi"),
        );

        assert!(result.found);
        assert_eq!(result.manufacturer_name.as_deref(), Some("Xiaomi"));
        assert!(result.test_mode_active);
    }

    #[test]
    fn test_found_without_user_solution() {
        let resolver = ManufacturerResolver::new(FixedPlatform::manufacturer("AOSP"));
        let result = background_instructions(&dataset(), &resolver, &InstructionOptions::new());

        assert!(result.found);
        assert_eq!(result.manufacturer_name.as_deref(), Some("Stock Android"));
        assert!(result.instructions_html.is_none());
    }

    #[test]
    fn test_empty_fragments_are_absent() {
        let data = DeviceDataset::from_entries([(
            "acme",
            DeviceRecord::new("Acme")
                .with_user_solution("")
                .with_developer_solution(""),
        )]);
        let resolver = ManufacturerResolver::default().with_override("acme");
        let result = background_instructions(&data, &resolver, &InstructionOptions::new());

        assert!(result.found);
        assert!(result.instructions_html.is_none());
        assert!(result.developer_instructions_html.is_none());
    }

    #[test]
    fn test_default_app_name() {
        let resolver = ManufacturerResolver::default().with_override("xiaomi");
        let result = background_instructions(&dataset(), &resolver, &InstructionOptions::new());
        assert_eq!(result.instructions_html.as_deref(), Some("Open your app and lock it"));
    }

    #[test]
    fn test_unknown_platform() {
        let data = dataset();
        let resolver = ManufacturerResolver::default();
        assert!(lookup_for_current_device(&data, &resolver).is_none());

        let result = background_instructions(&data, &resolver, &InstructionOptions::new());
        assert!(!result.found);
        assert!(result.manufacturer_name.is_none());
    }

    #[test]
    fn test_lookup_for_current_device() {
        let data = dataset();
        let resolver = ManufacturerResolver::new(FixedPlatform::brand("Redmi"));
        assert_eq!(lookup_for_current_device(&data, &resolver).unwrap().name, "Xiaomi");
    }

    #[test]
    fn test_serialized_shape() {
        let resolver = ManufacturerResolver::default();
        let result = background_instructions(
            &dataset(),
            &resolver,
            &InstructionOptions::new().with_manufacturer("acme"),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["found"], false);
        assert_eq!(json["manufacturer_name"], "acme");
        assert!(json["instructions_html"].is_null());
        assert!(json.get("award").is_none());
    }
}
