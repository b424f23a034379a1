//! Per-manufacturer record as stored in the dataset.

use serde::{Deserialize, Serialize};

/// Background-restriction details for one manufacturer.
///
/// Field names follow the dontkillmyapp.com API so the bundled JSON can be
/// deserialized directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Display name of the manufacturer.
    pub name: String,
    /// Raw manufacturer strings that also resolve to this record.
    #[serde(rename = "manufacturer_raw", default)]
    pub manufacturer_aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Severity rating on the dontkillmyapp.com scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub award: Option<f64>,
    /// Rank in the dontkillmyapp.com hall of shame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    /// End-user remediation steps (HTML fragment).
    #[serde(rename = "user_solution", default, skip_serializing_if = "Option::is_none")]
    pub user_solution_html: Option<String>,
    /// Developer-facing guidance (HTML fragment).
    #[serde(
        rename = "developer_solution",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub developer_solution_html: Option<String>,
}

impl DeviceRecord {
    /// Create a record with only a display name and aliases.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            manufacturer_aliases: Vec::new(),
            url: None,
            award: None,
            position: None,
            explanation: None,
            user_solution_html: None,
            developer_solution_html: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.manufacturer_aliases.push(alias.into());
        self
    }

    pub fn with_user_solution(mut self, html: impl Into<String>) -> Self {
        self.user_solution_html = Some(html.into());
        self
    }

    pub fn with_developer_solution(mut self, html: impl Into<String>) -> Self {
        self.developer_solution_html = Some(html.into());
        self
    }

    /// Whether end-user instructions are recorded for this manufacturer.
    ///
    /// An empty fragment counts as absent.
    pub fn has_instructions(&self) -> bool {
        self.user_solution_html
            .as_deref()
            .is_some_and(|html| !html.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_field_names() {
        let json = r#"{
            "name": "Xiaomi",
            "manufacturer_raw": ["xiaomi", "redmi"],
            "award": 4,
            "position": 4,
            "user_solution": "<p>steps</p>"
        }"#;

        let record: DeviceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Xiaomi");
        assert_eq!(record.manufacturer_aliases, vec!["xiaomi", "redmi"]);
        assert_eq!(record.award, Some(4.0));
        assert_eq!(record.user_solution_html.as_deref(), Some("<p>steps</p>"));
        assert!(record.developer_solution_html.is_none());
        assert!(record.has_instructions());
    }

    #[test]
    fn test_missing_optional_fields() {
        let record: DeviceRecord = serde_json::from_str(r#"{"name": "Acme"}"#).unwrap();
        assert!(record.manufacturer_aliases.is_empty());
        assert!(record.url.is_none());
        assert!(!record.has_instructions());
    }

    #[test]
    fn test_null_optional_fields() {
        let json = r#"{"name": "Acme", "manufacturer_raw": [], "award": null, "user_solution": null}"#;
        let record: DeviceRecord = serde_json::from_str(json).unwrap();
        assert!(record.award.is_none());
        assert!(!record.has_instructions());
    }

    #[test]
    fn test_empty_user_solution_is_not_instructions() {
        let record: DeviceRecord =
            serde_json::from_str(r#"{"name": "Acme", "user_solution": ""}"#).unwrap();
        assert_eq!(record.user_solution_html.as_deref(), Some(""));
        assert!(!record.has_instructions());
    }
}
