//! Dismissible instruction overlay.

use crate::config::{get_messages, Messages};
use crate::dataset::{DeviceDataset, DeviceRecord};
use crate::instructions::{
    background_instructions, BackgroundInstructions, InstructionOptions, DEFAULT_APP_NAME,
};
use crate::resolver::ManufacturerResolver;

use super::text::html_to_text;

/// Stylesheet applied around the instruction fragment.
const DOCUMENT_STYLE: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; padding: 8px; margin: 0; color: #333; font-size: 16px; line-height: 1.5; }
img { max-width: 100%; height: auto; border-radius: 8px; margin: 10px 0; }
h3, h4 { margin-top: 20px; margin-bottom: 10px; }
.img-block { display: flex; flex-direction: column; margin: 15px 0; }
figure { margin: 10px 0; }
figcaption { font-size: 14px; color: #666; margin-top: 5px; }
code { background-color: #f5f5f5; padding: 2px 4px; border-radius: 4px; font-family: monospace; }
.caution-box { background-color: #fff3cd; border-left: 4px solid #ffc107; padding: 12px; margin: 15px 0; border-radius: 4px; }";

/// What the panel shows while open.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    /// Nothing loaded yet.
    Loading,
    /// Instructions for a known manufacturer.
    Instructions(BackgroundInstructions),
    /// No record, or a record without end-user steps.
    NoInstructions(BackgroundInstructions),
}

impl PanelContent {
    /// The loaded result, whether or not it has end-user steps.
    pub fn instructions(&self) -> Option<&BackgroundInstructions> {
        match self {
            PanelContent::Loading => None,
            PanelContent::Instructions(instructions)
            | PanelContent::NoInstructions(instructions) => Some(instructions),
        }
    }
}

/// Overlay showing background instructions, with open/close visibility.
///
/// # Example
/// ```rust
/// use dontkillmyapp::{DeviceDataset, InstructionOptions, InstructionPanel, ManufacturerResolver};
///
/// let resolver = ManufacturerResolver::default().with_override("xiaomi");
/// let mut panel = InstructionPanel::new();
/// panel.open(DeviceDataset::embedded(), &resolver, &InstructionOptions::new().with_app_name("Foo"));
/// assert!(panel.is_visible());
/// assert!(panel.render_text().contains("Foo"));
/// panel.close();
/// ```
pub struct InstructionPanel {
    title: Option<String>,
    close_button_text: Option<String>,
    messages: &'static Messages,
    device_data: Option<DeviceRecord>,
    visible: bool,
    content: PanelContent,
    on_no_instructions: Option<Box<dyn FnMut()>>,
}

impl Default for InstructionPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InstructionPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstructionPanel")
            .field("title", &self.title())
            .field("visible", &self.visible)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

impl InstructionPanel {
    pub fn new() -> Self {
        Self {
            title: None,
            close_button_text: None,
            messages: get_messages("en"),
            device_data: None,
            visible: false,
            content: PanelContent::Loading,
            on_no_instructions: None,
        }
    }

    /// Use the messages for `lang` ("en" or "cn") for default labels.
    pub fn with_lang(mut self, lang: &str) -> Self {
        self.messages = get_messages(lang);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_close_button_text(mut self, text: impl Into<String>) -> Self {
        self.close_button_text = Some(text.into());
        self
    }

    /// Show this record instead of looking one up.
    pub fn with_device_data(mut self, record: DeviceRecord) -> Self {
        self.device_data = Some(record);
        self
    }

    /// Called each time the panel opens for a manufacturer with no record.
    pub fn on_no_instructions(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_no_instructions = Some(Box::new(callback));
        self
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.messages.panel_title)
    }

    pub fn close_button_text(&self) -> &str {
        self.close_button_text
            .as_deref()
            .unwrap_or(self.messages.close_button)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    /// Load instructions and show the panel.
    pub fn open(
        &mut self,
        dataset: &DeviceDataset,
        resolver: &ManufacturerResolver,
        options: &InstructionOptions,
    ) -> &PanelContent {
        let instructions = match &self.device_data {
            Some(record) => BackgroundInstructions::from_record(
                record,
                options.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME),
                resolver.is_override_active(),
            ),
            None => background_instructions(dataset, resolver, options),
        };
        self.show(instructions)
    }

    /// Show already-computed instructions.
    pub fn show(&mut self, instructions: BackgroundInstructions) -> &PanelContent {
        self.visible = true;
        if !instructions.found {
            if let Some(callback) = self.on_no_instructions.as_mut() {
                callback();
            }
        }
        self.content = if instructions.instructions_html.is_some() {
            PanelContent::Instructions(instructions)
        } else {
            PanelContent::NoInstructions(instructions)
        };
        &self.content
    }

    /// Dismiss the panel. Content is reloaded on the next open.
    pub fn close(&mut self) {
        self.visible = false;
        self.content = PanelContent::Loading;
    }

    /// Standalone HTML page for an embedded web view.
    ///
    /// `None` unless the panel is showing instructions.
    pub fn html_document(&self) -> Option<String> {
        let PanelContent::Instructions(instructions) = &self.content else {
            return None;
        };
        let body = instructions.instructions_html.as_deref()?;

        Some(format!(
            "<html>\n<head>\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n<style>\n{}\n</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            DOCUMENT_STYLE, body
        ))
    }

    /// Terminal rendering of the panel: title, body and close button.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let title = self.title();
        out.push_str(title);
        out.push('\n');
        out.push_str(&"=".repeat(title.chars().count()));
        out.push_str("\n\n");

        match &self.content {
            PanelContent::Loading => out.push_str(self.messages.loading),
            PanelContent::Instructions(instructions) => {
                if let Some(name) = &instructions.manufacturer_name {
                    out.push_str(&format!("{}: {}", self.messages.manufacturer, name));
                    if instructions.test_mode_active {
                        out.push_str(&format!(" ({})", self.messages.test_mode));
                    }
                    out.push_str("\n\n");
                }
                let body = instructions.instructions_html.as_deref().unwrap_or_default();
                out.push_str(&html_to_text(body));
            }
            PanelContent::NoInstructions(_) => out.push_str(self.messages.no_instructions),
        }

        out.push_str(&format!("\n\n[ {} ]\n", self.close_button_text()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn dataset() -> DeviceDataset {
        DeviceDataset::from_entries([
            (
                "xiaomi",
                DeviceRecord::new("Xiaomi").with_user_solution(r"<ol><li>Lock [[Yy]our app\]</li></ol>"),
            ),
            ("aosp", DeviceRecord::new("Stock Android")),
        ])
    }

    #[test]
    fn test_defaults() {
        let panel = InstructionPanel::new();
        assert!(!panel.is_visible());
        assert_eq!(panel.title(), "Keep App Running in Background");
        assert_eq!(panel.close_button_text(), "Got it");
        assert_eq!(panel.content(), &PanelContent::Loading);
        assert!(panel.content().instructions().is_none());
        assert!(panel.html_document().is_none());
    }

    #[test]
    fn test_open_and_close() {
        let resolver = ManufacturerResolver::default().with_override("xiaomi");
        let mut panel = InstructionPanel::new().with_title("Stay alive");

        panel.open(&dataset(), &resolver, &InstructionOptions::new().with_app_name("Foo"));
        assert!(panel.is_visible());
        assert!(matches!(panel.content(), PanelContent::Instructions(_)));

        let text = panel.render_text();
        assert!(text.starts_with("Stay alive\n==========\n\n"));
        assert!(text.contains("Manufacturer: Xiaomi (Test mode)"));
        assert!(text.contains("1. Lock Foo"));
        assert!(text.ends_with("[ Got it ]\n"));

        let document = panel.html_document().unwrap();
        assert!(document.contains("<body>\n<ol><li>Lock Foo</li></ol>\n</body>"));

        panel.close();
        assert!(!panel.is_visible());
        assert_eq!(panel.content(), &PanelContent::Loading);
    }

    #[test]
    fn test_no_instructions_fallback() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let resolver = ManufacturerResolver::default();
        let mut panel = InstructionPanel::new()
            .with_lang("cn")
            .on_no_instructions(move || counter.set(counter.get() + 1));

        panel.open(&dataset(), &resolver, &InstructionOptions::new().with_manufacturer("aosp"));
        assert!(matches!(panel.content(), PanelContent::NoInstructions(r) if r.found));
        assert!(panel.render_text().contains("未找到适用于您设备的具体说明"));
        assert!(panel.html_document().is_none());
        // a record without steps is still a record
        assert_eq!(calls.get(), 0);

        panel.open(&dataset(), &resolver, &InstructionOptions::new().with_manufacturer("acme"));
        assert!(matches!(panel.content(), PanelContent::NoInstructions(r) if !r.found));
        assert_eq!(
            panel.content().instructions().and_then(|r| r.manufacturer_name.as_deref()),
            Some("acme")
        );
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_empty_user_solution_shows_fallback() {
        let data = DeviceDataset::from_json(r#"{"acme": {"name": "Acme", "user_solution": ""}}"#)
            .unwrap();
        let resolver = ManufacturerResolver::default().with_override("acme");
        let mut panel = InstructionPanel::new();

        panel.open(&data, &resolver, &InstructionOptions::new());
        assert!(matches!(
            panel.content(),
            PanelContent::NoInstructions(r) if r.found && r.instructions_html.is_none()
        ));
        assert!(panel.render_text().contains(get_messages("en").no_instructions));
        assert!(panel.html_document().is_none());
    }

    #[test]
    fn test_explicit_device_data() {
        let record = DeviceRecord::new("Custom").with_user_solution("<p>Allow [[Yy]our app]</p>");
        let mut panel = InstructionPanel::new().with_device_data(record);

        panel.open(
            &DeviceDataset::default(),
            &ManufacturerResolver::default(),
            &InstructionOptions::new().with_app_name("Bar"),
        );
        assert!(panel.render_text().contains("Allow Bar"));
    }
}
