//! Internationalization (i18n) for instruction panel and CLI messages.

/// UI messages structure
#[derive(Debug, Clone)]
pub struct Messages {
    pub panel_title: &'static str,
    pub close_button: &'static str,
    pub loading: &'static str,
    pub no_instructions: &'static str,
    pub manufacturer: &'static str,
    pub detected_manufacturer: &'static str,
    pub test_mode: &'static str,
    pub active: &'static str,
    pub inactive: &'static str,
    pub unknown: &'static str,
    pub developer_notes: &'static str,
    pub known_manufacturers: &'static str,
    pub no_devices: &'static str,
}

/// English messages
pub static MESSAGES_EN: Messages = Messages {
    panel_title: "Keep App Running in Background",
    close_button: "Got it",
    loading: "Loading instructions...",
    no_instructions: "No specific instructions found for your device. General Android battery optimization settings may apply.",
    manufacturer: "Manufacturer",
    detected_manufacturer: "Detected manufacturer",
    test_mode: "Test mode",
    active: "Active",
    inactive: "Inactive",
    unknown: "Unknown",
    developer_notes: "Developer notes",
    known_manufacturers: "Known manufacturers",
    no_devices: "No devices attached",
};

/// Chinese messages
pub static MESSAGES_ZH: Messages = Messages {
    panel_title: "保持应用在后台运行",
    close_button: "知道了",
    loading: "正在加载说明...",
    no_instructions: "未找到适用于您设备的具体说明。可以参考 Android 通用的电池优化设置。",
    manufacturer: "厂商",
    detected_manufacturer: "检测到的厂商",
    test_mode: "测试模式",
    active: "已启用",
    inactive: "未启用",
    unknown: "未知",
    developer_notes: "开发者说明",
    known_manufacturers: "已知厂商",
    no_devices: "未连接设备",
};

/// Get UI messages by language.
///
/// # Arguments
/// * `lang` - Language code, "cn" for Chinese, anything else for English.
pub fn get_messages(lang: &str) -> &'static Messages {
    match lang {
        "cn" | "zh" => &MESSAGES_ZH,
        _ => &MESSAGES_EN,
    }
}
