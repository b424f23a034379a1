//! Configuration module: settings and UI messages.

mod i18n;
mod settings;

pub use i18n::{get_messages, Messages, MESSAGES_EN, MESSAGES_ZH};
pub use settings::{
    AppSettings, ENV_ADB_PATH, ENV_APP_NAME, ENV_DATA_PATH, ENV_DEVICE_ID, ENV_LANG,
    ENV_MANUFACTURER,
};
