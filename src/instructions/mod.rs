//! Instruction lookup for the current device and app-name substitution.

mod placeholder;
mod query;
mod state;

pub use placeholder::{substitute_app_name, substitute_optional, DEFAULT_APP_NAME};
pub use query::{
    background_instructions, lookup_for_current_device, BackgroundInstructions,
    InstructionOptions,
};
pub use state::DeviceInstructions;
