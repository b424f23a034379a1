//! Presentation helpers for showing instructions to end users.

mod panel;
mod text;

pub use panel::{InstructionPanel, PanelContent};
pub use text::{decode_entities, html_to_text};
