// UI module
// egui rendering of the agent list, chat and topic panes

pub mod components;
pub mod layout;

pub use layout::{render_app_layout, UiState};
