// State management module
// Catalog, selection state machine, conversation log and panel layout

pub mod app_state;
pub mod catalog;
pub mod conversation;
pub mod panel_layout;
pub mod selection;

pub use app_state::{AppState, Command};
pub use catalog::{Agent, AgentColor, AgentId, Author, Catalog, CatalogError, Thread, Topic};
pub use conversation::{ConversationLog, Message, PendingReply, Responder, Sender, TemplateResponder};
pub use panel_layout::{compute_layout, PaneWidth, PanelLayout, RightPaneMode};
pub use selection::SelectionState;
