// Application state management
// Owns the catalog, selection state and conversation log, and maps
// interaction commands onto them

use super::catalog::{Agent, Catalog, Topic};
use super::conversation::{ConversationLog, PendingReply};
use super::panel_layout::{compute_layout, PanelLayout};
use super::selection::SelectionState;
use crate::error::AppError;
use tracing::debug;

/// Interaction commands emitted by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Expand or collapse an agent's ability list
    ToggleAgent(String),
    /// Pick an ability of the selected agent
    SelectAbility(String),
    /// Open the topic panel on a topic
    SelectTopic(Topic),
    /// Open or close the topic panel
    ToggleTopicPanel,
    /// Send a chat message
    SendMessage(String),
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    /// Agent and thread definitions
    pub catalog: Catalog,
    /// Current selection
    pub selection: SelectionState,
    /// Chat transcript
    pub conversation: ConversationLog,
}

impl AppState {
    /// Create a new application state with nothing selected
    pub fn new(catalog: Catalog, conversation: ConversationLog) -> Self {
        Self {
            catalog,
            selection: SelectionState::new(),
            conversation,
        }
    }

    /// Apply one interaction command
    ///
    /// Returns the reply handle for `SendMessage`, `None` otherwise.
    pub fn dispatch(&mut self, command: Command) -> Result<Option<PendingReply>, AppError> {
        debug!(?command, "Dispatching command");
        match command {
            Command::ToggleAgent(id) => self.selection.toggle_agent(&self.catalog, &id)?,
            Command::SelectAbility(ability) => {
                self.selection.select_ability(&self.catalog, &ability)?
            }
            Command::SelectTopic(topic) => self.selection.select_topic(topic),
            Command::ToggleTopicPanel => self.selection.toggle_topic_panel(),
            Command::SendMessage(text) => return self.send_message(&text).map(Some),
        }
        Ok(None)
    }

    /// Send a message on behalf of the user, addressed to the current selection
    pub fn send_message(&self, text: &str) -> Result<PendingReply, AppError> {
        let agent_name = self.selected_agent().map(|a| a.name.as_str());
        self.conversation
            .send(text, agent_name, self.selection.selected_ability())
    }

    /// Get a reference to the selected agent, if any
    pub fn selected_agent(&self) -> Option<&Agent> {
        self.selection.selected_agent(&self.catalog)
    }

    /// Layout for the current selection
    pub fn layout(&self) -> PanelLayout {
        compute_layout(&self.selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::conversation::Sender;
    use crate::state::panel_layout::RightPaneMode;
    use std::time::Duration;
    use tokio::runtime::Handle;

    fn app() -> AppState {
        let log = ConversationLog::new(Handle::current(), Duration::from_millis(1000));
        AppState::new(Catalog::builtin(), log)
    }

    #[tokio::test]
    async fn test_agent_ability_scenario() {
        let mut app = app();

        app.dispatch(Command::ToggleAgent("mark".to_string())).unwrap();
        assert_eq!(app.selection.expanded_agent(), Some("mark"));
        assert_eq!(app.selected_agent().unwrap().name, "Mark");
        assert!(app.selection.selected_ability().is_none());

        app.dispatch(Command::SelectAbility("Event Planning".to_string()))
            .unwrap();
        assert_eq!(app.selection.selected_ability(), Some("Event Planning"));

        app.dispatch(Command::ToggleAgent("athena".to_string())).unwrap();
        assert_eq!(app.selection.expanded_agent(), Some("athena"));
        assert_eq!(app.selected_agent().unwrap().name, "Athena");
        assert!(app.selection.selected_ability().is_none());
    }

    #[tokio::test]
    async fn test_topic_commands_drive_layout() {
        let mut app = app();
        assert_eq!(app.layout().right_mode, RightPaneMode::Rail);

        app.dispatch(Command::SelectTopic(Topic::Support)).unwrap();
        assert_eq!(
            app.layout().right_mode,
            RightPaneMode::Expanded {
                topic: Some(Topic::Support)
            }
        );

        app.dispatch(Command::ToggleTopicPanel).unwrap();
        assert_eq!(app.layout().right_mode, RightPaneMode::Rail);
    }

    #[tokio::test]
    async fn test_invalid_commands_are_errors() {
        let mut app = app();
        assert!(matches!(
            app.dispatch(Command::ToggleAgent("nobody".to_string())),
            Err(AppError::AgentNotFound(_))
        ));
        assert!(matches!(
            app.dispatch(Command::SelectAbility("Event Planning".to_string())),
            Err(AppError::InvalidAbility { .. })
        ));
        assert!(matches!(
            app.dispatch(Command::SendMessage(String::new())),
            Err(AppError::EmptyMessage)
        ));
        assert!(app.conversation.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_uses_current_selection() {
        let mut app = app();
        app.dispatch(Command::ToggleAgent("nova".to_string())).unwrap();
        app.dispatch(Command::SelectAbility("Transportation".to_string()))
            .unwrap();

        let pending = app
            .dispatch(Command::SendMessage("hello".to_string()))
            .unwrap()
            .unwrap();
        assert!(pending.join().await);

        let history = app.conversation.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sender, Sender::User);
        assert_eq!(
            history[1].text,
            "This is a response from Nova about Transportation"
        );
    }
}
