// Selection state machine
// Tracks the selected agent, ability and topic, and which panels are expanded

use super::catalog::{Agent, AgentId, Catalog, Topic};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Current user selection and panel expansion flags
///
/// Only mutated through the transition methods below, so the invariants
/// hold for every reachable state:
/// * `selected_ability` set implies `selected_agent` set
/// * `expanded_agent` set implies it equals `selected_agent`
/// * `selected_ability` is one of the selected agent's abilities
/// * `expanded_agent` references an agent of the catalog it was toggled against
///
/// Deserialization checks the first two; [`SelectionState::validate`] checks
/// the catalog-dependent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectionStateData")]
pub struct SelectionState {
    selected_agent: Option<AgentId>,
    selected_ability: Option<String>,
    expanded_agent: Option<AgentId>,
    selected_topic: Option<Topic>,
    is_topic_expanded: bool,
}

/// Unchecked wire form of [`SelectionState`]
#[derive(Deserialize)]
struct SelectionStateData {
    selected_agent: Option<AgentId>,
    selected_ability: Option<String>,
    expanded_agent: Option<AgentId>,
    selected_topic: Option<Topic>,
    is_topic_expanded: bool,
}

impl TryFrom<SelectionStateData> for SelectionState {
    type Error = String;

    fn try_from(data: SelectionStateData) -> Result<Self, Self::Error> {
        if data.selected_ability.is_some() && data.selected_agent.is_none() {
            return Err("selected_ability requires selected_agent".to_string());
        }
        if data.expanded_agent.is_some() && data.expanded_agent != data.selected_agent {
            return Err("expanded_agent must be the selected agent".to_string());
        }
        Ok(Self {
            selected_agent: data.selected_agent,
            selected_ability: data.selected_ability,
            expanded_agent: data.expanded_agent,
            selected_topic: data.selected_topic,
            is_topic_expanded: data.is_topic_expanded,
        })
    }
}

impl SelectionState {
    /// Create the initial state: nothing selected, topic panel collapsed
    pub fn new() -> Self {
        Self::default()
    }

    /// ID of the selected agent, if any
    pub fn selected_agent_id(&self) -> Option<&str> {
        self.selected_agent.as_deref()
    }

    /// Resolve the selected agent against the catalog
    pub fn selected_agent<'a>(&self, catalog: &'a Catalog) -> Option<&'a Agent> {
        self.selected_agent.as_deref().and_then(|id| catalog.agent(id))
    }

    /// Selected ability label, if any
    pub fn selected_ability(&self) -> Option<&str> {
        self.selected_ability.as_deref()
    }

    /// ID of the agent whose ability list is open, if any
    pub fn expanded_agent(&self) -> Option<&str> {
        self.expanded_agent.as_deref()
    }

    /// Selected forum topic, if any
    pub fn selected_topic(&self) -> Option<Topic> {
        self.selected_topic
    }

    /// Whether the topic panel is expanded
    pub fn is_topic_expanded(&self) -> bool {
        self.is_topic_expanded
    }

    /// Whether the given agent's ability list is open
    pub fn is_expanded(&self, agent_id: &str) -> bool {
        self.expanded_agent.as_deref() == Some(agent_id)
    }

    /// Whether the given agent is the selected one
    pub fn is_agent_selected(&self, agent_id: &str) -> bool {
        self.selected_agent.as_deref() == Some(agent_id)
    }

    /// Whether the given ability is the selected one
    pub fn is_ability_selected(&self, ability: &str) -> bool {
        self.selected_ability.as_deref() == Some(ability)
    }

    /// Check the agent and ability references against a catalog
    pub fn validate(&self, catalog: &Catalog) -> Result<(), AppError> {
        for id in [&self.selected_agent, &self.expanded_agent].into_iter().flatten() {
            if catalog.agent(id).is_none() {
                return Err(AppError::AgentNotFound(id.clone()));
            }
        }
        if let Some(ability) = &self.selected_ability {
            let offered = self
                .selected_agent(catalog)
                .is_some_and(|agent| agent.has_ability(ability));
            if !offered {
                return Err(AppError::InvalidAbility {
                    agent: self.selected_agent.clone(),
                    ability: ability.clone(),
                });
            }
        }
        Ok(())
    }

    /// Toggle an agent's ability list
    ///
    /// Collapsing the expanded agent keeps the current selection. Expanding
    /// any agent (including the already selected one) selects it and clears
    /// the ability.
    pub fn toggle_agent(&mut self, catalog: &Catalog, agent_id: &str) -> Result<(), AppError> {
        if self.is_expanded(agent_id) {
            debug!(agent_id = %agent_id, "Collapsing agent");
            self.expanded_agent = None;
            return Ok(());
        }

        let agent = catalog
            .agent(agent_id)
            .ok_or_else(|| AppError::AgentNotFound(agent_id.to_string()))?;

        debug!(agent_id = %agent.id, "Expanding and selecting agent");
        self.expanded_agent = Some(agent.id.clone());
        self.selected_agent = Some(agent.id.clone());
        self.selected_ability = None;
        Ok(())
    }

    /// Select an ability of the currently selected agent
    pub fn select_ability(&mut self, catalog: &Catalog, ability: &str) -> Result<(), AppError> {
        match self.selected_agent(catalog) {
            Some(agent) if agent.has_ability(ability) => {
                debug!(agent_id = %agent.id, ability = %ability, "Selecting ability");
                self.selected_ability = Some(ability.to_string());
                Ok(())
            }
            _ => Err(AppError::InvalidAbility {
                agent: self.selected_agent.clone(),
                ability: ability.to_string(),
            }),
        }
    }

    /// Select a topic; always opens the topic panel
    pub fn select_topic(&mut self, topic: Topic) {
        debug!(topic = %topic, "Selecting topic");
        self.selected_topic = Some(topic);
        self.is_topic_expanded = true;
    }

    /// Open or close the topic panel without touching the selected topic
    pub fn toggle_topic_panel(&mut self) {
        self.is_topic_expanded = !self.is_topic_expanded;
        debug!(expanded = self.is_topic_expanded, "Toggled topic panel");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SelectionState::new();
        assert!(state.selected_agent_id().is_none());
        assert!(state.selected_ability().is_none());
        assert!(state.expanded_agent().is_none());
        assert!(state.selected_topic().is_none());
        assert!(!state.is_topic_expanded());
    }

    #[test]
    fn test_toggle_agent_twice_collapses() {
        let catalog = Catalog::builtin();
        let mut state = SelectionState::new();

        state.toggle_agent(&catalog, "nova").unwrap();
        assert_eq!(state.expanded_agent(), Some("nova"));
        state.toggle_agent(&catalog, "nova").unwrap();
        assert!(state.expanded_agent().is_none());
        // Selection survives the collapse
        assert_eq!(state.selected_agent_id(), Some("nova"));
    }

    #[test]
    fn test_toggle_sequence_tracks_last_expanded() {
        let catalog = Catalog::builtin();
        let mut state = SelectionState::new();
        let sequence = ["mark", "athena", "athena", "luna", "mark", "mark", "mark"];

        let mut expected: Option<&str> = None;
        for id in sequence {
            state.toggle_agent(&catalog, id).unwrap();
            expected = if expected == Some(id) { None } else { Some(id) };
            assert_eq!(state.expanded_agent(), expected);
        }
    }

    #[test]
    fn test_collapse_preserves_ability() {
        let catalog = Catalog::builtin();
        let mut state = SelectionState::new();
        state.toggle_agent(&catalog, "atlas").unwrap();
        state.select_ability(&catalog, "Place Discovery").unwrap();

        state.toggle_agent(&catalog, "atlas").unwrap();
        assert_eq!(state.selected_agent_id(), Some("atlas"));
        assert_eq!(state.selected_ability(), Some("Place Discovery"));
    }

    #[test]
    fn test_reexpanding_same_agent_clears_ability() {
        let catalog = Catalog::builtin();
        let mut state = SelectionState::new();
        state.toggle_agent(&catalog, "atlas").unwrap();
        state.select_ability(&catalog, "Cultural Insights").unwrap();
        state.toggle_agent(&catalog, "atlas").unwrap();

        state.toggle_agent(&catalog, "atlas").unwrap();
        assert_eq!(state.expanded_agent(), Some("atlas"));
        assert!(state.selected_ability().is_none());
    }

    #[test]
    fn test_switching_agent_clears_ability() {
        let catalog = Catalog::builtin();
        let mut state = SelectionState::new();
        state.toggle_agent(&catalog, "luna").unwrap();
        state.select_ability(&catalog, "Social Planning").unwrap();

        state.toggle_agent(&catalog, "mark").unwrap();
        assert_eq!(state.selected_agent(&catalog).unwrap().name, "Mark");
        assert!(state.selected_ability().is_none());
    }

    #[test]
    fn test_unknown_agent_leaves_state_unchanged() {
        let catalog = Catalog::builtin();
        let mut state = SelectionState::new();
        state.toggle_agent(&catalog, "mark").unwrap();
        let before = state.clone();

        let err = state.toggle_agent(&catalog, "zeus").unwrap_err();
        assert!(matches!(err, AppError::AgentNotFound(id) if id == "zeus"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_select_ability_requires_agent() {
        let catalog = Catalog::builtin();
        let mut state = SelectionState::new();
        let err = state.select_ability(&catalog, "Event Planning").unwrap_err();
        assert!(matches!(err, AppError::InvalidAbility { agent: None, .. }));
        assert!(state.selected_ability().is_none());
    }

    #[test]
    fn test_select_ability_of_other_agent_rejected() {
        let catalog = Catalog::builtin();
        let mut state = SelectionState::new();
        state.toggle_agent(&catalog, "mark").unwrap();
        state.select_ability(&catalog, "Event Planning").unwrap();

        let err = state.select_ability(&catalog, "Travel Planning").unwrap_err();
        assert!(matches!(err, AppError::InvalidAbility { .. }));
        assert_eq!(state.selected_ability(), Some("Event Planning"));
    }

    #[test]
    fn test_select_topic_always_expands() {
        let mut state = SelectionState::new();
        state.select_topic(Topic::Support);
        assert!(state.is_topic_expanded());

        state.select_topic(Topic::Support);
        assert!(state.is_topic_expanded());
        assert_eq!(state.selected_topic(), Some(Topic::Support));
    }

    #[test]
    fn test_toggle_topic_panel_keeps_topic() {
        let mut state = SelectionState::new();
        state.select_topic(Topic::Forum);
        state.toggle_topic_panel();
        assert!(!state.is_topic_expanded());
        assert_eq!(state.selected_topic(), Some(Topic::Forum));

        state.toggle_topic_panel();
        assert!(state.is_topic_expanded());
    }

    #[test]
    fn test_state_serializes() {
        let catalog = Catalog::builtin();
        let mut state = SelectionState::new();
        state.toggle_agent(&catalog, "athena").unwrap();
        state.select_topic(Topic::News);

        let json = serde_json::to_string(&state).unwrap();
        let restored: SelectionState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_deserialize_rejects_ability_without_agent() {
        let json = r#"{"selected_agent":null,"selected_ability":"Gardening",
            "expanded_agent":null,"selected_topic":null,"is_topic_expanded":false}"#;
        assert!(serde_json::from_str::<SelectionState>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_expanded_other_than_selected() {
        let json = r#"{"selected_agent":"mark","selected_ability":null,
            "expanded_agent":"zeus","selected_topic":null,"is_topic_expanded":false}"#;
        assert!(serde_json::from_str::<SelectionState>(json).is_err());
    }

    #[test]
    fn test_validate_against_catalog() {
        let catalog = Catalog::builtin();

        let unknown = r#"{"selected_agent":"zeus","selected_ability":null,
            "expanded_agent":"zeus","selected_topic":null,"is_topic_expanded":false}"#;
        let state: SelectionState = serde_json::from_str(unknown).unwrap();
        assert!(matches!(
            state.validate(&catalog),
            Err(AppError::AgentNotFound(id)) if id == "zeus"
        ));

        let foreign = r#"{"selected_agent":"mark","selected_ability":"Gardening",
            "expanded_agent":null,"selected_topic":"Forum","is_topic_expanded":true}"#;
        let state: SelectionState = serde_json::from_str(foreign).unwrap();
        assert!(matches!(
            state.validate(&catalog),
            Err(AppError::InvalidAbility { .. })
        ));

        let mut reachable = SelectionState::new();
        reachable.toggle_agent(&catalog, "mark").unwrap();
        reachable.select_ability(&catalog, "Event Planning").unwrap();
        assert!(reachable.validate(&catalog).is_ok());
    }
}
