//! Error types for the view-state core
//!
//! Almost every operation in the core is total. The few that are not report
//! through [`AppError`].

use crate::state::catalog::CatalogError;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Attempted to send or append a message whose text is blank
    #[error("Message text is empty")]
    EmptyMessage,

    /// Ability is not offered by the currently selected agent (or no agent is selected)
    #[error("Invalid ability '{ability}' for agent {agent:?}")]
    InvalidAbility {
        /// Selected agent at the time of the call, if any
        agent: Option<String>,
        /// Ability label that was rejected
        ability: String,
    },

    /// Agent with the given ID is not in the catalog
    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    /// Catalog file could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
