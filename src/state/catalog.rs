// Catalog store
// Read-only agent and forum thread definitions, built in or loaded from JSON

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for an agent
pub type AgentId = String;

/// Current catalog file format version
pub const CATALOG_VERSION: u32 = 1;

/// Color tag used to tint an agent's row and ability buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentColor {
    /// Blue
    Blue,
    /// Purple
    Purple,
    /// Green
    Green,
    /// Orange
    Orange,
    /// Pink
    Pink,
}

/// A named assistant persona and the abilities it can be asked about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier for the agent
    pub id: AgentId,
    /// Display name of the agent
    pub name: String,
    /// Avatar image URL, opaque to the core
    pub avatar: String,
    /// Ability labels, in display order
    pub abilities: Vec<String>,
    /// Color tag
    pub color: AgentColor,
}

impl Agent {
    /// Create a new agent
    pub fn new(id: &str, name: &str, abilities: &[&str], color: AgentColor) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            avatar: format!("https://api.dicebear.com/7.x/bottts/svg?seed={}", id),
            abilities: abilities.iter().map(|a| a.to_string()).collect(),
            color,
        }
    }

    /// Whether this agent offers the given ability
    pub fn has_ability(&self, ability: &str) -> bool {
        self.abilities.iter().any(|a| a == ability)
    }
}

/// Forum categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    /// General discussion
    Forum,
    /// Offers
    Offre,
    /// History
    History,
    /// Topics
    Topics,
    /// Video calls
    Visios,
    /// Support
    Support,
    /// News
    News,
}

impl Topic {
    /// Every topic in display order
    pub const ALL: [Topic; 7] = [
        Topic::Forum,
        Topic::Offre,
        Topic::History,
        Topic::Topics,
        Topic::Visios,
        Topic::Support,
        Topic::News,
    ];

    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Forum => "Forum",
            Topic::Offre => "Offre",
            Topic::History => "History",
            Topic::Topics => "Topics",
            Topic::Visios => "Visios",
            Topic::Support => "Support",
            Topic::News => "News",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown topic: {}", s))
    }
}

/// Author of a forum thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name
    pub name: String,
    /// Avatar image URL
    pub avatar: String,
    /// Role shown under the name
    pub role: String,
}

/// A single forum post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    /// Thread identifier
    pub id: String,
    /// Title
    pub title: String,
    /// Author
    pub author: Author,
    /// Body text
    pub content: String,
    /// Like counter
    pub likes: u32,
    /// Reply counter
    pub replies: u32,
    /// Relative timestamp, e.g. "2 hours ago"
    pub timestamp: String,
}

/// Error types for catalog loading
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Catalog parsed but violates an invariant
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// On-disk catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogData {
    version: u32,
    agents: Vec<Agent>,
    #[serde(default)]
    threads: HashMap<Topic, Vec<Thread>>,
}

/// Immutable agent and thread definitions
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    agents: Vec<Agent>,
    threads: HashMap<Topic, Vec<Thread>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Build a catalog, validating agent and thread definitions
    pub fn new(
        agents: Vec<Agent>,
        threads: HashMap<Topic, Vec<Thread>>,
    ) -> Result<Self, CatalogError> {
        validate_agents(&agents)?;
        validate_threads(&threads)?;
        Ok(Self { agents, threads })
    }

    /// The sample catalog shipped with the application
    pub fn builtin() -> Self {
        let agents = vec![
            Agent::new(
                "mark",
                "Mark",
                &["Event Planning", "Activity Recommendations", "Schedule Management"],
                AgentColor::Blue,
            ),
            Agent::new(
                "athena",
                "Athena",
                &["Real Estate/Investment", "Property Analysis", "Market Insights"],
                AgentColor::Purple,
            ),
            Agent::new(
                "nova",
                "Nova",
                &["Booking and Logistics", "Travel Planning", "Transportation"],
                AgentColor::Green,
            ),
            Agent::new(
                "atlas",
                "Atlas",
                &["Place Discovery", "Local Recommendations", "Cultural Insights"],
                AgentColor::Orange,
            ),
            Agent::new(
                "luna",
                "Luna",
                &["Entertainment Guide", "Activity Matching", "Social Planning"],
                AgentColor::Pink,
            ),
        ];

        let mut threads = HashMap::new();
        threads.insert(
            Topic::Forum,
            vec![
                sample_thread(
                    "1",
                    "Best practices for event planning",
                    ("Sarah Chen", "sarah", "Event Planner"),
                    "I've been organizing events for 5 years and wanted to share some key insights...",
                    (124, 45),
                    "2 hours ago",
                ),
                sample_thread(
                    "2",
                    "How to choose the perfect venue",
                    ("Michael Ross", "michael", "Venue Coordinator"),
                    "The venue sets the tone for your entire event. Here's what to consider...",
                    (89, 32),
                    "4 hours ago",
                ),
            ],
        );
        threads.insert(
            Topic::Support,
            vec![sample_thread(
                "3",
                "Common issues and solutions",
                ("Tech Support Team", "support", "Support Specialist"),
                "Here are the most common issues users face and how to resolve them...",
                (156, 78),
                "1 day ago",
            )],
        );

        Self { agents, threads }
    }

    /// Load a catalog from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        if data.version > CATALOG_VERSION {
            return Err(CatalogError::InvalidData(format!(
                "Unsupported catalog version {} (max {})",
                data.version, CATALOG_VERSION
            )));
        }
        Self::new(data.agents, data.threads)
    }

    /// Serialize the catalog to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION,
            agents: self.agents.clone(),
            threads: self.threads.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// All agents in catalog order
    pub fn list_agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Threads for a topic; empty if the topic has no sample data
    pub fn list_threads(&self, topic: Topic) -> &[Thread] {
        self.threads.get(&topic).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up an agent by ID
    pub fn agent(&self, id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }
}

fn sample_thread(
    id: &str,
    title: &str,
    (author, seed, role): (&str, &str, &str),
    content: &str,
    (likes, replies): (u32, u32),
    timestamp: &str,
) -> Thread {
    Thread {
        id: id.to_string(),
        title: title.to_string(),
        author: Author {
            name: author.to_string(),
            avatar: format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", seed),
            role: role.to_string(),
        },
        content: content.to_string(),
        likes,
        replies,
        timestamp: timestamp.to_string(),
    }
}

fn validate_agents(agents: &[Agent]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for agent in agents {
        if agent.id.trim().is_empty() {
            return Err(CatalogError::InvalidData("Agent ID cannot be empty".to_string()));
        }
        if agent.name.trim().is_empty() {
            return Err(CatalogError::InvalidData(format!(
                "Agent '{}' has an empty name",
                agent.id
            )));
        }
        if !seen.insert(agent.id.as_str()) {
            return Err(CatalogError::InvalidData(format!(
                "Duplicate agent ID: {}",
                agent.id
            )));
        }
        let mut abilities = HashSet::new();
        for ability in &agent.abilities {
            if ability.trim().is_empty() {
                return Err(CatalogError::InvalidData(format!(
                    "Agent '{}' has an empty ability label",
                    agent.id
                )));
            }
            if !abilities.insert(ability.as_str()) {
                return Err(CatalogError::InvalidData(format!(
                    "Agent '{}' lists ability '{}' twice",
                    agent.id, ability
                )));
            }
        }
    }
    Ok(())
}

fn validate_threads(threads: &HashMap<Topic, Vec<Thread>>) -> Result<(), CatalogError> {
    for (topic, list) in threads {
        let mut seen = HashSet::new();
        for thread in list {
            if !seen.insert(thread.id.as_str()) {
                return Err(CatalogError::InvalidData(format!(
                    "Duplicate thread ID '{}' in topic {}",
                    thread.id, topic
                )));
            }
        }
    }
    Ok(())
}
