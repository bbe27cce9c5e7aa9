use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::SeekingFlags;

/// Request to register a new agent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterAgentRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub chains: Vec<String>,
    #[serde(default)]
    pub vibes: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(flatten)]
    pub seeking: SeekingFlags,
}

fn default_emoji() -> String {
    "🤖".to_string()
}

/// Partial update of an agent profile. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAgentRequest {
    #[validate(length(min = 1, max = 64))]
    pub name: Option<String>,
    pub emoji: Option<String>,
    pub tagline: Option<String>,
    pub bio: Option<String>,
    pub chains: Option<Vec<String>>,
    pub vibes: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
    #[serde(rename = "seekingRivalry")]
    pub seeking_rivalry: Option<bool>,
    #[serde(rename = "seekingCollaboration")]
    pub seeking_collaboration: Option<bool>,
    #[serde(rename = "seekingFriendship")]
    pub seeking_friendship: Option<bool>,
    #[serde(rename = "seekingMentorship")]
    pub seeking_mentorship: Option<bool>,
    #[serde(rename = "seekingRomance")]
    pub seeking_romance: Option<bool>,
}

/// Body of a swipe action. Direction is parsed in the handler so unknown
/// values produce a structured 400 rather than a serde error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwipeRequest {
    #[validate(length(min = 1))]
    pub direction: String,
}

/// Query parameters for the discovery feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(rename = "matchType", alias = "match_type", default)]
    pub match_type: Option<String>,
}

/// Query parameters for listing agents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAgentsQuery {
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Query parameters for listing matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMatchesQuery {
    #[serde(rename = "activeOnly", alias = "active_only", default = "default_true")]
    pub active_only: bool,
}

fn default_true() -> bool {
    true
}
