use serde::{Deserialize, Serialize};

use crate::models::domain::{Compatibility, MatchIntent, SeekingFlags};

/// A candidate card in the discovery feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCard {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub tagline: Option<String>,
    pub chains: Vec<String>,
    pub vibes: Vec<String>,
    pub skills: Vec<String>,
    #[serde(flatten)]
    pub seeking: SeekingFlags,
    pub reputation: f64,
    #[serde(rename = "rivalriesWon")]
    pub rivalries_won: i64,
    #[serde(rename = "rivalriesLost")]
    pub rivalries_lost: i64,
    pub compatibility: Compatibility,
}

/// Response for the discovery feed endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedResponse {
    pub feed: Vec<AgentCard>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the swipe endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    pub swiped: bool,
    #[serde(rename = "match")]
    pub matched: bool,
    #[serde(rename = "matchId", skip_serializing_if = "Option::is_none")]
    pub match_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<Compatibility>,
}

/// Short partner summary embedded in match responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerSummary {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub tagline: Option<String>,
}

/// A match as presented to one of its parties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub id: i64,
    pub partner: PartnerSummary,
    #[serde(rename = "matchType")]
    pub match_type: Option<MatchIntent>,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: f64,
    #[serde(rename = "compatibilityReasons")]
    pub compatibility_reasons: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

/// Response for the unmatch endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchResponse {
    pub unmatched: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
