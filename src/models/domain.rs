use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The five relationship categories an agent can seek.
///
/// `ALL` fixes the canonical iteration order used for seeking alignment
/// and for picking a match's primary type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchIntent {
    Rivalry,
    Collaboration,
    Friendship,
    Mentorship,
    Romance,
}

impl MatchIntent {
    pub const ALL: [MatchIntent; 5] = [
        MatchIntent::Rivalry,
        MatchIntent::Collaboration,
        MatchIntent::Friendship,
        MatchIntent::Mentorship,
        MatchIntent::Romance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchIntent::Rivalry => "rivalry",
            MatchIntent::Collaboration => "collaboration",
            MatchIntent::Friendship => "friendship",
            MatchIntent::Mentorship => "mentorship",
            MatchIntent::Romance => "romance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "rivalry" => Some(MatchIntent::Rivalry),
            "collaboration" => Some(MatchIntent::Collaboration),
            "friendship" => Some(MatchIntent::Friendship),
            "mentorship" => Some(MatchIntent::Mentorship),
            "romance" => Some(MatchIntent::Romance),
            _ => None,
        }
    }

    /// Intents allowed as a discovery feed filter.
    pub fn filterable(&self) -> bool {
        matches!(
            self,
            MatchIntent::Rivalry | MatchIntent::Collaboration | MatchIntent::Friendship
        )
    }
}

/// Direction of a swipe action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
    Super,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left => "left",
            SwipeDirection::Right => "right",
            SwipeDirection::Super => "super",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "left" => Some(SwipeDirection::Left),
            "right" => Some(SwipeDirection::Right),
            "super" => Some(SwipeDirection::Super),
            _ => None,
        }
    }

    /// A super swipe counts as a right swipe for match detection.
    pub fn is_positive(&self) -> bool {
        matches!(self, SwipeDirection::Right | SwipeDirection::Super)
    }
}

/// The five seeking flags on an agent profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeekingFlags {
    #[serde(rename = "seekingRivalry", default)]
    pub rivalry: bool,
    #[serde(rename = "seekingCollaboration", default)]
    pub collaboration: bool,
    #[serde(rename = "seekingFriendship", default)]
    pub friendship: bool,
    #[serde(rename = "seekingMentorship", default)]
    pub mentorship: bool,
    #[serde(rename = "seekingRomance", default)]
    pub romance: bool,
}

impl SeekingFlags {
    pub fn seeks(&self, intent: MatchIntent) -> bool {
        match intent {
            MatchIntent::Rivalry => self.rivalry,
            MatchIntent::Collaboration => self.collaboration,
            MatchIntent::Friendship => self.friendship,
            MatchIntent::Mentorship => self.mentorship,
            MatchIntent::Romance => self.romance,
        }
    }
}

/// Immutable scoring view of an agent.
///
/// The scorer reads exactly these fields and nothing else, so it never
/// couples to the full persisted profile.
#[derive(Debug, Clone, Default)]
pub struct AgentTraits {
    pub chains: Vec<String>,
    pub vibes: Vec<String>,
    pub skills: Vec<String>,
    pub seeking: SeekingFlags,
}

/// Full agent profile as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    pub id: String,
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
    #[serde(rename = "totalSwipes", default)]
    pub total_swipes: i64,
    #[serde(rename = "matchesCount", default)]
    pub matches_count: i64,
    #[serde(rename = "rivalriesWon", default)]
    pub rivalries_won: i64,
    #[serde(rename = "rivalriesLost", default)]
    pub rivalries_lost: i64,
    #[serde(default = "default_reputation")]
    pub reputation: f64,
    #[serde(rename = "superSwipes", default = "default_super_swipes")]
    pub super_swipes: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

fn default_emoji() -> String {
    "🤖".to_string()
}

fn default_reputation() -> f64 {
    3.0
}

fn default_super_swipes() -> i64 {
    1
}

impl AgentProfile {
    /// Extract the scoring view of this profile.
    pub fn traits(&self) -> AgentTraits {
        AgentTraits {
            chains: self.chains.clone(),
            vibes: self.vibes.clone(),
            skills: self.skills.clone(),
            seeking: self.seeking,
        }
    }
}

/// A mutual match between two agents.
///
/// Stored as two ordered columns but treated as an unordered pair; at most
/// one match exists per pair. Deactivation is terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i64,
    #[serde(rename = "agentAId")]
    pub agent_a_id: String,
    #[serde(rename = "agentBId")]
    pub agent_b_id: String,
    #[serde(rename = "matchType")]
    pub match_type: Option<MatchIntent>,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: f64,
    #[serde(rename = "compatibilityReasons")]
    pub compatibility_reasons: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl MatchRecord {
    pub fn involves(&self, agent_id: &str) -> bool {
        self.agent_a_id == agent_id || self.agent_b_id == agent_id
    }

    /// The other party of the match, if `agent_id` is one of the two.
    pub fn partner_of(&self, agent_id: &str) -> Option<&str> {
        if self.agent_a_id == agent_id {
            Some(&self.agent_b_id)
        } else if self.agent_b_id == agent_id {
            Some(&self.agent_a_id)
        } else {
            None
        }
    }
}

/// Per-category score contributions, each already scaled by its weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub chain: f64,
    pub vibe: f64,
    pub skill: f64,
    pub seeking: f64,
}

/// Result of scoring two agents against each other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compatibility {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    pub reasons: Vec<String>,
    #[serde(rename = "matchedIntents")]
    pub matched_intents: Vec<MatchIntent>,
}

impl Compatibility {
    /// First matched intent in canonical category order, if any.
    pub fn primary_match_type(&self) -> Option<MatchIntent> {
        self.matched_intents.first().copied()
    }
}

/// A feed entry: candidate profile plus its compatibility with the requester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub profile: AgentProfile,
    pub compatibility: Compatibility,
}
