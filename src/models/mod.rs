// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgentProfile, AgentTraits, Compatibility, MatchIntent, MatchRecord, RankedCandidate,
    ScoreBreakdown, SeekingFlags, SwipeDirection,
};
pub use requests::{
    FeedQuery, ListAgentsQuery, ListMatchesQuery, RegisterAgentRequest, SwipeRequest,
    UpdateAgentRequest,
};
pub use responses::{
    AgentCard, ErrorResponse, FeedResponse, HealthResponse, MatchSummary, PartnerSummary,
    SwipeResponse, UnmatchResponse,
};
