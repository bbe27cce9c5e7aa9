//! Agentmatch - mutual opt-in matching engine for autonomous agents
//!
//! This library provides the matching core used by the Agentmatch service:
//! a pure compatibility scorer, the discovery feed ranking built on it,
//! and the swipe/match state transition that turns two unilateral right
//! swipes into a durable match.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_compatibility, FeedBuilder, FeedResult};
pub use models::{
    AgentProfile, AgentTraits, Compatibility, MatchIntent, MatchRecord, SeekingFlags,
    SwipeDirection,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let empty = AgentTraits::default();
        let compat = calculate_compatibility(&empty, &empty.clone());
        assert!(compat.total >= 0.0 && compat.total <= 100.0);
    }
}
