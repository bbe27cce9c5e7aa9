use crate::core::scoring::calculate_compatibility;
use crate::models::{AgentProfile, AgentTraits, MatchIntent, RankedCandidate};

/// Result of building a discovery feed.
#[derive(Debug)]
pub struct FeedResult {
    pub entries: Vec<RankedCandidate>,
    pub total_candidates: usize,
}

/// Discovery feed builder.
///
/// Expects a candidate pool already filtered by the caller to exclude the
/// requester and anyone the requester has swiped on. Scores every
/// candidate against the requester, ranks by score descending and
/// truncates to the limit. No caching: the pool is assumed small enough
/// that an O(n log n) scan per request is fine.
#[derive(Debug, Clone, Default)]
pub struct FeedBuilder;

impl FeedBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the ranked feed for a requester.
    ///
    /// `intent_filter` restricts candidates to those seeking that intent;
    /// only rivalry, collaboration and friendship are accepted as filters,
    /// anything else is ignored. Ties keep the pool's order (stable sort).
    pub fn build_feed(
        &self,
        requester: &AgentTraits,
        candidates: Vec<AgentProfile>,
        limit: usize,
        intent_filter: Option<MatchIntent>,
    ) -> FeedResult {
        let total_candidates = candidates.len();

        let intent_filter = intent_filter.filter(MatchIntent::filterable);

        let mut entries: Vec<RankedCandidate> = candidates
            .into_iter()
            .filter(|profile| match intent_filter {
                Some(intent) => profile.seeking.seeks(intent),
                None => true,
            })
            .map(|profile| {
                let compatibility = calculate_compatibility(requester, &profile.traits());
                RankedCandidate {
                    profile,
                    compatibility,
                }
            })
            .collect();

        // Stable sort: equal scores keep their pool order.
        entries.sort_by(|a, b| {
            b.compatibility
                .total
                .partial_cmp(&a.compatibility.total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        entries.truncate(limit);

        FeedResult {
            entries,
            total_candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeekingFlags;
    use chrono::Utc;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn candidate(id: &str, chains: &[&str], seeking: SeekingFlags) -> AgentProfile {
        AgentProfile {
            id: id.to_string(),
            name: format!("Agent {}", id),
            emoji: "🤖".to_string(),
            tagline: None,
            bio: None,
            chains: tags(chains),
            vibes: vec![],
            skills: vec![],
            seeking,
            total_swipes: 0,
            matches_count: 0,
            rivalries_won: 0,
            rivalries_lost: 0,
            reputation: 3.0,
            super_swipes: 1,
            created_at: Utc::now(),
        }
    }

    fn requester(chains: &[&str], seeking: SeekingFlags) -> AgentTraits {
        AgentTraits {
            chains: tags(chains),
            vibes: vec![],
            skills: vec![],
            seeking,
        }
    }

    #[test]
    fn test_feed_sorted_by_score_descending() {
        let builder = FeedBuilder::new();
        let req = requester(&["Ethereum", "Base"], SeekingFlags::default());

        let candidates = vec![
            candidate("low", &["Solana"], SeekingFlags::default()),
            candidate("high", &["Ethereum", "Base"], SeekingFlags::default()),
            candidate("mid", &["Ethereum"], SeekingFlags::default()),
        ];

        let result = builder.build_feed(&req, candidates, 10, None);

        let ids: Vec<&str> = result.entries.iter().map(|e| e.profile.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
        assert_eq!(result.total_candidates, 3);
    }

    #[test]
    fn test_feed_respects_limit() {
        let builder = FeedBuilder::new();
        let req = requester(&["Ethereum"], SeekingFlags::default());

        let candidates: Vec<AgentProfile> = (0..20)
            .map(|i| candidate(&i.to_string(), &["Ethereum"], SeekingFlags::default()))
            .collect();

        let result = builder.build_feed(&req, candidates, 5, None);

        assert_eq!(result.entries.len(), 5);
        assert_eq!(result.total_candidates, 20);
    }

    #[test]
    fn test_feed_ties_keep_pool_order() {
        let builder = FeedBuilder::new();
        let req = requester(&["Ethereum"], SeekingFlags::default());

        // Identical candidates score identically; pool order must survive.
        let candidates = vec![
            candidate("first", &["Ethereum"], SeekingFlags::default()),
            candidate("second", &["Ethereum"], SeekingFlags::default()),
            candidate("third", &["Ethereum"], SeekingFlags::default()),
        ];

        let result = builder.build_feed(&req, candidates, 10, None);

        let ids: Vec<&str> = result.entries.iter().map(|e| e.profile.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_feed_intent_filter() {
        let builder = FeedBuilder::new();
        let req = requester(&[], SeekingFlags { rivalry: true, ..Default::default() });

        let rival = SeekingFlags { rivalry: true, ..Default::default() };
        let friendly = SeekingFlags { friendship: true, ..Default::default() };

        let candidates = vec![
            candidate("rival", &[], rival),
            candidate("friendly", &[], friendly),
        ];

        let result = builder.build_feed(&req, candidates, 10, Some(MatchIntent::Rivalry));

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].profile.id, "rival");
    }

    #[test]
    fn test_feed_non_filterable_intent_ignored() {
        let builder = FeedBuilder::new();
        let req = requester(&[], SeekingFlags::default());

        let candidates = vec![
            candidate("a", &[], SeekingFlags::default()),
            candidate("b", &[], SeekingFlags { romance: true, ..Default::default() }),
        ];

        let result = builder.build_feed(&req, candidates, 10, Some(MatchIntent::Romance));

        // Romance is not a valid feed filter, so nothing is excluded.
        assert_eq!(result.entries.len(), 2);
    }

    #[test]
    fn test_feed_empty_pool() {
        let builder = FeedBuilder::new();
        let req = requester(&[], SeekingFlags::default());

        let result = builder.build_feed(&req, vec![], 10, None);

        assert!(result.entries.is_empty());
        assert_eq!(result.total_candidates, 0);
    }
}
