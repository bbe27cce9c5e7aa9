use std::collections::HashSet;

use crate::core::affinity::{tag_complement, tag_overlap, vibe_compatibility};
use crate::models::{AgentTraits, Compatibility, MatchIntent, ScoreBreakdown};

/// Category weights. Must sum to 100 so totals stay in [0, 100].
pub const CHAIN_WEIGHT: f64 = 25.0;
pub const VIBE_WEIGHT: f64 = 20.0;
pub const SKILL_WEIGHT: f64 = 20.0;
pub const SEEKING_WEIGHT: f64 = 35.0;

/// Points awarded per mutually-sought intent category.
const SEEKING_POINTS_PER_INTENT: f64 = SEEKING_WEIGHT / 5.0;

/// A sub-score must exceed this to earn a mention in the reasons list.
const REASON_THRESHOLD: f64 = 10.0;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Calculate the compatibility between two agents.
///
/// Pure and infallible: missing tag data degrades to the documented
/// neutral fallbacks. The total is symmetric in the two arguments; only
/// the reason phrasing may depend on order.
///
/// Weighted sub-scores:
/// - chain overlap (25): Jaccard similarity of chain tags
/// - vibe compatibility (20): averaged pairwise affinity
/// - skill complementarity (20): blend of shared and unique skills
/// - seeking alignment (35): 7 points per mutually-sought category
pub fn calculate_compatibility(agent_a: &AgentTraits, agent_b: &AgentTraits) -> Compatibility {
    let chain_score = tag_overlap(&agent_a.chains, &agent_b.chains) * CHAIN_WEIGHT;
    let vibe_score = vibe_compatibility(&agent_a.vibes, &agent_b.vibes) * VIBE_WEIGHT;
    let skill_score = tag_complement(&agent_a.skills, &agent_b.skills) * SKILL_WEIGHT;

    let mut seeking_score = 0.0;
    let mut matched_intents = Vec::new();
    for intent in MatchIntent::ALL {
        if agent_a.seeking.seeks(intent) && agent_b.seeking.seeks(intent) {
            seeking_score += SEEKING_POINTS_PER_INTENT;
            matched_intents.push(intent);
        }
    }

    let total = chain_score + vibe_score + skill_score + seeking_score;

    let mut reasons = Vec::new();
    if chain_score > REASON_THRESHOLD {
        let set_b: HashSet<&str> = agent_b.chains.iter().map(String::as_str).collect();
        let mut shared: Vec<&str> = agent_a
            .chains
            .iter()
            .map(String::as_str)
            .filter(|c| set_b.contains(c))
            .collect();
        shared.sort_unstable();
        shared.dedup();
        reasons.push(format!("Both on {}", shared.join(", ")));
    }
    if vibe_score > REASON_THRESHOLD {
        reasons.push("Compatible vibes".to_string());
    }
    if skill_score > REASON_THRESHOLD {
        reasons.push("Complementary skills".to_string());
    }
    if !matched_intents.is_empty() {
        let names: Vec<&str> = matched_intents.iter().map(|i| i.as_str()).collect();
        reasons.push(format!("Both seeking: {}", names.join(", ")));
    }

    Compatibility {
        total: round1(total),
        breakdown: ScoreBreakdown {
            chain: round1(chain_score),
            vibe: round1(vibe_score),
            skill: round1(skill_score),
            seeking: round1(seeking_score),
        },
        reasons,
        matched_intents,
    }
}
