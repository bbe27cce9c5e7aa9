use std::collections::HashSet;

/// Pairwise vibe affinities, keyed by lowercase tag pair in lexical order.
/// Values are in [0, 1].
const VIBE_AFFINITY: &[((&str, &str), f64)] = &[
    (("competitive", "competitive"), 0.9),
    (("competitive", "sharp"), 0.8),
    (("competitive", "playful"), 0.7),
    (("sharp", "sharp"), 0.8),
    (("playful", "playful"), 0.9),
    (("helpful", "helpful"), 0.8),
    (("aggressive", "competitive"), 0.8),
    (("competitive", "hungry"), 0.9),
    (("hungry", "hungry"), 0.9),
];

/// Affinity for a pair of identical tags with no table entry.
pub const SAME_VIBE_AFFINITY: f64 = 0.7;

/// Fallback when both sides have vibes but no pair matched any rule.
pub const NO_RULE_AFFINITY: f64 = 0.4;

/// Fallback when either side has no vibes at all.
pub const NO_VIBES_AFFINITY: f64 = 0.5;

/// Look up the affinity for an unordered pair of vibe tags.
///
/// Case-insensitive; the table is keyed by sorted lowercase pairs so the
/// lookup is symmetric in its arguments.
pub fn vibe_affinity(a: &str, b: &str) -> Option<f64> {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    let key = if a <= b { (a.as_str(), b.as_str()) } else { (b.as_str(), a.as_str()) };
    VIBE_AFFINITY
        .iter()
        .find(|(pair, _)| *pair == key)
        .map(|(_, score)| *score)
}

/// Jaccard similarity of two tag lists: |A ∩ B| / |A ∪ B|.
/// Returns 0.0 when either list is empty.
pub fn tag_overlap(list_a: &[String], list_b: &[String]) -> f64 {
    if list_a.is_empty() || list_b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<&str> = list_a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = list_b.iter().map(String::as_str).collect();

    let intersection = set_a.intersection(&set_b).count() as f64;
    let union = set_a.union(&set_b).count() as f64;

    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}

/// Blended skill complementarity: shared skills count for 0.6, unique
/// skills for 0.4, normalized by the union size. Returns 0.0 when either
/// list is empty.
pub fn tag_complement(list_a: &[String], list_b: &[String]) -> f64 {
    if list_a.is_empty() || list_b.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<&str> = list_a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = list_b.iter().map(String::as_str).collect();

    let overlap = set_a.intersection(&set_b).count() as f64;
    let unique = set_a.symmetric_difference(&set_b).count() as f64;
    let total = set_a.union(&set_b).count() as f64;

    if total > 0.0 {
        (overlap * 0.6 + unique * 0.4) / total
    } else {
        0.0
    }
}

/// Average vibe affinity across every cross pair of the two lists.
///
/// Pairs absent from the table but lexically identical (case-insensitive)
/// contribute `SAME_VIBE_AFFINITY`. Pairs matching no rule are skipped;
/// if nothing matched the result is `NO_RULE_AFFINITY`, and if either side
/// has no vibes at all it is `NO_VIBES_AFFINITY`.
pub fn vibe_compatibility(vibes_a: &[String], vibes_b: &[String]) -> f64 {
    if vibes_a.is_empty() || vibes_b.is_empty() {
        return NO_VIBES_AFFINITY;
    }

    let mut scores = Vec::new();
    for va in vibes_a {
        for vb in vibes_b {
            if let Some(score) = vibe_affinity(va, vb) {
                scores.push(score);
            } else if va.to_lowercase() == vb.to_lowercase() {
                // Unicode-aware, matching the table lookup's folding.
                scores.push(SAME_VIBE_AFFINITY);
            }
        }
    }

    if scores.is_empty() {
        NO_RULE_AFFINITY
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_affinity_symmetric_lookup() {
        assert_eq!(vibe_affinity("competitive", "sharp"), Some(0.8));
        assert_eq!(vibe_affinity("sharp", "competitive"), Some(0.8));
        assert_eq!(vibe_affinity("hungry", "competitive"), Some(0.9));
    }

    #[test]
    fn test_affinity_case_insensitive() {
        assert_eq!(vibe_affinity("Competitive", "SHARP"), Some(0.8));
    }

    #[test]
    fn test_affinity_unknown_pair() {
        assert_eq!(vibe_affinity("zen", "chaotic"), None);
    }

    #[test]
    fn test_overlap_identical() {
        let a = tags(&["Ethereum", "Solana"]);
        assert!((tag_overlap(&a, &a) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlap_partial() {
        let a = tags(&["Ethereum", "Solana"]);
        let b = tags(&["Solana", "Base", "Arbitrum"]);
        // intersection 1, union 4
        assert!((tag_overlap(&a, &b) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_empty_side() {
        let a = tags(&["Ethereum"]);
        assert_eq!(tag_overlap(&a, &[]), 0.0);
        assert_eq!(tag_overlap(&[], &a), 0.0);
    }

    #[test]
    fn test_complement_blend() {
        let a = tags(&["trading", "coding"]);
        let b = tags(&["coding", "memes"]);
        // overlap 1, unique 2, total 3 -> (0.6 + 0.8) / 3
        assert!((tag_complement(&a, &b) - (1.4 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_complement_disjoint_still_scores() {
        let a = tags(&["trading"]);
        let b = tags(&["memes"]);
        // overlap 0, unique 2, total 2 -> 0.4
        assert!((tag_complement(&a, &b) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_vibes_empty_side_neutral() {
        let a = tags(&["competitive"]);
        assert_eq!(vibe_compatibility(&a, &[]), NO_VIBES_AFFINITY);
        assert_eq!(vibe_compatibility(&[], &[]), NO_VIBES_AFFINITY);
    }

    #[test]
    fn test_vibes_no_rule_fallback() {
        let a = tags(&["zen"]);
        let b = tags(&["chaotic"]);
        assert_eq!(vibe_compatibility(&a, &b), NO_RULE_AFFINITY);
    }

    #[test]
    fn test_vibes_same_tag_without_rule() {
        let a = tags(&["zen"]);
        assert_eq!(vibe_compatibility(&a, &a), SAME_VIBE_AFFINITY);
    }

    #[test]
    fn test_vibes_same_tag_unicode_case() {
        let a = tags(&["CRÉATIF"]);
        let b = tags(&["créatif"]);
        assert_eq!(vibe_compatibility(&a, &b), SAME_VIBE_AFFINITY);
        assert_eq!(vibe_compatibility(&b, &a), SAME_VIBE_AFFINITY);
    }

    #[test]
    fn test_vibes_average_of_matched_pairs() {
        let a = tags(&["competitive"]);
        let b = tags(&["competitive", "sharp"]);
        // (0.9 + 0.8) / 2
        assert!((vibe_compatibility(&a, &b) - 0.85).abs() < 1e-9);
    }
}
