// Unit tests for Agentmatch

use agentmatch::core::{
    affinity::{tag_complement, tag_overlap, vibe_affinity, vibe_compatibility},
    calculate_compatibility,
};
use agentmatch::models::{AgentTraits, MatchIntent, SeekingFlags};

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn traits(chains: &[&str], vibes: &[&str], skills: &[&str], seeking: SeekingFlags) -> AgentTraits {
    AgentTraits {
        chains: tags(chains),
        vibes: tags(vibes),
        skills: tags(skills),
        seeking,
    }
}

#[test]
fn test_tag_overlap_full() {
    let a = tags(&["Ethereum", "BNB Chain"]);
    let overlap = tag_overlap(&a, &a);
    assert!((overlap - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_tag_overlap_disjoint() {
    let a = tags(&["Ethereum"]);
    let b = tags(&["Solana"]);
    assert_eq!(tag_overlap(&a, &b), 0.0);
}

#[test]
fn test_tag_overlap_ignores_duplicates() {
    // Set semantics: repeated tags count once.
    let a = tags(&["Ethereum", "Ethereum"]);
    let b = tags(&["Ethereum"]);
    assert!((tag_overlap(&a, &b) - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_tag_complement_mixed() {
    let a = tags(&["coding", "trading", "memes"]);
    let b = tags(&["coding", "design"]);
    // overlap 1, unique 3, union 4 -> (0.6 + 1.2) / 4 = 0.45
    assert!((tag_complement(&a, &b) - 0.45).abs() < 1e-9);
}

#[test]
fn test_tag_complement_empty() {
    let a = tags(&["coding"]);
    assert_eq!(tag_complement(&a, &[]), 0.0);
}

#[test]
fn test_vibe_affinity_pairs() {
    assert_eq!(vibe_affinity("competitive", "competitive"), Some(0.9));
    assert_eq!(vibe_affinity("aggressive", "competitive"), Some(0.8));
    assert_eq!(vibe_affinity("competitive", "aggressive"), Some(0.8));
    assert_eq!(vibe_affinity("helpful", "aggressive"), None);
}

#[test]
fn test_vibe_compatibility_fallbacks() {
    // either side empty -> 0.5
    assert_eq!(vibe_compatibility(&[], &tags(&["sharp"])), 0.5);
    // both nonempty, no rule, no identical tag -> 0.4
    assert_eq!(vibe_compatibility(&tags(&["zen"]), &tags(&["moody"])), 0.4);
    // identical tag without table entry -> 0.7
    assert_eq!(vibe_compatibility(&tags(&["zen"]), &tags(&["zen"])), 0.7);
}

#[test]
fn test_score_breakdown_weights() {
    let all_seeking = SeekingFlags {
        rivalry: true,
        collaboration: true,
        friendship: true,
        mentorship: true,
        romance: true,
    };
    let a = traits(
        &["Ethereum"],
        &["competitive"],
        &["trading", "coding"],
        all_seeking,
    );
    let b = traits(
        &["Ethereum"],
        &["competitive"],
        &["memes", "coding"],
        all_seeking,
    );

    let compat = calculate_compatibility(&a, &b);

    assert_eq!(compat.breakdown.chain, 25.0);
    assert_eq!(compat.breakdown.vibe, 18.0); // 0.9 * 20
    assert_eq!(compat.breakdown.seeking, 35.0);
    assert_eq!(compat.matched_intents.len(), 5);
    assert!(compat.total <= 100.0);
}

#[test]
fn test_score_symmetry_over_varied_pairs() {
    let profiles = vec![
        traits(&[], &[], &[], SeekingFlags::default()),
        traits(&["Ethereum"], &["zen"], &["art"], SeekingFlags { rivalry: true, ..Default::default() }),
        traits(
            &["Ethereum", "Solana", "Base"],
            &["competitive", "hungry"],
            &["trading", "coding", "memes"],
            SeekingFlags { rivalry: true, collaboration: true, romance: true, ..Default::default() },
        ),
        traits(&["BNB Chain"], &["playful", "helpful"], &["design"], SeekingFlags { friendship: true, ..Default::default() }),
    ];

    for a in &profiles {
        for b in &profiles {
            let ab = calculate_compatibility(a, b);
            let ba = calculate_compatibility(b, a);
            assert_eq!(ab.total, ba.total, "total must be symmetric");
            assert_eq!(ab.matched_intents, ba.matched_intents);
            assert!(ab.total >= 0.0 && ab.total <= 100.0);
        }
    }
}

#[test]
fn test_matched_intents_follow_canonical_order() {
    let seeking = SeekingFlags {
        romance: true,
        rivalry: true,
        mentorship: true,
        ..Default::default()
    };
    let a = traits(&[], &[], &[], seeking);
    let compat = calculate_compatibility(&a, &a.clone());

    assert_eq!(
        compat.matched_intents,
        vec![MatchIntent::Rivalry, MatchIntent::Mentorship, MatchIntent::Romance]
    );
    assert_eq!(compat.primary_match_type(), Some(MatchIntent::Rivalry));
}

#[test]
fn test_reasons_report_matched_intents() {
    let seeking = SeekingFlags {
        rivalry: true,
        collaboration: true,
        ..Default::default()
    };
    let a = traits(&[], &[], &[], seeking);
    let compat = calculate_compatibility(&a, &a.clone());

    assert!(compat
        .reasons
        .iter()
        .any(|r| r == "Both seeking: rivalry, collaboration"));
}
