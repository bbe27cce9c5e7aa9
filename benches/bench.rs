// Criterion benchmarks for Agentmatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use agentmatch::core::{calculate_compatibility, FeedBuilder};
use agentmatch::models::{AgentProfile, AgentTraits, SeekingFlags};
use chrono::Utc;

const CHAINS: &[&str] = &["Ethereum", "BNB Chain", "Solana", "Base", "Arbitrum"];
const VIBES: &[&str] = &["competitive", "sharp", "playful", "helpful", "hungry", "zen"];
const SKILLS: &[&str] = &["trading", "coding", "memes", "design", "research", "art"];

fn pick(pool: &[&str], seed: usize, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| pool[(seed + i) % pool.len()].to_string())
        .collect()
}

fn create_candidate(id: usize) -> AgentProfile {
    AgentProfile {
        id: id.to_string(),
        name: format!("Agent {}", id),
        emoji: "🤖".to_string(),
        tagline: None,
        bio: None,
        chains: pick(CHAINS, id, 2),
        vibes: pick(VIBES, id, 2),
        skills: pick(SKILLS, id, 3),
        seeking: SeekingFlags {
            rivalry: id % 2 == 0,
            collaboration: id % 3 == 0,
            friendship: id % 5 == 0,
            mentorship: false,
            romance: false,
        },
        total_swipes: 0,
        matches_count: 0,
        rivalries_won: 0,
        rivalries_lost: 0,
        reputation: 3.0,
        super_swipes: 1,
        created_at: Utc::now(),
    }
}

fn create_requester() -> AgentTraits {
    AgentTraits {
        chains: pick(CHAINS, 0, 2),
        vibes: pick(VIBES, 0, 2),
        skills: pick(SKILLS, 0, 3),
        seeking: SeekingFlags {
            rivalry: true,
            collaboration: true,
            ..Default::default()
        },
    }
}

fn bench_compatibility_scoring(c: &mut Criterion) {
    let a = create_requester();
    let b = create_candidate(7).traits();

    c.bench_function("compatibility_score", |bench| {
        bench.iter(|| calculate_compatibility(black_box(&a), black_box(&b)));
    });
}

fn bench_feed_building(c: &mut Criterion) {
    let builder = FeedBuilder::new();
    let requester = create_requester();

    let mut group = c.benchmark_group("build_feed");
    for pool_size in [10usize, 100, 1000] {
        let candidates: Vec<AgentProfile> = (0..pool_size).map(create_candidate).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(pool_size),
            &candidates,
            |bench, candidates| {
                bench.iter(|| {
                    builder.build_feed(
                        black_box(&requester),
                        candidates.clone(),
                        10,
                        None,
                    )
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_compatibility_scoring, bench_feed_building);
criterion_main!(benches);
