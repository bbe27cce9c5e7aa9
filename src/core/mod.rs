// Core algorithm exports
pub mod affinity;
pub mod feed;
pub mod scoring;

pub use affinity::{tag_complement, tag_overlap, vibe_affinity, vibe_compatibility};
pub use feed::{FeedBuilder, FeedResult};
pub use scoring::calculate_compatibility;
