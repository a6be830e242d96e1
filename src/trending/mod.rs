//! Sliding-window hashtag trending and co-occurrence recommendations

pub mod cache;
pub mod clock;
pub mod counter;
pub mod engine;
pub mod recommend;
pub mod sync;

pub use cache::MemoryTrendingCache;
pub use cache::TrendingCache;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use counter::CounterStore;
pub use counter::HashtagTally;
pub use counter::StoreStatus;
pub use engine::check_window_minutes;
pub use engine::CacheOutcome;
pub use engine::CachedTop;
pub use engine::TrendingEngine;
pub use engine::TrendingSnapshot;
pub use engine::MAX_WINDOW_MINUTES;
pub use recommend::CooccurrenceSource;
pub use recommend::Recommendation;
pub use recommend::RecommendationEngine;
pub use sync::SyncReport;
pub use sync::TrendingSync;
