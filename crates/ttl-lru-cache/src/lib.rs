//! In-memory cache with TTL expiration and LRU eviction
//!
//! Entries carry their own absolute expiry. Expiry is checked lazily on read;
//! an expired entry reads as a miss but keeps its slot until it is overwritten
//! or evicted. When the cache is full, inserting a new key evicts the least
//! recently used entry, where both reads and writes count as use.

mod cache;
mod types;

pub use cache::LruCache;
pub use types::CacheStats;
