//! Cache infrastructure
//!
//! Redis-backed session storage plus an in-memory store used in tests and
//! single-process development setups.

pub mod memory;
pub mod redis_client;
pub mod session_store;

pub use memory::InMemorySessionStore;
pub use redis_client::{CacheConfig, RedisClient};
pub use session_store::RedisSessionStore;
