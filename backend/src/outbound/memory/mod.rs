//! In-memory store adapters.
//!
//! Each store guards its map with one `tokio::sync::RwLock`; every mutating
//! port call performs its check and write under a single write guard, so
//! insert-if-absent, conditional merge and conditional reviewer replacement
//! are atomic.

mod pull_request_repository;
mod team_repository;
mod user_repository;

pub use pull_request_repository::InMemoryPullRequestRepository;
pub use team_repository::InMemoryTeamRepository;
pub use user_repository::InMemoryUserRepository;
