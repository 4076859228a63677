//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local stores holding teams, users and pull requests
//!   behind async read/write locks. State is lost on restart.
//!
//! Adapters translate between domain types and their storage representation
//! and enforce the single-entity atomic rules the ports document. They carry
//! no business logic.

pub mod memory;
