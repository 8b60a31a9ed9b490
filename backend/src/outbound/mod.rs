//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process store used when no database is configured.
//! - **security**: bcrypt password hashing and JWT session tokens.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
