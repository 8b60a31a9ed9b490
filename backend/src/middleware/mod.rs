//! Request middleware for cross-cutting HTTP concerns.

pub mod cors;
pub mod trace;

pub use cors::cors;
pub use trace::Trace;
