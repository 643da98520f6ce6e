//! Property indexing module
//!
//! Equality indices backing the graph engine's `has(key, value)` queries.

pub mod manager;
pub mod property_index;

pub use manager::IndexManager;
pub use property_index::PropertyIndex;
