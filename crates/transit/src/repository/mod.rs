//! Repositories exposed to callers above the engine.

pub mod index_repository;
pub mod set;

pub use index_repository::IndexRepository;
pub use set::TransportIndexSet;
