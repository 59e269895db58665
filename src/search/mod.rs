//! Search algorithms for the AI engine

pub mod alphabeta;
pub mod tt;

// Re-exports
pub use alphabeta::{alpha_beta, candidate_actions, SearchOutcome, Searcher};
pub use tt::{position_key, CacheStats, TranspositionTable};
