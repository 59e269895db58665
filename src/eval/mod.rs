//! Position evaluation

pub mod heuristic;

// Re-exports
pub use heuristic::{breakdown, evaluate, EvalBreakdown};
