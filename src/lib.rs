//! Tigers and Goats (Bagh-Chal variant) engine with a minimax AI
//!
//! The game is played on a 23-cell board graph: three tigers try to
//! capture fifteen goats by jumping over them, while the goats try to
//! block every tiger. Goats are placed one per turn before they may
//! move; tigers move (or capture) from the start.
//!
//! # Architecture
//!
//! - [`board`]: board topology, cell/turn/phase types and the
//!   [`GameState`] state machine
//! - [`rules`]: legal-move generation and terminal conditions
//! - [`eval`]: fixed linear evaluation over positional features
//! - [`search`]: alpha-beta minimax with a shared transposition cache
//!   and parallel root fan-out
//! - [`engine`]: the [`AIEngine`] facade tying the above together
//!
//! # Quick Start
//!
//! ```
//! use baghchal::{AIEngine, GameState, Player};
//!
//! let mut game = GameState::new();
//! let engine = AIEngine::new();
//!
//! // Goat places first; let the AI pick the opening placement.
//! let cell = engine.get_move(&game).expect("opening placement exists");
//! game.apply_action(cell).unwrap();
//! assert_eq!(game.turn(), Player::Tiger);
//! ```
//!
//! All driver concerns — menus, rendering, input parsing — live in the
//! binary; this library is pure game logic and search.

pub mod board;
pub mod engine;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{
    ActionError, Cell, GameState, Move, Phase, Player, Winner, CELL_COUNT, GOATS_TO_PLACE,
};
pub use engine::AIEngine;
pub use eval::{breakdown, evaluate, EvalBreakdown};
pub use search::{SearchOutcome, Searcher};
