//! AI engine facade: depth scheduling and the move-selection entry point.
//!
//! The engine wraps the [`Searcher`] and decides how deep to look based
//! on the game stage: shallow while the goats are still being placed
//! (branching is widest there), deeper once captures or blocked tigers
//! sharpen the position and narrow the tree.
//!
//! # Example
//!
//! ```
//! use baghchal::{AIEngine, GameState};
//!
//! let mut game = GameState::new();
//! let engine = AIEngine::new();
//!
//! // Goat places first; ask the engine for the opening placement.
//! if let Some(cell) = engine.get_move(&game) {
//!     game.apply_action(cell).unwrap();
//! }
//! ```

use crate::board::{GameState, Phase};
use crate::rules::count_blocked_tigers;
use crate::search::{CacheStats, SearchOutcome, Searcher};

/// Search depth during the goat placement phase
const PLACEMENT_DEPTH: u8 = 2;
/// Default search depth
const DEFAULT_DEPTH: u8 = 3;
/// Depth once the position has sharpened
const ENDGAME_DEPTH: u8 = 4;
/// Captured goats that trigger the deeper search
const ENDGAME_CAPTURE_THRESHOLD: u8 = 3;
/// Blocked tigers that trigger the deeper search
const ENDGAME_BLOCKED_THRESHOLD: u32 = 2;

/// AI opponent for either side.
///
/// One engine instance carries the transposition cache for a whole
/// session, so repeated calls reuse earlier work. The engine never
/// mutates the state it is given; it explores deep copies only.
pub struct AIEngine {
    searcher: Searcher,
}

impl AIEngine {
    /// Engine with hardware-sized worker parallelism.
    #[must_use]
    pub fn new() -> Self {
        Self {
            searcher: Searcher::new(),
        }
    }

    /// Engine with an explicit worker-thread count.
    #[must_use]
    pub fn with_threads(threads: usize) -> Self {
        Self {
            searcher: Searcher::with_threads(threads),
        }
    }

    /// Depth schedule: 2 plies while placing, 3 normally, 4 once at
    /// least three goats are captured or two tigers are blocked.
    fn search_depth(state: &GameState) -> u8 {
        let base = if state.phase() == Phase::Placing {
            PLACEMENT_DEPTH
        } else {
            DEFAULT_DEPTH
        };
        if state.goats_captured() >= ENDGAME_CAPTURE_THRESHOLD
            || count_blocked_tigers(state.cells()) >= ENDGAME_BLOCKED_THRESHOLD
        {
            ENDGAME_DEPTH
        } else {
            base
        }
    }

    /// Evaluate all root candidates and return the extremal one for the
    /// side to move, with score and timing attached.
    ///
    /// `cell` is `None` only when the mover has no legal action at all;
    /// during placement the engine degrades to the first empty cell
    /// instead, keeping the game moving.
    #[must_use]
    pub fn select_best_move(&self, state: &GameState) -> SearchOutcome {
        let depth = Self::search_depth(state);
        let mut outcome = self.searcher.select_best_move(state, depth);

        if outcome.cell.is_none() && state.phase() == Phase::Placing {
            outcome.cell = state.empty_cells().first().copied();
        }

        tracing::debug!(
            cell = ?outcome.cell,
            score = outcome.score,
            depth = outcome.depth,
            time_ms = outcome.time_ms,
            "search complete"
        );
        outcome
    }

    /// Best move only, without the statistics.
    #[must_use]
    pub fn get_move(&self, state: &GameState) -> Option<usize> {
        self.select_best_move(state).cell
    }

    /// Transposition cache usage counters.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.searcher.cache().stats()
    }

    /// Drop all cached scores, e.g. between games.
    pub fn clear_cache(&self) {
        self.searcher.cache().clear();
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
