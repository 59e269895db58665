//! Minimax search with alpha-beta pruning and parallel root fan-out.
//!
//! The searcher evaluates every legal root candidate independently:
//! each task deep-copies the game state, pre-applies its candidate and
//! explores the tree to a fixed depth. Tasks share nothing but the
//! transposition cache, so they are distributed over worker threads and
//! joined before the best candidate is chosen.
//!
//! One ply is one *action*, not one move: selecting a piece and
//! choosing its destination each consume a ply, and the maximizing flag
//! follows whose turn it is in the child state. A selection therefore
//! keeps the flag while a completed move flips it with the turn.
//!
//! # Example
//!
//! ```
//! use baghchal::board::GameState;
//! use baghchal::search::Searcher;
//!
//! let state = GameState::new();
//! let searcher = Searcher::new();
//! let outcome = searcher.select_best_move(&state, 2);
//! assert!(outcome.cell.is_some());
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::board::{GameState, Phase, Player};
use crate::eval::evaluate;

use super::tt::{position_key, TranspositionTable};

/// Score bound treated as infinity by the alpha-beta window. Well above
/// anything the evaluator can produce.
pub const INF: i32 = 1_000_000;

/// Result of a root search.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    /// Chosen cell, `None` when the mover has no legal action
    pub cell: Option<usize>,
    /// Minimax score of the chosen action
    pub score: i32,
    /// Depth the search ran to, in plies
    pub depth: u8,
    /// Wall-clock time of the whole root fan-out
    pub time_ms: u64,
}

/// Root-move searcher with a session-wide transposition cache.
///
/// The cache is shared across calls, so scores computed while thinking
/// about one position are reused on later turns of the same game.
pub struct Searcher {
    cache: Arc<TranspositionTable>,
    threads: usize,
}

impl Searcher {
    /// Create a searcher using the available hardware parallelism.
    #[must_use]
    pub fn new() -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get().min(8))
            .unwrap_or(4);
        Self::with_threads(threads)
    }

    /// Create a searcher with an explicit worker-thread count.
    #[must_use]
    pub fn with_threads(threads: usize) -> Self {
        Self {
            cache: Arc::new(TranspositionTable::new()),
            threads: threads.max(1),
        }
    }

    /// Shared transposition cache handle.
    #[must_use]
    pub fn cache(&self) -> &TranspositionTable {
        &self.cache
    }

    /// Evaluate every root candidate at the given depth and pick the
    /// extremal score for the side to move: maximum for Tiger, minimum
    /// for Goat. Ties go to the first-enumerated candidate.
    ///
    /// Returns `cell: None` when the mover has no legal action — an
    /// engine-level stalemate the caller must interpret, not a crash.
    #[must_use]
    pub fn select_best_move(&self, state: &GameState, depth: u8) -> SearchOutcome {
        let start = Instant::now();
        let candidates = candidate_actions(state);
        let maximizing = state.turn() == Player::Tiger;

        if candidates.is_empty() {
            return SearchOutcome {
                cell: None,
                score: 0,
                depth,
                time_ms: start.elapsed().as_millis() as u64,
            };
        }

        let scores = self.evaluate_candidates(state, &candidates, depth, maximizing);
        tracing::trace!(?candidates, ?scores, "root candidates evaluated");

        let mut best = 0;
        for (i, &score) in scores.iter().enumerate().skip(1) {
            let better = if maximizing {
                score > scores[best]
            } else {
                score < scores[best]
            };
            if better {
                best = i;
            }
        }

        SearchOutcome {
            cell: Some(candidates[best]),
            score: scores[best],
            depth,
            time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Fan the candidate evaluations out over worker threads and join.
    /// Scores come back in candidate order regardless of scheduling.
    fn evaluate_candidates(
        &self,
        state: &GameState,
        candidates: &[usize],
        depth: u8,
        maximizing: bool,
    ) -> Vec<i32> {
        let workers = self.threads.min(candidates.len());
        if workers <= 1 {
            return candidates
                .iter()
                .map(|&c| evaluate_root_candidate(state, c, depth, maximizing, &self.cache))
                .collect();
        }

        let mut scores = vec![0i32; candidates.len()];
        let chunk = candidates.len().div_ceil(workers);
        std::thread::scope(|scope| {
            for (cand_chunk, score_chunk) in
                candidates.chunks(chunk).zip(scores.chunks_mut(chunk))
            {
                let cache = Arc::clone(&self.cache);
                scope.spawn(move || {
                    for (slot, &candidate) in score_chunk.iter_mut().zip(cand_chunk.iter()) {
                        *slot = evaluate_root_candidate(state, candidate, depth, maximizing, &cache);
                    }
                });
            }
        });
        scores
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep-copy the root, pre-apply the candidate, then search the rest of
/// the tree. A candidate the state machine rejects scores as an
/// immediate loss for the mover; legal candidate sets never contain one.
fn evaluate_root_candidate(
    state: &GameState,
    candidate: usize,
    depth: u8,
    maximizing: bool,
    cache: &TranspositionTable,
) -> i32 {
    let mut child = state.clone();
    if child.apply_action(candidate).is_err() {
        return if maximizing { -INF } else { INF };
    }
    alpha_beta(&child, depth, maximizing, -INF, INF, cache)
}

/// Legal candidate actions for the state's current phase: empty cells
/// while placing, movable pieces awaiting selection, or the selected
/// piece's destinations.
#[must_use]
pub fn candidate_actions(state: &GameState) -> Vec<usize> {
    match state.phase() {
        Phase::Placing => state.empty_cells(),
        Phase::SelectingPiece => state.movable_pieces().to_vec(),
        Phase::SelectingDestination => state.destinations().to_vec(),
    }
}

/// Recursive minimax over the action graph with alpha-beta pruning.
///
/// Leaves (depth exhausted or game over) score via the canonical
/// Tiger-perspective evaluation. Internal nodes are memoized in the
/// cache keyed on the board snapshot and the maximizing flag; a hit
/// short-circuits expansion. An empty candidate set leaves the fold at
/// the mover's worst score, signaling a stalemate to the ancestors.
#[must_use]
pub fn alpha_beta(
    state: &GameState,
    depth: u8,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    cache: &TranspositionTable,
) -> i32 {
    if depth == 0 || state.game_over() {
        return leaf_value(state, maximizing);
    }

    let key = position_key(state.cells(), maximizing);
    if let Some(score) = cache.probe(key) {
        return score;
    }

    let mut value = if maximizing { -INF } else { INF };
    for action in candidate_actions(state) {
        let mut child = state.clone();
        if child.apply_action(action).is_err() {
            // Folding the mover's worst score would be a no-op; skip.
            continue;
        }
        let child_maximizing = child.turn() == Player::Tiger;
        let score = alpha_beta(&child, depth - 1, child_maximizing, alpha, beta, cache);

        if maximizing {
            value = value.max(score);
            alpha = alpha.max(value);
        } else {
            value = value.min(score);
            beta = beta.min(value);
        }
        if alpha >= beta {
            break;
        }
    }

    cache.store(key, value);
    value
}

/// Leaf evaluation: canonical Tiger-perspective score, negated when a
/// minimizing goat node is being scored. Keeping one sign convention
/// across the tree avoids re-deriving per-player formulas at every leaf.
fn leaf_value(state: &GameState, maximizing: bool) -> i32 {
    let value = evaluate(state, Player::Tiger);
    if !maximizing && state.turn() == Player::Goat {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, CELL_COUNT, TIGER_START_CELLS};

    /// Unpruned minimax with the same memo discipline as `alpha_beta`,
    /// used to check that pruning never changes the returned value.
    fn minimax_plain(
        state: &GameState,
        depth: u8,
        maximizing: bool,
        cache: &TranspositionTable,
    ) -> i32 {
        if depth == 0 || state.game_over() {
            return leaf_value(state, maximizing);
        }

        let key = position_key(state.cells(), maximizing);
        if let Some(score) = cache.probe(key) {
            return score;
        }

        let mut value = if maximizing { -INF } else { INF };
        for action in candidate_actions(state) {
            let mut child = state.clone();
            if child.apply_action(action).is_err() {
                continue;
            }
            let child_maximizing = child.turn() == Player::Tiger;
            let score = minimax_plain(&child, depth - 1, child_maximizing, cache);
            value = if maximizing {
                value.max(score)
            } else {
                value.min(score)
            };
        }

        cache.store(key, value);
        value
    }

    fn midgame_state() -> GameState {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for &c in &TIGER_START_CELLS {
            cells[c] = Cell::Tiger;
        }
        for c in [2, 7, 9, 15, 16] {
            cells[c] = Cell::Goat;
        }
        GameState::from_parts(cells, Player::Tiger, 15, 10)
    }

    #[test]
    fn pruning_preserves_the_minimax_value() {
        let state = midgame_state();
        for depth in 1..=4 {
            let pruned = alpha_beta(
                &state,
                depth,
                true,
                -INF,
                INF,
                &TranspositionTable::new(),
            );
            let plain = minimax_plain(&state, depth, true, &TranspositionTable::new());
            assert_eq!(pruned, plain, "depth {depth} diverged");
        }
    }

    #[test]
    fn pruning_preserves_the_minimax_value_while_placing() {
        let state = GameState::new();
        let pruned = alpha_beta(&state, 2, false, -INF, INF, &TranspositionTable::new());
        let plain = minimax_plain(&state, 2, false, &TranspositionTable::new());
        assert_eq!(pruned, plain);
    }

    #[test]
    fn search_picks_a_legal_placement() {
        let state = GameState::new();
        let searcher = Searcher::new();
        let outcome = searcher.select_best_move(&state, 2);

        let cell = outcome.cell.expect("placement available");
        assert_eq!(state.cells()[cell], Cell::Empty);
        assert_eq!(outcome.depth, 2);
    }

    #[test]
    fn search_picks_a_legal_tiger_selection() {
        let state = midgame_state();
        let searcher = Searcher::with_threads(2);
        let outcome = searcher.select_best_move(&state, 3);

        let cell = outcome.cell.expect("tigers can move");
        assert!(state.movable_pieces().contains(&cell));
    }

    #[test]
    fn blocked_mover_yields_no_move() {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for c in [1, 6, 19] {
            cells[c] = Cell::Tiger;
        }
        for c in [2, 3, 4, 5, 7, 8, 12, 13, 14, 18, 20, 21] {
            cells[c] = Cell::Goat;
        }
        let state = GameState::from_parts(cells, Player::Tiger, 15, 3);
        assert!(state.movable_pieces().is_empty());

        let searcher = Searcher::new();
        assert_eq!(searcher.select_best_move(&state, 3).cell, None);
    }

    #[test]
    fn cache_is_reused_across_calls() {
        let state = midgame_state();
        let searcher = Searcher::with_threads(1);

        let first = searcher.select_best_move(&state, 3);
        let stores_after_first = searcher.cache().stats().stores;
        let second = searcher.select_best_move(&state, 3);

        assert_eq!(first.cell, second.cell);
        assert_eq!(first.score, second.score);
        assert!(searcher.cache().stats().hits > 0);
        // The repeat search answers mostly from cache.
        assert!(searcher.cache().stats().stores < stores_after_first * 2);
    }

    #[test]
    fn capture_is_preferred_when_it_wins_the_game() {
        // One goat left to capture; placement finished. The tiger at 0
        // can jump the goat at 2 and end the game.
        let mut cells = [Cell::Empty; CELL_COUNT];
        for &c in &TIGER_START_CELLS {
            cells[c] = Cell::Tiger;
        }
        cells[2] = Cell::Goat;
        let state = GameState::from_parts(cells, Player::Tiger, 15, 14);

        let searcher = Searcher::with_threads(1);
        let selection = searcher.select_best_move(&state, 4);
        let mut game = state.clone();
        game.apply_action(selection.cell.expect("tiger has moves")).unwrap();

        // The jump landing outscores every plain move: it ends the game.
        let destination = searcher.select_best_move(&game, 4);
        assert_eq!(destination.cell, Some(8));
        game.apply_action(8).unwrap();
        assert_eq!(game.goats_captured(), 15);
        assert_eq!(game.winner(), Some(crate::board::Winner::Tiger));
    }
}
