//! Heuristic evaluation of Tigers and Goats positions.
//!
//! A fixed linear formula over three hand-picked features:
//! - blocked tigers (0-3)
//! - goats captured (0-15)
//! - capture opportunities currently on the board
//!
//! plus flat bonuses for the two terminal conditions. Scores are
//! zero-sum: the goat perspective is the exact negation of the tiger
//! perspective. The evaluator is deterministic and side-effect-free;
//! the search calls it at every leaf.

use crate::board::{GameState, Player, GOATS_TO_PLACE, TIGER_COUNT};
use crate::rules::{count_blocked_tigers, count_capturable_goats};

/// Weight per blocked tiger (tigers want mobility)
const BLOCKED_TIGER_WEIGHT: i32 = -10;
/// Weight per captured goat
const CAPTURED_GOAT_WEIGHT: i32 = 6;
/// Weight per capture opportunity on the board
const CAPTURABLE_GOAT_WEIGHT: i32 = 3;
/// Flat bonus/penalty for the terminal conditions
const TERMINAL_BONUS: i32 = 100;

/// Features contributing to an evaluation, plus the resulting score.
/// This is the diagnostic surface behind the driver's `score` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalBreakdown {
    pub blocked_tigers: u32,
    pub goats_captured: u8,
    pub capturable_goats: u32,
    pub score: i32,
}

/// Evaluate the position from `perspective`.
#[must_use]
pub fn evaluate(state: &GameState, perspective: Player) -> i32 {
    breakdown(state, perspective).score
}

/// Evaluate and report the contributing features.
#[must_use]
pub fn breakdown(state: &GameState, perspective: Player) -> EvalBreakdown {
    let blocked_tigers = count_blocked_tigers(state.cells());
    let goats_captured = state.goats_captured();
    let capturable_goats = count_capturable_goats(state.cells());

    let all_goats_captured = goats_captured == GOATS_TO_PLACE;
    let all_tigers_blocked = blocked_tigers == TIGER_COUNT as u32;

    let mut score = BLOCKED_TIGER_WEIGHT * blocked_tigers as i32
        + CAPTURED_GOAT_WEIGHT * i32::from(goats_captured)
        + CAPTURABLE_GOAT_WEIGHT * capturable_goats as i32
        + if all_goats_captured { TERMINAL_BONUS } else { 0 }
        - if all_tigers_blocked { TERMINAL_BONUS } else { 0 };

    if perspective == Player::Goat {
        score = -score;
    }

    EvalBreakdown {
        blocked_tigers,
        goats_captured,
        capturable_goats,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, CELL_COUNT, TIGER_START_CELLS};

    fn initial_cells() -> [Cell; CELL_COUNT] {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for &c in &TIGER_START_CELLS {
            cells[c] = Cell::Tiger;
        }
        cells
    }

    #[test]
    fn initial_position_is_balanced() {
        let state = GameState::new();
        assert_eq!(evaluate(&state, Player::Tiger), 0);
        assert_eq!(evaluate(&state, Player::Goat), 0);
    }

    #[test]
    fn perspectives_are_exact_negations() {
        let mut cells = initial_cells();
        cells[2] = Cell::Goat;
        cells[9] = Cell::Goat;
        let state = GameState::from_parts(cells, Player::Tiger, 4, 2);

        let tiger = evaluate(&state, Player::Tiger);
        let goat = evaluate(&state, Player::Goat);
        assert_ne!(tiger, 0);
        assert_eq!(tiger, -goat);
    }

    #[test]
    fn capture_opportunities_raise_the_tiger_score() {
        let mut cells = initial_cells();
        let baseline = {
            let state = GameState::from_parts(cells, Player::Tiger, 0, 0);
            evaluate(&state, Player::Tiger)
        };

        // A goat at 2 gives tigers 0 and 3 one jump each.
        cells[2] = Cell::Goat;
        let state = GameState::from_parts(cells, Player::Tiger, 1, 0);
        let b = breakdown(&state, Player::Tiger);
        assert_eq!(b.capturable_goats, 2);
        assert_eq!(b.score, baseline + 2 * 3);
    }

    #[test]
    fn all_goats_captured_earns_the_terminal_bonus() {
        let cells = initial_cells();
        let state = GameState::from_parts(cells, Player::Goat, GOATS_TO_PLACE, GOATS_TO_PLACE);
        // 15 captures at weight 6 plus the terminal bonus.
        assert_eq!(evaluate(&state, Player::Tiger), 15 * 6 + 100);
    }

    #[test]
    fn all_tigers_blocked_costs_the_terminal_bonus() {
        let mut cells = [Cell::Empty; CELL_COUNT];
        // Tigers at 1, 6 and 19, each sealed in: plain moves and jump
        // landings all hold goats.
        for c in [1, 6, 19] {
            cells[c] = Cell::Tiger;
        }
        for c in [2, 3, 4, 5, 7, 8, 12, 13, 14, 18, 20, 21] {
            cells[c] = Cell::Goat;
        }
        let state = GameState::from_parts(cells, Player::Tiger, 15, 3);
        let b = breakdown(&state, Player::Tiger);
        assert_eq!(b.blocked_tigers, 3);
        assert_eq!(b.capturable_goats, 0);
        // -10 per blocked tiger, +6 per capture, -100 for the lockout.
        assert_eq!(b.score, -30 + 18 - 100);
    }
}
