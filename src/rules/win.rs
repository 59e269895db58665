//! Terminal conditions: repetition draw and win detection.
//!
//! The draw check looks only at the most recent eight completed moves —
//! each player repeating their own four-move cycle — and deliberately
//! ignores older repeats. It runs before the win checks on the same
//! turn and short-circuits them, so at most one outcome applies.

use crate::board::{Cell, Move, Player, Winner, CELL_COUNT, GOATS_TO_PLACE};

use super::moves::count_blocked_tigers;

/// Completed moves examined by the repetition rule: two four-move
/// sequences, one per player interleaved.
const REPETITION_WINDOW: usize = 8;

/// Draw by move repetition: the last eight completed moves split into
/// two element-wise identical four-move sequences.
#[must_use]
pub fn is_repetition_draw(log: &[Move]) -> bool {
    if log.len() < REPETITION_WINDOW {
        return false;
    }
    let tail = &log[log.len() - REPETITION_WINDOW..];
    tail[..REPETITION_WINDOW / 2] == tail[REPETITION_WINDOW / 2..]
}

/// Win check, run after the turn has flipped to `to_move`.
///
/// Tigers win once every goat ever placed has been captured; the
/// condition is deliberately two-part so that an empty board during the
/// placement phase is not a premature tiger win. Goats win when the
/// side to move is Tiger and no tiger has a plain move or a capture.
#[must_use]
pub fn check_winner(
    cells: &[Cell; CELL_COUNT],
    to_move: Player,
    goats_placed: u8,
    goats_captured: u8,
) -> Option<Winner> {
    if goats_captured == GOATS_TO_PLACE && goats_placed == GOATS_TO_PLACE {
        return Some(Winner::Tiger);
    }

    if to_move == Player::Tiger {
        let tigers = cells.iter().filter(|&&c| c == Cell::Tiger).count() as u32;
        if tigers > 0 && count_blocked_tigers(cells) == tigers {
            return Some(Winner::Goat);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TIGER_START_CELLS;

    fn place(dst: usize) -> Move {
        Move { src: None, dst }
    }

    fn shift(src: usize, dst: usize) -> Move {
        Move { src: Some(src), dst }
    }

    fn repeated_cycle() -> Vec<Move> {
        vec![
            place(1),
            shift(0, 2),
            place(3),
            shift(3, 4),
            place(1),
            shift(0, 2),
            place(3),
            shift(3, 4),
        ]
    }

    #[test]
    fn repeated_four_move_cycle_is_a_draw() {
        assert!(is_repetition_draw(&repeated_cycle()));
    }

    #[test]
    fn perturbing_any_entry_breaks_the_draw() {
        for i in 0..REPETITION_WINDOW {
            let mut log = repeated_cycle();
            log[i].dst = 22;
            assert!(!is_repetition_draw(&log), "entry {i} still drawn");
        }
    }

    #[test]
    fn short_logs_are_never_drawn() {
        let mut log = repeated_cycle();
        log.remove(0);
        assert_eq!(log.len(), 7);
        assert!(!is_repetition_draw(&log));
    }

    #[test]
    fn only_the_most_recent_window_counts() {
        // A historical repeat followed by a fresh move is not a draw.
        let mut log = repeated_cycle();
        log.push(shift(4, 5));
        assert!(!is_repetition_draw(&log));
    }

    #[test]
    fn tiger_wins_only_after_placement_completes() {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for &c in &TIGER_START_CELLS {
            cells[c] = Cell::Tiger;
        }
        // All placed goats captured, but placement unfinished: no winner.
        assert_eq!(check_winner(&cells, Player::Goat, 5, 5), None);
        assert_eq!(
            check_winner(&cells, Player::Goat, GOATS_TO_PLACE, GOATS_TO_PLACE),
            Some(Winner::Tiger)
        );
    }

    #[test]
    fn goat_win_requires_tiger_to_move() {
        let mut cells = [Cell::Empty; CELL_COUNT];
        // Lone tiger at 1, fully blocked.
        cells[1] = Cell::Tiger;
        for c in [2, 3, 7, 13] {
            cells[c] = Cell::Goat;
        }
        assert_eq!(check_winner(&cells, Player::Tiger, 15, 0), Some(Winner::Goat));
        assert_eq!(check_winner(&cells, Player::Goat, 15, 0), None);
    }
}
