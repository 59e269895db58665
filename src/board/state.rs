//! Game state machine: placement, movement, capture and terminal detection.
//!
//! All player input funnels through [`GameState::apply_action`], which
//! dispatches on the current turn and phase. A rejected action returns an
//! [`ActionError`] and leaves the state untouched; an accepted action
//! mutates the state and, when it completes a move, runs the draw and win
//! checks and hands the turn over. Search workers explore by cloning the
//! state and mutating the copy, never the original.

use std::collections::HashMap;
use std::fmt;

use crate::rules;

use super::{Cell, Phase, Player, Winner, CELL_COUNT, GOATS_TO_PLACE, TIGER_START_CELLS};

/// One completed move. `src == None` is a goat placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub src: Option<usize>,
    pub dst: usize,
}

/// Why an action was rejected. Rejections never mutate the state; the
/// driver layer is responsible for rendering these to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// The game has already ended
    GameOver,
    /// Cell index outside 0..23
    OutOfRange,
    /// Placement target is not empty
    Occupied,
    /// Selection target does not hold the mover's piece
    NotYourPiece,
    /// Selected piece has no legal destination
    NoDestinations,
    /// Destination is not legal for the selected piece
    IllegalDestination,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ActionError::GameOver => "the game is over",
            ActionError::OutOfRange => "cell index must be between 0 and 22",
            ActionError::Occupied => "cell is already occupied",
            ActionError::NotYourPiece => "must select one of your own pieces",
            ActionError::NoDestinations => "that piece has no legal destination",
            ActionError::IllegalDestination => "not a legal destination for the selected piece",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ActionError {}

/// Full state of one game.
///
/// Created once per game via [`GameState::new`], mutated solely through
/// [`GameState::apply_action`], and read-only once a winner is set.
/// Cloning produces an independent deep copy, which is how the search
/// engine explores candidate moves.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub(crate) cells: [Cell; CELL_COUNT],
    pub(crate) turn: Player,
    pub(crate) phase: Phase,
    pub(crate) goats_placed: u8,
    pub(crate) goats_captured: u8,
    /// Source cell while a destination is pending; set iff
    /// `phase == SelectingDestination`
    pub(crate) selected: Option<usize>,
    /// Legal destinations for the selected piece; for a tiger, plain
    /// landings followed by capture landings
    pub(crate) destinations: Vec<usize>,
    /// Capture landing -> victim, valid only while a tiger is selected
    pub(crate) pending_captures: HashMap<usize, usize>,
    /// Current player's pieces with at least one destination; empty
    /// during the placement phase
    pub(crate) movable: Vec<usize>,
    pub(crate) move_log: Vec<Move>,
    pub(crate) winner: Option<Winner>,
}

impl GameState {
    /// Fresh game: tigers pre-placed, goat to move, placement phase.
    #[must_use]
    pub fn new() -> Self {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for &c in &TIGER_START_CELLS {
            cells[c] = Cell::Tiger;
        }
        Self {
            cells,
            turn: Player::Goat,
            phase: Phase::Placing,
            goats_placed: 0,
            goats_captured: 0,
            selected: None,
            destinations: Vec::new(),
            pending_captures: HashMap::new(),
            movable: Vec::new(),
            move_log: Vec::new(),
            winner: None,
        }
    }

    /// Build a mid-game state directly for tests. Derived fields
    /// (`phase`, `movable`) are recomputed from the given position.
    #[cfg(test)]
    pub(crate) fn from_parts(
        cells: [Cell; CELL_COUNT],
        turn: Player,
        goats_placed: u8,
        goats_captured: u8,
    ) -> Self {
        let movable = rules::movable_pieces(&cells, turn, goats_placed);
        let phase = if turn == Player::Goat && goats_placed < GOATS_TO_PLACE {
            Phase::Placing
        } else {
            Phase::SelectingPiece
        };
        Self {
            cells,
            turn,
            phase,
            goats_placed,
            goats_captured,
            selected: None,
            destinations: Vec::new(),
            pending_captures: HashMap::new(),
            movable,
            move_log: Vec::new(),
            winner: None,
        }
    }

    /// Validate and apply the action naming `cell`.
    ///
    /// Dispatch depends on the phase: during `Placing` the cell is a
    /// placement target, during `SelectingPiece` it picks a piece to
    /// move, during `SelectingDestination` it picks where the selected
    /// piece goes. Selections do not advance the turn; placements and
    /// destination choices complete a move and hand the turn over after
    /// the draw and win checks run.
    pub fn apply_action(&mut self, cell: usize) -> Result<(), ActionError> {
        if self.winner.is_some() {
            return Err(ActionError::GameOver);
        }
        if cell >= CELL_COUNT {
            return Err(ActionError::OutOfRange);
        }

        match self.phase {
            Phase::Placing => {
                if self.cells[cell] != Cell::Empty {
                    return Err(ActionError::Occupied);
                }
                self.cells[cell] = Cell::Goat;
                self.goats_placed += 1;
                self.move_log.push(Move { src: None, dst: cell });
                self.finish_move();
                Ok(())
            }
            Phase::SelectingPiece => {
                if self.cells[cell] != self.turn.piece() {
                    return Err(ActionError::NotYourPiece);
                }
                let (destinations, pending_captures) = match self.turn {
                    Player::Goat => (rules::goat_destinations(&self.cells, cell), HashMap::new()),
                    Player::Tiger => rules::tiger_destinations(&self.cells, cell),
                };
                if destinations.is_empty() {
                    return Err(ActionError::NoDestinations);
                }
                self.selected = Some(cell);
                self.destinations = destinations;
                self.pending_captures = pending_captures;
                self.phase = Phase::SelectingDestination;
                Ok(())
            }
            Phase::SelectingDestination => {
                if !self.destinations.contains(&cell) {
                    return Err(ActionError::IllegalDestination);
                }
                let src = match self.selected {
                    Some(src) => src,
                    None => return Err(ActionError::IllegalDestination),
                };
                self.cells[src] = Cell::Empty;
                self.cells[cell] = self.turn.piece();
                if let Some(&victim) = self.pending_captures.get(&cell) {
                    self.cells[victim] = Cell::Empty;
                    self.goats_captured += 1;
                }
                self.move_log.push(Move { src: Some(src), dst: cell });
                self.selected = None;
                self.destinations.clear();
                self.pending_captures.clear();
                self.finish_move();
                Ok(())
            }
        }
    }

    /// Bookkeeping shared by placements and completed moves: repetition
    /// draw, turn hand-over, win detection, and the next mover's phase
    /// and movable-piece set.
    fn finish_move(&mut self) {
        // The draw check runs before the turn flips; a drawn game keeps
        // the final mover's turn on display.
        if rules::is_repetition_draw(&self.move_log) {
            self.winner = Some(Winner::Draw);
            self.phase = Phase::SelectingPiece;
            return;
        }

        self.turn = self.turn.opponent();
        self.winner = rules::check_winner(
            &self.cells,
            self.turn,
            self.goats_placed,
            self.goats_captured,
        );

        self.movable = rules::movable_pieces(&self.cells, self.turn, self.goats_placed);
        self.phase = if self.turn == Player::Goat && self.goats_placed < GOATS_TO_PLACE {
            Phase::Placing
        } else {
            Phase::SelectingPiece
        };
    }

    // ---- read-only accessors ----

    /// All 23 cells, indexed by board position
    #[inline]
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    #[inline]
    pub fn game_over(&self) -> bool {
        self.winner.is_some()
    }

    #[inline]
    pub fn goats_placed(&self) -> u8 {
        self.goats_placed
    }

    #[inline]
    pub fn goats_captured(&self) -> u8 {
        self.goats_captured
    }

    /// Goats the goat player has yet to place
    #[inline]
    pub fn goats_to_place_remaining(&self) -> u8 {
        GOATS_TO_PLACE - self.goats_placed
    }

    /// Source cell awaiting a destination, if any
    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Legal destinations for the selected piece
    #[inline]
    pub fn destinations(&self) -> &[usize] {
        &self.destinations
    }

    /// Current player's pieces that have at least one legal destination
    #[inline]
    pub fn movable_pieces(&self) -> &[usize] {
        &self.movable
    }

    /// Completed placements and moves, oldest first
    #[inline]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Indices of all empty cells, in board order
    #[must_use]
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&i| self.cells[i] == Cell::Empty).collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
