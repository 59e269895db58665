//! Static board graph for the 23-cell Tigers and Goats board.
//!
//! The board is an irregular graph rather than a grid, so moves are
//! driven by lookup tables instead of coordinate arithmetic. Cell
//! indices are laid out as:
//!
//! ```text
//!             0
//!   1   2   3   4   5   6
//!   7   8   9  10  11  12
//!  13  14  15  16  17  18
//!      19  20      21  22
//! ```
//!
//! Cell 0 is the apex; rows below it fan out along the converging
//! lines of the board.

use super::CELL_COUNT;

/// Neighbor lists for plain (one-step) moves, used by both sides.
pub static ADJACENCY: [&[usize]; CELL_COUNT] = [
    &[2, 3, 4, 5],     // 0
    &[2, 7],           // 1
    &[0, 1, 3, 8],     // 2
    &[0, 2, 4, 9],     // 3
    &[0, 3, 5, 10],    // 4
    &[0, 4, 6, 11],    // 5
    &[5, 12],          // 6
    &[1, 8, 13],       // 7
    &[2, 7, 9, 14],    // 8
    &[3, 8, 10, 15],   // 9
    &[4, 9, 11, 16],   // 10
    &[5, 10, 12, 17],  // 11
    &[6, 11, 18],      // 12
    &[7, 14],          // 13
    &[8, 13, 15, 19],  // 14
    &[9, 14, 16, 20],  // 15
    &[10, 15, 17, 21], // 16
    &[11, 16, 18, 22], // 17
    &[12, 17],         // 18
    &[14, 20],         // 19
    &[15, 19, 21],     // 20
    &[16, 20, 22],     // 21
    &[17, 21],         // 22
];

/// Tiger capture jumps as `(landing, victim)` pairs per source cell.
///
/// A jump from `source` lands on `landing` and removes the goat on
/// `victim`, the cell being leapt over. Keeping landing and victim in
/// one pair table makes a half-described jump unrepresentable.
pub static CAPTURE_JUMPS: [&[(usize, usize)]; CELL_COUNT] = [
    &[(8, 2), (9, 3), (10, 4), (11, 5)],  // 0
    &[(3, 2), (13, 7)],                   // 1
    &[(4, 3), (14, 8)],                   // 2
    &[(1, 2), (5, 4), (15, 9)],           // 3
    &[(2, 3), (6, 5), (16, 10)],          // 4
    &[(3, 4), (17, 11)],                  // 5
    &[(4, 5), (18, 12)],                  // 6
    &[(9, 8)],                            // 7
    &[(0, 2), (10, 9), (19, 14)],         // 8
    &[(0, 3), (7, 8), (11, 10), (20, 15)], // 9
    &[(0, 4), (8, 9), (12, 11), (21, 16)], // 10
    &[(0, 5), (9, 10), (22, 17)],         // 11
    &[(10, 11)],                          // 12
    &[(1, 7), (15, 14)],                  // 13
    &[(2, 8), (16, 15)],                  // 14
    &[(3, 9), (13, 14), (17, 16)],        // 15
    &[(4, 10), (14, 15), (18, 17)],       // 16
    &[(5, 11), (15, 16)],                 // 17
    &[(6, 12), (16, 17)],                 // 18
    &[(8, 14), (21, 20)],                 // 19
    &[(9, 15), (22, 21)],                 // 20
    &[(10, 16), (19, 20)],                // 21
    &[(11, 17), (20, 21)],                // 22
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_is_symmetric_and_in_range() {
        for (cell, neighbors) in ADJACENCY.iter().enumerate() {
            assert!(!neighbors.is_empty());
            for &n in *neighbors {
                assert!(n < CELL_COUNT);
                assert_ne!(n, cell);
                assert!(
                    ADJACENCY[n].contains(&cell),
                    "adjacency {cell} -> {n} has no reverse edge"
                );
            }
        }
    }

    #[test]
    fn capture_jumps_are_consistent_with_adjacency() {
        for (source, jumps) in CAPTURE_JUMPS.iter().enumerate() {
            for &(landing, victim) in *jumps {
                assert!(landing < CELL_COUNT && victim < CELL_COUNT);
                assert_ne!(landing, source);
                assert_ne!(victim, source);
                assert_ne!(landing, victim);
                // The jump leaps over an adjacent victim onto the cell beyond it.
                assert!(
                    ADJACENCY[source].contains(&victim),
                    "jump {source} -> {landing}: victim {victim} not adjacent to source"
                );
                assert!(
                    ADJACENCY[victim].contains(&landing),
                    "jump {source} -> {landing}: landing not adjacent to victim {victim}"
                );
                assert!(
                    !ADJACENCY[source].contains(&landing),
                    "jump {source} -> {landing}: landing adjacent to source"
                );
            }
        }
    }

    #[test]
    fn capture_jumps_are_symmetric() {
        // A jump is reversible: if a tiger can jump source -> landing over
        // a victim, it can jump back landing -> source over the same victim.
        for (source, jumps) in CAPTURE_JUMPS.iter().enumerate() {
            for &(landing, victim) in *jumps {
                assert!(
                    CAPTURE_JUMPS[landing].contains(&(source, victim)),
                    "jump {source} -> {landing} over {victim} has no reverse jump"
                );
            }
        }
    }

    #[test]
    fn apex_jumps_match_board_layout() {
        assert_eq!(CAPTURE_JUMPS[0], &[(8, 2), (9, 3), (10, 4), (11, 5)]);
        assert_eq!(ADJACENCY[0], &[2, 3, 4, 5]);
    }
}
