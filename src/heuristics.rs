use crate::engine::{Board, BLANK, BOARD_SIZE};
use std::fmt;

/// Distance-to-goal estimates used to order the best-first frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    /// Number of tiles not on their goal cell, ignoring the blank.
    ///
    /// Admissible and consistent, so A* ordering returns shortest paths.
    #[default]
    Misplaced,
    /// Number of cells whose value differs from the goal, blank included.
    ///
    /// Overestimates by one whenever the blank is out of place, so it is not
    /// admissible and A* ordering may return a longer path than necessary.
    MisplacedWithBlank,
    /// Sum over tiles of the row and column distance to their goal cell.
    ///
    /// Admissible, consistent and never smaller than `Misplaced`.
    Manhattan,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [
        Heuristic::Misplaced,
        Heuristic::MisplacedWithBlank,
        Heuristic::Manhattan,
    ];

    /// Scores `state` against `goal`. Returns 0 exactly when they are equal.
    pub fn score(&self, state: &Board, goal: &Board) -> u32 {
        match self {
            Heuristic::Misplaced => misplaced_tiles(state, goal),
            Heuristic::MisplacedWithBlank => misplaced_cells(state, goal),
            Heuristic::Manhattan => manhattan_distance(state, goal),
        }
    }

    /// Whether the estimate never exceeds the true number of moves left.
    pub fn is_admissible(&self) -> bool {
        !matches!(self, Heuristic::MisplacedWithBlank)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Misplaced => "misplaced",
            Heuristic::MisplacedWithBlank => "misplaced-with-blank",
            Heuristic::Manhattan => "manhattan",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Counts the cells where `state` and `goal` hold different values.
///
/// The blank's cell is counted like any other, so this is the plain
/// "tiles out of place" count including the blank.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::misplaced_cells;
/// let state = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
/// assert_eq!(misplaced_cells(&state, &Board::solved()), 2);
/// ```
pub fn misplaced_cells(state: &Board, goal: &Board) -> u32 {
    let mut count = 0;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            if state.get_tile(r, c) != goal.get_tile(r, c) {
                count += 1;
            }
        }
    }
    count
}

/// Counts the tiles (not the blank) that sit on a different cell than in `goal`.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::misplaced_tiles;
/// let state = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
/// assert_eq!(misplaced_tiles(&state, &Board::solved()), 1);
/// ```
pub fn misplaced_tiles(state: &Board, goal: &Board) -> u32 {
    let mut count = 0;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let value = state.get_tile(r, c);
            if value != BLANK && value != goal.get_tile(r, c) {
                count += 1;
            }
        }
    }
    count
}

/// Sums, over every tile, the grid distance between its cell in `state` and in `goal`.
pub fn manhattan_distance(state: &Board, goal: &Board) -> u32 {
    // Index goal positions by value once instead of searching per tile.
    let mut target = [(0usize, 0usize); BOARD_SIZE * BOARD_SIZE];
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            target[goal.get_tile(r, c) as usize] = (r, c);
        }
    }

    let mut distance = 0;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let value = state.get_tile(r, c);
            if value != BLANK {
                let (tr, tc) = target[value as usize];
                distance += (r.abs_diff(tr) + c.abs_diff(tc)) as u32;
            }
        }
    }
    distance
}
