//! Core board model for the 8-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Move`: One of the four directions the blank can slide.
//! - `Board`: An immutable 3x3 arrangement of the values 0-8 (0 is the blank),
//!   with blank lookup, move generation, move application and parity queries.
//! - `Game`: An interactive session over a board and a goal, with history for undo.
use crate::error::{Error, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board, and one more than the largest tile value.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The value that marks the blank cell.
pub const BLANK: u8 = 0;

/// A direction in which the blank slides.
///
/// `Up` swaps the blank with the tile above it, so the blank ends one row
/// higher. The other variants work the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves, in the order the move generator enumerates them.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Row and column delta applied to the blank.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    /// The move that undoes this one.
    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Lowercase name, as printed in solutions.
    ///
    /// ```
    /// use eight_puzzle_solver::engine::Move;
    /// assert_eq!(Move::Right.as_str(), "right");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Move {
    type Err = Error;

    /// Accepts full names or their first letter, in any case.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Move::Up),
            "down" | "d" => Ok(Move::Down),
            "left" | "l" => Ok(Move::Left),
            "right" | "r" => Ok(Move::Right),
            _ => Err(Error::InvalidMove {
                input: s.to_string(),
            }),
        }
    }
}

/// Returns the moves that keep a blank at (`row`, `col`) inside the grid.
///
/// Moves are listed in the fixed order up, down, left, right.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::{valid_moves, Move};
/// assert_eq!(valid_moves(0, 0), vec![Move::Down, Move::Right]);
/// assert_eq!(valid_moves(1, 1).len(), 4);
/// ```
pub fn valid_moves(row: usize, col: usize) -> Vec<Move> {
    let mut moves = Vec::with_capacity(4);
    if row > 0 {
        moves.push(Move::Up);
    }
    if row + 1 < BOARD_SIZE {
        moves.push(Move::Down);
    }
    if col > 0 {
        moves.push(Move::Left);
    }
    if col + 1 < BOARD_SIZE {
        moves.push(Move::Right);
    }
    moves
}

/// A 3x3 puzzle state.
///
/// A `Board` is always a permutation of 0-8: every constructor validates the
/// grid, and moves produce new boards instead of mutating this one. Because of
/// that, a board can be used directly as the canonical key of a visited set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[u8; BOARD_SIZE]; BOARD_SIZE],
    blank: (usize, usize),
}

impl Board {
    /// Creates a board from a grid, checking that it holds each of 0-8 exactly once.
    ///
    /// # Errors
    /// * `Error::ValueOutOfRange` if a cell holds a value above 8.
    /// * `Error::DuplicateValue` if a value appears twice (which also means
    ///   another value is missing).
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// let board = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 8, 0]]).unwrap();
    /// assert_eq!(board.blank_position(), (2, 2));
    ///
    /// assert!(Board::from_grid([[1, 1, 3], [4, 5, 6], [7, 8, 0]]).is_err());
    /// ```
    pub fn from_grid(grid: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self> {
        let mut seen = [false; CELL_COUNT];
        let mut blank = (0, 0);

        for (r, row) in grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value as usize >= CELL_COUNT {
                    return Err(Error::ValueOutOfRange { value, row: r, col: c });
                }
                if seen[value as usize] {
                    return Err(Error::DuplicateValue { value });
                }
                seen[value as usize] = true;
                if value == BLANK {
                    blank = (r, c);
                }
            }
        }

        Ok(Board { grid, blank })
    }

    /// Creates a board from rows of arbitrary length, checking the 3x3 shape first.
    ///
    /// # Errors
    /// `Error::InvalidDimensions` for a wrong number of rows or a row of the
    /// wrong width, then anything [`Board::from_grid`] rejects.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        if rows.len() != BOARD_SIZE {
            return Err(Error::InvalidDimensions {
                unit: "rows",
                expected: BOARD_SIZE,
                got: rows.len(),
            });
        }

        let mut grid = [[BLANK; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != BOARD_SIZE {
                return Err(Error::InvalidDimensions {
                    unit: "columns",
                    expected: BOARD_SIZE,
                    got: row.len(),
                });
            }
            grid[r].copy_from_slice(row);
        }
        Board::from_grid(grid)
    }

    /// Creates a board from the nine values in row-major order.
    ///
    /// # Errors
    /// `Error::InvalidDimensions` unless exactly nine values are given, then
    /// anything [`Board::from_grid`] rejects.
    pub fn from_cells(cells: &[u8]) -> Result<Self> {
        if cells.len() != CELL_COUNT {
            return Err(Error::InvalidDimensions {
                unit: "cells",
                expected: CELL_COUNT,
                got: cells.len(),
            });
        }
        let rows: Vec<&[u8]> = cells.chunks(BOARD_SIZE).collect();
        Board::from_rows(&rows)
    }

    /// The conventional goal: tiles 1-8 in reading order with the blank last.
    pub fn solved() -> Self {
        Board {
            grid: [[1, 2, 3], [4, 5, 6], [7, 8, BLANK]],
            blank: (BOARD_SIZE - 1, BOARD_SIZE - 1),
        }
    }

    /// Produces a board reachable from the solved board by a seeded random walk.
    ///
    /// The walk takes `moves` steps and never immediately undoes its previous
    /// step, so the same seed always yields the same board and the result is
    /// always solvable towards [`Board::solved`].
    pub fn new_scrambled_with_seed(seed: u64, moves: usize) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Board::solved().scrambled(&mut rng, moves)
    }

    /// Applies `moves` random legal moves to this board.
    pub fn scrambled(&self, rng: &mut impl Rng, moves: usize) -> Self {
        let mut board = *self;
        let mut last: Option<Move> = None;

        for _ in 0..moves {
            let candidates: Vec<Move> = board
                .valid_moves()
                .into_iter()
                .filter(|m| last.map_or(true, |l| *m != l.opposite()))
                .collect();
            let chosen = candidates[rng.gen_range(0..candidates.len())];
            if let Some(next) = board.apply_move(chosen) {
                board = next;
                last = Some(chosen);
            }
        }
        board
    }

    /// Returns the value at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is 3 or more.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        self.grid[r][c]
    }

    /// Returns the underlying grid.
    pub fn get_grid(&self) -> &[[u8; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    /// Returns the nine values in row-major order.
    pub fn cells(&self) -> [u8; CELL_COUNT] {
        let mut cells = [BLANK; CELL_COUNT];
        for (i, value) in self.grid.iter().flatten().enumerate() {
            cells[i] = *value;
        }
        cells
    }

    /// Returns the (row, column) of the unique blank cell.
    pub fn blank_position(&self) -> (usize, usize) {
        self.blank
    }

    /// Returns the (row, column) holding `value`, if it is a tile value.
    pub fn position_of(&self, value: u8) -> Option<(usize, usize)> {
        self.cells()
            .iter()
            .position(|&v| v == value)
            .map(|i| (i / BOARD_SIZE, i % BOARD_SIZE))
    }

    /// Legal moves for this board's blank, in up, down, left, right order.
    pub fn valid_moves(&self) -> Vec<Move> {
        valid_moves(self.blank.0, self.blank.1)
    }

    /// Slides the blank one cell in direction `mv`, returning the new board.
    ///
    /// This board is left untouched. Returns `None` if the move would take
    /// the blank off the grid.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Board, Move};
    /// let start = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
    /// let next = start.apply_move(Move::Right).unwrap();
    /// assert_eq!(next, Board::solved());
    /// assert!(Board::solved().apply_move(Move::Down).is_none());
    /// ```
    pub fn apply_move(&self, mv: Move) -> Option<Self> {
        let (r, c) = self.blank;
        let (dr, dc) = mv.offset();
        let nr = r as isize + dr;
        let nc = c as isize + dc;

        if nr < 0 || nr >= BOARD_SIZE as isize || nc < 0 || nc >= BOARD_SIZE as isize {
            return None;
        }
        let (nr, nc) = (nr as usize, nc as usize);

        let mut grid = self.grid;
        grid[r][c] = grid[nr][nc];
        grid[nr][nc] = BLANK;
        Some(Board {
            grid,
            blank: (nr, nc),
        })
    }

    /// Applies a sequence of moves in order.
    ///
    /// Returns `None` as soon as one of them is illegal.
    pub fn apply_moves<'a, I>(&self, moves: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Move>,
    {
        moves
            .into_iter()
            .try_fold(*self, |board, &mv| board.apply_move(mv))
    }

    /// Number of tile pairs that appear in the opposite order to 1-8,
    /// reading the grid row by row and skipping the blank.
    pub fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self
            .cells()
            .into_iter()
            .filter(|&v| v != BLANK)
            .collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, &a)| tiles[i + 1..].iter().filter(|&&b| b < a).count())
            .sum()
    }

    /// Whether this board can be turned into `other` by sliding tiles.
    ///
    /// On a grid of odd width every slide preserves the parity of the
    /// inversion count, and any two boards of equal parity are connected.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// let swapped = Board::from_grid([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
    /// assert!(!swapped.is_reachable_from(&Board::solved()));
    /// ```
    pub fn is_reachable_from(&self, other: &Board) -> bool {
        self.inversions() % 2 == other.inversions() % 2
    }

    /// Renders the board, wrapping the tile at `pos` in brackets.
    ///
    /// The blank is drawn as `.`. This is used to point out the tile that
    /// just slid when replaying a solution.
    pub fn to_string_with_highlight(&self, pos: Option<(usize, usize)>) -> String {
        let mut output = String::new();

        for (r, row) in self.grid.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                let label = if value == BLANK {
                    ".".to_string()
                } else {
                    value.to_string()
                };
                if pos == Some((r, c)) {
                    output.push_str(&format!("[{}]", label));
                } else {
                    output.push_str(&format!(" {} ", label));
                }
            }
            if r < BOARD_SIZE - 1 {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

/// An interactive puzzle session.
///
/// Tracks the current board, the goal, the number of moves made and a
/// history of boards so moves can be undone.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::{Board, Game, Move};
/// let start = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
/// let mut game = Game::new(start, Board::solved());
///
/// assert!(game.process_move(Move::Right));
/// assert!(game.is_solved());
/// assert!(game.undo_last_move());
/// assert_eq!(game.board(), &start);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    goal: Board,
    steps: u32,
    history: Vec<Board>,
}

impl Game {
    /// Starts a session from `start` aiming for `goal`.
    pub fn new(start: Board, goal: Board) -> Self {
        Game {
            board: start,
            goal,
            steps: 0,
            history: vec![start],
        }
    }

    /// Starts a session from a seeded scramble of the solved board.
    pub fn new_scrambled(seed: u64, moves: usize) -> Self {
        Game::new(Board::new_scrambled_with_seed(seed, moves), Board::solved())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    /// Number of moves currently applied (undone moves are not counted).
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Slides the blank in direction `mv`.
    ///
    /// Returns `false` and leaves the session unchanged if the move would
    /// take the blank off the grid.
    pub fn process_move(&mut self, mv: Move) -> bool {
        match self.board.apply_move(mv) {
            Some(next) => {
                self.board = next;
                self.steps += 1;
                self.history.push(next);
                true
            }
            None => false,
        }
    }

    /// Reverts the last move. Returns `false` if no move has been made.
    pub fn undo_last_move(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        if let Some(&previous) = self.history.last() {
            self.board = previous;
            self.steps -= 1;
        }
        true
    }

    pub fn is_solved(&self) -> bool {
        self.board == self.goal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_permutation(board: &Board) {
        let mut cells = board.cells();
        cells.sort_unstable();
        assert_eq!(cells, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
        let (r, c) = board.blank_position();
        assert_eq!(board.get_tile(r, c), BLANK);
    }

    #[test]
    fn test_from_grid_valid() {
        let board = Board::from_grid([[8, 1, 3], [4, 0, 2], [7, 6, 5]]).unwrap();
        assert_eq!(board.blank_position(), (1, 1));
        assert_eq!(board.get_tile(0, 0), 8);
        assert_permutation(&board);
    }

    #[test]
    fn test_from_grid_rejects_duplicate() {
        let result = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 8, 8]]);
        assert_eq!(result, Err(Error::DuplicateValue { value: 8 }));
    }

    #[test]
    fn test_from_grid_rejects_two_blanks() {
        let result = Board::from_grid([[0, 2, 3], [4, 5, 6], [7, 8, 0]]);
        assert_eq!(result, Err(Error::DuplicateValue { value: 0 }));
    }

    #[test]
    fn test_from_grid_rejects_out_of_range() {
        let result = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 9, 0]]);
        assert_eq!(
            result,
            Err(Error::ValueOutOfRange {
                value: 9,
                row: 2,
                col: 1
            })
        );
    }

    #[test]
    fn test_from_rows_wrong_dimensions() {
        let too_few: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![4, 5, 6]];
        assert!(matches!(
            Board::from_rows(&too_few),
            Err(Error::InvalidDimensions { unit: "rows", .. })
        ));

        let ragged: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![4, 5, 6, 0], vec![7, 8]];
        assert!(matches!(
            Board::from_rows(&ragged),
            Err(Error::InvalidDimensions { unit: "columns", .. })
        ));
    }

    #[test]
    fn test_from_cells() {
        let board = Board::from_cells(&[1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        assert_eq!(board, Board::solved());
        assert!(Board::from_cells(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_valid_moves_corners_edges_center() {
        assert_eq!(valid_moves(0, 0), vec![Move::Down, Move::Right]);
        assert_eq!(valid_moves(2, 2), vec![Move::Up, Move::Left]);
        assert_eq!(valid_moves(2, 1), vec![Move::Up, Move::Left, Move::Right]);
        assert_eq!(valid_moves(0, 1), vec![Move::Down, Move::Left, Move::Right]);
        assert_eq!(valid_moves(1, 1), Move::ALL.to_vec());
    }

    #[test]
    fn test_apply_move_swaps_blank_and_keeps_input() {
        let start = Board::from_grid([[1, 2, 3], [4, 0, 6], [7, 5, 8]]).unwrap();
        let up = start.apply_move(Move::Up).unwrap();
        assert_eq!(up.get_grid(), &[[1, 0, 3], [4, 2, 6], [7, 5, 8]]);
        assert_eq!(up.blank_position(), (0, 1));

        let left = start.apply_move(Move::Left).unwrap();
        assert_eq!(left.get_grid(), &[[1, 2, 3], [0, 4, 6], [7, 5, 8]]);

        // The original is untouched.
        assert_eq!(start.get_grid(), &[[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        assert_eq!(start.blank_position(), (1, 1));
    }

    #[test]
    fn test_apply_move_off_grid() {
        let board = Board::from_grid([[0, 1, 2], [3, 4, 5], [6, 7, 8]]).unwrap();
        assert!(board.apply_move(Move::Up).is_none());
        assert!(board.apply_move(Move::Left).is_none());
        assert!(board.apply_move(Move::Down).is_some());
    }

    #[test]
    fn test_apply_move_preserves_invariant_on_random_walks() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut board = Board::solved();
        for _ in 0..500 {
            let moves = board.valid_moves();
            let mv = moves[rng.gen_range(0..moves.len())];
            let next = board.apply_move(mv).unwrap();
            assert_permutation(&next);
            assert_eq!(next.apply_move(mv.opposite()), Some(board));
            board = next;
        }
    }

    #[test]
    fn test_apply_moves_sequence() {
        let start = Board::solved();
        let end = start
            .apply_moves(&[Move::Up, Move::Left, Move::Down, Move::Right])
            .unwrap();
        assert_eq!(end.get_grid(), &[[1, 2, 3], [4, 8, 5], [7, 6, 0]]);

        let round_trip = start
            .apply_moves(&[Move::Up, Move::Left, Move::Right, Move::Down])
            .unwrap();
        assert_eq!(round_trip, start);
        assert_eq!(start.apply_moves(std::iter::empty()), Some(start));
        assert!(start.apply_moves(&[Move::Up, Move::Up, Move::Up]).is_none());
    }

    #[test]
    fn test_inversions_and_reachability() {
        assert_eq!(Board::solved().inversions(), 0);
        let swapped = Board::from_grid([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
        assert_eq!(swapped.inversions(), 1);
        assert!(!swapped.is_reachable_from(&Board::solved()));

        let one_move = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
        assert!(one_move.is_reachable_from(&Board::solved()));
    }

    #[test]
    fn test_scramble_is_deterministic_and_reachable() {
        let a = Board::new_scrambled_with_seed(42, 30);
        let b = Board::new_scrambled_with_seed(42, 30);
        assert_eq!(a, b);
        assert_permutation(&a);
        assert!(a.is_reachable_from(&Board::solved()));
        assert_eq!(Board::new_scrambled_with_seed(42, 0), Board::solved());
    }

    #[test]
    fn test_move_parse_and_display() {
        assert_eq!("up".parse::<Move>().unwrap(), Move::Up);
        assert_eq!("R".parse::<Move>().unwrap(), Move::Right);
        assert_eq!(" Left ".parse::<Move>().unwrap(), Move::Left);
        assert!("north".parse::<Move>().is_err());
        assert_eq!(Move::Down.to_string(), "down");
        for mv in Move::ALL {
            assert_eq!(mv.opposite().opposite(), mv);
        }
    }

    #[test]
    fn test_display_board() {
        let board = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
        assert_eq!(format!("{}", board), " 1  2  3 \n 4  5  6 \n 7  .  8 ");
        let highlighted = board.to_string_with_highlight(Some((2, 2)));
        assert!(highlighted.ends_with(" 7  . [8]"));
    }

    #[test]
    fn test_position_of() {
        let board = Board::from_grid([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
        assert_eq!(board.position_of(8), Some((2, 2)));
        assert_eq!(board.position_of(0), Some((2, 1)));
        assert_eq!(board.position_of(9), None);
    }

    #[test]
    fn test_game_moves_and_undo() {
        let start = Board::from_grid([[1, 2, 3], [4, 5, 6], [0, 7, 8]]).unwrap();
        let mut game = Game::new(start, Board::solved());
        assert_eq!(game.steps(), 0);
        assert!(!game.undo_last_move());

        assert!(!game.process_move(Move::Left));
        assert_eq!(game.steps(), 0);

        assert!(game.process_move(Move::Right));
        assert!(game.process_move(Move::Right));
        assert!(game.is_solved());
        assert_eq!(game.steps(), 2);

        assert!(game.undo_last_move());
        assert_eq!(game.steps(), 1);
        assert!(!game.is_solved());
        assert!(game.undo_last_move());
        assert_eq!(game.board(), &start);
        assert!(!game.undo_last_move());
    }

    #[test]
    fn test_game_new_scrambled() {
        let game = Game::new_scrambled(3, 12);
        assert_eq!(game.goal(), &Board::solved());
        assert_eq!(game.board(), &Board::new_scrambled_with_seed(3, 12));
    }
}
