use crate::engine::{Board, Move, BLANK, BOARD_SIZE};
use crate::error::{Error, Result};

/// Splits a board description into cell values.
///
/// If the text contains whitespace or commas, those separate the tokens;
/// otherwise every character is its own token. `0`, `_` and `.` all denote
/// the blank.
fn parse_cells(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    let is_separator = |c: char| c.is_whitespace() || c == ',';

    let tokens: Vec<&str> = if s.contains(is_separator) {
        s.split(is_separator).filter(|t| !t.is_empty()).collect()
    } else {
        s.char_indices()
            .map(|(i, ch)| &s[i..i + ch.len_utf8()])
            .collect()
    };

    tokens
        .into_iter()
        .map(|token| match token {
            "_" | "." => Ok(BLANK),
            _ => token.parse::<u8>().map_err(|_| Error::InvalidToken {
                token: token.to_string(),
                context: s.to_string(),
            }),
        })
        .collect()
}

/// Parses a whole board written on one line.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::utils::board_from_str;
///
/// assert_eq!(board_from_str("123456780").unwrap(), Board::solved());
/// assert_eq!(board_from_str("1,2,3,4,5,6,7,8,_").unwrap(), Board::solved());
/// assert_eq!(board_from_str("1 2 3 4 5 6 7 8 .").unwrap(), Board::solved());
/// assert!(board_from_str("12345678").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board> {
    Board::from_cells(&parse_cells(s)?)
}

/// Parses a board given as one string per row, top row first.
///
/// Each row uses the same token rules as [`board_from_str`], so `"1 2 3"`,
/// `"123"` and `"1,2,3"` are all the same row.
///
/// # Errors
/// * `Error::InvalidDimensions` unless there are exactly three rows of three cells.
/// * `Error::InvalidToken` for anything that is not a number or a blank marker.
/// * Any error of [`Board::from_grid`] for a grid that is not a permutation of 0-8.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["1 2 3", "4 _ 6", "7 5 8"]).unwrap();
/// assert_eq!(board.blank_position(), (1, 1));
///
/// assert!(board_from_str_array(&["1 2 3", "4 5 6"]).is_err());
/// assert!(board_from_str_array(&["1 2 3", "4 X 6", "7 5 8"]).is_err());
/// ```
pub fn board_from_str_array(rows: &[&str]) -> Result<Board> {
    if rows.len() != BOARD_SIZE {
        return Err(Error::InvalidDimensions {
            unit: "rows",
            expected: BOARD_SIZE,
            got: rows.len(),
        });
    }
    let parsed = rows
        .iter()
        .map(|row| parse_cells(row))
        .collect::<Result<Vec<Vec<u8>>>>()?;
    Board::from_rows(&parsed)
}

/// Parses a puzzle description holding a start board followed by a goal board.
///
/// Blank lines and lines starting with `#` are skipped. The remaining lines
/// are either two one-line boards or two blocks of three rows.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::utils::puzzle_from_str;
///
/// let text = "# start\n1 2 3\n4 5 6\n7 0 8\n\n# goal\n1 2 3\n4 5 6\n7 8 0\n";
/// let (start, goal) = puzzle_from_str(text).unwrap();
/// assert_eq!(goal, Board::solved());
/// assert_eq!(start.blank_position(), (2, 1));
/// ```
pub fn puzzle_from_str(content: &str) -> Result<(Board, Board)> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    match lines.len() {
        2 => Ok((board_from_str(lines[0])?, board_from_str(lines[1])?)),
        n if n == 2 * BOARD_SIZE => {
            let start = board_from_str_array(&lines[..BOARD_SIZE])?;
            let goal = board_from_str_array(&lines[BOARD_SIZE..])?;
            Ok((start, goal))
        }
        n => Err(Error::InvalidPuzzleFile {
            message: format!(
                "expected 2 or {} board lines, found {}",
                2 * BOARD_SIZE,
                n
            ),
        }),
    }
}

/// Joins moves as `"right, down, left"`. An empty slice gives `"(none)"`.
pub fn format_moves(moves: &[Move]) -> String {
    if moves.is_empty() {
        return "(none)".to_string();
    }
    moves
        .iter()
        .map(Move::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["8 1 3", "4 0 2", "7 6 5"]).unwrap();
        assert_eq!(board.get_tile(0, 0), 8);
        assert_eq!(board.blank_position(), (1, 1));
        assert_eq!(board.get_tile(2, 2), 5);
    }

    #[test]
    fn test_board_from_str_array_compact_rows() {
        let board = board_from_str_array(&["123", "456", "78_"]).unwrap();
        assert_eq!(board, Board::solved());
    }

    #[test]
    fn test_board_from_str_array_invalid_token() {
        let result = board_from_str_array(&["1 2 3", "4 5 6", "7 8 X"]);
        assert_eq!(
            result,
            Err(Error::InvalidToken {
                token: "X".to_string(),
                context: "7 8 X".to_string()
            })
        );
    }

    #[test]
    fn test_board_from_str_array_row_too_long() {
        let result = board_from_str_array(&["1 2 3 4", "5 6 7", "8 0 9"]);
        assert!(matches!(
            result,
            Err(Error::InvalidDimensions {
                unit: "columns",
                got: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_board_from_str_array_too_many_rows() {
        let result = board_from_str_array(&["123", "456", "780", "000"]);
        assert!(matches!(
            result,
            Err(Error::InvalidDimensions { unit: "rows", got: 4, .. })
        ));
    }

    #[test]
    fn test_board_from_str_duplicate() {
        let result = board_from_str("123456788");
        assert_eq!(result, Err(Error::DuplicateValue { value: 8 }));
    }

    #[test]
    fn test_board_from_str_large_value() {
        let result = board_from_str("1 2 3 4 5 6 7 10 0");
        assert!(matches!(result, Err(Error::ValueOutOfRange { value: 10, .. })));
    }

    #[test]
    fn test_board_from_str_empty() {
        let result = board_from_str("   ");
        assert!(matches!(
            result,
            Err(Error::InvalidDimensions { unit: "cells", got: 0, .. })
        ));
    }

    #[test]
    fn test_puzzle_from_str_compact() {
        let (start, goal) = puzzle_from_str("123456708\n123456780\n").unwrap();
        assert_eq!(start.blank_position(), (2, 1));
        assert_eq!(goal, Board::solved());
    }

    #[test]
    fn test_puzzle_from_str_wrong_line_count() {
        let result = puzzle_from_str("123\n456\n780\n123\n");
        assert!(matches!(result, Err(Error::InvalidPuzzleFile { .. })));
    }

    #[test]
    fn test_format_moves() {
        assert_eq!(format_moves(&[]), "(none)");
        assert_eq!(format_moves(&[Move::Right, Move::Up]), "right, up");
    }
}
