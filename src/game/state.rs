//! Game state with gravity-aware legal-move tracking

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Cell, Outcome, Seat};
use crate::types::{BoardSize, Move};

/// Number of consecutive pieces needed to win.
const WIN_LENGTH: usize = 4;

/// Scan directions for the win check: right, up, up-right, up-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// The state of one Connect Four game.
///
/// The board is stored row-major with row 0 at the bottom. Legal moves are
/// tracked incrementally: initially the bottom cell of every column, and
/// after a move at `(y, x)` the cell `(y + 1, x)` opens up (unless `y` is
/// the top row). `Clone` produces an independent deep copy, which the
/// lookahead opponent uses to probe candidate moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    size: BoardSize,
    cells: Vec<Cell>,
    move_sequence: Vec<Move>,
    possible_moves: Vec<Move>,
}

impl GameState {
    /// Create an empty board of the given size.
    pub fn new(size: BoardSize) -> Self {
        let possible_moves = (0..size.cols()).map(|col| Move::new(0, col)).collect();
        GameState {
            size,
            cells: vec![Cell::Empty; size.cell_count()],
            move_sequence: Vec::new(),
            possible_moves,
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    /// The cell at the given coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds; callers index with
    /// moves already validated against this board.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size.cols() + col]
    }

    /// Moves played so far, in play order.
    pub fn move_sequence(&self) -> &[Move] {
        &self.move_sequence
    }

    /// Coordinates playable in the current position.
    pub fn legal_moves(&self) -> &[Move] {
        &self.possible_moves
    }

    /// Whether it is player 1's turn (move count parity).
    pub fn is_player_one_turn(&self) -> bool {
        self.move_sequence.len().is_multiple_of(2)
    }

    /// The seat whose turn it is.
    pub fn side_to_move(&self) -> Seat {
        if self.is_player_one_turn() {
            Seat::One
        } else {
            Seat::Two
        }
    }

    /// Record a move for the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] or [`crate::Error::IllegalMove`]
    /// if the coordinate is outside the board, occupied, or not yet
    /// reachable under gravity.
    pub fn record(&mut self, mv: Move) -> crate::Result<()> {
        let seat = self.side_to_move();
        self.place(mv, seat)
    }

    /// Record a move for `seat` regardless of whose turn it is.
    ///
    /// Used by lookahead probes on copies of the state to ask "what if the
    /// opponent played here next".
    pub fn record_forced(&mut self, mv: Move, seat: Seat) -> crate::Result<()> {
        self.place(mv, seat)
    }

    fn place(&mut self, mv: Move, seat: Seat) -> crate::Result<()> {
        if !mv.in_bounds(self.size) {
            return Err(crate::Error::OutOfBounds {
                row: mv.row,
                col: mv.col,
                rows: self.size.rows(),
                cols: self.size.cols(),
            });
        }
        let Some(slot) = self.possible_moves.iter().position(|&m| m == mv) else {
            return Err(crate::Error::IllegalMove {
                row: mv.row,
                col: mv.col,
            });
        };

        self.cells[mv.row * self.size.cols() + mv.col] = seat.to_cell();
        self.move_sequence.push(mv);
        self.possible_moves.remove(slot);
        if mv.row + 1 < self.size.rows() {
            self.possible_moves.push(Move::new(mv.row + 1, mv.col));
        }
        Ok(())
    }

    /// Determine the game's outcome.
    ///
    /// Returns `None` while the game is in progress, `Some(Outcome::Win(..))`
    /// once a seat has four in a row (horizontally, vertically, or along
    /// either diagonal), and `Some(Outcome::Draw)` when the board is full.
    pub fn winner(&self) -> Option<Outcome> {
        let rows = self.size.rows() as isize;
        let cols = self.size.cols() as isize;

        for row in 0..rows {
            for col in 0..cols {
                let cell = self.cell(row as usize, col as usize);
                if cell == Cell::Empty {
                    continue;
                }
                for (dr, dc) in DIRECTIONS {
                    let end_row = row + dr * (WIN_LENGTH as isize - 1);
                    let end_col = col + dc * (WIN_LENGTH as isize - 1);
                    if end_row < 0 || end_row >= rows || end_col < 0 || end_col >= cols {
                        continue;
                    }
                    let run = (1..WIN_LENGTH as isize).all(|step| {
                        self.cell((row + dr * step) as usize, (col + dc * step) as usize) == cell
                    });
                    if run {
                        let seat = if cell == Cell::One { Seat::One } else { Seat::Two };
                        return Some(Outcome::Win(seat));
                    }
                }
            }
        }

        if self.possible_moves.is_empty() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.size.rows()).rev() {
            for col in 0..self.size.cols() {
                write!(f, "{} ", self.cell(row, col).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> GameState {
        GameState::new(BoardSize::new(5, 5).unwrap())
    }

    #[test]
    fn test_initial_legal_moves_are_bottom_row() {
        let game = board();
        let legal = game.legal_moves();
        assert_eq!(legal.len(), 5);
        assert!(legal.iter().all(|m| m.row == 0));
    }

    #[test]
    fn test_gravity_opens_next_row() {
        let mut game = board();
        game.record(Move::new(0, 2)).unwrap();
        assert!(!game.legal_moves().contains(&Move::new(0, 2)));
        assert!(game.legal_moves().contains(&Move::new(1, 2)));
    }

    #[test]
    fn test_record_rejects_floating_move() {
        let mut game = board();
        let err = game.record(Move::new(3, 0)).unwrap_err();
        assert!(matches!(err, crate::Error::IllegalMove { row: 3, col: 0 }));
    }

    #[test]
    fn test_record_rejects_out_of_bounds() {
        let mut game = board();
        assert!(game.record(Move::new(0, 9)).is_err());
    }

    #[test]
    fn test_turn_alternation() {
        let mut game = board();
        assert!(game.is_player_one_turn());
        game.record(Move::new(0, 0)).unwrap();
        assert!(!game.is_player_one_turn());
        assert_eq!(game.side_to_move(), Seat::Two);
    }

    #[test]
    fn test_vertical_win() {
        let mut game = board();
        // Player 1 stacks column 0; player 2 fills column 4.
        for row in 0..4 {
            game.record(Move::new(row, 0)).unwrap();
            if row < 3 {
                game.record(Move::new(row, 4)).unwrap();
            }
        }
        assert_eq!(game.winner(), Some(Outcome::Win(Seat::One)));
    }

    #[test]
    fn test_horizontal_win() {
        let mut game = board();
        for col in 0..4 {
            game.record(Move::new(0, col)).unwrap();
            if col < 3 {
                game.record(Move::new(1, col)).unwrap();
            }
        }
        assert_eq!(game.winner(), Some(Outcome::Win(Seat::One)));
    }

    #[test]
    fn test_diagonal_win() {
        let mut game = board();
        // Build a staircase for player 1 at (0,0), (1,1), (2,2), (3,3).
        game.record(Move::new(0, 0)).unwrap(); // P1
        game.record(Move::new(0, 1)).unwrap(); // P2
        game.record(Move::new(1, 1)).unwrap(); // P1
        game.record(Move::new(0, 2)).unwrap(); // P2
        game.record(Move::new(0, 3)).unwrap(); // P1
        game.record(Move::new(1, 2)).unwrap(); // P2
        game.record(Move::new(2, 2)).unwrap(); // P1
        game.record(Move::new(1, 3)).unwrap(); // P2
        game.record(Move::new(2, 3)).unwrap(); // P1
        game.record(Move::new(0, 4)).unwrap(); // P2
        assert_eq!(game.winner(), None);
        game.record(Move::new(3, 3)).unwrap(); // P1 completes the diagonal
        assert_eq!(game.winner(), Some(Outcome::Win(Seat::One)));
    }

    #[test]
    fn test_no_wraparound_win() {
        let mut game = board();
        // Player 1 holds (0,0), (0,1), (0,3), (0,4): four pieces on the
        // bottom row but split by column 2, which player 2 takes.
        game.record(Move::new(0, 0)).unwrap(); // P1
        game.record(Move::new(1, 0)).unwrap(); // P2
        game.record(Move::new(0, 1)).unwrap(); // P1
        game.record(Move::new(1, 1)).unwrap(); // P2
        game.record(Move::new(0, 3)).unwrap(); // P1
        game.record(Move::new(0, 2)).unwrap(); // P2
        game.record(Move::new(0, 4)).unwrap(); // P1
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_draw_on_full_board() {
        let mut game = board();
        // Bottom-up fill with no four-in-a-row in any direction.
        let rows: [[Cell; 5]; 5] = [
            [Cell::One, Cell::One, Cell::Two, Cell::Two, Cell::One],
            [Cell::Two, Cell::Two, Cell::One, Cell::One, Cell::Two],
            [Cell::One, Cell::One, Cell::Two, Cell::Two, Cell::One],
            [Cell::Two, Cell::Two, Cell::One, Cell::One, Cell::Two],
            [Cell::One, Cell::One, Cell::Two, Cell::Two, Cell::One],
        ];
        for (row, cells) in rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let seat = if *cell == Cell::One { Seat::One } else { Seat::Two };
                game.record_forced(Move::new(row, col), seat).unwrap();
            }
        }
        assert_eq!(game.winner(), Some(Outcome::Draw));
    }

    #[test]
    fn test_forced_record_ignores_turn() {
        let mut game = board();
        game.record_forced(Move::new(0, 0), Seat::Two).unwrap();
        assert_eq!(game.cell(0, 0), Cell::Two);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut game = board();
        let snapshot = game.clone();
        game.record(Move::new(0, 0)).unwrap();
        assert_eq!(snapshot.move_sequence().len(), 0);
        assert_eq!(game.move_sequence().len(), 1);
    }
}
