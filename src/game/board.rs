//! Cells, seats, and game outcomes

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the Connect Four board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    One,
    Two,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::One => '1',
            Cell::Two => '2',
        }
    }
}

/// A seat at the table: player 1 moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    /// Get the opposing seat
    pub fn opponent(self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Convert seat to the cell it places
    pub fn to_cell(self) -> Cell {
        match self {
            Seat::One => Cell::One,
            Seat::Two => Cell::Two,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::One => write!(f, "player 1"),
            Seat::Two => write!(f, "player 2"),
        }
    }
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Seat),
    Draw,
}

impl Outcome {
    /// Swap the winner perspective. Useful when mirroring games.
    pub fn swap_players(self) -> Self {
        match self {
            Outcome::Win(seat) => Outcome::Win(seat.opponent()),
            Outcome::Draw => Outcome::Draw,
        }
    }

    /// Whether this outcome is a win for the given seat.
    pub fn is_win_for(self, seat: Seat) -> bool {
        self == Outcome::Win(seat)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(seat) => write!(f, "{seat} wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
