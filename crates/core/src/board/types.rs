//! Piece, position and board types

use serde::{Deserialize, Serialize};
use std::fmt;

use super::geometry::in_bounds;

/// Side length of the intersection grid
pub const BOARD_SIZE: usize = 5;

/// Goats available to the goat side at game start
pub const MAX_GOATS: u8 = 20;

/// Tigers on the board; they are never removed
pub const MAX_TIGERS: usize = 4;

/// Captures needed for the tigers to win
pub const TIGER_WIN_CAPTURES: u8 = 5;

/// Contents of a board cell, also used to name a side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    #[default]
    Empty,
    Tiger,
    Goat,
}

impl Piece {
    /// The other side. `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Self {
        match self {
            Piece::Tiger => Piece::Goat,
            Piece::Goat => Piece::Tiger,
            Piece::Empty => Piece::Empty,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Piece::Empty => "empty",
            Piece::Tiger => "tiger",
            Piece::Goat => "goat",
        }
    }

    fn symbol(self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::Tiger => 'T',
            Piece::Goat => 'G',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid coordinate. Signed so that client input and off-board neighbours
/// can be represented and rejected instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position `steps` cells away along `(dx, dy)`. May be off the board.
    pub fn offset(self, (dx, dy): (i32, i32), steps: i32) -> Self {
        Self::new(self.x + dx * steps, self.y + dy * steps)
    }

    pub fn in_bounds(self) -> bool {
        in_bounds(self)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 5x5 grid stored row-major, indexed `cells[y][x]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Piece; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[Piece::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Starting layout: a tiger on each corner, everything else empty.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        let last = BOARD_SIZE as i32 - 1;
        for corner in [
            Position::new(0, 0),
            Position::new(last, 0),
            Position::new(0, last),
            Position::new(last, last),
        ] {
            board.set(corner, Piece::Tiger);
        }
        board
    }

    /// Piece at `pos`, or `None` when `pos` is off the board.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if !pos.in_bounds() {
            return None;
        }
        Some(self.cells[pos.y as usize][pos.x as usize])
    }

    /// True iff `pos` is on the board and holds `piece`.
    pub fn is(&self, pos: Position, piece: Piece) -> bool {
        self.get(pos) == Some(piece)
    }

    /// Overwrites a cell. Off-board writes are ignored.
    pub fn set(&mut self, pos: Position, piece: Piece) {
        if pos.in_bounds() {
            self.cells[pos.y as usize][pos.x as usize] = piece;
        }
    }

    /// Every position on the board, row by row.
    pub fn positions() -> impl Iterator<Item = Position> {
        let size = BOARD_SIZE as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// Positions currently holding `piece`.
    pub fn positions_of(&self, piece: Piece) -> impl Iterator<Item = Position> + '_ {
        Self::positions().filter(move |&pos| self.is(pos, piece))
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.positions_of(piece).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row.iter().map(|p| p.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
