// Board coordinates.
//
// Two systems, one fixed transform between them:
//   Cell   (row, col): storage order, what the channel map is authored in
//   Square (x, y):     public order, y counted from the opposite edge
//
//   row = 7 - y, col = x
//
// x is the file (a..h), y the rank (1..8) minus one.

use core::fmt;

use crate::error::{BoundsError, NotationError};

/// Rows and columns on the board.
pub const SIZE: usize = 8;

const LAST: u8 = (SIZE - 1) as u8;

/// Storage coordinate. Always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    pub fn new(row: u32, col: u32) -> Result<Self, BoundsError> {
        if row as usize >= SIZE || col as usize >= SIZE {
            return Err(BoundsError::Cell { row, col });
        }
        Ok(Self { row: row as u8, col: col as u8 })
    }

    /// Cell for a bit index `row * 8 + col`, 0..64.
    pub(crate) const fn from_index(index: u32) -> Self {
        Self { row: (index / SIZE as u32) as u8 & LAST, col: (index % SIZE as u32) as u8 }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Bit index `row * 8 + col`.
    #[inline]
    pub const fn index(self) -> u32 {
        self.row as u32 * SIZE as u32 + self.col as u32
    }

    pub const fn to_square(self) -> Square {
        Square { x: self.col, y: LAST - self.row }
    }
}

/// Public coordinate. Always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    x: u8,
    y: u8,
}

impl Square {
    pub fn new(x: u32, y: u32) -> Result<Self, BoundsError> {
        if x as usize >= SIZE || y as usize >= SIZE {
            return Err(BoundsError::Square { x, y });
        }
        Ok(Self { x: x as u8, y: y as u8 })
    }

    /// Parse algebraic notation, "a1".."h8" (file letter case-insensitive).
    pub fn from_notation(name: &str) -> Result<Self, NotationError> {
        let &[file, rank] = name.as_bytes() else {
            return Err(NotationError);
        };
        let file = file.to_ascii_lowercase();
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(NotationError);
        }
        Ok(Self { x: file - b'a', y: rank - b'1' })
    }

    #[inline]
    pub const fn x(self) -> u8 {
        self.x
    }

    #[inline]
    pub const fn y(self) -> u8 {
        self.y
    }

    pub const fn to_cell(self) -> Cell {
        Cell { row: LAST - self.y, col: self.x }
    }

    pub const fn file(self) -> char {
        (b'a' + self.x) as char
    }

    pub const fn rank(self) -> char {
        (b'1' + self.y) as char
    }

    /// Algebraic name as ASCII bytes, `[file, rank]`.
    pub const fn notation(self) -> [u8; 2] {
        [b'a' + self.x, b'1' + self.y]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}
