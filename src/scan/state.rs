// Bit-packed 8x8 occupancy grid.
//
// One byte per storage row, bit `col` set = occupied. The scanner is
// the only writer; everything else reads through the accessors.

use core::fmt;

use crate::error::{BoundsError, NotationError};

use super::square::{Cell, SIZE, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct BoardState {
    rows: [u8; SIZE],
}

impl BoardState {
    /// Empty board.
    pub const fn new() -> Self {
        Self { rows: [0; SIZE] }
    }

    pub const fn from_rows(rows: [u8; SIZE]) -> Self {
        Self { rows }
    }

    pub const fn rows(&self) -> [u8; SIZE] {
        self.rows
    }

    /// Whole board as one word: byte `row`, bit `col`.
    pub const fn to_bits(&self) -> u64 {
        u64::from_le_bytes(self.rows)
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self { rows: bits.to_le_bytes() }
    }

    #[inline]
    pub const fn cell(&self, cell: Cell) -> bool {
        (self.rows[cell.row() as usize] >> cell.col()) & 1 == 1
    }

    #[inline]
    pub fn set_cell(&mut self, cell: Cell, occupied: bool) {
        let row = &mut self.rows[cell.row() as usize];
        if occupied {
            *row |= 1 << cell.col();
        } else {
            *row &= !(1 << cell.col());
        }
    }

    /// Occupancy at storage coordinate `(row, col)`.
    pub fn get(&self, row: u32, col: u32) -> Result<bool, BoundsError> {
        Cell::new(row, col).map(|cell| self.cell(cell))
    }

    #[inline]
    pub const fn square(&self, square: Square) -> bool {
        self.cell(square.to_cell())
    }

    /// Occupancy at public coordinate `(x, y)`; reads storage row `7 - y`.
    pub fn get_square(&self, x: u32, y: u32) -> Result<bool, BoundsError> {
        Square::new(x, y).map(|square| self.square(square))
    }

    /// Occupancy at an algebraic square, e.g. "e4".
    pub fn square_from_notation(&self, name: &str) -> Result<bool, NotationError> {
        Square::from_notation(name).map(|square| self.square(square))
    }

    pub const fn occupied_count(&self) -> u32 {
        self.to_bits().count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.to_bits() == 0
    }

    /// Cells that differ from `other`, as a `to_bits` mask.
    pub const fn changes(&self, other: &BoardState) -> u64 {
        self.to_bits() ^ other.to_bits()
    }

    /// Cells that differ from `other`.
    pub fn changed_cells(&self, other: &BoardState) -> impl Iterator<Item = Cell> {
        cells_in(self.changes(other))
    }

    /// Occupied cells, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = Cell> {
        cells_in(self.to_bits())
    }

    /// Board with rows and columns swapped.
    pub fn transposed(&self) -> Self {
        let mut out = Self::new();
        for cell in self.occupied() {
            out.rows[cell.col() as usize] |= 1 << cell.row();
        }
        out
    }

    pub fn clear(&mut self) {
        self.rows = [0; SIZE];
    }
}

fn cells_in(mut mask: u64) -> impl Iterator<Item = Cell> {
    core::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let index = mask.trailing_zeros();
        mask &= mask - 1;
        Some(Cell::from_index(index))
    })
}

/// Query accessor: occupancy at public `(x, y)`.
pub fn get_square(board: &BoardState, x: u32, y: u32) -> Result<bool, BoundsError> {
    board.get_square(x, y)
}

// Rank 8 first, files a..h left to right. For log output.
impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, bits) in self.rows.iter().enumerate() {
            write!(f, "{}", SIZE - row)?;
            for col in 0..SIZE {
                let mark = if (bits >> col) & 1 == 1 { 'x' } else { '.' };
                write!(f, " {}", mark)?;
            }
            writeln!(f)?;
        }
        f.write_str("  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_square_flips_rows() {
        let mut board = BoardState::new();
        board.set_cell(Cell::new(7, 2).unwrap(), true);

        assert_eq!(board.get_square(2, 0), Ok(true));
        assert_eq!(board.get(7, 2), Ok(true));
        assert_eq!(board.get_square(2, 7), Ok(false));
        assert_eq!(board.square_from_notation("c1"), Ok(true));
        assert_eq!(get_square(&board, 2, 0), Ok(true));
    }

    #[test]
    fn out_of_range_reads_fail() {
        let board = BoardState::from_bits(u64::MAX);
        assert_eq!(board.get_square(8, 0), Err(BoundsError::Square { x: 8, y: 0 }));
        assert_eq!(board.get_square(0, 8), Err(BoundsError::Square { x: 0, y: 8 }));
        assert_eq!(board.get(8, 8), Err(BoundsError::Cell { row: 8, col: 8 }));
        assert_eq!(board.square_from_notation("z9"), Err(NotationError));
    }

    #[test]
    fn set_cell_only_touches_one_bit() {
        let mut board = BoardState::from_rows([0xFF; SIZE]);
        board.set_cell(Cell::new(3, 4).unwrap(), false);
        assert_eq!(board.rows()[3], 0b1110_1111);
        assert_eq!(board.occupied_count(), 63);

        board.clear();
        assert!(board.is_empty());
    }

    #[test]
    fn changes_and_occupied() {
        let before = BoardState::from_rows([0, 0, 0, 0, 0, 0, 0b0001_0000, 0]);
        let after = BoardState::from_rows([0, 0, 0, 0, 0b0001_0000, 0, 0, 0]);

        let changed: Vec<Cell> = after.changed_cells(&before).collect();
        assert_eq!(changed, [Cell::new(4, 4).unwrap(), Cell::new(6, 4).unwrap()]);
        assert_eq!(after.occupied().collect::<Vec<_>>(), [Cell::new(4, 4).unwrap()]);
        assert!(BoardState::new().is_empty());
    }

    #[test]
    fn transposed_swaps_axes() {
        let board = BoardState::from_rows([0b0000_0010, 0, 0, 0, 0, 0, 0, 0b1000_0000]);
        let t = board.transposed();
        assert_eq!(t.get(1, 0), Ok(true));
        assert_eq!(t.get(7, 7), Ok(true));
        assert_eq!(t.occupied_count(), 2);
        assert_eq!(t.transposed(), board);
    }

    #[test]
    fn display_puts_rank_eight_on_top() {
        let mut board = BoardState::new();
        board.set_cell(Square::from_notation("a8").unwrap().to_cell(), true);
        let text = board.to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("8 x . . . . . . ."));
        assert_eq!(lines.last(), Some("  a b c d e f g h"));
    }
}
