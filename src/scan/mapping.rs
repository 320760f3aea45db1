// Channel map: which board cell each (scan step, output line) senses.
//
// Supplied by the caller per board revision and validated once: all
// 16 x 4 entries must be on the board and distinct. With 64 entries
// and 64 cells, distinct implies every cell is covered.

use crate::error::ConfigError;

use super::gray::CHANNELS;
use super::square::Cell;

/// Output lines on the mux (Y1..Y4).
pub const LINES: usize = 4;

/// Raw table layout, one row per scan step:
/// `{row0, col0, row1, col1, row2, col2, row3, col3}` for lines Y1..Y4.
pub type RawMap = [[u8; 2 * LINES]; CHANNELS];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    cells: [[Cell; LINES]; CHANNELS],
}

impl ChannelMap {
    /// Build from `(row, col)` pairs.
    pub fn from_pairs(raw: &RawMap) -> Result<Self, ConfigError> {
        let mut cells = [[Cell::from_index(0); LINES]; CHANNELS];
        for (step, entry) in raw.iter().enumerate() {
            for line in 0..LINES {
                let (row, col) = (entry[2 * line], entry[2 * line + 1]);
                cells[step][line] = Cell::new(row as u32, col as u32)
                    .map_err(|_| ConfigError::SquareOutOfRange { step, line, row, col })?;
            }
        }
        Self::new(cells)
    }

    pub fn new(cells: [[Cell; LINES]; CHANNELS]) -> Result<Self, ConfigError> {
        let mut seen: u64 = 0;
        for (step, entry) in cells.iter().enumerate() {
            for (line, cell) in entry.iter().enumerate() {
                let bit = 1u64 << cell.index();
                if seen & bit != 0 {
                    return Err(ConfigError::DuplicateSquare {
                        step,
                        line,
                        row: cell.row(),
                        col: cell.col(),
                    });
                }
                seen |= bit;
            }
        }
        Ok(Self { cells })
    }

    /// Cell sensed on output `line` at scan `step`.
    #[inline]
    pub fn cell(&self, step: usize, line: usize) -> Cell {
        self.cells[step][line]
    }

    /// Scan step and output line that sense `cell`.
    pub fn locate(&self, cell: Cell) -> Option<(usize, usize)> {
        self.entries()
            .find(|&(_, _, c)| c == cell)
            .map(|(step, line, _)| (step, line))
    }

    /// All `(step, line, cell)` entries in scan order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(step, entry)| {
            entry.iter().enumerate().map(move |(line, &cell)| (step, line, cell))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // row = 2 * line + step / 8, col = step % 8
    fn striped() -> RawMap {
        let mut raw = [[0u8; 2 * LINES]; CHANNELS];
        for (step, entry) in raw.iter_mut().enumerate() {
            for line in 0..LINES {
                entry[2 * line] = (2 * line + step / 8) as u8;
                entry[2 * line + 1] = (step % 8) as u8;
            }
        }
        raw
    }

    #[test]
    fn accepts_a_bijection() {
        let map = ChannelMap::from_pairs(&striped()).unwrap();
        assert_eq!(map.entries().count(), 64);
        let cell = map.cell(9, 3);
        assert_eq!((cell.row(), cell.col()), (7, 1));
    }

    #[test]
    fn rejects_duplicates() {
        let mut raw = striped();
        raw[15][6] = 0;
        raw[15][7] = 0;
        assert_eq!(
            ChannelMap::from_pairs(&raw),
            Err(ConfigError::DuplicateSquare { step: 15, line: 3, row: 0, col: 0 })
        );
    }

    #[test]
    fn rejects_cells_off_the_board() {
        let mut raw = striped();
        raw[4][3] = 8;
        assert_eq!(
            ChannelMap::from_pairs(&raw),
            Err(ConfigError::SquareOutOfRange { step: 4, line: 1, row: 2, col: 8 })
        );
    }

    #[test]
    fn locate_inverts_cell() {
        let map = ChannelMap::from_pairs(&striped()).unwrap();
        for (step, line, cell) in map.entries() {
            assert_eq!(map.locate(cell), Some((step, line)));
        }
    }
}
