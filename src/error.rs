// Error types for the sensing layer.
//
// Configuration problems are caught once, before the first scan.
// Bounds problems are returned to the caller, never clamped.
// Misreads from bad wiring or timing are not detectable here: the
// sensors give one bit each with no parity, so a wrong bit looks
// exactly like a right one.

use core::fmt;

use embedded_hal::digital::ErrorKind;

/// Rejected scanner configuration. Fatal: no scan runs with a bad config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A channel map entry points outside the 8x8 grid.
    SquareOutOfRange { step: usize, line: usize, row: u8, col: u8 },
    /// Two (step, line) entries map to the same cell.
    DuplicateSquare { step: usize, line: usize, row: u8, col: u8 },
    /// Output line count outside 1..=4.
    LineCount { lines: usize },
    /// Settling delay outside the accepted range (microseconds).
    SettleTime { us: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SquareOutOfRange { step, line, row, col } => write!(
                f,
                "channel map step {} line {}: ({}, {}) is off the board",
                step, line, row, col
            ),
            ConfigError::DuplicateSquare { step, line, row, col } => write!(
                f,
                "channel map step {} line {}: ({}, {}) already mapped",
                step, line, row, col
            ),
            ConfigError::LineCount { lines } => {
                write!(f, "{} output lines wired, expected 1..=4", lines)
            }
            ConfigError::SettleTime { us } => write!(f, "settle time {}us out of range", us),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Coordinate outside the 8x8 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsError {
    /// Public (x, y) square coordinate.
    Square { x: u32, y: u32 },
    /// Storage (row, col) coordinate.
    Cell { row: u32, col: u32 },
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundsError::Square { x, y } => write!(f, "square ({}, {}) is off the board", x, y),
            BoundsError::Cell { row, col } => write!(f, "cell ({}, {}) is off the board", row, col),
        }
    }
}

impl core::error::Error for BoundsError {}

/// Algebraic square name that does not parse (expects "a1".."h8").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotationError;

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected a square like \"e4\"")
    }
}

impl core::error::Error for NotationError {}

/// GPIO failure reported by the HAL while driving the mux.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuxError {
    /// Writing select line `line` failed.
    Select { line: usize, kind: ErrorKind },
    /// Reading output line `line` failed.
    Sense { line: usize, kind: ErrorKind },
}

impl fmt::Display for MuxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MuxError::Select { line, kind } => write!(f, "select line S{}: {:?}", line, kind),
            MuxError::Sense { line, kind } => write!(f, "output line Y{}: {:?}", line + 1, kind),
        }
    }
}

impl core::error::Error for MuxError {}

/// Failure of a targeted single-square read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError<E> {
    /// The mux driver failed.
    Driver(E),
    /// Requested square is off the board.
    Bounds(BoundsError),
    /// The square sits on an output line this wiring does not read.
    Unwired { x: u32, y: u32 },
}

impl<E> From<BoundsError> for ScanError<E> {
    fn from(e: BoundsError) -> Self {
        ScanError::Bounds(e)
    }
}

impl<E: fmt::Debug> fmt::Display for ScanError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Driver(e) => write!(f, "mux driver: {:?}", e),
            ScanError::Bounds(e) => write!(f, "{}", e),
            ScanError::Unwired { x, y } => {
                write!(f, "square ({}, {}) is on an unwired output line", x, y)
            }
        }
    }
}

impl<E: fmt::Debug> core::error::Error for ScanError<E> {}
