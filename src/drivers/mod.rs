// Chip-level drivers, board-independent.
//
// Pin assignments and the channel map for a given board live in board/.

pub mod mux;

pub use mux::{Mux, MuxDriver, Sample, SELECT_LINES};
