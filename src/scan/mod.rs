//! Scan/decode core
//!
//! Steps the mux through all 16 addresses in Gray-code order, reads the
//! output lines at each step and writes the decoded bits into a
//! caller-owned [`BoardState`] through a validated [`ChannelMap`].
//!
//! Sensors are active-low: a 0 bit on a line means a piece is present.

pub mod gray;
pub mod mapping;
pub mod scanner;
pub mod shared;
pub mod square;
pub mod state;

pub use gray::{Address, CHANNELS, SCAN_ORDER};
pub use mapping::{ChannelMap, LINES, RawMap};
pub use scanner::{DEFAULT_SETTLE_US, MAX_SETTLE_US, ScanConfig, Scanner};
pub use shared::SharedBoard;
pub use square::{Cell, SIZE, Square};
pub use state::{BoardState, get_square};
