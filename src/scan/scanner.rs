// One scan cycle: 16 Gray-ordered mux steps, up to 4 sensors per step.
//
// The board is written in place. A cycle always runs all 16 steps
// unless the driver errors; with a full map and four wired lines every
// cell is written exactly once per cycle. With fewer wired lines the
// cells on unwired lines keep whatever they held before.
//
// Reading the board from elsewhere while a cycle runs can see a mix of
// old and new cells; publish through SharedBoard after the cycle.

use embedded_hal::delay::DelayNs;

use crate::drivers::mux::{MuxDriver, Sample};
use crate::error::{ConfigError, ScanError};

use super::gray::{Address, SCAN_ORDER};
use super::mapping::{ChannelMap, LINES};
use super::square::Square;
use super::state::BoardState;

/// Mux + comparator settling time after an address change.
pub const DEFAULT_SETTLE_US: u32 = 10;

/// Anything above this is a config mistake, not a settling time.
pub const MAX_SETTLE_US: u32 = 10_000;

/// Per-board scanner configuration.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    map: ChannelMap,
    settle_us: u32,
}

impl ScanConfig {
    pub fn new(map: ChannelMap) -> Self {
        Self { map, settle_us: DEFAULT_SETTLE_US }
    }

    pub fn with_settle_us(mut self, us: u32) -> Self {
        self.settle_us = us;
        self
    }

    pub fn settle_us(&self) -> u32 {
        self.settle_us
    }
}

pub struct Scanner<M, D> {
    mux: M,
    delay: D,
    map: ChannelMap,
    settle_us: u32,
}

impl<M, D> Scanner<M, D>
where
    M: MuxDriver,
    D: DelayNs,
{
    pub fn new(mux: M, delay: D, config: ScanConfig) -> Result<Self, ConfigError> {
        let lines = mux.lines();
        if lines == 0 || lines > LINES {
            return Err(ConfigError::LineCount { lines });
        }
        let settle_us = config.settle_us();
        if settle_us == 0 || settle_us > MAX_SETTLE_US {
            return Err(ConfigError::SettleTime { us: settle_us });
        }
        log::info!("scanner: {} output lines, {}us settle", lines, settle_us);

        Ok(Self { mux, delay, map: config.map, settle_us })
    }

    /// Run one full cycle and write every sensed cell into `board`.
    pub fn scan_once(&mut self, board: &mut BoardState) -> Result<(), M::Error> {
        let lines = self.mux.lines();
        for (step, &address) in SCAN_ORDER.iter().enumerate() {
            let sample = self.sample(address)?;
            for line in 0..lines {
                board.set_cell(self.map.cell(step, line), sample.is_active(line));
            }
        }
        Ok(())
    }

    /// Read a single square without touching any board: selects only
    /// the channel that senses `(x, y)`.
    pub fn read_square(&mut self, x: u32, y: u32) -> Result<bool, ScanError<M::Error>> {
        let square = Square::new(x, y)?;
        let (step, line) = self
            .map
            .locate(square.to_cell())
            .filter(|&(_, line)| line < self.mux.lines())
            .ok_or(ScanError::Unwired { x, y })?;

        let sample = self.sample(SCAN_ORDER[step]).map_err(ScanError::Driver)?;
        Ok(sample.is_active(line))
    }

    fn sample(&mut self, address: Address) -> Result<Sample, M::Error> {
        self.mux.set_address(address)?;
        self.delay.delay_us(self.settle_us);
        self.mux.read_outputs()
    }

    pub fn map(&self) -> &ChannelMap {
        &self.map
    }

    pub fn mux(&self) -> &M {
        &self.mux
    }

    pub fn mux_mut(&mut self) -> &mut M {
        &mut self.mux
    }

    pub fn release(self) -> (M, D) {
        (self.mux, self.delay)
    }
}
