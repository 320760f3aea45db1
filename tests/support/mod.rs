// Scripted mux drivers and delays for host tests.

#![allow(dead_code)]

use checkmate_sense::drivers::{MuxDriver, Sample};
use checkmate_sense::scan::{Address, BoardState, CHANNELS, ChannelMap, SCAN_ORDER};
use embedded_hal::delay::DelayNs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubError;

/// Returns a fixed sample per address and records what it was asked.
pub struct ScriptedMux {
    pub outputs: [u8; CHANNELS],
    pub lines: usize,
    pub addresses: Vec<u8>,
    pub reads: usize,
    /// Fail the read with this index (0-based).
    pub fail_read: Option<usize>,
    selected: Option<Address>,
}

impl ScriptedMux {
    pub fn new(outputs: [u8; CHANNELS]) -> Self {
        Self { outputs, lines: 4, addresses: Vec::new(), reads: 0, fail_read: None, selected: None }
    }

    pub fn constant(bits: u8) -> Self {
        Self::new([bits; CHANNELS])
    }

    pub fn with_lines(mut self, lines: usize) -> Self {
        self.lines = lines;
        self
    }
}

impl MuxDriver for ScriptedMux {
    type Error = StubError;

    fn lines(&self) -> usize {
        self.lines
    }

    fn set_address(&mut self, address: Address) -> Result<(), StubError> {
        self.addresses.push(address.bits());
        self.selected = Some(address);
        Ok(())
    }

    fn read_outputs(&mut self) -> Result<Sample, StubError> {
        let index = self.reads;
        self.reads += 1;
        if self.fail_read == Some(index) {
            return Err(StubError);
        }
        let address = self.selected.ok_or(StubError)?;
        Ok(Sample::from_bits(self.outputs[address.bits() as usize]))
    }
}

/// Pieces on a physical board, sensed through `map` with active-low lines.
pub struct SimulatedBoard {
    pub pieces: BoardState,
    map: ChannelMap,
    selected: Address,
}

impl SimulatedBoard {
    pub fn new(map: ChannelMap, pieces: BoardState) -> Self {
        Self { pieces, map, selected: SCAN_ORDER[0] }
    }
}

impl MuxDriver for SimulatedBoard {
    type Error = StubError;

    fn lines(&self) -> usize {
        4
    }

    fn set_address(&mut self, address: Address) -> Result<(), StubError> {
        self.selected = address;
        Ok(())
    }

    fn read_outputs(&mut self) -> Result<Sample, StubError> {
        let step = SCAN_ORDER.iter().position(|&a| a == self.selected).ok_or(StubError)?;
        let mut bits = 0u8;
        for line in 0..4 {
            if !self.pieces.cell(self.map.cell(step, line)) {
                bits |= 1 << line;
            }
        }
        Ok(Sample::from_bits(bits))
    }
}

/// Counts settle delays instead of sleeping.
#[derive(Default)]
pub struct CountingDelay {
    pub calls: u32,
    pub total_ns: u64,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += ns as u64;
    }
}

/// row = 2 * line + step / 8, col = step % 8
pub fn striped_map() -> ChannelMap {
    let mut raw = [[0u8; 8]; CHANNELS];
    for (step, entry) in raw.iter_mut().enumerate() {
        for line in 0..4 {
            entry[2 * line] = (2 * line + step / 8) as u8;
            entry[2 * line + 1] = (step % 8) as u8;
        }
    }
    ChannelMap::from_pairs(&raw).unwrap()
}
