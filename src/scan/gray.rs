// Mux addressing in reflected binary (Gray) order.
//
// Step i of a scan selects address i ^ (i >> 1), so every step flips
// exactly one select line. The channel map is indexed by step, not by
// the raw address.

/// Channels on the mux, and steps in one scan cycle.
pub const CHANNELS: usize = 16;

/// 4-bit mux select value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u8);

impl Address {
    pub const MAX: u8 = (CHANNELS - 1) as u8;

    pub const fn new(raw: u8) -> Option<Self> {
        if raw <= Self::MAX { Some(Self(raw)) } else { None }
    }

    /// Address selected at scan step `step` (taken mod 16).
    pub const fn for_step(step: usize) -> Self {
        let i = (step % CHANNELS) as u8;
        Self(i ^ (i >> 1))
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Level of select line `line` (0 = LSB = S0).
    #[inline]
    pub const fn line(self, line: usize) -> bool {
        line < 4 && (self.0 >> line) & 1 == 1
    }
}

/// Addresses in scan order, indexed by step.
pub const SCAN_ORDER: [Address; CHANNELS] = {
    let mut order = [Address(0); CHANNELS];
    let mut step = 0;
    while step < CHANNELS {
        order[step] = Address::for_step(step);
        step += 1;
    }
    order
};
