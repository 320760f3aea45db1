// Continuous scanning and "adaptive" scan rate
//
// run(): scan back to back until the stop flag is set. The flag is
// only checked between cycles, a cycle is never cut short.
//
// AdaptivePoller: scan fast while pieces are moving, back off when
// the board sits still.
// - board changed recently: 50ms between scans
// - quiet for a while:      100ms
// - idle:                   500ms

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;

use crate::drivers::mux::MuxDriver;
use crate::scan::{BoardState, Scanner};

/// Scan until `stop` is set, calling `on_cycle` after each completed
/// cycle. Returns the number of completed cycles.
pub fn run<M, D, F>(
    scanner: &mut Scanner<M, D>,
    board: &mut BoardState,
    stop: &AtomicBool,
    mut on_cycle: F,
) -> Result<u32, M::Error>
where
    M: MuxDriver,
    D: DelayNs,
    F: FnMut(&BoardState),
{
    let mut cycles: u32 = 0;
    while !stop.load(Ordering::Acquire) {
        if let Err(e) = scanner.scan_once(board) {
            log::warn!("poll: scan failed after {} cycles: {:?}", cycles, e);
            return Err(e);
        }
        cycles = cycles.wrapping_add(1);
        on_cycle(board);
    }
    log::info!("poll: stopped after {} cycles", cycles);
    Ok(cycles)
}

/// Base scan interval (ms)
pub const BASE_INTERVAL_MS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollRate {
    #[default]
    Fast,
    Normal,
    Slow,
}

impl PollRate {
    // Base intervals between scans at this rate
    pub const fn multiplier(self) -> u32 {
        match self {
            PollRate::Fast => 1,
            PollRate::Normal => 2,
            PollRate::Slow => 10,
        }
    }

    pub const fn interval_ms(self) -> u32 {
        self.multiplier() * BASE_INTERVAL_MS
    }
}

impl fmt::Display for PollRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollRate::Fast => write!(f, "Fast({}ms)", self.interval_ms()),
            PollRate::Normal => write!(f, "Normal({}ms)", self.interval_ms()),
            PollRate::Slow => write!(f, "Slow({}ms)", self.interval_ms()),
        }
    }
}

// Unchanged scans before stepping down
mod thresholds {
    pub const FAST_TO_NORMAL: u32 = 40; // 40 x 50ms = 2s
    pub const NORMAL_TO_SLOW: u32 = 50; // 50 x 100ms = 5s
}

pub struct AdaptivePoller {
    rate: PollRate,
    // consecutive scans with no change
    quiet_scans: u32,
}

impl AdaptivePoller {
    pub const fn new() -> Self {
        Self { rate: PollRate::Fast, quiet_scans: 0 }
    }

    /// Record a completed scan. Returns the new rate when it changes.
    pub fn on_scan(&mut self, changed: bool) -> Option<PollRate> {
        let before = self.rate;

        if changed {
            self.rate = PollRate::Fast;
            self.quiet_scans = 0;
        } else {
            self.quiet_scans = self.quiet_scans.saturating_add(1);
            match self.rate {
                PollRate::Fast if self.quiet_scans >= thresholds::FAST_TO_NORMAL => {
                    self.rate = PollRate::Normal;
                    self.quiet_scans = 0;
                }
                PollRate::Normal if self.quiet_scans >= thresholds::NORMAL_TO_SLOW => {
                    self.rate = PollRate::Slow;
                }
                _ => {}
            }
        }

        (self.rate != before).then_some(self.rate)
    }

    pub fn rate(&self) -> PollRate {
        self.rate
    }

    pub fn interval_ms(&self) -> u32 {
        self.rate.interval_ms()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for AdaptivePoller {
    fn default() -> Self {
        Self::new()
    }
}
