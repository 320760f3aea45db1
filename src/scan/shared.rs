// Board snapshot shared between the scan loop and other readers
// (timer handler, display task). The scanner keeps its own working
// board and publishes it here once per completed cycle; readers get a
// copy, so they never see half a cycle.
//
// cs: riscv32imc has no atomic 64-bit store

use core::cell::Cell;

use critical_section::Mutex;

use super::state::BoardState;

pub struct SharedBoard {
    inner: Mutex<Cell<Published>>,
}

#[derive(Clone, Copy)]
struct Published {
    board: BoardState,
    generation: u32,
}

impl SharedBoard {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(Published { board: BoardState::new(), generation: 0 })),
        }
    }

    /// Replace the snapshot with a completed scan.
    pub fn publish(&self, board: &BoardState) {
        critical_section::with(|cs| {
            let slot = self.inner.borrow(cs);
            let generation = slot.get().generation.wrapping_add(1);
            slot.set(Published { board: *board, generation });
        });
    }

    pub fn snapshot(&self) -> BoardState {
        critical_section::with(|cs| self.inner.borrow(cs).get().board)
    }

    /// Snapshot plus how many times it has been published.
    pub fn snapshot_with_generation(&self) -> (BoardState, u32) {
        critical_section::with(|cs| {
            let p = self.inner.borrow(cs).get();
            (p.board, p.generation)
        })
    }
}

impl Default for SharedBoard {
    fn default() -> Self {
        Self::new()
    }
}
