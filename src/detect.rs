// Move detection from successive board scans
//
// A move is two confirmed single-square changes against a reference
// board: the lift, then the placement. A change only counts once the
// same square has come back CONFIRM_READINGS scans in a row, which
// rides out sensor chatter while a piece slides across a square edge.
//
//   Idle   --lift confirmed-->   Lifted   --place confirmed--> Idle (Move)
//                                Lifted   --put back-------->  Idle (Returned)
//                                Lifted   --ABANDON_POLLS----> Idle (Abandoned)
//
// A capture reads as lift(capturing piece), lift(captured piece), so the
// second lift is reported as the destination of the Move. Setting the
// capturing piece down on that square is then a fresh change against
// the new reference: it reports Lifted for the destination, followed by
// Abandoned once ABANDON_POLLS quiet scans pass.

use crate::scan::{BoardState, Cell, Square};

/// Identical readings needed to accept a change.
pub const CONFIRM_READINGS: u8 = 3;

/// Scans with the piece up and nothing else happening before giving up.
pub const ABANDON_POLLS: u8 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A piece left `Square`.
    Lifted(Square),
    /// A lift followed by a change on another square.
    Move { from: Square, to: Square },
    /// The lifted piece went back where it came from.
    Returned(Square),
    /// No second change within ABANDON_POLLS scans.
    Abandoned(Square),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Lifted { from: Square },
}

pub struct MoveDetector {
    reference: BoardState,
    phase: Phase,
    candidate: Option<Square>,
    readings: u8,
    idle_polls: u8,
}

impl MoveDetector {
    pub const fn new(reference: BoardState) -> Self {
        Self {
            reference,
            phase: Phase::Idle,
            candidate: None,
            readings: 0,
            idle_polls: 0,
        }
    }

    /// Feed the next scan.
    pub fn update(&mut self, board: &BoardState) -> Option<Event> {
        let change = single_change(&self.reference, board);

        match (self.phase, change) {
            (Phase::Idle, Some(square)) => {
                if !self.confirm(square) {
                    return None;
                }
                self.accept(board, Phase::Lifted { from: square });
                log::debug!("detect: lift {}", square);
                Some(Event::Lifted(square))
            }
            (Phase::Lifted { from }, Some(square)) => {
                self.idle_polls = 0;
                if !self.confirm(square) {
                    return None;
                }
                self.accept(board, Phase::Idle);
                if square == from {
                    log::debug!("detect: {} put back", from);
                    Some(Event::Returned(from))
                } else {
                    log::info!("detect: move {}{}", from, square);
                    Some(Event::Move { from, to: square })
                }
            }
            (Phase::Idle, None) => {
                self.candidate = None;
                self.readings = 0;
                None
            }
            (Phase::Lifted { from }, None) => {
                self.candidate = None;
                self.readings = 0;
                self.idle_polls = self.idle_polls.saturating_add(1);
                if self.idle_polls < ABANDON_POLLS {
                    return None;
                }
                self.phase = Phase::Idle;
                self.idle_polls = 0;
                log::warn!("detect: no placement after {} lift, giving up", from);
                Some(Event::Abandoned(from))
            }
        }
    }

    /// Board the next change is measured against.
    pub fn reference(&self) -> &BoardState {
        &self.reference
    }

    /// Square whose piece is currently up, if any.
    pub fn lifted(&self) -> Option<Square> {
        match self.phase {
            Phase::Lifted { from } => Some(from),
            Phase::Idle => None,
        }
    }

    /// Forget any pending change and start over from `reference`.
    pub fn reset(&mut self, reference: BoardState) {
        *self = Self::new(reference);
    }

    fn confirm(&mut self, square: Square) -> bool {
        if self.candidate == Some(square) {
            self.readings = self.readings.saturating_add(1);
        } else {
            self.candidate = Some(square);
            self.readings = 1;
        }
        self.readings >= CONFIRM_READINGS
    }

    fn accept(&mut self, board: &BoardState, phase: Phase) {
        self.reference = *board;
        self.phase = phase;
        self.candidate = None;
        self.readings = 0;
        self.idle_polls = 0;
    }
}

// Some(square) iff exactly one cell differs.
fn single_change(reference: &BoardState, board: &BoardState) -> Option<Square> {
    let mask = board.changes(reference);
    if mask.count_ones() != 1 {
        return None;
    }
    board.changed_cells(reference).next().map(Cell::to_square)
}
