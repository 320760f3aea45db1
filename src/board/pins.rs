//! GPIO |  Function  |      Notes
//! -----+------------+----------------------------------------------
//!  4   | MUX S0     | Select line, address bit 0
//!  5   | MUX S1     | Select line, address bit 1
//!  6   | MUX S2     | Select line, address bit 2
//!  7   | MUX S3     | Select line, address bit 3
//!  0   | MUX Y1     | Quadrant 1 sensors, active LOW, internal pullup
//!  1   | MUX Y2     | Quadrant 2 sensors, active LOW, internal pullup
//!  3   | MUX Y3     | Quadrant 3 sensors, active LOW, internal pullup
//! 10   | MUX Y4     | Quadrant 4 sensors, active LOW, internal pullup
//!
//! GPIO2/8/9 are strapping pins and 12..17 belong to flash; none are used.

// ----- Mux select lines (S0..S3) -----
pub const MUX_S0: u8 = 4;
pub const MUX_S1: u8 = 5;
pub const MUX_S2: u8 = 6;
pub const MUX_S3: u8 = 7;

// ----- Mux outputs (Y1..Y4) -----
pub const MUX_Y1: u8 = 0;
pub const MUX_Y2: u8 = 1;
pub const MUX_Y3: u8 = 3;
pub const MUX_Y4: u8 = 10;

// Measured on rev B: 10us is enough for the 4067 + comparator chain.
pub const SETTLE_US: u32 = 10;

/// Channel map for board rev B, in `{row, col}` pairs per line (Y1..Y4),
/// one entry per scan step. Row 0 is the rank-8 edge.
pub const HALL_MAP: crate::scan::RawMap = [
    //  Y1      Y2      Y3      Y4
    [7, 2,  3, 2,  0, 5,  4, 5], // hall  7
    [7, 3,  3, 3,  0, 4,  4, 4], // hall  3
    [6, 3,  2, 3,  1, 4,  5, 4], // hall  2
    [6, 2,  2, 2,  1, 5,  5, 5], // hall  6
    [4, 3,  0, 3,  3, 4,  7, 4], // hall  0
    [4, 2,  0, 2,  3, 5,  7, 5], // hall  4
    [5, 2,  1, 2,  2, 5,  6, 5], // hall  5
    [5, 3,  1, 3,  2, 4,  6, 4], // hall  1
    [6, 1,  2, 1,  1, 6,  5, 6], // hall 10
    [7, 1,  3, 1,  0, 6,  4, 6], // hall 11
    [7, 0,  3, 0,  0, 7,  4, 7], // hall 15
    [6, 0,  2, 0,  1, 7,  5, 7], // hall 14
    [4, 1,  0, 1,  3, 6,  7, 6], // hall  8
    [5, 1,  1, 1,  2, 6,  6, 6], // hall  9
    [5, 0,  1, 0,  2, 7,  6, 7], // hall 13
    [4, 0,  0, 0,  3, 7,  7, 7], // hall 12
];
