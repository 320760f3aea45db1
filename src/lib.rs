// Hall-effect sensing layer for the Checkmate board (ESP32-C3, 8x8 hall grid)
//
// scan:    Gray-code mux stepping, channel map, bit-packed board state
// drivers: 16-channel mux over embedded-hal pins
// detect:  debounced lift/place -> chess moves
// kernel:  poll loop, adaptive scan rate, timer wake flags
// board:   pin map and calibrated channel map for the shipped board

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod detect;
pub mod drivers;
pub mod error;
pub mod kernel;
pub mod scan;
