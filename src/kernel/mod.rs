// Cooperative scan loop and wake primitives
// Single core, no preemption. WFI idles the CPU between timer ticks.
//
// poll: run-until-stopped scan loop and adaptive scan rate
// wake: timer ISR -> main loop flag, uptime

pub mod poll;
pub mod wake;

pub use poll::{AdaptivePoller, PollRate, run};
