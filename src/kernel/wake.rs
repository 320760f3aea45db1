// Timer wake flag between the scan-timer ISR and the main loop
//
// The ISR sets WAKE_TIMER; the main loop consumes it with take_timer().
// Uptime is tracked in 50ms base ticks; TICK_WEIGHT compensates when
// the timer is slowed down by the adaptive poller.
// Critical section guards riscv32imc (no atomic RMW).

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use super::poll::BASE_INTERVAL_MS;

static WAKE_TIMER: AtomicBool = AtomicBool::new(false);

// base ticks per timer interrupt
static TICK_WEIGHT: AtomicU32 = AtomicU32::new(1);

static UPTIME_TICKS: critical_section::Mutex<core::cell::Cell<u32>> =
    critical_section::Mutex::new(core::cell::Cell::new(0));

#[inline]
pub fn signal_timer() {
    WAKE_TIMER.store(true, Ordering::Release);
    let weight = TICK_WEIGHT.load(Ordering::Relaxed);
    critical_section::with(|cs| {
        let ticks = UPTIME_TICKS.borrow(cs);
        ticks.set(ticks.get().wrapping_add(weight));
    });
}

/// True once per timer interrupt since the last call.
pub fn take_timer() -> bool {
    critical_section::with(|_| {
        let fired = WAKE_TIMER.load(Ordering::Acquire);
        if fired {
            WAKE_TIMER.store(false, Ordering::Relaxed);
        }
        fired
    })
}

/// Timer period changed to `interval_ms`.
pub fn set_interval_ms(interval_ms: u32) {
    TICK_WEIGHT.store((interval_ms / BASE_INTERVAL_MS).max(1), Ordering::Release);
}

pub fn uptime_ticks() -> u32 {
    critical_section::with(|cs| UPTIME_TICKS.borrow(cs).get())
}

pub fn uptime_ms() -> u32 {
    uptime_ticks().wrapping_mul(BASE_INTERVAL_MS)
}

#[inline]
pub fn wait_for_interrupt() {
    #[cfg(target_arch = "riscv32")]
    unsafe {
        core::arch::asm!("wfi", options(nomem, nostack));
    }

    #[cfg(not(target_arch = "riscv32"))]
    core::hint::spin_loop();
}
