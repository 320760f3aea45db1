// checkmate-sense entry point and main loop
//
// Boot sequence: logger -> timer -> hardware -> scanner -> first scan
// Main loop: WFI until the scan timer fires -> scan -> detect moves ->
// adjust scan rate -> repeat
//
// Timer scales from 50ms (pieces moving) to 500ms (board idle);
// any change on the board, or a piece held up, snaps it back.

#![no_std]
#![no_main]

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::time::Duration;
use esp_hal::timer::PeriodicTimer;
use esp_hal::timer::timg::TimerGroup;
use log::{debug, info, warn};

use core::cell::RefCell;
use critical_section::Mutex;

use checkmate_sense::board::{self, Board, pins};
use checkmate_sense::detect::{Event, MoveDetector};
use checkmate_sense::kernel::poll::BASE_INTERVAL_MS;
use checkmate_sense::kernel::wake::{self, signal_timer};
use checkmate_sense::kernel::AdaptivePoller;
use checkmate_sense::scan::{BoardState, ChannelMap, ScanConfig, Scanner};

esp_bootloader_esp_idf::esp_app_desc!();

static TIMER0: Mutex<RefCell<Option<PeriodicTimer<'static, esp_hal::Blocking>>>> =
    Mutex::new(RefCell::new(None));

#[esp_hal::handler(priority = esp_hal::interrupt::Priority::Priority1)]
fn timer0_handler() {
    critical_section::with(|cs| {
        if let Some(timer) = TIMER0.borrow_ref_mut(cs).as_mut() {
            timer.clear_interrupt();
        }
    });
    signal_timer();
}

fn set_timer_period(ms: u32) {
    wake::set_interval_ms(ms);
    critical_section::with(|cs| {
        if let Some(timer) = TIMER0.borrow_ref_mut(cs).as_mut() {
            let _ = timer.start(Duration::from_millis(ms as u64));
        }
    });
}

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    info!("booting...");

    let timg0 = TimerGroup::new(unsafe { peripherals.TIMG0.clone_unchecked() });
    let mut timer0 = PeriodicTimer::new(timg0.timer0);
    critical_section::with(|cs| {
        timer0.set_interrupt_handler(timer0_handler);
        timer0.start(Duration::from_millis(BASE_INTERVAL_MS as u64)).unwrap();
        timer0.listen();
        TIMER0.borrow_ref_mut(cs).replace(timer0);
    });
    info!("timer initialized.");

    info!(
        "mux: S0..S3 = GPIO{}/{}/{}/{}, Y1..Y4 = GPIO{}/{}/{}/{}",
        pins::MUX_S0,
        pins::MUX_S1,
        pins::MUX_S2,
        pins::MUX_S3,
        pins::MUX_Y1,
        pins::MUX_Y2,
        pins::MUX_Y3,
        pins::MUX_Y4,
    );
    let hw = Board::init(peripherals).unwrap();
    info!("hardware initialized.");

    // A bad map means the firmware was built for another board revision.
    let map = match ChannelMap::from_pairs(&board::HALL_MAP) {
        Ok(map) => map,
        Err(e) => panic!("hall map rejected: {}", e),
    };
    let config = ScanConfig::new(map).with_settle_us(board::SETTLE_US);
    let mut scanner = match Scanner::new(hw.mux, Delay::new(), config) {
        Ok(scanner) => scanner,
        Err(e) => panic!("scanner config rejected: {}", e),
    };

    let mut state = BoardState::new();
    if let Err(e) = scanner.scan_once(&mut state) {
        warn!("first scan failed: {}", e);
    }
    info!("{} pieces on the board", state.occupied_count());
    debug!("\n{}", state);

    let mut detector = MoveDetector::new(state);
    let mut poller = AdaptivePoller::new();
    info!("scanner ready.");

    loop {
        if !wake::take_timer() {
            wake::wait_for_interrupt();
            continue;
        }

        let previous = state;
        if let Err(e) = scanner.scan_once(&mut state) {
            // partial cycle; the next one overwrites it
            warn!("scan failed: {}", e);
            continue;
        }

        let changed = state != previous;
        if changed {
            debug!("\n{}", state);
        }

        match detector.update(&state) {
            Some(Event::Move { from, to }) => info!("move: {}{}", from, to),
            Some(event) => debug!("board: {:?}", event),
            None => {}
        }

        if let Some(rate) = poller.on_scan(changed || detector.lifted().is_some()) {
            set_timer_period(rate.interval_ms());
            info!("timer: {}", rate);
        }
    }
}
