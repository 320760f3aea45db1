//! Checkmate board support (ESP32-C3)
//!
//! Maps the board's physical wiring to named subsystems: the pin
//! assignments, settling time and calibrated channel map are here so no
//! other part of the crate needs to know GPIO numbers.
//!
//! The constants build everywhere; pin construction needs the
//! `firmware` feature.

pub mod pins;

pub use pins::{HALL_MAP, SETTLE_US};

#[cfg(feature = "firmware")]
pub use hw::{Board, HallMux};

#[cfg(feature = "firmware")]
mod hw {
    use esp_hal::{
        gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
        peripherals::Peripherals,
    };

    use crate::drivers::Mux;
    use crate::error::ConfigError;

    pub type HallMux = Mux<Output<'static>, Input<'static>, 4>;

    /// Complete board hardware, ready for the scanner.
    pub struct Board {
        pub mux: HallMux,
    }

    impl Board {
        pub fn init(p: Peripherals) -> Result<Self, ConfigError> {
            // Select lines start low: address 0 is the first scan step.
            let select = [
                Output::new(p.GPIO4, Level::Low, OutputConfig::default()),
                Output::new(p.GPIO5, Level::Low, OutputConfig::default()),
                Output::new(p.GPIO6, Level::Low, OutputConfig::default()),
                Output::new(p.GPIO7, Level::Low, OutputConfig::default()),
            ];

            // Hall sensors are open-drain and pull the line low on a magnet.
            let sense = || InputConfig::default().with_pull(Pull::Up);
            let outputs = [
                Input::new(p.GPIO0, sense()),
                Input::new(p.GPIO1, sense()),
                Input::new(p.GPIO3, sense()),
                Input::new(p.GPIO10, sense()),
            ];

            let mux = Mux::new(select, outputs)?;
            Ok(Board { mux })
        }
    }
}
