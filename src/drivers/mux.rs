// 16-channel analog mux (CD74HC4067 style) with up to four parallel outputs
//
//   S0..S3  select lines, address LSB on S0
//   Y1..Y4  output lines, Y1 -> sample bit 0
//
// Four mux chips share the select lines; each one reads a quadrant of
// the board on its own Y line. Boards wired with fewer chips use fewer
// Y pins.
//
// After set_address the analog switch and the sensor comparators need
// time to settle before read_outputs is valid; the caller owns that
// delay. Nothing here can tell a misread from a real reading.

use embedded_hal::digital::{Error as _, InputPin, OutputPin, PinState};

use crate::error::{ConfigError, MuxError};
use crate::scan::gray::Address;
use crate::scan::mapping::LINES;

/// Select lines on the mux.
pub const SELECT_LINES: usize = 4;

/// One read of the output lines, bit `j` = level of line `j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample(u8);

impl Sample {
    const MASK: u8 = (1 << LINES) - 1;

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Line `line` read high.
    #[inline]
    pub const fn is_high(self, line: usize) -> bool {
        line < LINES && (self.0 >> line) & 1 == 1
    }

    /// Sensor on line `line` is active. The sensors pull low when a
    /// magnet is present, so a low line means occupied.
    #[inline]
    pub const fn is_active(self, line: usize) -> bool {
        !self.is_high(line)
    }
}

/// Capability the scanner needs from the mux hardware.
pub trait MuxDriver {
    type Error: core::fmt::Debug;

    /// Wired output lines, 1..=4.
    fn lines(&self) -> usize;

    fn set_address(&mut self, address: Address) -> Result<(), Self::Error>;

    fn read_outputs(&mut self) -> Result<Sample, Self::Error>;
}

/// Mux driven through embedded-hal pins.
pub struct Mux<S, Y, const N: usize> {
    select: [S; SELECT_LINES],
    outputs: [Y; N],
}

impl<S, Y, const N: usize> Mux<S, Y, N>
where
    S: OutputPin,
    Y: InputPin,
{
    /// `select` in S0..S3 order, `outputs` in Y1..YN order.
    pub fn new(select: [S; SELECT_LINES], outputs: [Y; N]) -> Result<Self, ConfigError> {
        if N == 0 || N > LINES {
            return Err(ConfigError::LineCount { lines: N });
        }
        Ok(Self { select, outputs })
    }

    /// Give the pins back.
    pub fn release(self) -> ([S; SELECT_LINES], [Y; N]) {
        (self.select, self.outputs)
    }
}

impl<S, Y, const N: usize> MuxDriver for Mux<S, Y, N>
where
    S: OutputPin,
    Y: InputPin,
{
    type Error = MuxError;

    fn lines(&self) -> usize {
        N
    }

    fn set_address(&mut self, address: Address) -> Result<(), MuxError> {
        for (line, pin) in self.select.iter_mut().enumerate() {
            pin.set_state(PinState::from(address.line(line)))
                .map_err(|e| MuxError::Select { line, kind: e.kind() })?;
        }
        Ok(())
    }

    fn read_outputs(&mut self) -> Result<Sample, MuxError> {
        let mut bits = 0u8;
        for (line, pin) in self.outputs.iter_mut().enumerate() {
            if pin.is_high().map_err(|e| MuxError::Sense { line, kind: e.kind() })? {
                bits |= 1 << line;
            }
        }
        Ok(Sample::from_bits(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct FakeOut<'a>(&'a Cell<bool>);

    impl ErrorType for FakeOut<'_> {
        type Error = Infallible;
    }

    impl OutputPin for FakeOut<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.set(true);
            Ok(())
        }
    }

    struct FakeIn(bool);

    impl ErrorType for FakeIn {
        type Error = Infallible;
    }

    impl InputPin for FakeIn {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0)
        }
    }

    // Fails on the way high, so address bits that are set break.
    struct StuckLow;

    impl ErrorType for StuckLow {
        type Error = ErrorKind;
    }

    impl OutputPin for StuckLow {
        fn set_low(&mut self) -> Result<(), ErrorKind> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    struct BrokenIn;

    impl ErrorType for BrokenIn {
        type Error = ErrorKind;
    }

    impl InputPin for BrokenIn {
        fn is_high(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, ErrorKind> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn address_goes_out_lsb_first() {
        let levels = [Cell::new(false), Cell::new(false), Cell::new(false), Cell::new(false)];
        let select = [
            FakeOut(&levels[0]),
            FakeOut(&levels[1]),
            FakeOut(&levels[2]),
            FakeOut(&levels[3]),
        ];
        let mut mux = Mux::new(select, [FakeIn(true)]).unwrap();

        mux.set_address(Address::new(0b0110).unwrap()).unwrap();
        assert_eq!(levels.each_ref().map(|c| c.get()), [false, true, true, false]);

        mux.set_address(Address::new(0b1001).unwrap()).unwrap();
        assert_eq!(levels.each_ref().map(|c| c.get()), [true, false, false, true]);
    }

    #[test]
    fn outputs_pack_into_low_bits() {
        let cells = [Cell::new(false), Cell::new(false), Cell::new(false), Cell::new(false)];
        let select = cells.each_ref().map(FakeOut);

        let mut mux = Mux::new(select, [FakeIn(true), FakeIn(false), FakeIn(true)]).unwrap();
        assert_eq!(mux.lines(), 3);
        let sample = mux.read_outputs().unwrap();
        assert_eq!(sample.bits(), 0b101);
        assert!(!sample.is_active(0));
        assert!(sample.is_active(1));
        // unwired line reads as a 0 bit
        assert!(!sample.is_high(3));
    }

    #[test]
    fn line_count_is_checked() {
        let cells = [Cell::new(false), Cell::new(false), Cell::new(false), Cell::new(false)];
        let none: [FakeIn; 0] = [];
        assert!(matches!(
            Mux::new(cells.each_ref().map(FakeOut), none),
            Err(ConfigError::LineCount { lines: 0 })
        ));
        let five = [FakeIn(true), FakeIn(true), FakeIn(true), FakeIn(true), FakeIn(true)];
        assert!(matches!(
            Mux::new(cells.each_ref().map(FakeOut), five),
            Err(ConfigError::LineCount { lines: 5 })
        ));
    }

    #[test]
    fn pin_errors_name_the_line() {
        let cells = [Cell::new(false), Cell::new(false), Cell::new(false), Cell::new(false)];
        let mut mux = Mux::new(cells.each_ref().map(FakeOut), [BrokenIn, BrokenIn]).unwrap();
        assert_eq!(
            mux.read_outputs(),
            Err(MuxError::Sense { line: 0, kind: ErrorKind::Other })
        );

        let mut mux = Mux::new([StuckLow, StuckLow, StuckLow, StuckLow], [FakeIn(true)]).unwrap();
        assert_eq!(mux.set_address(Address::new(0b0000).unwrap()), Ok(()));
        assert_eq!(
            mux.set_address(Address::new(0b0100).unwrap()),
            Err(MuxError::Select { line: 2, kind: ErrorKind::Other })
        );
    }

    #[test]
    fn release_hands_the_pins_back() {
        let cells = [Cell::new(false), Cell::new(false), Cell::new(false), Cell::new(false)];
        let mut mux = Mux::new(cells.each_ref().map(FakeOut), [FakeIn(false), FakeIn(true)]).unwrap();
        mux.set_address(Address::new(0b1111).unwrap()).unwrap();

        let (select, outputs) = mux.release();
        assert_eq!(select.len(), 4);
        assert!(cells.iter().all(|c| c.get()));
        assert_eq!(outputs.map(|pin| pin.0), [false, true]);
    }

    #[test]
    fn sample_masks_to_four_lines() {
        assert_eq!(Sample::from_bits(0xFF).bits(), 0x0F);
        assert!(Sample::from_bits(0).is_active(2));
    }
}
