//! Transports which carry command and data bytes to the PCD8544.
//!
//! The chip's serial interface clocks in one byte at a time, most significant bit first, while
//! the active-low /SCE line is held low. The D/C line, sampled on the last bit of each byte,
//! decides whether the byte is a command (low) or display data (high).

use hal::blocking::delay::DelayMs;

pub trait DisplayInterface {
    type Error;

    /// Pulse the /RES line low for `ms` milliseconds. The chip must be reset before it accepts
    /// any command.
    fn reset<D>(&mut self, delay: &mut D, ms: u8) -> Result<(), Self::Error>
    where
        D: DelayMs<u8>;
    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error>;
    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}

pub mod spi {
    //! The SPI interface drives the serial bus with a hardware SPI master. The master must be
    //! configured for SPI mode 0 at no more than 4 MHz; MISO is unused. /SCE is driven per byte
    //! by this interface so that a desynchronized chip recovers on the next transfer.

    use hal::blocking::delay::DelayMs;

    use super::DisplayInterface;

    /// Errors of the SPI transport.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum Error<SpiE, PinE> {
        /// The SPI master failed.
        Spi(SpiE),
        /// A GPIO pin failed.
        Pin(PinE),
    }

    pub struct SpiInterface<SPI, DC, RST, SCE> {
        /// The SPI master device connected to SCLK and SDIN of the PCD8544.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin.
        dc: DC,
        /// A GPIO output pin connected to the active-low /RES pin.
        rst: RST,
        /// A GPIO output pin connected to the active-low /SCE (chip enable) pin.
        sce: SCE,
    }

    impl<SPI, DC, RST, SCE, PinE> SpiInterface<SPI, DC, RST, SCE>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: hal::digital::v2::OutputPin<Error = PinE>,
        RST: hal::digital::v2::OutputPin<Error = PinE>,
        SCE: hal::digital::v2::OutputPin<Error = PinE>,
    {
        /// Create a new SPI interface to communicate with the display driver. `spi` is the SPI
        /// master device, and `dc`, `rst` and `sce` are the GPIO output pins connected to the
        /// D/C, /RES and /SCE pins of the PCD8544.
        pub fn new(spi: SPI, dc: DC, rst: RST, sce: SCE) -> Self {
            Self { spi, dc, rst, sce }
        }

        /// Give back the SPI master and the pins.
        pub fn release(self) -> (SPI, DC, RST, SCE) {
            (self.spi, self.dc, self.rst, self.sce)
        }

        fn transfer(&mut self, buf: &[u8]) -> Result<(), Error<SPI::Error, PinE>> {
            for byte in buf {
                self.sce.set_low().map_err(Error::Pin)?;
                self.spi.write(&[*byte]).map_err(Error::Spi)?;
                self.sce.set_high().map_err(Error::Pin)?;
            }
            Ok(())
        }
    }

    impl<SPI, DC, RST, SCE, PinE> DisplayInterface for SpiInterface<SPI, DC, RST, SCE>
    where
        SPI: hal::blocking::spi::Write<u8>,
        DC: hal::digital::v2::OutputPin<Error = PinE>,
        RST: hal::digital::v2::OutputPin<Error = PinE>,
        SCE: hal::digital::v2::OutputPin<Error = PinE>,
    {
        type Error = Error<SPI::Error, PinE>;

        fn reset<D>(&mut self, delay: &mut D, ms: u8) -> Result<(), Self::Error>
        where
            D: DelayMs<u8>,
        {
            self.sce.set_high().map_err(Error::Pin)?;
            self.rst.set_low().map_err(Error::Pin)?;
            delay.delay_ms(ms);
            self.rst.set_high().map_err(Error::Pin)
        }

        fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
            self.dc.set_low().map_err(Error::Pin)?;
            self.transfer(&[cmd])
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            self.dc.set_high().map_err(Error::Pin)?;
            self.transfer(buf)
        }
    }

}

pub mod bitbang {
    //! The bit-bang interface toggles five GPIO pins in software, for boards where no SPI master
    //! is free. Each byte is shifted out most significant bit first: SDIN is set up while SCLK is
    //! low and the chip samples it on the rising edge of SCLK.

    use hal::blocking::delay::DelayMs;
    use hal::digital::v2::OutputPin;

    use super::DisplayInterface;

    pub struct BitBangInterface<SCLK, SDIN, DC, RST, SCE> {
        sclk: SCLK,
        sdin: SDIN,
        dc: DC,
        rst: RST,
        sce: SCE,
    }

    impl<SCLK, SDIN, DC, RST, SCE, E> BitBangInterface<SCLK, SDIN, DC, RST, SCE>
    where
        SCLK: OutputPin<Error = E>,
        SDIN: OutputPin<Error = E>,
        DC: OutputPin<Error = E>,
        RST: OutputPin<Error = E>,
        SCE: OutputPin<Error = E>,
    {
        /// Create a bit-bang interface from the pins connected to SCLK, SDIN, D/C, /RES and /SCE.
        pub fn new(sclk: SCLK, sdin: SDIN, dc: DC, rst: RST, sce: SCE) -> Self {
            Self {
                sclk,
                sdin,
                dc,
                rst,
                sce,
            }
        }

        /// Give back the pins, in constructor order.
        pub fn release(self) -> (SCLK, SDIN, DC, RST, SCE) {
            (self.sclk, self.sdin, self.dc, self.rst, self.sce)
        }

        fn shift_out(&mut self, byte: u8) -> Result<(), E> {
            self.sce.set_low()?;
            for bit in (0..8).rev() {
                if byte & (1 << bit) != 0 {
                    self.sdin.set_high()?;
                } else {
                    self.sdin.set_low()?;
                }
                self.sclk.set_high()?;
                self.sclk.set_low()?;
            }
            self.sce.set_high()
        }
    }

    impl<SCLK, SDIN, DC, RST, SCE, E> DisplayInterface for BitBangInterface<SCLK, SDIN, DC, RST, SCE>
    where
        SCLK: OutputPin<Error = E>,
        SDIN: OutputPin<Error = E>,
        DC: OutputPin<Error = E>,
        RST: OutputPin<Error = E>,
        SCE: OutputPin<Error = E>,
    {
        type Error = E;

        fn reset<D>(&mut self, delay: &mut D, ms: u8) -> Result<(), E>
        where
            D: DelayMs<u8>,
        {
            self.sclk.set_low()?;
            self.sce.set_high()?;
            self.rst.set_low()?;
            delay.delay_ms(ms);
            self.rst.set_high()
        }

        fn send_command(&mut self, cmd: u8) -> Result<(), E> {
            self.dc.set_low()?;
            self.shift_out(cmd)
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), E> {
            self.dc.set_high()?;
            for byte in buf {
                self.shift_out(*byte)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::interface::test_spy::{Level, MockDelay, MockPin, PinLog};

        fn interface(
            log: &PinLog,
        ) -> BitBangInterface<MockPin, MockPin, MockPin, MockPin, MockPin> {
            BitBangInterface::new(
                MockPin::new("sclk", log),
                MockPin::new("sdin", log),
                MockPin::new("dc", log),
                MockPin::new("rst", log),
                MockPin::new("sce", log),
            )
        }

        /// Replay the pin log the way the chip sees it: latch SDIN on every rising SCLK edge
        /// while /SCE is low, and report each completed byte with the D/C level.
        fn decode(log: &PinLog) -> Vec<(bool, u8)> {
            let mut out = Vec::new();
            let (mut sdin, mut dc, mut sce) = (false, false, true);
            let (mut shift, mut bits) = (0u8, 0);
            for (pin, level) in log.borrow().iter() {
                let high = *level == Level::High;
                match *pin {
                    "sdin" => sdin = high,
                    "dc" => dc = high,
                    "sce" => {
                        assert!(bits == 0, "/SCE released mid-byte");
                        sce = high;
                    }
                    "sclk" if high && !sce => {
                        shift = shift << 1 | sdin as u8;
                        bits += 1;
                        if bits == 8 {
                            out.push((dc, shift));
                            bits = 0;
                        }
                    }
                    _ => {}
                }
            }
            out
        }

        #[test]
        fn command_msb_first() {
            let log = PinLog::default();
            let mut iface = interface(&log);
            iface.send_command(0b1011_0001).unwrap();
            assert_eq!(decode(&log), vec![(false, 0b1011_0001)]);
        }

        #[test]
        fn data_bytes_framed_individually() {
            let log = PinLog::default();
            let mut iface = interface(&log);
            iface.send_data(&[0x01, 0x80, 0xA5]).unwrap();
            assert_eq!(decode(&log), vec![(true, 0x01), (true, 0x80), (true, 0xA5)]);
            let enables = log
                .borrow()
                .iter()
                .filter(|(pin, level)| *pin == "sce" && *level == Level::Low)
                .count();
            assert_eq!(enables, 3);
        }

        #[test]
        fn reset_pulse() {
            let log = PinLog::default();
            let mut iface = interface(&log);
            let mut delay = MockDelay::new(&log);
            iface.reset(&mut delay, 100).unwrap();
            let rst: Vec<_> = log
                .borrow()
                .iter()
                .filter(|(pin, _)| *pin == "rst" || *pin == "delay")
                .cloned()
                .collect();
            assert_eq!(
                rst,
                vec![
                    ("rst", Level::Low),
                    ("delay", Level::Ms(100)),
                    ("rst", Level::High)
                ]
            );
        }
    }
}
