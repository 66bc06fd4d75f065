//! The main API to the display driver. `Display` owns the framebuffer and the transport, brings
//! the chip up, and copies the framebuffer into display RAM on `flush`.

mod draw;

use hal::blocking::delay::DelayMs;
use itertools::iproduct;

use crate::command::consts::*;
use crate::command::*;
use crate::config::Config;
use crate::error::Error;
use crate::framebuffer::Framebuffer;
use crate::interface;

/// A framebuffer with the geometry of the PCD8544 display RAM.
pub type DisplayBuffer = Framebuffer<{ NUM_PIXEL_COLS as usize }, { NUM_BANKS as usize }>;

/// Where the display is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    /// Constructed, but `init` has not completed. Nothing has been sent, or the last `init`
    /// failed part way.
    Uninitialized,
    /// Initialized and powered.
    Ready,
    /// Initialized, but powered down with `set_power(false)`. Display RAM is retained, and drawing
    /// and flushing still work; the glass shows nothing until `set_power(true)`.
    PoweredDown,
}

/// A driver for a PCD8544 display.
pub struct Display<DI>
where
    DI: interface::DisplayInterface,
{
    iface: DI,
    framebuffer: DisplayBuffer,
    /// Mirror of the chip's RAM address pointer as (column, bank).
    cursor: (u8, u8),
    initialized: bool,
    power: PowerMode,
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Construct a new display driver for a display connected to the interface `iface`. The
    /// framebuffer starts clear, and nothing is sent until `init`.
    pub fn new(iface: DI) -> Self {
        Display {
            iface,
            framebuffer: DisplayBuffer::new(),
            cursor: (0, 0),
            initialized: false,
            power: PowerMode::Active,
        }
    }

    /// Destroy the driver and give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }

    /// Reset and initialize the display with a config, then clear its RAM. `delay` times the
    /// reset pulse.
    pub fn init<D>(&mut self, config: Config, delay: &mut D) -> Result<(), Error<DI::Error>>
    where
        D: DelayMs<u8>,
    {
        config.check::<DI::Error>()?;
        self.initialized = false;
        self.power = PowerMode::Active;
        self.bring_up(config, delay)?;
        self.initialized = true;
        #[cfg(feature = "defmt")]
        defmt::debug!("pcd8544: initialized with {}", config);
        Ok(())
    }

    fn bring_up<D>(&mut self, config: Config, delay: &mut D) -> Result<(), Error<DI::Error>>
    where
        D: DelayMs<u8>,
    {
        self.iface
            .reset(delay, config.reset_pulse_ms)
            .map_err(Error::Interface)?;
        self.function_set(InstructionSet::Extended)?;
        config.send(&mut self.iface)?;
        self.function_set(InstructionSet::Basic)?;
        Command::SetDisplayMode(DisplayMode::AllSegmentsOn).send(&mut self.iface)?;
        Command::Nop.send(&mut self.iface)?;
        Command::SetDisplayMode(DisplayMode::Normal).send(&mut self.iface)?;
        self.home()?;
        self.zero_ram()?;
        self.home()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> DisplayState {
        match (self.initialized, self.power) {
            (false, _) => DisplayState::Uninitialized,
            (true, PowerMode::Active) => DisplayState::Ready,
            (true, PowerMode::PowerDown) => DisplayState::PoweredDown,
        }
    }

    /// Send a raw command byte. A function set byte also updates the mirrored power mode, so
    /// `state` and later function sets agree with the chip.
    pub fn send_command(&mut self, cmd: u8) -> Result<(), Error<DI::Error>> {
        self.iface.send_command(cmd).map_err(Error::Interface)?;
        if cmd & 0xF8 == 0x20 {
            self.power = if cmd & 0x04 != 0 {
                PowerMode::PowerDown
            } else {
                PowerMode::Active
            };
        }
        Ok(())
    }

    /// Send raw display data at the cursor. The chip advances its RAM pointer by one column per
    /// byte, moving on to the next bank after the last column, and so does the cursor.
    pub fn send_data(&mut self, data: &[u8]) -> Result<(), Error<DI::Error>> {
        self.iface.send_data(data).map_err(Error::Interface)?;
        let cells = NUM_PIXEL_COLS as usize * NUM_BANKS as usize;
        let (x, y) = self.cursor;
        let pos = (y as usize * NUM_PIXEL_COLS as usize + x as usize + data.len()) % cells;
        self.cursor = (
            (pos % NUM_PIXEL_COLS as usize) as u8,
            (pos / NUM_PIXEL_COLS as usize) as u8,
        );
        Ok(())
    }

    /// Send a function set command selecting `set`, keeping the current power mode.
    fn function_set(&mut self, set: InstructionSet) -> Result<(), Error<DI::Error>> {
        Command::FunctionSet(self.power, IncrementAxis::Horizontal, set).send(&mut self.iface)
    }

    /// Point the RAM address at the origin without touching the instruction set.
    fn home(&mut self) -> Result<(), Error<DI::Error>> {
        Command::SetColumnAddress(0).send(&mut self.iface)?;
        Command::SetBankAddress(0).send(&mut self.iface)?;
        self.cursor = (0, 0);
        Ok(())
    }

    /// Power the display down (`false`) or back up (`true`). Display RAM survives power down.
    pub fn set_power(&mut self, on: bool) -> Result<(), Error<DI::Error>> {
        let power = if on {
            PowerMode::Active
        } else {
            PowerMode::PowerDown
        };
        Command::FunctionSet(power, IncrementAxis::Horizontal, InstructionSet::Basic)
            .send(&mut self.iface)?;
        self.power = power;
        #[cfg(feature = "defmt")]
        defmt::debug!("pcd8544: power {}", on);
        Ok(())
    }

    /// Control the display mode (blank, normal, all segments on, or inverse video).
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), Error<DI::Error>> {
        Command::SetDisplayMode(mode).send(&mut self.iface)
    }

    /// Control the contrast by setting the operating voltage, 0-127.
    pub fn set_contrast(&mut self, vop: u8) -> Result<(), Error<DI::Error>> {
        if vop > VOP_MAX {
            return Err(Error::InvalidArgument);
        }
        self.function_set(InstructionSet::Extended)?;
        Command::SetVop(vop).send(&mut self.iface)?;
        self.function_set(InstructionSet::Basic)
    }

    /// The cursor as (column, bank): where the next data byte will land in display RAM.
    pub fn cursor(&self) -> (u8, u8) {
        self.cursor
    }

    /// Move the RAM address pointer to column `x` and bank `y`, wrapped into range. This also
    /// selects the basic instruction set.
    pub fn set_cursor(&mut self, x: u8, y: u8) -> Result<(), Error<DI::Error>> {
        let x = x % NUM_PIXEL_COLS;
        let y = y % NUM_BANKS;
        self.function_set(InstructionSet::Basic)?;
        Command::SetColumnAddress(x).send(&mut self.iface)?;
        Command::SetBankAddress(y).send(&mut self.iface)?;
        self.cursor = (x, y);
        Ok(())
    }

    /// Write zeros over the whole display RAM, then return the cursor to the origin. The
    /// framebuffer is not touched.
    pub fn zero_ram(&mut self) -> Result<(), Error<DI::Error>> {
        for bank in 0..NUM_BANKS {
            Command::SetBankAddress(bank).send(&mut self.iface)?;
            self.cursor.1 = bank;
            self.send_data(&[0; NUM_PIXEL_COLS as usize])?;
        }
        self.set_cursor(0, 0)
    }

    /// Clear the framebuffer and the display RAM.
    pub fn clear_screen(&mut self) -> Result<(), Error<DI::Error>> {
        self.framebuffer.clear();
        self.zero_ram()
    }

    /// Copy the framebuffer into display RAM, one byte per bank and column. Each byte is
    /// addressed explicitly, so the result does not depend on where the cursor was.
    pub fn flush(&mut self) -> Result<(), Error<DI::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("pcd8544: flush");
        for (bank, column) in iproduct!(0..NUM_BANKS, 0..NUM_PIXEL_COLS) {
            self.set_cursor(column, bank)?;
            let byte = self.framebuffer.bank_byte(bank as usize, column as usize);
            self.send_data(&[byte])?;
        }
        Ok(())
    }

    /// The framebuffer.
    pub fn framebuffer(&self) -> &DisplayBuffer {
        &self.framebuffer
    }

    /// The framebuffer, for drawing code that works on a bare `Framebuffer`.
    pub fn framebuffer_mut(&mut self) -> &mut DisplayBuffer {
        &mut self.framebuffer
    }
}
