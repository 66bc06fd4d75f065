//! The command set for the PCD8544.
//!
//! Note 1: The display RAM of the PCD8544 is arranged in 6 banks and 84 columns, where each
//! column of a bank is one byte driving 8 vertically-stacked pixels, least significant bit on
//! top. Anywhere there is a "bank" address, it refers to a horizontal strip of 8 pixel rows.
//!
//! Note 2: The chip has two instruction sets sharing the same opcode space. `SetColumnAddress`,
//! `SetBankAddress` and `SetDisplayMode` are only understood in the basic set, while `SetVop`,
//! `SetBias` and `SetTemperatureCoefficient` are only understood in the extended set. The active
//! set is selected by `FunctionSet`.

use crate::error::Error;
use crate::interface::DisplayInterface;

pub mod consts {
    pub const NUM_PIXEL_COLS: u8 = 84;
    pub const NUM_PIXEL_ROWS: u8 = 48;
    pub const NUM_BANKS: u8 = NUM_PIXEL_ROWS / 8;
    pub const PIXEL_COL_MAX: u8 = NUM_PIXEL_COLS - 1;
    pub const PIXEL_ROW_MAX: u8 = NUM_PIXEL_ROWS - 1;
    pub const BANK_MAX: u8 = NUM_BANKS - 1;
    pub const VOP_MAX: u8 = 127;
}

use self::consts::*;

/// Whether the chip is powered down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// The chip is active.
    Active,
    /// The chip is powered down: the LCD drivers are off, but display RAM is retained.
    PowerDown,
}

/// The address increment orientation when writing image data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IncrementAxis {
    /// The column address will increment as image data is written, filling a bank from left to
    /// right and then moving on to the next bank.
    Horizontal,
    /// The bank address will increment as image data is written, filling a column from top to
    /// bottom and then moving on to the next column.
    Vertical,
}

/// Which of the two instruction sets is active. (Note 2)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InstructionSet {
    Basic,
    Extended,
}

/// Setting of the display mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// The display is blanked with all segments off.
    Blank,
    /// The display operates normally, showing the image in the display RAM.
    Normal,
    /// All segments are on regardless of the display RAM.
    AllSegmentsOn,
    /// The display shows the image in the display RAM with every pixel inverted.
    Inverse,
}

/// Bias system setting. The names give the recommended multiplex rate for each setting; the
/// 84x48 glass of a Nokia 5110 module is driven at 1:48.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BiasMode {
    Bias1To100,
    Bias1To80,
    Bias1To65,
    Bias1To48,
    Bias1To40,
    Bias1To24,
    Bias1To18,
    Bias1To10,
}

/// Temperature coefficient of the LCD supply voltage, from TC0 (lowest) to TC3 (highest).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureCoefficient {
    TC0,
    TC1,
    TC2,
    TC3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Does nothing.
    Nop,
    /// Set the power mode, the address increment axis, and the active instruction set.
    FunctionSet(PowerMode, IncrementAxis, InstructionSet),
    /// Set the display operating mode. Basic instruction set only.
    SetDisplayMode(DisplayMode),
    /// Set the column address pointer for the next image data write. Range is 0-83. Basic
    /// instruction set only. (Note 1)
    SetColumnAddress(u8),
    /// Set the bank address pointer for the next image data write. Range is 0-5. Basic
    /// instruction set only. (Note 1)
    SetBankAddress(u8),
    /// Set the operating voltage Vop, which is what the display calls contrast. The LCD voltage
    /// is roughly 3.06V + 0.06V * level. Range is 0-127. Extended instruction set only.
    SetVop(u8),
    /// Set the bias system. Extended instruction set only.
    SetBias(BiasMode),
    /// Set the temperature coefficient. Extended instruction set only.
    SetTemperatureCoefficient(TemperatureCoefficient),
}

impl Command {
    /// The byte transmitted for this command, or `None` if an argument is out of range.
    fn encode(self) -> Option<u8> {
        match self {
            Command::Nop => Some(0b0000_0000),
            Command::FunctionSet(power, axis, set) => {
                let pd = match power {
                    PowerMode::Active => 0b000,
                    PowerMode::PowerDown => 0b100,
                };
                let v = match axis {
                    IncrementAxis::Horizontal => 0b000,
                    IncrementAxis::Vertical => 0b010,
                };
                let h = match set {
                    InstructionSet::Basic => 0b000,
                    InstructionSet::Extended => 0b001,
                };
                Some(0b0010_0000 | pd | v | h)
            }
            Command::SetDisplayMode(mode) => Some(
                0b0000_1000
                    | match mode {
                        DisplayMode::Blank => 0b000,
                        DisplayMode::Normal => 0b100,
                        DisplayMode::AllSegmentsOn => 0b001,
                        DisplayMode::Inverse => 0b101,
                    },
            ),
            Command::SetColumnAddress(x) => match x {
                0..=PIXEL_COL_MAX => Some(0b1000_0000 | x),
                _ => None,
            },
            Command::SetBankAddress(y) => match y {
                0..=BANK_MAX => Some(0b0100_0000 | y),
                _ => None,
            },
            Command::SetVop(level) => match level {
                0..=VOP_MAX => Some(0b1000_0000 | level),
                _ => None,
            },
            Command::SetBias(bias) => Some(0b0000_1000 | bias as u8),
            Command::SetTemperatureCoefficient(tc) => Some(0b0000_0100 | tc as u8),
        }
    }

    /// Transmit the command. Out-of-range arguments are rejected before anything is sent.
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: DisplayInterface,
    {
        let cmd = self.encode().ok_or(Error::InvalidArgument)?;
        iface.send_command(cmd).map_err(Error::Interface)
    }
}
