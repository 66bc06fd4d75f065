//! Defines the struct storing the register values that `Display::init` programs into the PCD8544.

use crate::command::*;
use crate::error::Error;
use crate::interface;

/// A configuration for the display. Builder methods offer a declarative way to override the
/// values sent at init time.
///
/// The defaults suit the common red/blue Nokia 5110 breakout boards: bias 1:48 and Vop 49, which
/// puts the LCD voltage at about 3.06V + 49 * 0.06V = 6V.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub(crate) reset_pulse_ms: u8,
    bias: BiasMode,
    vop: u8,
    temperature_coefficient: Option<TemperatureCoefficient>,
}

impl Config {
    /// Create a new configuration with the default settings.
    pub fn new() -> Self {
        Config {
            reset_pulse_ms: 100,
            bias: BiasMode::Bias1To48,
            vop: 49,
            temperature_coefficient: None,
        }
    }

    /// Extend this `Config` to use a different bias system. See `Command::SetBias`.
    pub fn bias(self, bias: BiasMode) -> Self {
        Self { bias, ..self }
    }

    /// Extend this `Config` to use a different operating voltage (contrast), 0-127. Out of range
    /// values make `Display::init` fail before anything is sent. See `Command::SetVop`.
    pub fn contrast(self, vop: u8) -> Self {
        Self { vop, ..self }
    }

    /// Extend this `Config` to explicitly configure the temperature coefficient, which is left
    /// at the chip's power-on default otherwise. See `Command::SetTemperatureCoefficient`.
    pub fn temperature_coefficient(self, tc: TemperatureCoefficient) -> Self {
        Self {
            temperature_coefficient: Some(tc),
            ..self
        }
    }

    /// Extend this `Config` to hold /RES low for `ms` milliseconds during init.
    pub fn reset_pulse_ms(self, ms: u8) -> Self {
        Self {
            reset_pulse_ms: ms,
            ..self
        }
    }

    /// Fail if any register value is out of the range the chip accepts.
    pub(crate) fn check<E>(&self) -> Result<(), Error<E>> {
        if self.vop > consts::VOP_MAX {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }

    /// Transmit the extended instruction set commands which put the display at `iface` into the
    /// configuration encoded in `self`. The extended instruction set must already be active.
    pub(crate) fn send<DI>(&self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: interface::DisplayInterface,
    {
        self.check::<DI::Error>()?;
        Command::SetBias(self.bias).send(iface)?;
        Command::SetVop(self.vop).send(iface)?;
        self.temperature_coefficient
            .map_or(Ok(()), |tc| Command::SetTemperatureCoefficient(tc).send(iface))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
