//! Error type shared by the command encoder and the display driver.

/// Errors reported by the driver. `E` is the error type of the `DisplayInterface` in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport failed to put a byte on the bus.
    Interface(E),
    /// A command argument was outside the range the controller accepts. Nothing was
    /// transmitted.
    InvalidArgument,
}
