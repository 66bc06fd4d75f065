//! Driver library for the Philips PCD8544 monochrome LCD controller, as found on the Nokia 5110
//! display module.
//!
//! Drawing happens in an off-screen framebuffer held by `Display`; nothing reaches the glass until
//! `Display::flush` copies the framebuffer into the controller's display RAM.
//!
//! The driver is synchronous and keeps all of its state behind `&mut self`. Sharing one display
//! between threads or interrupt handlers requires external serialization.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate embedded_hal as hal;


pub mod bitmap;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod interface;

// Re-exports for primary API.
pub use bitmap::Bitmap;
pub use command::{consts, BiasMode, DisplayMode, TemperatureCoefficient};
pub use config::Config;
pub use display::{Display, DisplayState};
pub use error::Error;
pub use framebuffer::Framebuffer;
pub use interface::bitbang::BitBangInterface;
pub use interface::spi::SpiInterface;
pub use interface::DisplayInterface;
