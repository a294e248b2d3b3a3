//! embedded-hal binding for the LLCC68 interface layer
//!
//! Implements the `llcc68-hal` capability traits on top of `embedded-hal`
//! 1.0, so any chip HAL exposing a blocking `SpiBus` and digital pins
//! (embassy-rp, embassy-stm32, rp2040-hal, ...) can drive the transceiver:
//!
//! - [`spi::EmbeddedSpiHost`] - `SpiBus` plus a manually driven chip select
//! - [`gpio::EmbeddedOutput`], [`gpio::EmbeddedInput`] - digital pins
//! - [`log::DefmtSink`] - log sink over `defmt` (feature `defmt`)
//!
//! Bus and pin setup (pin muxing, clock rate, mode) happens when the chip
//! HAL peripherals are constructed, before they are handed to this crate.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
#[cfg(feature = "defmt")]
pub mod log;
pub mod spi;

pub use gpio::{EmbeddedInput, EmbeddedOutput};
pub use spi::{EmbeddedSpiHost, SpiHostError};
