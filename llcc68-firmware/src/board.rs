//! Board wiring
//!
//! LLCC68 module on SPI1 of an RP2040 board. Pin numbers are the RP2040
//! GPIO numbers; `main` takes the matching `PIN_n` peripherals.

use embassy_rp::gpio::{Input, Output};
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{self, Blocking, Spi};
use llcc68_hal::spi::{Phase, Polarity};
use llcc68_hal_embedded::{EmbeddedInput, EmbeddedOutput, EmbeddedSpiHost};
use llcc68_interface::config::{InterfaceConfig, SpiPins};

/// GPIO pins on the RP2040
pub const GPIO_COUNT: u8 = 30;

pub const PIN_SCLK: u8 = 10;
pub const PIN_MOSI: u8 = 11;
pub const PIN_MISO: u8 = 12;
pub const PIN_CS: u8 = 13;
pub const PIN_RESET: u8 = 14;
pub const PIN_BUSY: u8 = 15;
pub const PIN_DIO1: u8 = 16;

/// SPI host driving the transceiver
pub type RadioHost = EmbeddedSpiHost<Spi<'static, SPI1, Blocking>, Output<'static>>;

/// Reset output line
pub type RadioReset = EmbeddedOutput<Output<'static>>;

/// Busy input line
pub type RadioBusy = EmbeddedInput<Input<'static>>;

/// Interface binding for this board
pub fn interface_config() -> InterfaceConfig {
    InterfaceConfig {
        spi: SpiPins {
            miso: PIN_MISO,
            mosi: PIN_MOSI,
            sclk: PIN_SCLK,
            cs: PIN_CS,
        },
        reset: PIN_RESET,
        busy: PIN_BUSY,
        dio1: Some(PIN_DIO1),
        ..InterfaceConfig::default()
    }
}

/// Peripheral settings matching the interface binding
pub fn spi_config(config: &InterfaceConfig) -> spi::Config {
    let (polarity, phase): (Polarity, Phase) = config.mode.into();

    let mut spi_config = spi::Config::default();
    spi_config.frequency = config.clock_hz;
    spi_config.polarity = match polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    spi_config.phase = match phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    spi_config
}
