//! LLCC68 interface layer
//!
//! Transaction and signaling layer between an LLCC68 LoRa protocol driver
//! and the platform's SPI bus and GPIO lines:
//!
//! - [`transport::SpiTransport`] - half-duplex SPI exchanges on one
//!   chip-select slot
//! - [`gpio::ResetLine`], [`gpio::BusyLine`] - active-low reset output and
//!   busy input
//! - [`gpio::IrqLine`] - level-triggered DIO1 wake-ups
//! - [`delay::delay_ms`] - yielding millisecond delay
//! - [`diag::Diagnostics`] - bounded, tagged diagnostic lines
//! - [`event::EventDispatcher`] - IRQ event to diagnostic mapping
//!
//! Command encoding and the radio state machine live in the upper driver;
//! this crate only moves bytes and toggles lines.
//!
//! # Usage
//!
//! ```ignore
//! let mut transport = SpiTransport::from_config(host, &config);
//! let mut reset = ResetLine::new(reset_pin);
//! let mut busy = BusyLine::new(busy_pin);
//!
//! reset.init()?;
//! busy.init()?;
//! transport.open()?;
//!
//! reset.pulse(&mut embassy_time::Delay, RESET_HOLD_MS).await?;
//! while busy.is_busy() {
//!     delay_ms(1).await;
//! }
//!
//! let mut status = [0u8; 2];
//! transport.exchange(&[0xC0, 0x00], &mut status)?; // GetStatus
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod delay;
pub mod diag;
pub mod error;
pub mod event;
pub mod gpio;
pub mod transport;

pub use config::InterfaceConfig;
pub use delay::delay_ms;
pub use diag::Diagnostics;
pub use error::{ConfigError, GpioError, TransportError};
pub use event::{EventDispatcher, EventRecord, IrqEvent};
pub use gpio::{BusyLine, IrqLine, ResetLine};
pub use transport::SpiTransport;
