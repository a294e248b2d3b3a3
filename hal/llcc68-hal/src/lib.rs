//! LLCC68 platform capability traits
//!
//! This crate defines the narrow contract the LLCC68 interface layer needs
//! from a platform: one SPI host with a single chip-select slot, two
//! discrete GPIO lines and a text log channel. Chip or OS specific crates
//! implement these traits; `llcc68-interface` builds the transaction and
//! signaling layer on top of them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Upper driver (command / register map)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  llcc68-interface (transport, lines,    │
//! │  delay, diagnostics, event dispatch)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  llcc68-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  llcc68-hal-embedded (embedded-hal 1.0) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SpiHost`] - Bus bring-up, device slots and transactions
//! - [`gpio::OutputLine`], [`gpio::InputLine`] - Discrete digital lines
//! - [`log::LogSink`] - Text log channel
//!
//! Delays are consumed through `embedded_hal_async::delay::DelayNs` and
//! have no trait of their own here.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod log;
pub mod spi;

pub use gpio::{InputLine, Level, OutputLine};
pub use log::{LogSink, Severity};
pub use spi::{BusConfig, DeviceConfig, SpiHost, Transaction};
