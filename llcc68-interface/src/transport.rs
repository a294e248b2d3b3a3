//! SPI transport
//!
//! Owns one chip-select slot on a shared bus for the lifetime between
//! [`SpiTransport::open`] and [`SpiTransport::close`], and performs
//! half-duplex exchanges on it.
//!
//! # Exchange sizing
//!
//! The LLCC68 clocks a command and its response in one burst with chip
//! select held low. An exchange therefore runs for the longer of the two
//! buffers:
//!
//! ```text
//! tx: 0x1D 0x08 0xAC 0x00 0x00     (ReadRegister, addr, NOP)
//! rx:  st   st   st   st  data     (status bytes, then value)
//!     └──────── 40 clocks ───────┘
//! ```
//!
//! A direction whose buffer is empty is left out of the transaction
//! entirely, so write-only commands never sample MISO and read-only bursts
//! never drive MOSI from caller memory.

use llcc68_hal::spi::{BusConfig, DeviceConfig, SpiHost, Transaction};

use crate::config::InterfaceConfig;
use crate::error::{Stage, TransportError};

/// Clock cycles needed for an exchange of `tx_len` and `rx_len` bytes
///
/// Returns `None` when the count does not fit in 32 bits.
pub fn bit_length(tx_len: usize, rx_len: usize) -> Option<u32> {
    u32::try_from(tx_len.max(rx_len)).ok()?.checked_mul(8)
}

/// Exclusive SPI transport to one transceiver
pub struct SpiTransport<H: SpiHost> {
    host: H,
    bus_config: BusConfig,
    device_config: DeviceConfig,
    bus_up: bool,
    device: Option<H::Device>,
}

impl<H: SpiHost> SpiTransport<H> {
    /// Create a closed transport
    pub fn new(host: H, bus_config: BusConfig, device_config: DeviceConfig) -> Self {
        Self {
            host,
            bus_config,
            device_config,
            bus_up: false,
            device: None,
        }
    }

    /// Create a closed transport from a board binding
    pub fn from_config(host: H, config: &InterfaceConfig) -> Self {
        Self::new(host, config.bus_config(), config.device_config())
    }

    /// Check if a device slot is currently claimed
    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    /// Bring up the bus and claim the device slot
    ///
    /// If the slot cannot be claimed the bus is released again before the
    /// error is returned. Opening an open transport does nothing.
    pub fn open(&mut self) -> Result<(), TransportError<H::Error>> {
        if self.device.is_some() {
            return Ok(());
        }

        if !self.bus_up {
            self.host
                .initialize_bus(&self.bus_config)
                .map_err(|cause| TransportError::Init {
                    stage: Stage::Bus,
                    cause,
                })?;
            self.bus_up = true;
        }

        match self.host.add_device(&self.device_config) {
            Ok(device) => {
                self.device = Some(device);
                Ok(())
            }
            Err(cause) => {
                // Nothing stays claimed after a failed open
                if self.host.free_bus().is_ok() {
                    self.bus_up = false;
                }
                Err(TransportError::Init {
                    stage: Stage::Device,
                    cause,
                })
            }
        }
    }

    /// Release the device slot, then the bus
    ///
    /// Both steps are attempted even if the first one fails; the first
    /// failure is reported. The transport is closed afterwards either way.
    pub fn close(&mut self) -> Result<(), TransportError<H::Error>> {
        let mut failure = None;

        if let Some(device) = self.device.take() {
            if let Err(cause) = self.host.remove_device(device) {
                failure = Some(TransportError::Teardown {
                    stage: Stage::Device,
                    cause,
                });
            }
        }

        if self.bus_up {
            self.bus_up = false;
            if let Err(cause) = self.host.free_bus() {
                failure.get_or_insert(TransportError::Teardown {
                    stage: Stage::Bus,
                    cause,
                });
            }
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Run one half-duplex exchange
    ///
    /// Clocks `8 * max(tx.len(), rx.len())` bits. Empty buffers are not
    /// handed to the platform; two empty buffers cause no bus activity.
    /// On error the contents of `rx` are undefined.
    pub fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<(), TransportError<H::Error>> {
        let device = self.device.as_mut().ok_or(TransportError::NotOpen)?;

        if tx.is_empty() && rx.is_empty() {
            return Ok(());
        }

        let length_bits = bit_length(tx.len(), rx.len()).ok_or(TransportError::TooLong)?;
        let transaction = Transaction {
            length_bits,
            tx: if tx.is_empty() { None } else { Some(tx) },
            rx: if rx.is_empty() { None } else { Some(rx) },
        };

        self.host
            .transmit(device, transaction)
            .map_err(TransportError::Io)
    }

    /// Write-only exchange
    pub fn write(&mut self, tx: &[u8]) -> Result<(), TransportError<H::Error>> {
        self.exchange(tx, &mut [])
    }

    /// Close (best effort) and hand back the platform host
    pub fn release(mut self) -> (H, Result<(), TransportError<H::Error>>) {
        let result = self.close();
        (self.host, result)
    }

    /// Access the platform host
    pub fn host(&self) -> &H {
        &self.host
    }
}
