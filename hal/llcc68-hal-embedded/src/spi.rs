//! SPI host over an embedded-hal `SpiBus`
//!
//! embedded-hal buses come out of the chip HAL already clocked and muxed,
//! so "bus bring-up" here only tracks state and parks chip select high.
//! One chip-select pin means one device slot, and its clock and mode are
//! whatever the chip HAL was given: `add_device` only accepts the
//! [`DeviceConfig`] the host was built for.
//!
//! Chip select is driven by hand around each transaction and released even
//! when the bus reports an error.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use llcc68_hal::spi::{BusConfig, DeviceConfig, SpiHost, Transaction};

/// Errors from [`EmbeddedSpiHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiHostError<B, P> {
    /// The SPI bus rejected the transfer
    Bus(B),
    /// The chip-select pin could not be driven
    ChipSelect(P),
    /// Call out of order (bus not up, already up, or still has a device)
    InvalidState,
    /// The only chip-select slot is already claimed
    NoFreeSlot,
    /// Buffers do not match the transaction bit count
    LengthMismatch,
    /// Requested clock or mode differs from what the bus was set up with
    ConfigMismatch,
}

/// Claimed chip-select slot
#[derive(Debug)]
pub struct DeviceSlot {
    config: DeviceConfig,
}

impl DeviceSlot {
    /// Parameters the slot was claimed with
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }
}

/// [`SpiHost`] built from a bus and one chip-select pin
pub struct EmbeddedSpiHost<SPI, CS> {
    spi: SPI,
    cs: CS,
    device: DeviceConfig,
    bus: Option<BusConfig>,
    claimed: bool,
}

impl<SPI, CS> EmbeddedSpiHost<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Wrap a configured bus and its chip-select pin
    ///
    /// `device` must describe the clock and mode `spi` was constructed
    /// with; the binding cannot reprogram the peripheral.
    pub fn new(spi: SPI, cs: CS, device: DeviceConfig) -> Self {
        Self {
            spi,
            cs,
            device,
            bus: None,
            claimed: false,
        }
    }

    /// Check if the bus has been brought up
    pub fn is_bus_up(&self) -> bool {
        self.bus.is_some()
    }

    /// Give back the bus and chip-select pin
    pub fn into_inner(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> SpiHost for EmbeddedSpiHost<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = SpiHostError<SPI::Error, CS::Error>;
    type Device = DeviceSlot;

    fn initialize_bus(&mut self, config: &BusConfig) -> Result<(), Self::Error> {
        if self.bus.is_some() {
            return Err(SpiHostError::InvalidState);
        }
        self.cs.set_high().map_err(SpiHostError::ChipSelect)?;
        self.bus = Some(*config);
        Ok(())
    }

    fn free_bus(&mut self) -> Result<(), Self::Error> {
        if self.bus.is_none() || self.claimed {
            return Err(SpiHostError::InvalidState);
        }
        self.bus = None;
        Ok(())
    }

    fn add_device(&mut self, config: &DeviceConfig) -> Result<DeviceSlot, Self::Error> {
        if self.bus.is_none() {
            return Err(SpiHostError::InvalidState);
        }
        if self.claimed {
            return Err(SpiHostError::NoFreeSlot);
        }
        if *config != self.device {
            return Err(SpiHostError::ConfigMismatch);
        }
        self.claimed = true;
        Ok(DeviceSlot { config: *config })
    }

    fn remove_device(&mut self, _device: DeviceSlot) -> Result<(), Self::Error> {
        self.claimed = false;
        Ok(())
    }

    fn transmit(
        &mut self,
        _device: &mut DeviceSlot,
        transaction: Transaction<'_>,
    ) -> Result<(), Self::Error> {
        let bytes = transaction.len_bytes();
        let tx_len = transaction.tx.as_ref().map_or(0, |tx| tx.len());
        let rx_len = transaction.rx.as_ref().map_or(0, |rx| rx.len());
        if tx_len.max(rx_len) != bytes || bytes == 0 {
            return Err(SpiHostError::LengthMismatch);
        }

        self.cs.set_low().map_err(SpiHostError::ChipSelect)?;

        // SpiBus::transfer clocks max(read, write) words, which is exactly
        // the half-duplex window
        let result = match (transaction.tx, transaction.rx) {
            (Some(tx), Some(rx)) => self.spi.transfer(rx, tx),
            (Some(tx), None) => self.spi.write(tx),
            (None, Some(rx)) => self.spi.read(rx),
            (None, None) => Ok(()),
        }
        .and_then(|()| self.spi.flush());

        let released = self.cs.set_high();
        result.map_err(SpiHostError::Bus)?;
        released.map_err(SpiHostError::ChipSelect)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType as PinErrorType;
    use embedded_hal::spi::{Error, ErrorKind, ErrorType};
    use std::vec::Vec;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        CsLow,
        CsHigh,
        Write(Vec<u8>),
        Read(usize),
        Transfer { read: usize, write: Vec<u8> },
        Flush,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    impl Error for BusFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    struct MockBus<'a> {
        log: &'a RefCell<Vec<Op>>,
        fail: bool,
    }

    impl ErrorType for MockBus<'_> {
        type Error = BusFault;
    }

    impl MockBus<'_> {
        fn record(&mut self, op: Op) -> Result<(), BusFault> {
            self.log.borrow_mut().push(op);
            if self.fail {
                Err(BusFault)
            } else {
                Ok(())
            }
        }
    }

    impl SpiBus for MockBus<'_> {
        fn read(&mut self, words: &mut [u8]) -> Result<(), BusFault> {
            words.fill(0x42);
            self.record(Op::Read(words.len()))
        }

        fn write(&mut self, words: &[u8]) -> Result<(), BusFault> {
            self.record(Op::Write(words.to_vec()))
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), BusFault> {
            read.fill(0x42);
            self.record(Op::Transfer {
                read: read.len(),
                write: write.to_vec(),
            })
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), BusFault> {
            let write = words.to_vec();
            self.transfer(words, &write)
        }

        fn flush(&mut self) -> Result<(), BusFault> {
            self.record(Op::Flush)
        }
    }

    struct MockCs<'a> {
        log: &'a RefCell<Vec<Op>>,
    }

    impl PinErrorType for MockCs<'_> {
        type Error = Infallible;
    }

    impl OutputPin for MockCs<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push(Op::CsLow);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.log.borrow_mut().push(Op::CsHigh);
            Ok(())
        }
    }

    fn bus_config() -> BusConfig {
        BusConfig {
            miso: 34,
            mosi: 35,
            sclk: 33,
        }
    }

    fn open_host<'a>(
        log: &'a RefCell<Vec<Op>>,
        fail: bool,
    ) -> (EmbeddedSpiHost<MockBus<'a>, MockCs<'a>>, DeviceSlot) {
        let mut host = EmbeddedSpiHost::new(
            MockBus { log, fail },
            MockCs { log },
            DeviceConfig::default(),
        );
        host.initialize_bus(&bus_config()).unwrap();
        let slot = host.add_device(&DeviceConfig::default()).unwrap();
        log.borrow_mut().clear();
        (host, slot)
    }

    #[test]
    fn test_transfer_wraps_chip_select() {
        let log = RefCell::new(Vec::new());
        let (mut host, mut slot) = open_host(&log, false);
        let mut rx = [0u8; 1];

        host.transmit(
            &mut slot,
            Transaction {
                length_bits: 16,
                tx: Some(&[0x80, 0x00]),
                rx: Some(&mut rx),
            },
        )
        .unwrap();

        assert_eq!(
            *log.borrow(),
            [
                Op::CsLow,
                Op::Transfer {
                    read: 1,
                    write: std::vec![0x80, 0x00]
                },
                Op::Flush,
                Op::CsHigh,
            ]
        );
        assert_eq!(rx, [0x42]);
    }

    #[test]
    fn test_write_and_read_only() {
        let log = RefCell::new(Vec::new());
        let (mut host, mut slot) = open_host(&log, false);

        host.transmit(
            &mut slot,
            Transaction {
                length_bits: 8,
                tx: Some(&[0xC0]),
                rx: None,
            },
        )
        .unwrap();
        let mut rx = [0u8; 2];
        host.transmit(
            &mut slot,
            Transaction {
                length_bits: 16,
                tx: None,
                rx: Some(&mut rx),
            },
        )
        .unwrap();

        let ops = log.borrow();
        assert_eq!(ops[1], Op::Write(std::vec![0xC0]));
        assert_eq!(ops[5], Op::Read(2));
    }

    #[test]
    fn test_bus_error_releases_chip_select() {
        let log = RefCell::new(Vec::new());
        let (mut host, mut slot) = open_host(&log, true);

        let result = host.transmit(
            &mut slot,
            Transaction {
                length_bits: 8,
                tx: Some(&[0xC0]),
                rx: None,
            },
        );

        assert_eq!(result, Err(SpiHostError::Bus(BusFault)));
        assert_eq!(log.borrow().last(), Some(&Op::CsHigh));
    }

    #[test]
    fn test_length_mismatch() {
        let log = RefCell::new(Vec::new());
        let (mut host, mut slot) = open_host(&log, false);

        let result = host.transmit(
            &mut slot,
            Transaction {
                length_bits: 32,
                tx: Some(&[0xC0]),
                rx: None,
            },
        );

        assert_eq!(result, Err(SpiHostError::LengthMismatch));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_slot_lifecycle() {
        let log = RefCell::new(Vec::new());
        let mut host = EmbeddedSpiHost::new(
            MockBus { log: &log, fail: false },
            MockCs { log: &log },
            DeviceConfig::default(),
        );

        // No device before the bus is up
        assert!(matches!(
            host.add_device(&DeviceConfig::default()),
            Err(SpiHostError::InvalidState)
        ));

        host.initialize_bus(&bus_config()).unwrap();
        assert!(host.is_bus_up());
        assert_eq!(host.initialize_bus(&bus_config()), Err(SpiHostError::InvalidState));

        let slot = host.add_device(&DeviceConfig::default()).unwrap();
        assert_eq!(slot.config().clock_hz, 1_000_000);
        assert!(matches!(
            host.add_device(&DeviceConfig::default()),
            Err(SpiHostError::NoFreeSlot)
        ));

        // Bus cannot be freed while the slot is claimed
        assert_eq!(host.free_bus(), Err(SpiHostError::InvalidState));
        host.remove_device(slot).unwrap();
        host.free_bus().unwrap();
        assert!(!host.is_bus_up());
    }

    #[test]
    fn test_device_config_must_match_bus() {
        let log = RefCell::new(Vec::new());
        let mut host = EmbeddedSpiHost::new(
            MockBus { log: &log, fail: false },
            MockCs { log: &log },
            DeviceConfig {
                clock_hz: 9_000_000,
                ..DeviceConfig::default()
            },
        );
        host.initialize_bus(&bus_config()).unwrap();

        // Bus was built for 9 MHz, a 1 MHz slot cannot be honored
        assert!(matches!(
            host.add_device(&DeviceConfig::default()),
            Err(SpiHostError::ConfigMismatch)
        ));
        // A rejected claim leaves the slot free
        let slot = host
            .add_device(&DeviceConfig {
                clock_hz: 9_000_000,
                ..DeviceConfig::default()
            })
            .unwrap();
        assert_eq!(slot.config().clock_hz, 9_000_000);
    }
}
