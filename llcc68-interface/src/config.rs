//! Board binding for the interface layer
//!
//! Pin numbers, clock rate and queue depth are configuration rather than
//! logic. [`InterfaceConfig`] collects them in one place, produces the bus
//! and device descriptors handed to the platform, and checks that no pin is
//! assigned twice.

use heapless::FnvIndexSet;
use llcc68_hal::spi::{BusConfig, DeviceConfig, Mode};

use crate::error::ConfigError;

/// Highest SPI clock the LLCC68 accepts (16 MHz)
pub const MAX_SPI_CLOCK_HZ: u32 = 16_000_000;

/// Default SPI clock (9 MHz)
pub const DEFAULT_SPI_CLOCK_HZ: u32 = 9_000_000;

/// SPI bus pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiPins {
    pub miso: u8,
    pub mosi: u8,
    pub sclk: u8,
    pub cs: u8,
}

/// Complete board binding for one transceiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceConfig {
    /// SPI pins including chip select
    pub spi: SpiPins,
    /// Reset output; always active-low, see [`crate::gpio::ResetLine`]
    pub reset: u8,
    /// Busy input
    pub busy: u8,
    /// DIO1 interrupt input, if wired
    pub dio1: Option<u8>,
    /// SPI clock in Hz
    pub clock_hz: u32,
    /// SPI clock mode
    pub mode: Mode,
    /// Outstanding transactions allowed by the host
    pub queue_size: u8,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            spi: SpiPins {
                miso: 34,
                mosi: 35,
                sclk: 33,
                cs: 7,
            },
            reset: 8,
            busy: 36,
            dio1: Some(37),
            clock_hz: DEFAULT_SPI_CLOCK_HZ,
            mode: Mode::Mode0,
            queue_size: 1,
        }
    }
}

impl InterfaceConfig {
    /// Bus descriptor for [`SpiHost::initialize_bus`](llcc68_hal::SpiHost::initialize_bus)
    pub fn bus_config(&self) -> BusConfig {
        BusConfig {
            miso: self.spi.miso,
            mosi: self.spi.mosi,
            sclk: self.spi.sclk,
        }
    }

    /// Device descriptor for [`SpiHost::add_device`](llcc68_hal::SpiHost::add_device)
    pub fn device_config(&self) -> DeviceConfig {
        DeviceConfig {
            clock_hz: self.clock_hz,
            mode: self.mode,
            cs: self.spi.cs,
            queue_size: self.queue_size,
        }
    }

    /// Check the binding against a platform with `gpio_count` pins
    pub fn validate(&self, gpio_count: u8) -> Result<(), ConfigError> {
        if self.clock_hz == 0 || self.clock_hz > MAX_SPI_CLOCK_HZ {
            return Err(ConfigError::ClockOutOfRange(self.clock_hz));
        }
        if self.queue_size == 0 {
            return Err(ConfigError::ZeroQueueDepth);
        }

        let mut pins = PinSet::new(gpio_count);
        pins.claim(self.spi.miso)?;
        pins.claim(self.spi.mosi)?;
        pins.claim(self.spi.sclk)?;
        pins.claim(self.spi.cs)?;
        pins.claim(self.reset)?;
        pins.claim(self.busy)?;
        if let Some(dio1) = self.dio1 {
            pins.claim(dio1)?;
        }
        Ok(())
    }
}

/// Tracks which pins a configuration has already used
struct PinSet {
    claimed: FnvIndexSet<u8, 8>,
    gpio_count: u8,
}

impl PinSet {
    fn new(gpio_count: u8) -> Self {
        Self {
            claimed: FnvIndexSet::new(),
            gpio_count,
        }
    }

    fn claim(&mut self, pin: u8) -> Result<(), ConfigError> {
        if pin >= self.gpio_count {
            return Err(ConfigError::InvalidPin(pin));
        }
        match self.claimed.insert(pin) {
            Ok(true) => Ok(()),
            // Already present, or the set is full (more functions than slots)
            _ => Err(ConfigError::PinConflict(pin)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = InterfaceConfig::default();
        assert_eq!(config.validate(49), Ok(()));
    }

    #[test]
    fn test_device_config() {
        let dev = InterfaceConfig::default().device_config();
        assert_eq!(dev.clock_hz, 9_000_000);
        assert_eq!(dev.mode, Mode::Mode0);
        assert_eq!(dev.cs, 7);
        assert_eq!(dev.queue_size, 1);
    }

    #[test]
    fn test_bus_config() {
        let bus = InterfaceConfig::default().bus_config();
        assert_eq!((bus.miso, bus.mosi, bus.sclk), (34, 35, 33));
    }

    #[test]
    fn test_pin_conflict() {
        let mut config = InterfaceConfig::default();
        config.busy = config.reset;
        assert_eq!(config.validate(49), Err(ConfigError::PinConflict(8)));
    }

    #[test]
    fn test_invalid_pin() {
        let config = InterfaceConfig::default();
        // Default binding uses pins up to 37
        assert_eq!(config.validate(30), Err(ConfigError::InvalidPin(34)));
    }

    #[test]
    fn test_clock_range() {
        let mut config = InterfaceConfig::default();
        config.clock_hz = 0;
        assert_eq!(config.validate(49), Err(ConfigError::ClockOutOfRange(0)));

        config.clock_hz = MAX_SPI_CLOCK_HZ + 1;
        assert_eq!(
            config.validate(49),
            Err(ConfigError::ClockOutOfRange(MAX_SPI_CLOCK_HZ + 1))
        );

        config.clock_hz = MAX_SPI_CLOCK_HZ;
        assert_eq!(config.validate(49), Ok(()));
    }

    #[test]
    fn test_zero_queue_depth() {
        let mut config = InterfaceConfig::default();
        config.queue_size = 0;
        assert_eq!(config.validate(49), Err(ConfigError::ZeroQueueDepth));
    }

    #[test]
    fn test_dio1_optional() {
        let mut config = InterfaceConfig::default();
        config.dio1 = None;
        assert_eq!(config.validate(49), Ok(()));

        config.dio1 = Some(config.spi.cs);
        assert_eq!(config.validate(49), Err(ConfigError::PinConflict(7)));
    }

    #[test]
    fn test_default_line_pins() {
        let config = InterfaceConfig::default();
        assert_eq!(config.spi.cs, 7);
        assert_eq!(config.reset, 8);
        assert_eq!(config.busy, 36);
        assert_eq!(config.dio1, Some(37));
    }
}
