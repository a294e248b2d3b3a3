//! SPI host abstractions
//!
//! The interface layer claims exactly one chip-select slot on a shared bus.
//! Platforms expose the bus lifecycle, the slot lifecycle and a single
//! synchronous transaction primitive through [`SpiHost`].

/// SPI master able to host chip-select devices
///
/// Calls are synchronous: `transmit` returns once the transaction has been
/// clocked out or rejected.
pub trait SpiHost {
    /// Error type reported by the platform
    type Error;

    /// Ownership token for one claimed chip-select slot
    type Device;

    /// Bring up the bus (pins, DMA, peripheral clock)
    fn initialize_bus(&mut self, config: &BusConfig) -> Result<(), Self::Error>;

    /// Release the bus and its pins
    fn free_bus(&mut self) -> Result<(), Self::Error>;

    /// Claim a chip-select slot on an initialized bus
    fn add_device(&mut self, config: &DeviceConfig) -> Result<Self::Device, Self::Error>;

    /// Give a chip-select slot back to the bus
    ///
    /// The token is consumed whether or not the platform accepts the release.
    fn remove_device(&mut self, device: Self::Device) -> Result<(), Self::Error>;

    /// Run one transaction on a claimed slot
    fn transmit(
        &mut self,
        device: &mut Self::Device,
        transaction: Transaction<'_>,
    ) -> Result<(), Self::Error>;
}

/// One half-duplex bus cycle
///
/// `length_bits` clocks are generated with chip select held low. Bytes from
/// `tx` are shifted out while bytes are captured into `rx`; a direction whose
/// buffer is `None` is not driven or not sampled.
#[derive(Debug)]
pub struct Transaction<'a> {
    /// Number of clock cycles, always a multiple of 8
    pub length_bits: u32,
    /// Host-to-device bytes
    pub tx: Option<&'a [u8]>,
    /// Device-to-host bytes
    pub rx: Option<&'a mut [u8]>,
}

impl Transaction<'_> {
    /// Number of whole bytes clocked by this transaction
    pub fn len_bytes(&self) -> usize {
        (self.length_bits / 8) as usize
    }
}

/// Pin assignment for the bus itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// Controller-in / peripheral-out pin
    pub miso: u8,
    /// Controller-out / peripheral-in pin
    pub mosi: u8,
    /// Serial clock pin
    pub sclk: u8,
}

/// Electrical parameters of one chip-select slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Clock frequency in Hz
    pub clock_hz: u32,
    /// Clock polarity and phase
    pub mode: Mode,
    /// Chip-select pin
    pub cs: u8,
    /// Number of transactions that may be queued at once
    pub queue_size: u8,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            clock_hz: 1_000_000,
            mode: Mode::Mode0,
            cs: 0,
            queue_size: 1,
        }
    }
}

/// SCLK level between transfers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    IdleLow,
    IdleHigh,
}

/// SCLK edge on which MISO/MOSI are sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    CaptureOnFirstTransition,
    CaptureOnSecondTransition,
}

/// Clock mode of a device slot
///
/// The LLCC68 only speaks mode 0; the other modes exist so the same host
/// can carry other peripherals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    #[default]
    Mode0,
    Mode1,
    Mode2,
    Mode3,
}

impl Mode {
    /// Mode number, `CPOL << 1 | CPHA`
    pub const fn number(self) -> u8 {
        match self {
            Mode::Mode0 => 0,
            Mode::Mode1 => 1,
            Mode::Mode2 => 2,
            Mode::Mode3 => 3,
        }
    }
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_number_matches_cpol_cpha() {
        for mode in [Mode::Mode0, Mode::Mode1, Mode::Mode2, Mode::Mode3] {
            let (polarity, phase): (Polarity, Phase) = mode.into();
            let cpol = u8::from(polarity == Polarity::IdleHigh);
            let cpha = u8::from(phase == Phase::CaptureOnSecondTransition);
            assert_eq!(mode.number(), cpol << 1 | cpha);
        }
        assert_eq!(Mode::default(), Mode::Mode0);
    }

    #[test]
    fn test_len_bytes() {
        let tx = [0u8; 3];
        let transaction = Transaction {
            length_bits: 24,
            tx: Some(&tx),
            rx: None,
        };
        assert_eq!(transaction.len_bytes(), 3);
    }
}
