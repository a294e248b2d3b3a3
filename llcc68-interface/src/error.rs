//! Error types for the interface layer
//!
//! Every fallible operation reports synchronously through one of these
//! enums. The platform's own error is carried as `cause` so the caller can
//! log or inspect it; nothing here retries.

/// Transport step that a platform rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Bus bring-up or release
    Bus,
    /// Chip-select slot claim or release
    Device,
}

/// SPI transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<E> {
    /// Bus or device claim rejected while opening
    Init { stage: Stage, cause: E },
    /// A release step was rejected while closing
    ///
    /// Reports the first rejected step. The remaining step was still
    /// attempted and the transport is closed afterwards.
    Teardown { stage: Stage, cause: E },
    /// The platform rejected a transaction; receive buffer is undefined
    Io(E),
    /// Exchange attempted without a claimed device
    NotOpen,
    /// Buffer too long for the transaction bit counter
    TooLong,
}

impl<E> TransportError<E> {
    /// Platform error behind this failure, if any
    pub fn cause(&self) -> Option<&E> {
        match self {
            TransportError::Init { cause, .. }
            | TransportError::Teardown { cause, .. }
            | TransportError::Io(cause) => Some(cause),
            TransportError::NotOpen | TransportError::TooLong => None,
        }
    }
}

/// GPIO line a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Reset output
    Reset,
    /// Busy input
    Busy,
    /// DIO1 interrupt input
    Dio1,
}

/// GPIO configuration or level-set rejected by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioError<E> {
    pub line: Line,
    pub cause: E,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The same pin is assigned to two functions
    PinConflict(u8),
    /// Pin number outside the platform's range
    InvalidPin(u8),
    /// SPI clock is zero or above the transceiver limit
    ClockOutOfRange(u32),
    /// Queue depth must be at least one
    ZeroQueueDepth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cause() {
        let init: TransportError<u8> = TransportError::Init {
            stage: Stage::Device,
            cause: 3,
        };
        assert_eq!(init.cause(), Some(&3));
        assert_eq!(TransportError::<u8>::Io(7).cause(), Some(&7));
        assert_eq!(TransportError::<u8>::NotOpen.cause(), None);
        assert_eq!(TransportError::<u8>::TooLong.cause(), None);
    }
}
