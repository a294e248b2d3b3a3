//! Digital lines over embedded-hal pins
//!
//! embedded-hal pins carry their direction in their type, so configuring
//! and unconfiguring are no-ops here; the chip HAL did that work when the
//! pin was constructed and does it again when the pin is dropped.

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use llcc68_hal::gpio::{InputLine, Level, OutputLine};

/// [`OutputLine`] backed by an embedded-hal output pin
pub struct EmbeddedOutput<P> {
    pin: P,
}

impl<P: OutputPin> EmbeddedOutput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> OutputLine for EmbeddedOutput<P> {
    type Error = P::Error;

    fn configure_output(&mut self) -> Result<(), P::Error> {
        Ok(())
    }

    fn unconfigure(&mut self) -> Result<(), P::Error> {
        Ok(())
    }

    fn set_level(&mut self, level: Level) -> Result<(), P::Error> {
        self.pin.set_state(PinState::from(level.is_high()))
    }
}

/// [`InputLine`] backed by an embedded-hal input pin
///
/// A pin read error is reported as [`Level::High`]. On the busy line that
/// reads as "busy", which keeps the upper driver polling instead of
/// talking to a chip that may not be ready.
pub struct EmbeddedInput<P> {
    pin: P,
}

impl<P: InputPin> EmbeddedInput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> InputLine for EmbeddedInput<P> {
    type Error = P::Error;

    fn configure_input(&mut self) -> Result<(), P::Error> {
        Ok(())
    }

    fn unconfigure(&mut self) -> Result<(), P::Error> {
        Ok(())
    }

    fn level(&mut self) -> Level {
        match self.pin.is_high() {
            Ok(high) => Level::from(high),
            Err(_) => Level::High,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
        broken: bool,
    }

    #[derive(Debug)]
    struct PadFault;

    impl Error for PadFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for MockPin {
        type Error = PadFault;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), PadFault> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), PadFault> {
            self.high = true;
            Ok(())
        }
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, PadFault> {
            if self.broken {
                Err(PadFault)
            } else {
                Ok(self.high)
            }
        }

        fn is_low(&mut self) -> Result<bool, PadFault> {
            self.is_high().map(|high| !high)
        }
    }

    /// Pin that can never fail
    struct SteadyPin;

    impl ErrorType for SteadyPin {
        type Error = Infallible;
    }

    impl InputPin for SteadyPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(false)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(true)
        }
    }

    #[test]
    fn test_output_levels() {
        let mut line = EmbeddedOutput::new(MockPin {
            high: false,
            broken: false,
        });
        line.configure_output().unwrap();

        line.set_level(Level::High).unwrap();
        assert!(line.pin.high);
        line.set_low().unwrap();
        assert!(!line.pin.high);
    }

    #[test]
    fn test_input_levels() {
        let mut line = EmbeddedInput::new(MockPin {
            high: true,
            broken: false,
        });
        assert_eq!(line.level(), Level::High);
        line.pin.high = false;
        assert_eq!(line.level(), Level::Low);

        assert_eq!(EmbeddedInput::new(SteadyPin).level(), Level::Low);
    }

    #[test]
    fn test_input_error_reads_busy() {
        let mut line = EmbeddedInput::new(MockPin {
            high: false,
            broken: true,
        });
        assert_eq!(line.level(), Level::High);
    }
}
