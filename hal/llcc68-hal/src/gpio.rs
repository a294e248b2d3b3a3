//! Discrete GPIO line abstractions
//!
//! Lines are configured and unconfigured explicitly so a platform can hand a
//! pin back to its reset state at shutdown.

use core::ops::Not;

/// Physical level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if the level is high
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Check if the level is low
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Digital output line
pub trait OutputLine {
    /// Error type reported by the platform
    type Error;

    /// Reset the pad and configure it as a push-pull output
    fn configure_output(&mut self) -> Result<(), Self::Error>;

    /// Return the pad to its unconfigured reset state
    fn unconfigure(&mut self) -> Result<(), Self::Error>;

    /// Drive the line to `level`
    fn set_level(&mut self, level: Level) -> Result<(), Self::Error>;

    /// Drive the line high
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_level(Level::High)
    }

    /// Drive the line low
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set_level(Level::Low)
    }
}

/// Digital input line
///
/// Sampling is infallible: platforms report a level even when the pad is
/// misconfigured.
pub trait InputLine {
    /// Error type reported by the platform
    type Error;

    /// Reset the pad and configure it as an input
    fn configure_input(&mut self) -> Result<(), Self::Error>;

    /// Return the pad to its unconfigured reset state
    fn unconfigure(&mut self) -> Result<(), Self::Error>;

    /// Sample the instantaneous level
    fn level(&mut self) -> Level;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_not() {
        assert_eq!(!Level::High, Level::Low);
        assert_eq!(!Level::Low, Level::High);
    }

    #[test]
    fn test_level_bool_conversion() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert!(bool::from(Level::High));
        assert!(!bool::from(Level::Low));
    }
}
