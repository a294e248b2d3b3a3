//! Reset, busy and DIO1 lines
//!
//! The reset pin is active-low: asserting reset drives the pad low, and
//! releasing it drives the pad high. The busy pin is high while the
//! transceiver is processing a command. DIO1 stays high for as long as any
//! routed IRQ flag is set.
//!
//! Neither wrapper tracks whether its line has been initialized. Calling
//! `write` or `read` outside an `init`/`deinit` pair is the caller's
//! mistake to avoid.

use embassy_futures::select::{select, Either};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use llcc68_hal::gpio::{InputLine, Level, OutputLine};

use crate::error::{GpioError, Line};

/// Reset hold time used by [`ResetLine::pulse`] callers (ms)
pub const RESET_HOLD_MS: u32 = 10;

/// Physical level that represents a logical reset state
pub const fn reset_level(asserted: bool) -> Level {
    if asserted {
        Level::Low
    } else {
        Level::High
    }
}

/// Active-low reset output
pub struct ResetLine<P> {
    pin: P,
}

impl<P: OutputLine> ResetLine<P> {
    /// Wrap an output line
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Configure the pad as an output
    pub fn init(&mut self) -> Result<(), GpioError<P::Error>> {
        self.pin.configure_output().map_err(reset_err)
    }

    /// Return the pad to its unconfigured state
    pub fn deinit(&mut self) -> Result<(), GpioError<P::Error>> {
        self.pin.unconfigure().map_err(reset_err)
    }

    /// Assert (`true`) or release (`false`) reset
    pub fn write(&mut self, asserted: bool) -> Result<(), GpioError<P::Error>> {
        self.pin.set_level(reset_level(asserted)).map_err(reset_err)
    }

    /// Hold the chip in reset for `hold_ms`, release it and wait the same
    /// time again for the oscillator to start
    pub async fn pulse<D: DelayNs>(
        &mut self,
        delay: &mut D,
        hold_ms: u32,
    ) -> Result<(), GpioError<P::Error>> {
        self.write(true)?;
        delay.delay_ms(hold_ms).await;
        self.write(false)?;
        delay.delay_ms(hold_ms).await;
        Ok(())
    }

    /// Unwrap the underlying line
    pub fn into_inner(self) -> P {
        self.pin
    }
}

fn reset_err<E>(cause: E) -> GpioError<E> {
    GpioError {
        line: Line::Reset,
        cause,
    }
}

/// Busy input
pub struct BusyLine<P> {
    pin: P,
}

impl<P: InputLine> BusyLine<P> {
    /// Wrap an input line
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Configure the pad as an input
    pub fn init(&mut self) -> Result<(), GpioError<P::Error>> {
        self.pin.configure_input().map_err(busy_err)
    }

    /// Return the pad to its unconfigured state
    pub fn deinit(&mut self) -> Result<(), GpioError<P::Error>> {
        self.pin.unconfigure().map_err(busy_err)
    }

    /// Sample the line
    pub fn read(&mut self) -> Level {
        self.pin.level()
    }

    /// Check if the transceiver reports busy
    pub fn is_busy(&mut self) -> bool {
        self.read().is_high()
    }

    /// Unwrap the underlying line
    pub fn into_inner(self) -> P {
        self.pin
    }
}

fn busy_err<E>(cause: E) -> GpioError<E> {
    GpioError {
        line: Line::Busy,
        cause,
    }
}

/// Level-triggered DIO1 input
///
/// A wake-up is reported when the line goes high. If it is still high on
/// the next call, the flags behind it were never cleared (a failed status
/// read, a busy stall), so the wake-up is reported again after `retry_ms`
/// instead of waiting for an edge that will not come.
pub struct IrqLine<P> {
    pin: P,
    reported: bool,
}

impl<P: Wait> IrqLine<P> {
    /// Wrap an interrupt-capable input
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            reported: false,
        }
    }

    /// Wait until the transceiver has IRQ flags pending
    pub async fn wait_pending<D: DelayNs>(
        &mut self,
        delay: &mut D,
        retry_ms: u32,
    ) -> Result<(), GpioError<P::Error>> {
        if self.reported {
            match select(self.pin.wait_for_low(), delay.delay_ms(retry_ms)).await {
                Either::First(cleared) => cleared.map_err(dio1_err)?,
                // Still held high
                Either::Second(()) => return Ok(()),
            }
            self.reported = false;
        }

        self.pin.wait_for_high().await.map_err(dio1_err)?;
        self.reported = true;
        Ok(())
    }

    /// Unwrap the underlying pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

fn dio1_err<E>(cause: E) -> GpioError<E> {
    GpioError {
        line: Line::Dio1,
        cause,
    }
}
