//! Millisecond delays
//!
//! Delays suspend the calling task on the executor's timer queue instead of
//! spinning, so other tasks keep running while the transceiver powers up.
//! A zero delay may still yield once, depending on the time driver.

use embassy_time::{Duration, Timer};

/// Suspend the current task for at least `ms` milliseconds
pub async fn delay_ms(ms: u32) {
    Timer::after(Duration::from_millis(u64::from(ms))).await;
}
