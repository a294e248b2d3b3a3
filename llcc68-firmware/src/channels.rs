//! Inter-task signals

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// DIO1 went high: the transceiver has pending IRQ flags
pub static IRQ_PENDING: Signal<CriticalSectionRawMutex, ()> = Signal::new();
