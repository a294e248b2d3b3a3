//! Transceiver IRQ events
//!
//! The LLCC68 reports pending conditions as bits of a 16-bit IRQ status
//! word. [`IrqEvent`] names each bit; [`EventDispatcher`] turns one event
//! into one diagnostic line. Dispatch touches neither the bus nor the GPIO
//! lines, so it is safe to call while an exchange is in progress.

use llcc68_hal::log::LogSink;

use crate::diag::Diagnostics;
use crate::debug_print;

// IRQ status bits
const IRQ_TX_DONE: u16 = 1 << 0;
const IRQ_RX_DONE: u16 = 1 << 1;
const IRQ_PREAMBLE_DETECTED: u16 = 1 << 2;
const IRQ_SYNC_WORD_VALID: u16 = 1 << 3;
const IRQ_HEADER_VALID: u16 = 1 << 4;
const IRQ_HEADER_ERR: u16 = 1 << 5;
const IRQ_CRC_ERR: u16 = 1 << 6;
const IRQ_CAD_DONE: u16 = 1 << 7;
const IRQ_CAD_DETECTED: u16 = 1 << 8;
const IRQ_TIMEOUT: u16 = 1 << 9;

/// Condition raised by the transceiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqEvent {
    /// Packet transmission completed
    TxDone,
    /// Packet received
    RxDone,
    /// Preamble detected
    PreambleDetected,
    /// Valid sync word detected (FSK)
    SyncWordValid,
    /// Valid LoRa header received
    HeaderValid,
    /// LoRa header CRC error
    HeaderError,
    /// Payload CRC error
    CrcError,
    /// Channel activity detection finished
    CadDone,
    /// Channel activity detected
    CadDetected,
    /// RX or TX timeout
    Timeout,
    /// Code that matches none of the above
    Unknown(u16),
}

impl IrqEvent {
    /// Classify a raw event code
    pub const fn from_code(code: u16) -> Self {
        match code {
            IRQ_TX_DONE => IrqEvent::TxDone,
            IRQ_RX_DONE => IrqEvent::RxDone,
            IRQ_PREAMBLE_DETECTED => IrqEvent::PreambleDetected,
            IRQ_SYNC_WORD_VALID => IrqEvent::SyncWordValid,
            IRQ_HEADER_VALID => IrqEvent::HeaderValid,
            IRQ_HEADER_ERR => IrqEvent::HeaderError,
            IRQ_CRC_ERR => IrqEvent::CrcError,
            IRQ_CAD_DONE => IrqEvent::CadDone,
            IRQ_CAD_DETECTED => IrqEvent::CadDetected,
            IRQ_TIMEOUT => IrqEvent::Timeout,
            other => IrqEvent::Unknown(other),
        }
    }

    /// Raw event code
    pub const fn code(self) -> u16 {
        match self {
            IrqEvent::TxDone => IRQ_TX_DONE,
            IrqEvent::RxDone => IRQ_RX_DONE,
            IrqEvent::PreambleDetected => IRQ_PREAMBLE_DETECTED,
            IrqEvent::SyncWordValid => IRQ_SYNC_WORD_VALID,
            IrqEvent::HeaderValid => IRQ_HEADER_VALID,
            IrqEvent::HeaderError => IRQ_HEADER_ERR,
            IrqEvent::CrcError => IRQ_CRC_ERR,
            IrqEvent::CadDone => IRQ_CAD_DONE,
            IrqEvent::CadDetected => IRQ_CAD_DETECTED,
            IrqEvent::Timeout => IRQ_TIMEOUT,
            IrqEvent::Unknown(code) => code,
        }
    }

    /// Diagnostic line for this event
    pub const fn message(self) -> &'static str {
        match self {
            IrqEvent::TxDone => "llcc68: irq tx done.",
            IrqEvent::RxDone => "llcc68: irq rx done.",
            IrqEvent::PreambleDetected => "llcc68: irq preamble detected.",
            IrqEvent::SyncWordValid => "llcc68: irq valid sync word detected.",
            IrqEvent::HeaderValid => "llcc68: irq valid header.",
            IrqEvent::HeaderError => "llcc68: irq header error.",
            IrqEvent::CrcError => "llcc68: irq crc error.",
            IrqEvent::CadDone => "llcc68: irq cad done.",
            IrqEvent::CadDetected => "llcc68: irq cad detected.",
            IrqEvent::Timeout => "llcc68: irq timeout.",
            IrqEvent::Unknown(_) => "llcc68: unknown code.",
        }
    }
}

/// Split an IRQ status word into one event per set bit, lowest bit first
pub fn events_in(status: u16) -> impl Iterator<Item = IrqEvent> {
    (0..16u16)
        .map(|bit| 1u16 << bit)
        .filter(move |mask| status & mask != 0)
        .map(IrqEvent::from_code)
}

/// One event and its payload, as delivered by the interrupt path
#[derive(Debug, Clone, Copy)]
pub struct EventRecord<'a> {
    pub kind: IrqEvent,
    /// Carried for future use; dispatch does not read it
    pub payload: &'a [u8],
}

/// Stateless event-to-diagnostic dispatcher
pub struct EventDispatcher<S> {
    diag: Diagnostics<S>,
}

impl<S: LogSink> EventDispatcher<S> {
    /// Create a dispatcher emitting through `sink`
    pub const fn new(sink: S) -> Self {
        Self {
            diag: Diagnostics::new(sink),
        }
    }

    /// Emit the diagnostic line for one event record
    pub fn dispatch(&self, record: EventRecord<'_>) {
        debug_print!(self.diag, "{}", record.kind.message());
    }

    /// Classify a raw code and dispatch it with its payload
    pub fn dispatch_code(&self, code: u16, payload: &[u8]) {
        self.dispatch(EventRecord {
            kind: IrqEvent::from_code(code),
            payload,
        });
    }

    /// Dispatch every event set in an IRQ status word
    pub fn dispatch_status(&self, status: u16, payload: &[u8]) {
        for kind in events_in(status) {
            self.dispatch(EventRecord { kind, payload });
        }
    }

    /// Access the diagnostic front end
    pub fn diagnostics(&self) -> &Diagnostics<S> {
        &self.diag
    }
}
