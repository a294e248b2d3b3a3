//! Text log channel

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    /// Operation failed
    Error,
    /// Transceiver condition worth attention (IRQ lines land here)
    Warning,
    /// Lifecycle progress
    Info,
    /// Verbose tracing
    Debug,
}

/// Platform log channel
///
/// Sinks may be called from interrupt or callback context, so `write` takes
/// `&self` and must not block beyond emitting one line.
pub trait LogSink {
    /// Emit one already-rendered line tagged with a component name
    fn write(&self, severity: Severity, tag: &str, message: &str);
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn write(&self, severity: Severity, tag: &str, message: &str) {
        (**self).write(severity, tag, message);
    }
}
