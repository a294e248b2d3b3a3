//! defmt log sink for the platform log channel

use llcc68_hal::log::{LogSink, Severity};

/// Sink that forwards lines to `defmt` at the matching level
pub struct DefmtSink;

impl LogSink for DefmtSink {
    fn write(&self, severity: Severity, tag: &str, message: &str) {
        match severity {
            Severity::Error => defmt::error!("{}: {}", tag, message),
            Severity::Warning => defmt::warn!("{}: {}", tag, message),
            Severity::Info => defmt::info!("{}: {}", tag, message),
            Severity::Debug => defmt::debug!("{}: {}", tag, message),
        }
    }
}
