//! Bounded diagnostic output
//!
//! Messages are rendered into a fixed-size stack buffer and handed to a
//! [`LogSink`]. Output longer than [`MAX_MESSAGE_LEN`] bytes is cut at the
//! last character that fits; nothing is ever written past the buffer and
//! rendering never fails.
//!
//! Each call renders into its own buffer, so emitting from an interrupt
//! handler while the owner task is also logging is safe.

use core::fmt::{self, Write};

use heapless::String;
use llcc68_hal::log::{LogSink, Severity};

/// Size of the rendering buffer, including room for a C-style terminator
pub const DIAG_BUFFER_SIZE: usize = 128;

/// Longest message text that reaches the sink
pub const MAX_MESSAGE_LEN: usize = DIAG_BUFFER_SIZE - 1;

/// Component tag attached to every line
pub const LOG_TAG: &str = "llcc68";

/// Rendered diagnostic line
pub type Message = String<MAX_MESSAGE_LEN>;

/// Writer that drops everything after the buffer fills up
struct Truncating<'a> {
    buf: &'a mut Message,
    full: bool,
}

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.full {
            return Ok(());
        }
        for ch in s.chars() {
            if self.buf.push(ch).is_err() {
                // Stop at the first character that does not fit, even if a
                // shorter one later would
                self.full = true;
                break;
            }
        }
        Ok(())
    }
}

/// Render formatting arguments into a bounded message
pub fn render(args: fmt::Arguments<'_>) -> Message {
    let mut buf = Message::new();
    let mut writer = Truncating {
        buf: &mut buf,
        full: false,
    };
    // Only a failing Display impl can make this return Err; keep what was
    // rendered up to that point
    let _ = writer.write_fmt(args);
    buf
}

/// Diagnostic front end bound to one log sink
pub struct Diagnostics<S> {
    sink: S,
}

impl<S: LogSink> Diagnostics<S> {
    /// Create a diagnostic front end writing to `sink`
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Emit a warning-level line
    pub fn emit(&self, args: fmt::Arguments<'_>) {
        self.report(Severity::Warning, args);
    }

    /// Emit a line at the given severity
    pub fn report(&self, severity: Severity, args: fmt::Arguments<'_>) {
        let message = render(args);
        self.sink.write(severity, LOG_TAG, &message);
    }

    /// Access the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Emit a formatted warning line through a [`Diagnostics`]
///
/// ```ignore
/// debug_print!(diag, "llcc68: tx timeout after {} ms", elapsed);
/// ```
#[macro_export]
macro_rules! debug_print {
    ($diag:expr, $($arg:tt)*) => {
        $diag.emit(::core::format_args!($($arg)*))
    };
}
