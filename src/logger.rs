//! Pluggable sink for parse events.
//!
//! Loggers are fire-and-forget: they observe the parse and can never change
//! its outcome.

use crate::error::ParseWarning;
use crate::known_boxes::BoxType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent<'a> {
    BoxFound { box_type: BoxType, size: u32, offset: usize },
    Payload { offset: usize, text: &'a str },
    Warning(&'a ParseWarning),
}

impl std::fmt::Display for LogEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogEvent::BoxFound { box_type, size, offset } => write!(
                f,
                "found box of type {} at {offset:#x}, size {size} bytes",
                box_type.fourcc().as_str_lossy().to_uppercase()
            ),
            LogEvent::Payload { offset, text } => {
                write!(f, "content of mdat at {offset:#x}: {text}")
            }
            LogEvent::Warning(w) => write!(f, "warning: {w}"),
        }
    }
}

pub trait Logger {
    fn log(&self, event: &LogEvent<'_>);
}

impl<F> Logger for F
where
    F: Fn(&LogEvent<'_>),
{
    fn log(&self, event: &LogEvent<'_>) {
        self(event)
    }
}

/// Default sink: one line per event on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent<'_>) {
        eprintln!("[fragbox] {event}");
    }
}

/// Forwards events to `tracing` under the `fragbox` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, event: &LogEvent<'_>) {
        match event {
            LogEvent::BoxFound { box_type, size, offset } => {
                tracing::debug!(target: "fragbox", %box_type, size, offset, "found box");
            }
            LogEvent::Payload { offset, text } => {
                tracing::trace!(target: "fragbox", offset, len = text.len(), text, "mdat content");
            }
            LogEvent::Warning(w) => {
                tracing::warn!(target: "fragbox", "{w}");
            }
        }
    }
}
