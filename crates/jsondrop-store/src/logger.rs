//! Pluggable leveled logging for the driver.
//!
//! The driver reports through a [`Logger`] handed to it at construction
//! rather than a global facility. [`TracingLogger`] is the default and
//! forwards to `tracing`; [`NullLogger`] discards everything.

use std::fmt;
use std::str::FromStr;

/// Log severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fatal" => Ok(Level::Fatal),
            "error" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warn),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Leveled log sink used by the driver.
///
/// Implementors only need [`log`](Logger::log); the per-level methods
/// forward to it. `fatal` only records the message, the library never
/// exits the process.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, args: fmt::Arguments<'_>);

    fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Fatal, args)
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args)
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args)
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args)
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args)
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args)
    }
}

/// Forwards records at or above `max_level` to `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    max_level: Level,
}

impl TracingLogger {
    pub fn new(max_level: Level) -> Self {
        Self { max_level }
    }

    pub fn max_level(&self) -> Level {
        self.max_level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.max_level
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        match level {
            Level::Fatal => tracing::error!(fatal = true, "{}", args),
            Level::Error => tracing::error!("{}", args),
            Level::Warn => tracing::warn!("{}", args),
            Level::Info => tracing::info!("{}", args),
            Level::Debug => tracing::debug!("{}", args),
            Level::Trace => tracing::trace!("{}", args),
        }
    }
}

/// Discards every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Level, _args: fmt::Arguments<'_>) {}
}
