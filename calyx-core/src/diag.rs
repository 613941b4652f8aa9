//! Diagnostic logging
//!
//! The core never owns a logger. Messages go to an injected
//! [`DiagnosticSink`]; on target that is usually [`DefmtSink`], in tests a
//! recording sink. Diagnostics are best-effort: a sink cannot fail, and
//! messages that do not fit their buffer are truncated.

use core::fmt::Write;

use heapless::String;

use crate::config::SensorConfiguration;

/// Longest single diagnostic line built by the core
pub const MAX_MESSAGE_LEN: usize = 64;

/// Message severity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Error,
    Warning,
    Info,
    Debug,
}

impl Level {
    /// Check whether a message at this level passes a `threshold`
    pub fn passes(self, threshold: Level) -> bool {
        self <= threshold
    }
}

/// Write-only destination for diagnostics
pub trait DiagnosticSink {
    /// Log a text message
    fn log(&mut self, level: Level, message: &str);

    /// Log a binary buffer as hex
    fn log_hex(&mut self, level: Level, data: &[u8]);

    /// Log a sensor configuration, one line per field
    fn log_configuration(&mut self, level: Level, configuration: &SensorConfiguration) {
        for line in configuration.lines() {
            let text: String<MAX_MESSAGE_LEN> = format_message(format_args!("{}", line));
            self.log(level, &text);
        }
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn log(&mut self, level: Level, message: &str) {
        (**self).log(level, message)
    }

    fn log_hex(&mut self, level: Level, data: &[u8]) {
        (**self).log_hex(level, data)
    }

    fn log_configuration(&mut self, level: Level, configuration: &SensorConfiguration) {
        (**self).log_configuration(level, configuration)
    }
}

/// Format into a fixed buffer, keeping whatever fits
pub fn format_message<const N: usize>(args: core::fmt::Arguments<'_>) -> String<N> {
    let mut text = String::new();
    // Overflow only truncates
    let _ = text.write_fmt(args);
    text
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn log(&mut self, _level: Level, _message: &str) {}

    fn log_hex(&mut self, _level: Level, _data: &[u8]) {}

    fn log_configuration(&mut self, _level: Level, _configuration: &SensorConfiguration) {}
}

/// Sink that drops messages less severe than a threshold
#[derive(Debug, Clone, Copy)]
pub struct Filtered<S> {
    inner: S,
    threshold: Level,
}

impl<S: DiagnosticSink> Filtered<S> {
    /// Pass messages at `threshold` or more severe to `inner`
    pub const fn new(inner: S, threshold: Level) -> Self {
        Self { inner, threshold }
    }

    /// The wrapped sink
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap the sink
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: DiagnosticSink> DiagnosticSink for Filtered<S> {
    fn log(&mut self, level: Level, message: &str) {
        if level.passes(self.threshold) {
            self.inner.log(level, message);
        }
    }

    fn log_hex(&mut self, level: Level, data: &[u8]) {
        if level.passes(self.threshold) {
            self.inner.log_hex(level, data);
        }
    }

    fn log_configuration(&mut self, level: Level, configuration: &SensorConfiguration) {
        if level.passes(self.threshold) {
            self.inner.log_configuration(level, configuration);
        }
    }
}

/// Sink forwarding to the `defmt` logger
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtSink;

#[cfg(feature = "defmt")]
impl DiagnosticSink for DefmtSink {
    fn log(&mut self, level: Level, message: &str) {
        match level {
            Level::Error => defmt::error!("{=str}", message),
            Level::Warning => defmt::warn!("{=str}", message),
            Level::Info => defmt::info!("{=str}", message),
            Level::Debug => defmt::debug!("{=str}", message),
        }
    }

    fn log_hex(&mut self, level: Level, data: &[u8]) {
        match level {
            Level::Error => defmt::error!("{=[u8]:x}", data),
            Level::Warning => defmt::warn!("{=[u8]:x}", data),
            Level::Info => defmt::info!("{=[u8]:x}", data),
            Level::Debug => defmt::debug!("{=[u8]:x}", data),
        }
    }

    fn log_configuration(&mut self, level: Level, configuration: &SensorConfiguration) {
        match level {
            Level::Error => defmt::error!("{}", configuration),
            Level::Warning => defmt::warn!("{}", configuration),
            Level::Info => defmt::info!("{}", configuration),
            Level::Debug => defmt::debug!("{}", configuration),
        }
    }
}
