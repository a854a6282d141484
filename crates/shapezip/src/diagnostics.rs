//! Host-facing diagnostics for job runs.
//!
//! The pipeline reports every informational, warning, and fatal event
//! through a [`DiagnosticsSink`]. Which backend receives the messages is
//! fixed when the sink is constructed: the hosting environment's message
//! callback when running inside a server, the console when standalone.

use chrono::Utc;

/// Message severity as understood by the hosting environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Fatal => "FATAL",
        };
        f.write_str(label)
    }
}

/// Collapses embedded newlines so a message occupies exactly one log line.
pub fn single_line(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uniform line format shared by every backend: timestamp, sink name,
/// severity, message.
fn format_line(name: &str, severity: Severity, message: &str) -> String {
    format!(
        "{} - {} - {} - {}",
        Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
        name,
        severity,
        message
    )
}

pub trait DiagnosticsSink: Send + Sync {
    fn emit(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.emit(Severity::Info, message);
    }

    fn warning(&self, message: &str) {
        self.emit(Severity::Warning, message);
    }

    fn fatal(&self, message: &str) {
        self.emit(Severity::Fatal, message);
    }
}

/// Writes formatted lines to the console. Standalone and debug runs.
pub struct ConsoleSink {
    name: String,
}

impl ConsoleSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl DiagnosticsSink for ConsoleSink {
    fn emit(&self, severity: Severity, message: &str) {
        println!("{}", format_line(&self.name, severity, message));
    }
}

/// Routes formatted lines to the hosting environment's message-reporting
/// callback. The callback receives the severity alongside the already
/// formatted line so the host can map it onto its own message kinds.
pub struct HostCallbackSink {
    name: String,
    callback: Box<dyn Fn(Severity, &str) + Send + Sync>,
}

impl HostCallbackSink {
    pub fn new(
        name: impl Into<String>,
        callback: impl Fn(Severity, &str) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            callback: Box::new(callback),
        }
    }
}

impl DiagnosticsSink for HostCallbackSink {
    fn emit(&self, severity: Severity, message: &str) {
        let line = format_line(&self.name, severity, message);
        (self.callback)(severity, &line);
    }
}

/// No-op sink for unit tests.
pub struct NoopSink;

impl DiagnosticsSink for NoopSink {
    fn emit(&self, _severity: Severity, _message: &str) {}
}
