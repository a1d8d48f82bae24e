//! Diagnostic sinks.
//!
//! Components that report configuration or processing problems ([`crate::Catalog`],
//! [`crate::ProcessorRunner`]) receive a [`Diagnostics`] sink when they are built. There is no
//! process-wide logger; each component talks to the sink it was given.
//!
//! - [`NullDiagnostics`]: discards everything (the default)
//! - [`CollectingDiagnostics`]: keeps messages in memory for later inspection
//! - `TracingDiagnostics`: forwards to the `tracing` crate (requires the `tracing` feature)

use std::sync::Arc;

use parking_lot::Mutex;

/// Receiver for error and informational messages.
pub trait Diagnostics: Send + Sync {
    fn error(&self, message: &str);
    fn info(&self, message: &str);
}

/// Shared handle to a diagnostics sink.
pub type SharedDiagnostics = Arc<dyn Diagnostics>;

pub(crate) fn null() -> SharedDiagnostics {
    Arc::new(NullDiagnostics)
}

/// Drops every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDiagnostics;

impl Diagnostics for NullDiagnostics {
    fn error(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
}

/// Severity of a collected message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Info,
}

/// Records every message in arrival order.
///
/// ```
/// use std::sync::Arc;
/// use topograph::{CollectingDiagnostics, Diagnostics, Severity};
///
/// let sink = Arc::new(CollectingDiagnostics::new());
/// sink.error("no root item defined");
///
/// assert_eq!(sink.errors(), vec!["no root item defined".to_string()]);
/// assert_eq!(sink.entries()[0].0, Severity::Error);
/// ```
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all messages so far.
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    pub fn infos(&self) -> Vec<String> {
        self.messages(Severity::Info)
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn error(&self, message: &str) {
        self.entries
            .lock()
            .push((Severity::Error, message.to_string()));
    }

    fn info(&self, message: &str) {
        self.entries.lock().push((Severity::Info, message.to_string()));
    }
}

/// Forwards messages to `tracing` events, tagged with the reporting component.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone)]
pub struct TracingDiagnostics {
    component: &'static str,
}

#[cfg(feature = "tracing")]
impl TracingDiagnostics {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

#[cfg(feature = "tracing")]
impl Default for TracingDiagnostics {
    fn default() -> Self {
        Self::new("topograph")
    }
}

#[cfg(feature = "tracing")]
impl Diagnostics for TracingDiagnostics {
    fn error(&self, message: &str) {
        tracing::error!(component = self.component, "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(component = self.component, "{message}");
    }
}
