//! Diagnostics boundary for a generation pass.
//!
//! Sinks are injected by the caller; reporting never changes what is generated.

use derive_more::Display;

///
/// Severity
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Severity {
    #[display("warning")]
    Warning,

    #[display("error")]
    Error,
}

///
/// Diagnostic
///

#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{severity}: {message}")]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

///
/// DiagnosticSink
///

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

///
/// CollectingSink
/// keeps everything, in report order
///

#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

///
/// TracingSink
/// forwards to `tracing`, then to an optional inner sink
///

#[derive(Debug, Default)]
pub struct TracingSink<S = CollectingSink> {
    pub inner: S,
}

impl<S> TracingSink<S> {
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: DiagnosticSink> DiagnosticSink for TracingSink<S> {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => tracing::error!(target: "autoimpl", "{}", diagnostic.message),
            Severity::Warning => tracing::warn!(target: "autoimpl", "{}", diagnostic.message),
        }
        self.inner.report(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_splits_by_severity() {
        let mut sink = CollectingSink::new();
        sink.report(Diagnostic::warning("w"));
        sink.report(Diagnostic::error("e"));

        assert_eq!(sink.warnings().count(), 1);
        assert_eq!(sink.errors().count(), 1);
        assert!(sink.has_errors());
        assert_eq!(sink.diagnostics[1].to_string(), "error: e");
    }

    #[test]
    fn tracing_sink_forwards_to_inner() {
        let mut sink = TracingSink::new(CollectingSink::new());
        sink.report(Diagnostic::warning("advisory"));

        assert_eq!(sink.inner.diagnostics, [Diagnostic::warning("advisory")]);
    }
}
