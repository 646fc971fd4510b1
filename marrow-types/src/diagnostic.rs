//! Structured diagnostic records and the sink they are delivered to.
//!
//! The pipeline never renders text for the terminal; it produces records
//! and the embedding application decides how to display them. Rendering,
//! coloring and verbosity gating all live behind [`DiagnosticSink`].

/// Classification of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogKind {
    /// A user-input error; compilation will not proceed past the front end.
    Error,
    /// A non-fatal condition worth the user's attention.
    Warning,
    /// Pipeline progress.
    Info,
    /// A stage completed.
    Success,
    /// Secondary detail accompanying progress records.
    Note,
    /// Developer-facing output such as memory dumps and timings.
    Debug,
    /// Decorative framing emitted by interactive front ends.
    Banner,
}

impl LogKind {
    /// Records of these kinds must reach the user regardless of the
    /// sink's verbosity setting.
    pub const fn bypasses_verbosity(&self) -> bool {
        matches!(self, Self::Error | Self::Warning)
    }
}

/// A single structured record emitted by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// Classification of the record.
    pub kind: LogKind,
    /// Human-readable message; may span multiple lines.
    pub message: String,
    /// Display name of the originating source, when the record points at
    /// user code.
    pub source_path: Option<String>,
}

impl Diagnostic {
    /// Create a record without a source location.
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source_path: None,
        }
    }

    /// Attach the display name of the originating source.
    #[must_use]
    pub fn with_source(mut self, path: impl Into<String>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    /// Shorthand for an [`LogKind::Error`] record.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogKind::Error, message)
    }

    /// Shorthand for a [`LogKind::Warning`] record.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogKind::Warning, message)
    }

    /// Shorthand for an [`LogKind::Info`] record.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogKind::Info, message)
    }

    /// Shorthand for a [`LogKind::Success`] record.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogKind::Success, message)
    }

    /// Shorthand for a [`LogKind::Note`] record.
    pub fn note(message: impl Into<String>) -> Self {
        Self::new(LogKind::Note, message)
    }

    /// Shorthand for a [`LogKind::Debug`] record.
    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(LogKind::Debug, message)
    }

    /// Shorthand for a [`LogKind::Banner`] record.
    pub fn banner(message: impl Into<String>) -> Self {
        Self::new(LogKind::Banner, message)
    }
}

/// Consumer of diagnostic records.
pub trait DiagnosticSink {
    /// Accept one record.
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Collecting sink, convenient for tests and batch consumers.
impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
