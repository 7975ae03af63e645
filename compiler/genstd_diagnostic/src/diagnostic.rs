//! Core diagnostic types for structured error reporting.

use std::fmt;

use genstd_ir::Span;

use crate::ErrorCode;

/// Severity level for diagnostics. The linker only reports errors.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A labeled location with a message.
///
/// Link errors involve a Gno and a Go declaration in different files, so
/// every label names its file when one is known.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    /// File the span points into.
    pub path: Option<String>,
    /// The source location to highlight.
    pub span: Span,
    /// The label text explaining this location.
    pub message: String,
    /// Whether this is the primary error location.
    pub is_primary: bool,
}

impl Label {
    /// Create a primary label (the main error location).
    pub fn primary(path: Option<String>, span: Span, message: impl Into<String>) -> Self {
        Label {
            path,
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a secondary label (related context).
    pub fn secondary(path: Option<String>, span: Span, message: impl Into<String>) -> Self {
        Label {
            path,
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A diagnostic with all context needed for a useful build-log entry.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Severity level.
    pub severity: Severity,
    /// Main error message.
    pub message: String,
    /// Labeled locations showing where the error occurred.
    pub labels: Vec<Label>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
    /// Text suggestions for fixing the error.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(
        mut self,
        path: Option<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        self.labels.push(Label::primary(path, span, message));
        self
    }

    /// Add a secondary label for context.
    pub fn with_secondary_label(
        mut self,
        path: Option<String>,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        self.labels.push(Label::secondary(path, span, message));
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { ":::" };
            match &label.path {
                Some(path) => write!(
                    f,
                    "\n  {marker} {path} {:?}: {}",
                    label.span, label.message
                )?,
                None => write!(f, "\n  {marker} {:?}: {}", label.span, label.message)?,
            }
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {suggestion}")?;
        }

        Ok(())
    }
}
