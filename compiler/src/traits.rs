use std::fmt;

use serde::Serialize;

use crate::{
    error::IntentionError,
    model::{ClassName, GeneratedFile},
    types::Element,
};

/// Why a type reference could not be resolved directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The type exists but is still being compiled in this round. The
    /// descriptor is its textual fully-qualified name.
    Deferred { descriptor: String },
    Unknown(String),
}

/// Symbol lookup supplied by the host.
pub trait Elements {
    fn package_of(&self, element: &Element) -> String;

    /// Resolves `reference` as written inside `scope`.
    fn resolve_type(&self, reference: &str, scope: &Element) -> Result<ClassName, ResolveError>;
}

/// Sink for generated sources.
pub trait Filer {
    fn create_source(&self, file: &GeneratedFile) -> Result<(), IntentionError>;
}

/// Sink for diagnostics.
pub trait Messager {
    fn print_message(&self, diagnostic: Diagnostic);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    Error,
    Warning,
    Note,
}

/// Where a diagnostic points: a declaration or one of its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub symbol: String,
    pub line:   usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind:     DiagnosticKind,
    pub message:  String,
    pub location: Option<Location>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, location: Option<Location>) -> Diagnostic {
        Diagnostic {
            kind: DiagnosticKind::Error,
            message: message.into(),
            location,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DiagnosticKind::Error   => "error",
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Note    => "note",
        };
        match &self.location {
            Some(loc) => write!(
                f,
                "{}:{}:{}: {} ({})",
                kind, loc.line, loc.column, self.message, loc.symbol
            ),
            None => write!(f, "{}: {}", kind, self.message),
        }
    }
}
