//! Diagnostics collected during a conversion pass.
//!
//! Recoverable problems never interrupt a pass. Each one becomes a
//! `Diagnostic` tied to the 1-based source line it came from, and the
//! caller decides how to surface them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::SetCode;
use crate::deck::Section;

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational: the pass made a substitution the user may want to know about.
    Info,
    /// Something in the input was dropped or could not be understood.
    Warning,
}

/// What went wrong on a line.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// The line matched no recognized pattern.
    #[error("unrecognized line: '{text}'")]
    UnrecognizedLine { text: String },

    /// A bracketed header named no known section. The section cursor is kept.
    #[error("unknown section header '{header}', keeping current section")]
    UnknownSection { header: String },

    /// No catalog card matched the name under any rule.
    #[error("card not found: '{name}'")]
    UnresolvedCard { name: String },

    /// The requested printing was not available; another one was used.
    #[error("printing {requested} of '{name}' not found, using {}", .used.as_ref().map_or("no printing", SetCode::as_str))]
    PrintingSubstituted {
        name: String,
        requested: SetCode,
        used: Option<SetCode>,
    },

    /// Several catalog cards matched case-insensitively; the first was chosen.
    #[error("'{name}' is ambiguous, using '{chosen}'")]
    AmbiguousName { name: String, chosen: String },

    /// A deck name or format was given again and ignored.
    #[error("{field} already set, ignoring '{value}'")]
    NameIgnored { field: String, value: String },

    /// A metadata block field the deck has no place for.
    #[error("metadata field '{key}' ignored")]
    MetadataIgnored { key: String },

    /// Merged quantities of one entry went past the largest count.
    #[error("total of '{name}' in {section} exceeds {}, capped", u32::MAX)]
    QuantityCapped { name: String, section: Section },
}

impl DiagnosticKind {
    /// Severity of this kind of diagnostic.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::PrintingSubstituted { .. }
            | DiagnosticKind::AmbiguousName { .. }
            | DiagnosticKind::MetadataIgnored { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

/// A diagnostic attached to a source line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 1-based line number in the input text.
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    #[must_use]
    pub fn new(line: usize, kind: DiagnosticKind) -> Self {
        Self { line, kind }
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}
