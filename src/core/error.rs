//! Terminal errors.
//!
//! Only one thing stops a conversion: a deck that ends up with no entries
//! at all. Everything else is a `Diagnostic`. Catalog loading and
//! serialization have their own error types.

use thiserror::Error;

use super::diagnostic::Diagnostic;
use crate::cards::CardId;

/// Errors raised while loading a card catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid catalog snapshot: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("card '{0}' is listed more than once")]
    DuplicateName(String),

    #[error("card '{name}' names default printing {set} which it does not have")]
    UnknownDefaultPrinting { name: String, set: String },

    /// Set codes must survive being written as `|SET` in a deck line.
    #[error("card '{name}' has malformed set code '{set}'")]
    InvalidSetCode { name: String, set: String },

    /// Card IDs are 32 bits wide.
    #[error("catalog is full: at most {} cards fit", u64::from(u32::MAX) + 1)]
    TooManyCards,
}

/// Errors raised while writing a deck in the canonical format.
#[derive(Debug, Error)]
pub enum SerializeError {
    /// The deck refers to a card the catalog does not have, i.e. it was
    /// resolved against a different catalog.
    #[error("{0} is not in the catalog")]
    UnknownCard(CardId),

    #[error("failed to format deck: {0}")]
    Write(#[from] std::fmt::Error),
}

/// Errors that end a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input produced no deck entries in any section.
    ///
    /// Carries the diagnostics of the pass so the caller can explain why.
    #[error("deck is empty: no card could be recognized and resolved ({} diagnostics)", .diagnostics.len())]
    EmptyDeck { diagnostics: Vec<Diagnostic> },
}

impl ConvertError {
    /// Diagnostics gathered before the error.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            ConvertError::EmptyDeck { diagnostics } => diagnostics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiagnosticKind;

    #[test]
    fn test_empty_deck_keeps_diagnostics() {
        let err = ConvertError::EmptyDeck {
            diagnostics: vec![Diagnostic::new(
                1,
                DiagnosticKind::UnrecognizedLine {
                    text: "???".to_string(),
                },
            )],
        };

        assert_eq!(err.diagnostics().len(), 1);
        assert!(err.to_string().contains("1 diagnostics"));
    }

    #[test]
    fn test_serialize_error_message() {
        let err = SerializeError::UnknownCard(CardId::new(7));
        assert_eq!(err.to_string(), "Card(7) is not in the catalog");
    }

    #[test]
    fn test_catalog_error_messages() {
        let err = CatalogError::DuplicateName("Island".to_string());
        assert_eq!(err.to_string(), "card 'Island' is listed more than once");

        let err = CatalogError::InvalidSetCode {
            name: "Island".to_string(),
            set: "A B".to_string(),
        };
        assert_eq!(err.to_string(), "card 'Island' has malformed set code 'A B'");

        assert_eq!(
            CatalogError::TooManyCards.to_string(),
            "catalog is full: at most 4294967296 cards fit"
        );
    }
}
