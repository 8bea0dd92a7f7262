//! # rust-deckconv
//!
//! Converts free-form deck lists, as exported by many different tools and
//! websites, into a structured deck and a single canonical file format.
//!
//! ## Design Principles
//!
//! 1. **Total Recognition**: Every input line maps to exactly one token.
//!    Nothing in the input makes classification fail.
//!
//! 2. **Graceful Degradation**: Lines that cannot be understood or
//!    resolved become diagnostics. Only a deck with no entries at all is a
//!    failure.
//!
//! 3. **Determinism**: Output depends only on line order and the catalog.
//!    Entries keep insertion order; sections are written in a fixed order.
//!
//! ## Pipeline
//!
//! ```text
//! text -> classify_line -> RecognizerState -> Resolver -> DeckBuilder -> serialize_deck
//! ```
//!
//! ## Modules
//!
//! - `core`: Options, diagnostics, errors
//! - `cards`: Card identities, printings, catalog lookup
//! - `recognizer`: Line classifier and section-tracking token stream
//! - `resolver`: Name and printing resolution against a catalog
//! - `deck`: Deck data model and assembly
//! - `serializer`: Canonical DCK output
//! - `convert`: One-call pipeline entry point

pub mod cards;
pub mod convert;
pub mod core;
pub mod deck;
pub mod recognizer;
pub mod resolver;
pub mod serializer;

// Re-export commonly used types
pub use crate::core::{
    CatalogError, ConvertError, ConvertOptions, Diagnostic, DiagnosticKind, ReleaseDate,
    SerializeError, Severity,
};

pub use crate::cards::{CardCatalog, CardDefinition, CardId, InMemoryCatalog, Printing, SetCode};

pub use crate::recognizer::{
    classify_line, classify_metadata_line, recognize, CardLine, RecognizerState, RoutedToken, SectionTag, Token,
    TokenKind, TokenStream,
};

pub use crate::resolver::{MatchRule, Resolver};

pub use crate::deck::{
    Conversion, Deck, DeckBuilder, DeckEntry, DeckSection, NameSource, Section, UnresolvedEntry,
};

pub use crate::serializer::{serialize_deck, write_deck};

pub use crate::convert::{derive_deck_name, Converter};
