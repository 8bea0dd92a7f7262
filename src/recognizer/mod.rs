//! Line classification and token stream recognition.
//!
//! ## Key Types
//!
//! - `Token`: One classified line with its line number
//! - `TokenKind`: Card line, section header, metadata, comment, ...
//! - `RecognizerState`: Fold accumulator tracking the current section
//! - `TokenStream`: Routed content tokens plus line diagnostics
//!
//! Recognition is single-pass and never looks ahead: output depends only
//! on line order.

pub mod classifier;
pub mod stream;
pub mod token;

pub use classifier::{classify_line, classify_metadata_line};
pub use stream::{recognize, RecognizerState, RoutedToken, TokenStream};
pub use token::{CardLine, MetadataField, MetadataKey, SectionTag, Token, TokenKind};
