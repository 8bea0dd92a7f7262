//! Token stream recognition.
//!
//! Folds classified lines into a stream of content tokens, each routed to
//! the section that was active when its line was read. The section cursor
//! is explicit state in `RecognizerState`, threaded through the fold; it
//! starts at `Section::Main` and moves only on section headers.
//!
//! A metadata header (`[metadata]`, `About`) opens a metadata block that
//! lasts until the next deck section header. Inside it, field lines are
//! read as metadata and never reach the resolver.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::classifier::{classify_line, classify_metadata_line};
use super::token::{SectionTag, Token, TokenKind};
use crate::core::{Diagnostic, DiagnosticKind};
use crate::deck::Section;

/// A content token with the section it is routed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutedToken {
    pub token: Token,
    pub section: Section,
}

/// Output of the recognizer: content tokens in line order, plus
/// diagnostics for lines that were dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStream {
    /// Card and metadata tokens only.
    pub tokens: Vec<RoutedToken>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Accumulator for the recognition fold.
///
/// ## Usage
///
/// ```
/// use rust_deckconv::deck::Section;
/// use rust_deckconv::recognizer::{classify_line, RecognizerState};
///
/// let state = ["4 Lightning Bolt", "Sideboard", "2 Negate"]
///     .iter()
///     .enumerate()
///     .map(|(i, line)| classify_line(i + 1, line))
///     .fold(RecognizerState::new(), RecognizerState::accept);
///
/// assert_eq!(state.current_section(), Section::Sideboard);
/// let stream = state.finish();
/// assert_eq!(stream.tokens[0].section, Section::Main);
/// assert_eq!(stream.tokens[1].section, Section::Sideboard);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RecognizerState {
    section: Section,
    in_metadata: bool,
    stream: TokenStream,
}

impl RecognizerState {
    /// Start a pass in the main section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Section new card lines are currently routed to.
    #[must_use]
    pub fn current_section(&self) -> Section {
        self.section
    }

    /// True between a metadata header and the next deck section header.
    #[must_use]
    pub fn in_metadata_block(&self) -> bool {
        self.in_metadata
    }

    /// Classify one raw line in the current state and consume it.
    #[must_use]
    pub fn accept_line(self, line: usize, text: &str) -> Self {
        let token = if self.in_metadata {
            classify_metadata_line(line, text).unwrap_or_else(|| classify_line(line, text))
        } else {
            classify_line(line, text)
        };
        self.accept(token)
    }

    /// Consume one token.
    #[must_use]
    pub fn accept(mut self, token: Token) -> Self {
        trace!(line = token.line, kind = ?token.kind, "classified line");

        match &token.kind {
            TokenKind::Card(card) => {
                let section = card.section_override.unwrap_or(self.section);
                self.stream.tokens.push(RoutedToken { token, section });
            }
            TokenKind::Metadata(_) => {
                let section = self.section;
                self.stream.tokens.push(RoutedToken { token, section });
            }
            TokenKind::ExtraMetadata { key, .. } => {
                self.stream.diagnostics.push(Diagnostic::new(
                    token.line,
                    DiagnosticKind::MetadataIgnored { key: key.clone() },
                ));
            }
            TokenKind::SectionHeader { tag, label } => match tag {
                SectionTag::Deck(Section::Unknown) => {
                    self.in_metadata = false;
                    self.stream.diagnostics.push(Diagnostic::new(
                        token.line,
                        DiagnosticKind::UnknownSection {
                            header: label.clone(),
                        },
                    ));
                }
                SectionTag::Deck(section) => {
                    debug!(line = token.line, from = ?self.section, to = ?section, "section changed");
                    self.in_metadata = false;
                    self.section = *section;
                }
                SectionTag::Metadata => {
                    debug!(line = token.line, "metadata block");
                    self.in_metadata = true;
                }
            },
            TokenKind::Unrecognized(text) => {
                self.stream.diagnostics.push(Diagnostic::new(
                    token.line,
                    DiagnosticKind::UnrecognizedLine { text: text.clone() },
                ));
            }
            TokenKind::Category(_) | TokenKind::Comment(_) | TokenKind::Blank => {}
        }
        self
    }

    /// End the pass.
    #[must_use]
    pub fn finish(self) -> TokenStream {
        self.stream
    }
}

/// Classify and route every line of `text`.
///
/// Lines are numbered from 1. `\r\n` line endings are accepted.
#[must_use]
pub fn recognize(text: &str) -> TokenStream {
    text.lines()
        .enumerate()
        .fold(RecognizerState::new(), |state, (i, line)| {
            state.accept_line(i + 1, line)
        })
        .finish()
}
