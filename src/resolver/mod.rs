//! Catalog resolution.
//!
//! Turns routed tokens into deck entries by looking card names up in a
//! `CardCatalog`. Name matching tries, in order, first match wins:
//!
//! 1. exact, case-sensitive name
//! 2. case-insensitive name (lowest `CardId` if several differ only in case)
//! 3. unique case-insensitive prefix, when enabled in `ConvertOptions`
//!
//! A requested set code selects that printing when it is available under
//! the release cutoff; otherwise the card's default printing is used and a
//! substitution notice is recorded. Lines that match nothing become
//! `UnresolvedEntry` values. Nothing here ever aborts the pass.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{CardCatalog, CardId, SetCode};
use crate::core::{ConvertOptions, Diagnostic, DiagnosticKind};
use crate::deck::{DeckBuilder, DeckEntry, NameSource, Section, UnresolvedEntry};
use crate::recognizer::{CardLine, MetadataField, MetadataKey, RoutedToken, TokenKind};

/// Which name rule produced a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchRule {
    Exact,
    CaseInsensitive,
    UniquePrefix,
}

/// A successful name lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameMatch {
    pub card: CardId,
    pub rule: MatchRule,
    /// More than one card matched case-insensitively.
    pub ambiguous: bool,
}

/// Printing chosen for an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrintingChoice {
    pub printing: Option<SetCode>,
    /// A set code was requested but not honored.
    pub substituted: bool,
}

/// Resolves tokens against a catalog.
///
/// Holds only shared references, so one catalog can back many resolvers
/// running on different threads.
#[derive(Debug)]
pub struct Resolver<'c, C: CardCatalog + ?Sized> {
    catalog: &'c C,
    options: &'c ConvertOptions,
}

impl<'c, C: CardCatalog + ?Sized> Resolver<'c, C> {
    #[must_use]
    pub fn new(catalog: &'c C, options: &'c ConvertOptions) -> Self {
        Self { catalog, options }
    }

    /// Look a card name up under the match rules.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<NameMatch> {
        if let Some(card) = self.catalog.find_exact(name) {
            return Some(NameMatch {
                card,
                rule: MatchRule::Exact,
                ambiguous: false,
            });
        }

        let folded = self.catalog.find_case_insensitive(name);
        if let Some(&card) = folded.first() {
            return Some(NameMatch {
                card,
                rule: MatchRule::CaseInsensitive,
                ambiguous: folded.len() > 1,
            });
        }

        if self.options.prefix_matching {
            if let [card] = self.catalog.find_prefix(name, 2).as_slice() {
                return Some(NameMatch {
                    card: *card,
                    rule: MatchRule::UniquePrefix,
                    ambiguous: false,
                });
            }
        }

        None
    }

    /// Pick the printing for a resolved card.
    #[must_use]
    pub fn choose_printing(&self, card: CardId, requested: Option<&SetCode>) -> PrintingChoice {
        let cutoff = self.options.release_cutoff;

        if let Some(set) = requested {
            let available = self
                .catalog
                .printing(card, set)
                .is_some_and(|p| p.released_by(cutoff));
            if available {
                return PrintingChoice {
                    printing: Some(set.clone()),
                    substituted: false,
                };
            }
        }

        PrintingChoice {
            printing: self
                .catalog
                .default_printing(card, cutoff)
                .map(|p| p.set.clone()),
            substituted: requested.is_some(),
        }
    }

    /// Resolve every token into `builder`, appending diagnostics.
    pub fn resolve_into(
        &self,
        tokens: impl IntoIterator<Item = RoutedToken>,
        builder: &mut DeckBuilder,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        for routed in tokens {
            let line = routed.token.line;
            match routed.token.kind {
                TokenKind::Card(card) => {
                    self.resolve_card(line, card, routed.section, builder, diagnostics);
                }
                TokenKind::Metadata(field) => {
                    apply_metadata(line, field, builder, diagnostics);
                }
                _ => {}
            }
        }
    }

    fn resolve_card(
        &self,
        line: usize,
        card: CardLine,
        section: Section,
        builder: &mut DeckBuilder,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(found) = self.lookup(&card.name) else {
            debug!(line, name = %card.name, "card not found");
            diagnostics.push(Diagnostic::new(
                line,
                DiagnosticKind::UnresolvedCard {
                    name: card.name.clone(),
                },
            ));
            builder.add_unresolved(UnresolvedEntry {
                name: card.name,
                quantity: card.quantity,
                section,
                line,
            });
            return;
        };

        let canonical = self
            .catalog
            .card(found.card)
            .map_or_else(|| card.name.clone(), |def| def.name.clone());

        if found.rule != MatchRule::Exact {
            debug!(line, name = %card.name, resolved = %canonical, rule = ?found.rule, "inexact name match");
        }
        if found.ambiguous {
            diagnostics.push(Diagnostic::new(
                line,
                DiagnosticKind::AmbiguousName {
                    name: card.name.clone(),
                    chosen: canonical.clone(),
                },
            ));
        }

        let choice = self.choose_printing(found.card, card.set.as_ref());
        if choice.substituted {
            if let Some(requested) = card.set {
                debug!(line, name = %canonical, requested = %requested, "printing substituted");
                diagnostics.push(Diagnostic::new(
                    line,
                    DiagnosticKind::PrintingSubstituted {
                        name: canonical.clone(),
                        requested,
                        used: choice.printing.clone(),
                    },
                ));
            }
        }

        let capped = builder.add_entry(
            section,
            DeckEntry {
                card: found.card,
                quantity: card.quantity,
                printing: choice.printing,
                foil: card.foil,
            },
        );
        if capped {
            diagnostics.push(Diagnostic::new(
                line,
                DiagnosticKind::QuantityCapped {
                    name: canonical,
                    section,
                },
            ));
        }
    }
}

fn apply_metadata(
    line: usize,
    field: MetadataField,
    builder: &mut DeckBuilder,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let accepted = match field.key {
        MetadataKey::Name => builder.set_name(field.value.as_str(), NameSource::Explicit),
        MetadataKey::Format => builder.set_format(field.value.as_str()),
    };
    if !accepted {
        diagnostics.push(Diagnostic::new(
            line,
            DiagnosticKind::NameIgnored {
                field: field.key.as_str().to_string(),
                value: field.value,
            },
        ));
    }
}
