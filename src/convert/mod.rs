//! Conversion pipeline entry point.
//!
//! `Converter` runs one full pass: classify lines, route them to sections,
//! resolve card names against the catalog, and assemble the deck. Each
//! call owns all of its mutable state; the catalog and options are only
//! borrowed, so a single `Converter` can serve many threads at once.

use std::path::Path;

use tracing::info;

use crate::cards::CardCatalog;
use crate::core::{ConvertError, ConvertOptions};
use crate::deck::{Conversion, DeckBuilder, NameSource};
use crate::recognizer::recognize;
use crate::resolver::Resolver;

/// Converts deck list text into a `Deck`.
///
/// ## Example
///
/// ```
/// use rust_deckconv::cards::{CardDefinition, InMemoryCatalog};
/// use rust_deckconv::convert::Converter;
/// use rust_deckconv::core::ConvertOptions;
/// use rust_deckconv::deck::Section;
///
/// let catalog = InMemoryCatalog::from_cards([
///     CardDefinition::new("Lightning Bolt"),
///     CardDefinition::new("Negate"),
/// ])
/// .unwrap();
///
/// let converter = Converter::new(&catalog, ConvertOptions::default());
/// let conversion = converter.convert("4 Lightning Bolt\nSideboard\n2 Negate").unwrap();
///
/// assert_eq!(conversion.deck.section(Section::Main)[0].quantity, 4);
/// assert_eq!(conversion.deck.section(Section::Sideboard)[0].quantity, 2);
/// ```
#[derive(Debug)]
pub struct Converter<'c, C: CardCatalog + ?Sized> {
    catalog: &'c C,
    options: ConvertOptions,
}

impl<'c, C: CardCatalog + ?Sized> Converter<'c, C> {
    #[must_use]
    pub fn new(catalog: &'c C, options: ConvertOptions) -> Self {
        Self { catalog, options }
    }

    #[must_use]
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert deck text.
    ///
    /// Fails only if no card could be recognized and resolved at all.
    pub fn convert(&self, text: &str) -> Result<Conversion, ConvertError> {
        self.run(text, None)
    }

    /// Convert deck text, naming the deck `default_name` unless the text
    /// carries its own name.
    pub fn convert_with_default_name(
        &self,
        text: &str,
        default_name: &str,
    ) -> Result<Conversion, ConvertError> {
        self.run(text, Some(default_name))
    }

    fn run(&self, text: &str, default_name: Option<&str>) -> Result<Conversion, ConvertError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let stream = recognize(text);

        let mut builder = DeckBuilder::new();
        let mut diagnostics = stream.diagnostics;
        Resolver::new(self.catalog, &self.options).resolve_into(
            stream.tokens,
            &mut builder,
            &mut diagnostics,
        );
        if let Some(name) = default_name {
            builder.set_name(name, NameSource::Derived);
        }
        diagnostics.sort_by_key(|d| d.line);

        let conversion = builder.finish(diagnostics)?;
        info!(
            deck = conversion.deck.name(),
            entries = conversion.deck.entry_count(),
            unresolved = conversion.deck.unresolved().len(),
            diagnostics = conversion.diagnostics.len(),
            "deck converted"
        );
        Ok(conversion)
    }
}

/// Default deck name for an input file: its file name up to the last `.`.
///
/// ```
/// use rust_deckconv::convert::derive_deck_name;
///
/// assert_eq!(derive_deck_name("decks/Mono Red.v2.txt").as_deref(), Some("Mono Red.v2"));
/// assert_eq!(derive_deck_name("decks/burn").as_deref(), Some("burn"));
/// ```
#[must_use]
pub fn derive_deck_name(path: impl AsRef<Path>) -> Option<String> {
    let file_name = path.as_ref().file_name()?.to_str()?;
    let stem = match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(dot) => &file_name[..dot],
    };
    let stem = stem.trim();
    (!stem.is_empty()).then(|| stem.to_string())
}
