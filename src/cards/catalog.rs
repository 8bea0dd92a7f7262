//! Card catalog lookup.
//!
//! `CardCatalog` is the read-only lookup capability the pipeline resolves
//! names against. `InMemoryCatalog` is the stock implementation: it is
//! built once by the host, then shared by reference between any number of
//! concurrent conversions.

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::definition::{CardDefinition, CardId, Printing, SetCode};
use crate::core::{CatalogError, ReleaseDate};

/// Read-only card lookup.
///
/// Implementations must be safe to query from several threads at once and
/// must not change while a conversion is running.
pub trait CardCatalog: Send + Sync {
    /// Get a card definition by ID.
    fn card(&self, id: CardId) -> Option<&CardDefinition>;

    /// Find the card whose name is exactly `name` (case-sensitive).
    fn find_exact(&self, name: &str) -> Option<CardId>;

    /// Find every card whose name equals `name` ignoring case, in ID order.
    fn find_case_insensitive(&self, name: &str) -> SmallVec<[CardId; 1]>;

    /// Find up to `limit` cards whose name starts with `prefix` ignoring case.
    fn find_prefix(&self, prefix: &str, limit: usize) -> Vec<CardId>;

    /// Find the printing of a card in the given set.
    fn printing(&self, id: CardId, set: &SetCode) -> Option<&Printing> {
        self.card(id)?.printing(set)
    }

    /// The default printing of a card under an optional release cutoff.
    fn default_printing(&self, id: CardId, cutoff: Option<ReleaseDate>) -> Option<&Printing> {
        self.card(id)?.default_printing(cutoff)
    }
}

/// Catalog held entirely in memory.
///
/// ## Example
///
/// ```
/// use rust_deckconv::cards::{CardCatalog, CardDefinition, InMemoryCatalog, Printing};
///
/// let mut catalog = InMemoryCatalog::new();
/// let bolt = catalog
///     .register(CardDefinition::new("Lightning Bolt").with_printing(Printing::new("M10", None)))
///     .unwrap();
///
/// assert_eq!(catalog.find_exact("Lightning Bolt"), Some(bolt));
/// assert_eq!(catalog.find_case_insensitive("lightning bolt").as_slice(), &[bolt]);
/// assert_eq!(catalog.find_prefix("light", 2), vec![bolt]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    /// Card definitions, indexed by `CardId`.
    cards: Vec<CardDefinition>,

    by_name: FxHashMap<String, CardId>,

    by_folded_name: FxHashMap<String, SmallVec<[CardId; 1]>>,

    /// Case-folded names sorted for prefix search.
    sorted_names: Vec<(String, CardId)>,
}

impl InMemoryCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition and return its assigned ID.
    ///
    /// Fails if a card with the same exact name is already registered, if
    /// a set code could not be read back from a deck line, or if the
    /// designated default printing is not one of the card's printings.
    pub fn register(&mut self, card: CardDefinition) -> Result<CardId, CatalogError> {
        if self.by_name.contains_key(&card.name) {
            return Err(CatalogError::DuplicateName(card.name));
        }
        if let Some(bad) = card.printings.iter().find(|p| !p.set.is_well_formed()) {
            return Err(CatalogError::InvalidSetCode {
                set: bad.set.to_string(),
                name: card.name,
            });
        }
        if let Some(default) = &card.default_printing {
            if card.printing(default).is_none() {
                return Err(CatalogError::UnknownDefaultPrinting {
                    name: card.name,
                    set: default.to_string(),
                });
            }
        }

        let id = card_id_at(self.cards.len())?;
        let folded = card.name.to_lowercase();

        self.by_name.insert(card.name.clone(), id);
        self.by_folded_name.entry(folded.clone()).or_default().push(id);
        let pos = self.sorted_names.partition_point(|(name, _)| name.as_str() <= folded.as_str());
        self.sorted_names.insert(pos, (folded, id));
        self.cards.push(card);

        Ok(id)
    }

    /// Build a catalog from card definitions.
    pub fn from_cards(
        cards: impl IntoIterator<Item = CardDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON array of card definitions.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, CatalogError> {
        let cards: Vec<CardDefinition> = serde_json::from_reader(reader)?;
        Self::from_cards(cards)
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }

    /// Encode the catalog as a compact binary snapshot.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, CatalogError> {
        Ok(bincode::serialize(&self.cards)?)
    }

    /// Rebuild a catalog from a snapshot made by `to_snapshot`.
    ///
    /// Card IDs are stable across the round trip.
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, CatalogError> {
        let cards: Vec<CardDefinition> = bincode::deserialize(bytes)?;
        Self::from_cards(cards)
    }

    /// Load a snapshot file.
    pub fn from_snapshot_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let bytes = std::fs::read(path)?;
        Self::from_snapshot(&bytes)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards with their IDs.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &CardDefinition)> {
        // `register` never hands out an ID past `u32::MAX`.
        (0u32..).zip(&self.cards).map(|(i, card)| (CardId::new(i), card))
    }
}

impl CardCatalog for InMemoryCatalog {
    fn card(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(id.index())
    }

    fn find_exact(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    fn find_case_insensitive(&self, name: &str) -> SmallVec<[CardId; 1]> {
        self.by_folded_name
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    fn find_prefix(&self, prefix: &str, limit: usize) -> Vec<CardId> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let folded = prefix.to_lowercase();
        let start = self
            .sorted_names
            .partition_point(|(name, _)| name.as_str() < folded.as_str());

        self.sorted_names[start..]
            .iter()
            .take_while(|(name, _)| name.starts_with(folded.as_str()))
            .take(limit)
            .map(|&(_, id)| id)
            .collect()
    }
}

/// ID for the card stored at `index`.
fn card_id_at(index: usize) -> Result<CardId, CatalogError> {
    u32::try_from(index)
        .map(CardId::new)
        .map_err(|_| CatalogError::TooManyCards)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::from_cards([
            CardDefinition::new("Lightning Bolt").with_printing(Printing::new("M10", None)),
            CardDefinition::new("Lightning Helix").with_printing(Printing::new("RAV", None)),
            CardDefinition::new("Negate").with_printing(Printing::new("M19", None)),
            CardDefinition::new("Fire // Ice").with_printing(Printing::new("APC", None)),
        ])
        .unwrap()
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let catalog = catalog();

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.find_exact("Lightning Bolt"), Some(CardId::new(0)));
        assert_eq!(catalog.find_exact("Negate"), Some(CardId::new(2)));
        assert_eq!(catalog.card(CardId::new(3)).unwrap().name, "Fire // Ice");
        assert!(catalog.card(CardId::new(99)).is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut catalog = catalog();
        let result = catalog.register(CardDefinition::new("Negate"));

        assert!(matches!(result, Err(CatalogError::DuplicateName(name)) if name == "Negate"));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_unknown_default_printing_rejected() {
        let mut catalog = InMemoryCatalog::new();
        let result = catalog.register(
            CardDefinition::new("Island")
                .with_printing(Printing::new("UNH", None))
                .with_default_printing("M10"),
        );

        assert!(matches!(result, Err(CatalogError::UnknownDefaultPrinting { .. })));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_malformed_set_code_rejected() {
        let mut catalog = InMemoryCatalog::new();
        let result = catalog.register(
            CardDefinition::new("Island")
                .with_printing(Printing::new("UNH", None))
                .with_printing(Printing::new("M 10", None)),
        );

        assert!(matches!(
            result,
            Err(CatalogError::InvalidSetCode { name, set }) if name == "Island" && set == "M 10"
        ));
        assert!(catalog.is_empty());

        let elves = catalog
            .register(CardDefinition::new("Llanowar Elves").with_printing(Printing::new("dd3_evg", None)))
            .unwrap();
        assert!(catalog.printing(elves, &SetCode::new("DD3_EVG")).is_some());
    }

    #[test]
    fn test_card_id_limit() {
        assert_eq!(card_id_at(7).unwrap(), CardId::new(7));
        assert_eq!(card_id_at(u32::MAX as usize).unwrap(), CardId::new(u32::MAX));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_card_id_overflow_rejected() {
        let result = card_id_at(u32::MAX as usize + 1);
        assert!(matches!(result, Err(CatalogError::TooManyCards)));
    }

    #[test]
    fn test_iter_ids_match_lookup() {
        let catalog = catalog();
        for (id, card) in catalog.iter() {
            assert_eq!(catalog.find_exact(&card.name), Some(id));
        }
    }

    #[test]
    fn test_exact_is_case_sensitive() {
        let catalog = catalog();
        assert!(catalog.find_exact("lightning bolt").is_none());
        assert_eq!(
            catalog.find_case_insensitive("LIGHTNING BOLT").as_slice(),
            &[CardId::new(0)]
        );
        assert!(catalog.find_case_insensitive("Lightning").is_empty());
    }

    #[test]
    fn test_case_insensitive_collisions_in_id_order() {
        let mut catalog = catalog();
        let upper = catalog.register(CardDefinition::new("NEGATE")).unwrap();

        assert_eq!(
            catalog.find_case_insensitive("negate").as_slice(),
            &[CardId::new(2), upper]
        );
    }

    #[test]
    fn test_find_prefix() {
        let catalog = catalog();

        assert_eq!(catalog.find_prefix("light", 5).len(), 2);
        assert_eq!(catalog.find_prefix("LIGHTNING H", 5), vec![CardId::new(1)]);
        assert_eq!(catalog.find_prefix("light", 1).len(), 1);
        assert!(catalog.find_prefix("zzz", 5).is_empty());
        assert!(catalog.find_prefix("", 5).is_empty());
    }

    #[test]
    fn test_trait_printing_lookups() {
        let catalog = catalog();
        let bolt = CardId::new(0);

        assert!(catalog.printing(bolt, &SetCode::new("m10")).is_some());
        assert!(catalog.printing(bolt, &SetCode::new("LEA")).is_none());
        assert_eq!(catalog.default_printing(bolt, None).unwrap().set.as_str(), "M10");
        assert!(catalog.default_printing(CardId::new(99), None).is_none());
    }

    #[test]
    fn test_json_loading() {
        let json = r#"[
            { "name": "Counterspell", "printings": [{ "set": "7ED", "released": "2001-04" }] },
            { "name": "Plains" }
        ]"#;
        let catalog = InMemoryCatalog::from_json_reader(json.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.card(CardId::new(1)).unwrap().printings.is_empty());
    }

    #[test]
    fn test_json_loading_rejects_garbage() {
        let result = InMemoryCatalog::from_json_reader("{ not json".as_bytes());
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let catalog = catalog();
        let bytes = catalog.to_snapshot().unwrap();
        let restored = InMemoryCatalog::from_snapshot(&bytes).unwrap();

        assert_eq!(restored.len(), catalog.len());
        for (id, card) in catalog.iter() {
            assert_eq!(restored.card(id), Some(card));
        }
    }

    #[test]
    fn test_json_path_missing_file() {
        let result = InMemoryCatalog::from_json_path("/nonexistent/catalog.json");
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
