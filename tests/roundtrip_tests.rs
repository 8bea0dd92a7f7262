//! Canonical format round-trip tests.
//!
//! A deck written by the serializer must read back into the same deck,
//! and writing it again must produce identical text.

mod common;

use proptest::prelude::*;
use rust_deckconv::{
    serialize_deck, CardCatalog, CardDefinition, ConvertOptions, Converter, Deck,
    InMemoryCatalog, Printing, ReleaseDate, Section, SetCode,
};

fn convert(catalog: &InMemoryCatalog, options: ConvertOptions, text: &str) -> Deck {
    Converter::new(catalog, options)
        .convert(text)
        .expect("deck should convert")
        .deck
}

/// Convert, serialize, convert the output, and check both decks agree.
fn assert_round_trip(catalog: &InMemoryCatalog, options: ConvertOptions, text: &str) -> String {
    let first = convert(catalog, options.clone(), text);
    let dck = serialize_deck(&first, catalog).unwrap();
    let second = convert(catalog, options, &dck);

    assert_eq!(first.name(), second.name());
    assert_eq!(first.format(), second.format());
    assert_eq!(first.sections(), second.sections());
    assert_eq!(serialize_deck(&second, catalog).unwrap(), dck);
    dck
}

// =============================================================================
// Fixed cases
// =============================================================================

/// Test the round trip of a deck using every section.
#[test]
fn test_all_sections_round_trip() {
    let catalog = common::catalog();
    let text = "Name=Everything\nFormat=Casual\n4 Lightning Bolt\nSideboard\n2 Negate\n[Commander]\n1 Akroma, Angel of Wrath\n[Planes]\n1 Sol Ring\n[Schemes]\n1 Fire // Ice\n";

    let dck = assert_round_trip(&catalog, ConvertOptions::default(), text);

    assert_eq!(
        dck,
        "[metadata]\nName=Everything\nFormat=Casual\n[Main]\n4 Lightning Bolt\n[Sideboard]\n2 Negate\n[Commander]\n1 Akroma, Angel of Wrath\n[Planes]\n1 Sol Ring\n[Schemes]\n1 Fire // Ice\n"
    );
}

/// Test that non-default printings and foils survive the round trip.
#[test]
fn test_printings_and_foils_round_trip() {
    let catalog = common::catalog();
    let text = "4 Lightning Bolt (LEA) 161\n3 Island\n2 Island (UNH)\n1 Island (DMU) *F*\n1 Plains";

    let dck = assert_round_trip(&catalog, ConvertOptions::default(), text);

    assert_eq!(
        dck,
        "[metadata]\n[Main]\n4 Lightning Bolt|LEA\n3 Island\n2 Island|UNH\n1 Island|DMU *F*\n1 Plains\n"
    );
}

/// Test the round trip under a release cutoff.
#[test]
fn test_cutoff_round_trip() {
    let catalog = common::catalog();
    let options = ConvertOptions::new().with_release_cutoff(ReleaseDate::new(2005, 1).unwrap());

    let dck = assert_round_trip(&catalog, options, "4 Lightning Bolt\n2 Counterspell\n4 Island");

    assert_eq!(
        dck,
        "[metadata]\n[Main]\n4 Lightning Bolt|LEA\n2 Counterspell|7ED\n4 Island|UNH\n"
    );
}

/// Test a set code with an underscore chosen under a cutoff.
#[test]
fn test_underscore_set_code_round_trip() {
    let catalog = InMemoryCatalog::from_cards([CardDefinition::new("Llanowar Elves")
        .with_printing(Printing::new("DD3_EVG", ReleaseDate::new(2014, 12)))
        .with_printing(Printing::new("M19", ReleaseDate::new(2018, 7)))])
    .unwrap();
    let options = ConvertOptions::new().with_release_cutoff(ReleaseDate::new(2015, 1).unwrap());

    let dck = assert_round_trip(&catalog, options.clone(), "4 Llanowar Elves\n1 Llanowar Elves *F*");

    assert_eq!(
        dck,
        "[metadata]\n[Main]\n4 Llanowar Elves|DD3_EVG\n1 Llanowar Elves|DD3_EVG *F*\n"
    );
    let deck = convert(&catalog, options, &dck);
    assert_eq!(deck.section(Section::Main)[0].printing, Some(SetCode::new("DD3_EVG")));
}

/// Test that a deck with only a sideboard still writes an empty main.
#[test]
fn test_sideboard_only_round_trip() {
    let catalog = common::catalog();

    let dck = assert_round_trip(&catalog, ConvertOptions::default(), "SB: 2 Negate");

    assert_eq!(dck, "[metadata]\n[Main]\n[Sideboard]\n2 Negate\n");
}

// =============================================================================
// Properties
// =============================================================================

/// One generated card line.
#[derive(Clone, Debug)]
struct GenLine {
    section: Section,
    card: usize,
    quantity: u32,
    set: Option<usize>,
    foil: bool,
    lowercase: bool,
}

fn arb_section() -> impl Strategy<Value = Section> {
    prop::sample::select(Section::CANONICAL.to_vec())
}

fn arb_line() -> impl Strategy<Value = GenLine> {
    (
        arb_section(),
        0..common::CARD_NAMES.len(),
        1u32..100,
        prop::option::of(0usize..4),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(section, card, quantity, set, foil, lowercase)| GenLine {
            section,
            card,
            quantity,
            set,
            foil,
            lowercase,
        })
}

/// Render generated lines as deck text. Set index 3 asks for a set no card
/// has.
fn render(catalog: &InMemoryCatalog, lines: &[GenLine]) -> String {
    let mut text = String::new();
    for line in lines {
        let name = common::CARD_NAMES[line.card];
        let name = if line.lowercase {
            name.to_lowercase()
        } else {
            name.to_string()
        };
        text.push_str(&format!("[{}]\n{} {}", line.section.header_name(), line.quantity, name));

        let id = catalog.find_exact(common::CARD_NAMES[line.card]).unwrap();
        let printings = &catalog.card(id).unwrap().printings;
        match line.set {
            Some(3) => text.push_str(" (ZZZ)"),
            Some(i) if i < printings.len() => {
                text.push_str(&format!(" ({})", printings[i].set));
            }
            _ => {}
        }
        if line.foil {
            text.push_str(" *F*");
        }
        text.push('\n');
    }
    text
}

proptest! {
    /// Serializing and re-reading a converted deck reproduces it.
    #[test]
    fn prop_round_trip(lines in prop::collection::vec(arb_line(), 1..30)) {
        let catalog = common::catalog();
        let text = render(&catalog, &lines);
        let converter = Converter::new(&catalog, ConvertOptions::default());

        let first = converter.convert(&text).unwrap().deck;
        let dck = serialize_deck(&first, &catalog).unwrap();
        let second = converter.convert(&dck).unwrap();

        prop_assert_eq!(first.sections(), second.deck.sections());
        prop_assert!(second.diagnostics.is_empty());
        prop_assert_eq!(serialize_deck(&second.deck, &catalog).unwrap(), dck);
    }

    /// Quantities per section and card are preserved through merging.
    #[test]
    fn prop_quantities_preserved(lines in prop::collection::vec(arb_line(), 1..30)) {
        let catalog = common::catalog();
        let text = render(&catalog, &lines);
        let deck = Converter::new(&catalog, ConvertOptions::default())
            .convert(&text)
            .unwrap()
            .deck;

        for section in Section::CANONICAL {
            for (index, name) in common::CARD_NAMES.iter().enumerate() {
                let expected: u32 = lines
                    .iter()
                    .filter(|l| l.section == section && l.card == index)
                    .map(|l| l.quantity)
                    .sum();
                let id = catalog.find_exact(name).unwrap();
                let actual: u32 = deck
                    .section(section)
                    .iter()
                    .filter(|e| e.card == id)
                    .map(|e| e.quantity)
                    .sum();
                prop_assert_eq!(expected, actual, "{} in {}", name, section);
            }
        }
    }

    /// No two entries in a section share card, printing and foil flag.
    #[test]
    fn prop_entries_unique(lines in prop::collection::vec(arb_line(), 1..30)) {
        let catalog = common::catalog();
        let text = render(&catalog, &lines);
        let deck = Converter::new(&catalog, ConvertOptions::default())
            .convert(&text)
            .unwrap()
            .deck;

        for section in deck.sections() {
            let mut keys: Vec<_> = section
                .entries
                .iter()
                .map(|e| (e.card, e.printing.clone(), e.foil))
                .collect();
            let total = keys.len();
            keys.sort();
            keys.dedup();
            prop_assert_eq!(keys.len(), total);
        }
    }

    /// A quantity written on a line is the quantity read.
    #[test]
    fn prop_quantity_read_exactly(quantity in 1u32..=u32::MAX, x in any::<bool>()) {
        let catalog = common::catalog();
        let marker = if x { "x" } else { "" };
        let text = format!("{quantity}{marker} Negate");

        let deck = Converter::new(&catalog, ConvertOptions::default())
            .convert(&text)
            .unwrap()
            .deck;

        prop_assert_eq!(deck.section(Section::Main)[0].quantity, quantity);
    }
}
