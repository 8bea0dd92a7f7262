//! Card catalog: identities, printings, and lookup.
//!
//! ## Key Types
//!
//! - `CardId`: Opaque handle to a card identity
//! - `SetCode`: Case-insensitive printing identifier
//! - `Printing`: One edition of a card, with its release month
//! - `CardDefinition`: A card identity with its printings
//! - `CardCatalog`: Read-only lookup trait the resolver depends on
//! - `InMemoryCatalog`: Indexed in-memory implementation

pub mod catalog;
pub mod definition;

pub use catalog::{CardCatalog, InMemoryCatalog};
pub use definition::{CardDefinition, CardId, Printing, SetCode};
