//! Core types shared by every pipeline stage.
//!
//! ## Key Types
//!
//! - `ConvertOptions`: Per-conversion configuration
//! - `ReleaseDate`: Month granularity date for printing cutoffs
//! - `Diagnostic`: Recoverable problem attached to a source line
//! - `ConvertError`: Terminal failures (empty deck, catalog loading)
//! - `SerializeError`: Failures writing the canonical format

pub mod config;
pub mod diagnostic;
pub mod error;

pub use config::{ConvertOptions, ReleaseDate};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use error::{CatalogError, ConvertError, SerializeError};
