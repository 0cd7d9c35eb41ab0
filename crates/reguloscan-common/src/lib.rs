//! reguloscan-common: Shared types, errors, and the sandboxed HTTP client
//! used across all ReguloSCAN crates.

pub mod error;
pub mod entities;
pub mod sandbox;

// Re-export commonly used types
pub use entities::{EvidenceKind, EvidenceVector, Priority, VariantQuery};
pub use error::{ReguloError, Result};
