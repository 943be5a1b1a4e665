//! Lineage Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the lineage workspace.
//!
//! # Overview
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Console and log-file tracing setup
//! - **Types**: The taxonomic rank model, resolved taxa and output rows
//!
//! # Example
//!
//! ```
//! use lineage_common::types::Rank;
//!
//! let rank: Rank = "f".parse().unwrap();
//! assert_eq!(rank, Rank::Family);
//! assert!(Rank::Genus > rank);
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{LineageError, Result};
pub use types::{ChildTaxon, OutputRow, Rank, Taxon, NOT_AVAILABLE};
