//! API client module
//!
//! HTTP client and wire types for the GBIF species API, plus the
//! [`TaxonomySource`] trait the engine is written against.

pub mod client;
pub mod endpoints;
pub mod source;
pub mod types;

pub use client::GbifClient;
pub use source::TaxonomySource;
pub use types::*;
