//! Common types used across lineage
//!
//! - [`Rank`]: the ordered taxonomic rank model
//! - [`Taxon`] / [`ChildTaxon`]: records returned by the taxonomy service
//! - [`OutputRow`]: one flattened result row

mod rank;
mod row;
mod taxon;

pub use rank::Rank;
pub use row::OutputRow;
pub use taxon::{ChildTaxon, Taxon, NOT_AVAILABLE};
