//! Resolved taxa and descendant records

use super::rank::Rank;
use serde::{Deserialize, Serialize};

/// Marker for a lineage value the taxonomy service did not report
pub const NOT_AVAILABLE: &str = "N/A";

/// A taxon resolved from a free-text name
///
/// A taxon without a key is the "unresolved" sentinel: every rank value and
/// the rank label are [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxon {
    /// Stable identifier in the taxonomy service (usage key)
    pub key: Option<i64>,
    /// The name that was queried
    pub name: String,
    /// Rank label reported by the service (e.g. "FAMILY")
    pub rank: String,
    lineage: [String; 7],
}

impl Taxon {
    /// Create a resolved taxon
    ///
    /// `lineage` is indexed by [`Rank::index`]; missing values become
    /// [`NOT_AVAILABLE`].
    pub fn resolved(
        key: i64,
        name: impl Into<String>,
        rank: Option<String>,
        lineage: [Option<String>; 7],
    ) -> Self {
        Self {
            key: Some(key),
            name: name.into(),
            rank: rank.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            lineage: lineage.map(|value| value.unwrap_or_else(|| NOT_AVAILABLE.to_string())),
        }
    }

    /// The unresolved sentinel for `name`
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            key: None,
            name: name.into(),
            rank: NOT_AVAILABLE.to_string(),
            lineage: std::array::from_fn(|_| NOT_AVAILABLE.to_string()),
        }
    }

    /// Whether the taxon carries an identifier
    pub fn is_resolved(&self) -> bool {
        self.key.is_some()
    }

    /// Lineage value at `rank`
    pub fn rank_value(&self, rank: Rank) -> &str {
        &self.lineage[rank.index()]
    }
}

/// A descendant taxon returned by a children listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTaxon {
    /// Absent when the service omitted it; such a child cannot be expanded
    pub key: Option<i64>,
    /// Scientific name
    pub name: String,
    /// Rank label reported by the service
    pub rank: String,
    pub genus: String,
    pub species: String,
}
