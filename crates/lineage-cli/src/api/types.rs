//! GBIF species API request and response types
//!
//! Only the fields the resolver and expander read are modelled; everything
//! else in the payloads is ignored.

use lineage_common::{ChildTaxon, Taxon, NOT_AVAILABLE};
use serde::{Deserialize, Serialize};

/// `matchType` value for a definitive non-match
pub const MATCH_TYPE_NONE: &str = "NONE";

/// Response of `GET /species/match`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameMatchResponse {
    pub match_type: Option<String>,
    pub usage_key: Option<i64>,
    pub rank: Option<String>,
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub species: Option<String>,
}

/// Result of a name-match lookup
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Matched(Taxon),
    /// The service answered definitively that nothing matches
    NoMatch,
}

impl NameMatchResponse {
    /// Interpret the response for the queried `name`
    ///
    /// A match without a usage key cannot be expanded and is treated as no match.
    pub fn into_outcome(self, name: &str) -> MatchOutcome {
        if self.match_type.as_deref() == Some(MATCH_TYPE_NONE) {
            return MatchOutcome::NoMatch;
        }
        let Some(key) = self.usage_key else {
            return MatchOutcome::NoMatch;
        };

        MatchOutcome::Matched(Taxon::resolved(
            key,
            name,
            self.rank,
            [
                self.kingdom,
                self.phylum,
                self.class,
                self.order,
                self.family,
                self.genus,
                self.species,
            ],
        ))
    }
}

/// Response of `GET /species/{key}/children`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildrenResponse {
    #[serde(default)]
    pub results: Vec<ChildRecord>,
}

/// One entry of a children listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildRecord {
    pub key: Option<i64>,
    pub scientific_name: Option<String>,
    pub rank: Option<String>,
    pub genus: Option<String>,
    pub species: Option<String>,
}

impl ChildRecord {
    /// Whether the record's rank label names `rank`, ignoring case
    pub fn has_rank(&self, rank: lineage_common::Rank) -> bool {
        self.rank.as_deref().is_some_and(|label| rank.matches_label(label))
    }

    pub fn into_child(self) -> ChildTaxon {
        let not_available = || NOT_AVAILABLE.to_string();
        ChildTaxon {
            key: self.key,
            name: self.scientific_name.unwrap_or_else(not_available),
            rank: self.rank.unwrap_or_else(not_available),
            genus: self.genus.unwrap_or_else(not_available),
            species: self.species.unwrap_or_else(not_available),
        }
    }
}
