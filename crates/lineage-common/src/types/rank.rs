//! The taxonomic rank model
//!
//! Ranks form a fixed, totally ordered sequence from kingdom (least specific)
//! to species (most specific). Every ordering decision in the workspace goes
//! through [`Rank::index`], never through the rank names.

use crate::error::LineageError;
use serde::{Deserialize, Serialize};

/// One of the seven taxonomic classification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Kingdom,
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl Rank {
    /// All ranks, ordered from kingdom to species
    pub const ALL: [Rank; 7] = [
        Rank::Kingdom,
        Rank::Phylum,
        Rank::Class,
        Rank::Order,
        Rank::Family,
        Rank::Genus,
        Rank::Species,
    ];

    /// Position in the rank sequence (kingdom = 0, species = 6)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rank at the given position, if any
    pub fn from_index(index: usize) -> Option<Rank> {
        Self::ALL.get(index).copied()
    }

    /// The most specific rank
    pub fn last() -> Rank {
        Rank::Species
    }

    /// Map a single-letter abbreviation (`k p c o f g s`) to its rank
    pub fn from_abbreviation(abbreviation: char) -> Option<Rank> {
        match abbreviation.to_ascii_lowercase() {
            'k' => Some(Rank::Kingdom),
            'p' => Some(Rank::Phylum),
            'c' => Some(Rank::Class),
            'o' => Some(Rank::Order),
            'f' => Some(Rank::Family),
            'g' => Some(Rank::Genus),
            's' => Some(Rank::Species),
            _ => None,
        }
    }

    /// Single-letter abbreviation
    pub fn abbreviation(self) -> char {
        match self {
            Rank::Kingdom => 'k',
            Rank::Phylum => 'p',
            Rank::Class => 'c',
            Rank::Order => 'o',
            Rank::Family => 'f',
            Rank::Genus => 'g',
            Rank::Species => 's',
        }
    }

    /// Lowercase rank name as used by the taxonomy service
    pub fn name(self) -> &'static str {
        match self {
            Rank::Kingdom => "kingdom",
            Rank::Phylum => "phylum",
            Rank::Class => "class",
            Rank::Order => "order",
            Rank::Family => "family",
            Rank::Genus => "genus",
            Rank::Species => "species",
        }
    }

    /// Capitalized column header
    pub fn label(self) -> &'static str {
        match self {
            Rank::Kingdom => "Kingdom",
            Rank::Phylum => "Phylum",
            Rank::Class => "Class",
            Rank::Order => "Order",
            Rank::Family => "Family",
            Rank::Genus => "Genus",
            Rank::Species => "Species",
        }
    }

    /// Whether a rank label reported by the service names this rank
    pub fn matches_label(self, label: &str) -> bool {
        label.eq_ignore_ascii_case(self.name())
    }
}

impl std::str::FromStr for Rank {
    type Err = LineageError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Rank::from_abbreviation(c).ok_or_else(|| LineageError::InvalidRank(s.to_string()));
        }

        Rank::ALL
            .into_iter()
            .find(|rank| rank.matches_label(trimmed))
            .ok_or_else(|| LineageError::InvalidRank(s.to_string()))
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
