//! Flattened output rows

use super::rank::Rank;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One output record: an ordered mapping from rank to value
///
/// Columns are fixed at construction: the input rank first, then each
/// requested output rank. Unfilled columns hold an empty string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutputRow {
    columns: Vec<(Rank, String)>,
}

impl OutputRow {
    /// Create a row holding `name` at `input_rank` and an empty value for
    /// every output rank
    pub fn new(input_rank: Rank, name: impl Into<String>, output_ranks: &[Rank]) -> Self {
        let mut columns = Vec::with_capacity(output_ranks.len() + 1);
        columns.push((input_rank, name.into()));
        for &rank in output_ranks {
            if rank != input_rank {
                columns.push((rank, String::new()));
            }
        }
        Self { columns }
    }

    /// Set the value at `rank`, appending a column if the rank is not present
    pub fn set(&mut self, rank: Rank, value: impl Into<String>) {
        let value = value.into();
        match self.columns.iter_mut().find(|(r, _)| *r == rank) {
            Some((_, slot)) => *slot = value,
            None => self.columns.push((rank, value)),
        }
    }

    pub fn get(&self, rank: Rank) -> Option<&str> {
        self.columns
            .iter()
            .find(|(r, _)| *r == rank)
            .map(|(_, value)| value.as_str())
    }

    /// Ranks in column order
    pub fn ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.columns.iter().map(|(rank, _)| *rank)
    }

    /// Values in column order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for OutputRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (rank, value) in &self.columns {
            map.serialize_entry(rank.name(), value)?;
        }
        map.end()
    }
}
