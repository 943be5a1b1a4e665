//! Input/output rank conflict validation
//!
//! Runs once, before any request is made. Requesting the input rank as an
//! output rank is redundant (the input column already holds it), so it is
//! dropped when other output ranks remain and rejected when it is the only one.

use crate::error::{CliError, Result};
use lineage_common::Rank;
use tracing::{error, warn};

/// Validate `output_ranks` against `input_rank` and return the ranks to emit
///
/// Duplicate output ranks are collapsed to their first occurrence; the
/// requested order is otherwise preserved.
pub fn validate_ranks(input_rank: Rank, output_ranks: &[Rank]) -> Result<Vec<Rank>> {
    let mut ranks: Vec<Rank> = Vec::with_capacity(output_ranks.len());
    for &rank in output_ranks {
        if ranks.contains(&rank) {
            warn!(rank = %rank, "Output level listed more than once, keeping the first");
        } else {
            ranks.push(rank);
        }
    }

    if ranks.is_empty() {
        return Err(CliError::config(
            "No output levels specified. Use --out-level to specify the output levels.",
        ));
    }

    if let Some(position) = ranks.iter().position(|&rank| rank == input_rank) {
        if ranks.len() == 1 {
            error!(
                input_level = %input_rank,
                "The input level conflicts with the only output level"
            );
            return Err(CliError::RankConflict(input_rank));
        }

        warn!(
            input_level = %input_rank,
            "The input level conflicts with one of the output levels and will be ignored"
        );
        ranks.remove(position);
    }

    Ok(ranks)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_conflict_keeps_ranks_in_order() {
        let ranks = validate_ranks(Rank::Family, &[Rank::Species, Rank::Kingdom, Rank::Genus]).unwrap();
        assert_eq!(ranks, vec![Rank::Species, Rank::Kingdom, Rank::Genus]);
    }

    #[test]
    fn test_sole_conflicting_rank_is_fatal() {
        for rank in Rank::ALL {
            let err = validate_ranks(rank, &[rank]).unwrap_err();
            assert!(matches!(err, CliError::RankConflict(r) if r == rank));
        }
    }

    #[test]
    fn test_conflicting_rank_removed_when_others_remain() {
        for input in Rank::ALL {
            let outputs: Vec<Rank> = Rank::ALL.to_vec();
            let ranks = validate_ranks(input, &outputs).unwrap();

            let expected: Vec<Rank> = Rank::ALL.into_iter().filter(|&r| r != input).collect();
            assert_eq!(ranks, expected);
        }
    }

    #[test]
    fn test_duplicates_collapse_before_conflict_check() {
        let ranks = validate_ranks(Rank::Family, &[Rank::Genus, Rank::Genus, Rank::Species]).unwrap();
        assert_eq!(ranks, vec![Rank::Genus, Rank::Species]);

        // Repeating the input rank does not make it "one of several"
        let err = validate_ranks(Rank::Family, &[Rank::Family, Rank::Family]).unwrap_err();
        assert!(matches!(err, CliError::RankConflict(Rank::Family)));
    }

    #[test]
    fn test_empty_output_is_config_error() {
        let err = validate_ranks(Rank::Family, &[]).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
