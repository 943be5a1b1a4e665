//! Descendant expansion below a resolved taxon
//!
//! The walk goes down the rank sequence one level at a time. At each level
//! that was requested, the current taxon's children of that rank are listed
//! and the walk fans out, one branch per child. Levels that were not requested
//! are stepped over without a request. A branch ends at species, or earlier
//! when a requested level has no children; either way it yields one row.
//!
//! Children listings are paginated. A listing that keeps failing degrades to
//! whatever pages were already fetched instead of failing the name.

use crate::api::{ChildRecord, TaxonomySource};
use crate::config::RetryPolicy;
use crate::error::FetchError;
use lineage_common::{ChildTaxon, OutputRow, Rank, Taxon};
use tokio::time::sleep;
use tracing::{debug, error, warn};

/// A pending step of the walk: the taxon to expand, the rank it sits at and
/// the row built so far. A taxon without a key ends its branch.
struct Frame {
    key: Option<i64>,
    rank_index: usize,
    row: OutputRow,
}

/// Expand a resolved `taxon` into one row per descent path
///
/// Ranks at or above `input_rank` are copied from the taxon's lineage; ranks
/// below it are filled from the children listings. The input rank column
/// always holds the queried name.
pub async fn expand<S>(
    source: &S,
    taxon: &Taxon,
    input_rank: Rank,
    output_ranks: &[Rank],
    policy: &RetryPolicy,
) -> Vec<OutputRow>
where
    S: TaxonomySource + ?Sized,
{
    let (higher_or_equal, lower): (Vec<Rank>, Vec<Rank>) = output_ranks
        .iter()
        .copied()
        .partition(|rank| rank.index() <= input_rank.index());

    let mut seed = OutputRow::new(input_rank, taxon.name.as_str(), output_ranks);
    for rank in higher_or_equal.into_iter().filter(|&rank| rank != input_rank) {
        seed.set(rank, taxon.rank_value(rank));
    }

    let Some(key) = taxon.key else {
        return vec![seed];
    };
    if lower.is_empty() {
        return vec![seed];
    }

    let mut rows = Vec::new();
    let mut stack = vec![Frame {
        key: Some(key),
        rank_index: input_rank.index(),
        row: seed,
    }];

    while let Some(Frame { key, rank_index, row }) = stack.pop() {
        let Some(next_rank) = Rank::from_index(rank_index + 1) else {
            rows.push(row);
            continue;
        };
        let Some(key) = key else {
            debug!(rank_index = rank_index, "Child without key, ending branch");
            rows.push(row);
            continue;
        };

        if !lower.contains(&next_rank) {
            stack.push(Frame {
                key: Some(key),
                rank_index: next_rank.index(),
                row,
            });
            continue;
        }

        let children = fetch_children(source, key, next_rank, policy).await;
        if children.is_empty() {
            debug!(parent_key = key, rank = %next_rank, "No children, ending branch");
            rows.push(row);
            continue;
        }

        // Reversed so the stack pops children in listing order
        for child in children.into_iter().rev() {
            let mut child_row = row.clone();
            child_row.set(next_rank, child.name);
            stack.push(Frame {
                key: child.key,
                rank_index: next_rank.index(),
                row: child_row,
            });
        }
    }

    rows
}

/// List every child of `parent_key` at `rank`, following pagination
///
/// Pages are requested until one comes back shorter than the page size. The
/// failure budget is shared by all pages of the listing.
pub async fn fetch_children<S>(
    source: &S,
    parent_key: i64,
    rank: Rank,
    policy: &RetryPolicy,
) -> Vec<ChildTaxon>
where
    S: TaxonomySource + ?Sized,
{
    let mut results = Vec::new();
    let mut offset: u32 = 0;
    let mut attempt: u32 = 0;

    loop {
        match source.children_page(parent_key, policy.page_size, offset).await {
            Ok(page) => {
                let page_len = page.len();
                results.extend(
                    page.into_iter()
                        .filter(|record| record.has_rank(rank))
                        .map(ChildRecord::into_child),
                );

                if page_len < policy.page_size as usize {
                    break;
                }
                offset += policy.page_size;
                sleep(policy.request_delay).await;
                continue;
            },
            Err(FetchError::RateLimited) => {
                warn!(
                    parent_key = parent_key,
                    attempt = attempt + 1,
                    "Rate limit exceeded when fetching children, increasing delay"
                );
                sleep(policy.rate_limit_backoff(attempt)).await;
            },
            Err(e) => {
                error!(
                    parent_key = parent_key,
                    attempt = attempt + 1,
                    error = %e,
                    "Children request failed"
                );
            },
        }

        attempt += 1;
        if attempt >= policy.retry_limit {
            error!(
                parent_key = parent_key,
                attempts = policy.retry_limit,
                kept = results.len(),
                "Failed to fetch children after exhausting retries, keeping partial results"
            );
            break;
        }
        sleep(policy.request_delay).await;
    }

    results
}
