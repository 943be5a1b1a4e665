//! Lineage resolution for a single name
//!
//! A definitive no-match is an answer, not a failure, so it is returned
//! immediately. Failed requests are retried up to the policy's limit with a
//! pause after each attempt and an extra, growing pause after a rate-limit
//! response. Exhausting the retries yields the unresolved sentinel; the run
//! carries on with the next name.

use crate::api::{MatchOutcome, TaxonomySource};
use crate::config::RetryPolicy;
use crate::error::FetchError;
use lineage_common::Taxon;
use tokio::time::sleep;
use tracing::{error, warn};

/// Resolve `name` to a lineage, or to [`Taxon::empty`] when it cannot be
pub async fn resolve<S>(source: &S, name: &str, policy: &RetryPolicy) -> Taxon
where
    S: TaxonomySource + ?Sized,
{
    let mut attempt = 0;

    while attempt < policy.retry_limit {
        match source.match_name(name).await {
            Ok(MatchOutcome::Matched(taxon)) => return taxon,
            Ok(MatchOutcome::NoMatch) => {
                warn!(name = %name, "No match found");
                return Taxon::empty(name);
            },
            Err(FetchError::RateLimited) => {
                warn!(name = %name, attempt = attempt + 1, "Rate limit exceeded, increasing delay");
                sleep(policy.rate_limit_backoff(attempt)).await;
            },
            Err(e) => {
                error!(name = %name, attempt = attempt + 1, error = %e, "Name match request failed");
            },
        }

        attempt += 1;
        sleep(policy.request_delay).await;
    }

    error!(
        name = %name,
        attempts = policy.retry_limit,
        "Failed to fetch taxonomy after exhausting retries"
    );
    Taxon::empty(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::api::source::fake::FakeSource;
    use lineage_common::{Rank, NOT_AVAILABLE};
    use std::time::Duration;

    fn rosaceae() -> Taxon {
        Taxon::resolved(
            5015,
            "Rosaceae",
            Some("FAMILY".to_string()),
            [
                Some("Plantae".to_string()),
                Some("Tracheophyta".to_string()),
                Some("Magnoliopsida".to_string()),
                Some("Rosales".to_string()),
                Some("Rosaceae".to_string()),
                None,
                None,
            ],
        )
    }

    fn instant_policy() -> RetryPolicy {
        RetryPolicy {
            request_delay: Duration::ZERO,
            ..RetryPolicy::default()
        }
    }

    #[tokio::test]
    async fn test_resolves_on_first_attempt() {
        let source = FakeSource::new().with_taxon(rosaceae());

        let taxon = resolve(&source, "Rosaceae", &instant_policy()).await;

        assert_eq!(taxon, rosaceae());
        assert_eq!(source.match_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_no_match_is_not_retried() {
        let source = FakeSource::new();

        let taxon = resolve(&source, "Nonexistus", &instant_policy()).await;

        assert!(!taxon.is_resolved());
        assert_eq!(taxon.rank_value(Rank::Kingdom), NOT_AVAILABLE);
        assert_eq!(source.match_calls(), vec!["Nonexistus".to_string()]);
    }

    #[tokio::test]
    async fn test_transient_failures_are_retried() {
        let source = FakeSource::new().with_taxon(rosaceae()).with_match_failures(
            "Rosaceae",
            vec![
                FetchError::Status { status: 500 },
                FetchError::Decode("truncated".to_string()),
            ],
        );

        let taxon = resolve(&source, "Rosaceae", &instant_policy()).await;

        assert!(taxon.is_resolved());
        assert_eq!(source.match_calls().len(), 3);
    }

    #[tokio::test]
    async fn test_exhausted_retries_yield_empty_taxon() {
        let failures = (0..5).map(|_| FetchError::Status { status: 502 }).collect();
        let source = FakeSource::new()
            .with_taxon(rosaceae())
            .with_match_failures("Rosaceae", failures);

        let taxon = resolve(&source, "Rosaceae", &instant_policy()).await;

        assert!(!taxon.is_resolved());
        assert_eq!(taxon.name, "Rosaceae");
        assert_eq!(source.match_calls().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_backs_off_progressively() {
        let source = FakeSource::new().with_taxon(rosaceae()).with_match_failures(
            "Rosaceae",
            vec![FetchError::RateLimited, FetchError::RateLimited],
        );
        let policy = RetryPolicy {
            request_delay: Duration::from_secs(1),
            ..RetryPolicy::default()
        };

        let start = tokio::time::Instant::now();
        let taxon = resolve(&source, "Rosaceae", &policy).await;

        assert!(taxon.is_resolved());
        // attempt 0: 1s backoff + 1s pause, attempt 1: 2s backoff + 1s pause
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_after_every_failed_attempt() {
        let source = FakeSource::new()
            .with_taxon(rosaceae())
            .with_match_failures("Rosaceae", vec![FetchError::Status { status: 500 }]);
        let policy = RetryPolicy {
            request_delay: Duration::from_millis(1500),
            ..RetryPolicy::default()
        };

        let start = tokio::time::Instant::now();
        resolve(&source, "Rosaceae", &policy).await;

        assert_eq!(start.elapsed(), Duration::from_millis(1500));
    }
}
