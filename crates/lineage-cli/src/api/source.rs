//! The seam between the engine and the remote taxonomy service

use crate::api::types::{ChildRecord, MatchOutcome};
use crate::error::FetchError;
use async_trait::async_trait;

/// A taxonomy service that can match names and list children
///
/// Implementations perform exactly one request per call. Retrying, pacing and
/// rank filtering are the caller's job.
#[async_trait]
pub trait TaxonomySource: Send + Sync {
    /// Look up the best match for a free-text name
    async fn match_name(&self, name: &str) -> Result<MatchOutcome, FetchError>;

    /// Fetch one page of the direct children of `parent_key`
    ///
    /// Returns the raw, unfiltered page; a page shorter than `limit` is the
    /// last one.
    async fn children_page(
        &self,
        parent_key: i64,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ChildRecord>, FetchError>;
}
