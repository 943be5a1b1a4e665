//! HTTP client for the GBIF species API

use crate::api::source::TaxonomySource;
use crate::api::{endpoints, types::*};
use crate::error::{FetchError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("lineage/", env!("CARGO_PKG_VERSION"));

/// API client for the GBIF species endpoints
pub struct GbifClient {
    client: Client,
    base_url: String,
}

impl GbifClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> std::result::Result<T, FetchError> {
        debug!(url = %url, "GET");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TaxonomySource for GbifClient {
    async fn match_name(&self, name: &str) -> std::result::Result<MatchOutcome, FetchError> {
        let url = endpoints::species_match_url(&self.base_url, name);
        let response: NameMatchResponse = self.get_json(&url).await?;
        Ok(response.into_outcome(name))
    }

    async fn children_page(
        &self,
        parent_key: i64,
        limit: u32,
        offset: u32,
    ) -> std::result::Result<Vec<ChildRecord>, FetchError> {
        let url = endpoints::species_children_url(&self.base_url, parent_key, limit, offset);
        let response: ChildrenResponse = self.get_json(&url).await?;
        Ok(response.results)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GbifClient {
        GbifClient::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = GbifClient::new("https://api.gbif.org/v1/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "https://api.gbif.org/v1");
    }

    #[tokio::test]
    async fn test_match_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/species/match"))
            .and(query_param("name", "Rosaceae"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "usageKey": 5015,
                "matchType": "EXACT",
                "rank": "FAMILY",
                "kingdom": "Plantae",
                "family": "Rosaceae"
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).match_name("Rosaceae").await.unwrap();
        let MatchOutcome::Matched(taxon) = outcome else {
            panic!("expected a match");
        };
        assert_eq!(taxon.key, Some(5015));
    }

    #[tokio::test]
    async fn test_rate_limit_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/species/match"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client_for(&server).match_name("Rosa").await.unwrap_err();
        assert!(err.is_rate_limit());
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/species/5015/children"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).children_page(5015, 1000, 0).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503 }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/species/match"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).match_name("Rosa").await.unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_children_page_passes_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/species/5015/children"))
            .and(query_param("limit", "2"))
            .and(query_param("offset", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "offset": 4,
                "limit": 2,
                "endOfRecords": true,
                "results": [{"key": 1, "scientificName": "Rosa L.", "rank": "GENUS"}]
            })))
            .mount(&server)
            .await;

        let page = client_for(&server).children_page(5015, 2, 4).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].scientific_name.as_deref(), Some("Rosa L."));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = GbifClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.match_name("Rosa").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_) | FetchError::Timeout(_)));
    }
}
