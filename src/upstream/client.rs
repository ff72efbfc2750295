//! Esports API client with timeout and error handling.
//!
//! # Responsibilities
//! - Build upstream URLs (`{base}/{game?}/teams`, `{base}/{game?}/matches/upcoming`)
//! - Encode JSON:API style filter/pagination parameters
//! - Issue one authenticated GET per call, bounded by a deadline
//! - Decode JSON arrays, treating `null` as empty

use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::error::{UpstreamError, UpstreamResult};
use crate::upstream::types::{Match, Team};

/// HTTP client for the upstream esports API.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    timeout_duration: Duration,
    matches_page_size: u32,
}

impl UpstreamClient {
    /// Create a client from validated upstream settings.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| UpstreamError::Url(format!("'{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::Url(format!("'{}' cannot be a base", config.base_url)));
        }

        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(concat!("esports-proxy/", env!("CARGO_PKG_VERSION")));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
            timeout_duration: config.request_timeout(),
            matches_page_size: config.matches_page_size,
        })
    }

    /// Search teams by name, one page at a time.
    pub async fn search_teams(
        &self,
        game: &str,
        name: &str,
        limit: u32,
        page: u32,
    ) -> UpstreamResult<Vec<Team>> {
        let url = self.search_teams_url(game, name, limit, page)?;
        self.fetch_list("search_teams", url).await
    }

    /// Fetch exactly the teams with the given ids.
    pub async fn teams_by_ids(&self, game: &str, ids: &[i64]) -> UpstreamResult<Vec<Team>> {
        let url = self.teams_by_ids_url(game, ids)?;
        self.fetch_list("teams_by_ids", url).await
    }

    /// Fetch the upcoming matches, optionally only those involving `team_ids`.
    pub async fn upcoming_matches(&self, game: &str, team_ids: &[i64]) -> UpstreamResult<Vec<Match>> {
        let url = self.upcoming_matches_url(game, team_ids)?;
        self.fetch_list("upcoming_matches", url).await
    }

    pub fn search_teams_url(&self, game: &str, name: &str, limit: u32, page: u32) -> UpstreamResult<Url> {
        let mut params = BTreeMap::new();
        params.insert("page[size]", limit.to_string());
        params.insert("page[number]", page.to_string());
        params.insert("filter[name]", name.to_string());
        self.endpoint(game, &["teams"], params)
    }

    pub fn teams_by_ids_url(&self, game: &str, ids: &[i64]) -> UpstreamResult<Url> {
        let mut params = BTreeMap::new();
        params.insert("filter[id]", join_ids(ids));
        self.endpoint(game, &["teams"], params)
    }

    pub fn upcoming_matches_url(&self, game: &str, team_ids: &[i64]) -> UpstreamResult<Url> {
        let mut params = BTreeMap::new();
        params.insert("page[size]", self.matches_page_size.to_string());
        params.insert("page[number]", "1".to_string());
        params.insert("sort", "scheduled_at".to_string());
        if !team_ids.is_empty() {
            params.insert("filter[opponent_id]", join_ids(team_ids));
        }
        self.endpoint(game, &["matches", "upcoming"], params)
    }

    /// `{base}/{game?}/{path..}?{params}`. Keys come out sorted.
    fn endpoint(
        &self,
        game: &str,
        path: &[&str],
        params: BTreeMap<&str, String>,
    ) -> UpstreamResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| UpstreamError::Url(self.base_url.to_string()))?;
            segments.pop_if_empty();
            let game = game.trim();
            if !game.is_empty() {
                // Pushed as one segment; '/' inside it is percent-encoded.
                segments.push(game);
            }
            segments.extend(path);
        }
        url.set_query(None);
        url.query_pairs_mut().extend_pairs(params.iter());
        Ok(url)
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
    ) -> UpstreamResult<Vec<T>> {
        let start = Instant::now();
        tracing::debug!(operation, path = %url.path(), "Calling upstream");

        let result = match timeout(self.timeout_duration, self.get_json::<T>(url.clone())).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(self.timeout_duration)),
        };

        match &result {
            Ok(items) => {
                metrics::record_upstream(operation, "ok", start);
                if items.is_empty() {
                    tracing::debug!(operation, "Upstream returned no results");
                }
                tracing::debug!(
                    operation,
                    count = items.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream call succeeded"
                );
            }
            Err(e) => {
                metrics::record_upstream(operation, e.outcome(), start);
                tracing::warn!(operation, url = %url, error = %e, "Upstream call failed");
            }
        }

        result
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> UpstreamResult<Vec<T>> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        let items: Option<Vec<T>> = serde_json::from_slice(&body)?;
        Ok(items.unwrap_or_default())
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout_ms", &self.timeout_duration.as_millis())
            .finish()
    }
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter().map(i64::to_string).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> UpstreamClient {
        let config = UpstreamConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            ..UpstreamConfig::default()
        };
        UpstreamClient::new(&config).unwrap()
    }

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
    }

    #[test]
    fn test_search_teams_url() {
        let url = client("https://api.pandascore.co")
            .search_teams_url("lol", "t1", 5, 1)
            .unwrap();

        assert_eq!(url.path(), "/lol/teams");
        assert_eq!(
            pairs(&url),
            vec![
                ("filter[name]".to_string(), "t1".to_string()),
                ("page[number]".to_string(), "1".to_string()),
                ("page[size]".to_string(), "5".to_string()),
            ]
        );
        assert_eq!(
            url.as_str(),
            "https://api.pandascore.co/lol/teams?filter%5Bname%5D=t1&page%5Bnumber%5D=1&page%5Bsize%5D=5"
        );
    }

    #[test]
    fn test_game_segment_omitted_when_empty() {
        let c = client("https://api.pandascore.co");
        assert_eq!(c.search_teams_url("", "fnatic", 10, 1).unwrap().path(), "/teams");
        assert_eq!(c.search_teams_url("  ", "fnatic", 10, 1).unwrap().path(), "/teams");
        assert_eq!(c.upcoming_matches_url("", &[]).unwrap().path(), "/matches/upcoming");
    }

    #[test]
    fn test_base_url_prefix_kept() {
        let c = client("http://127.0.0.1:9000/v2/");
        let url = c.teams_by_ids_url("csgo", &[1, 2]).unwrap();
        assert_eq!(url.path(), "/v2/csgo/teams");
    }

    #[test]
    fn test_game_cannot_escape_segment() {
        let url = client("https://api.pandascore.co")
            .upcoming_matches_url("../admin", &[])
            .unwrap();
        assert_eq!(url.path_segments().unwrap().count(), 3);
        assert!(url.path().starts_with("/..%2Fadmin/"));
    }

    #[test]
    fn test_teams_by_ids_url() {
        let url = client("https://api.pandascore.co")
            .teams_by_ids_url("lol", &[135916, 13917, 2002])
            .unwrap();
        assert_eq!(
            pairs(&url),
            vec![("filter[id]".to_string(), "135916,13917,2002".to_string())]
        );
    }

    #[test]
    fn test_upcoming_matches_url() {
        let c = client("https://api.pandascore.co");

        let url = c.upcoming_matches_url("lol", &[]).unwrap();
        assert_eq!(url.path(), "/lol/matches/upcoming");
        assert_eq!(
            pairs(&url),
            vec![
                ("page[number]".to_string(), "1".to_string()),
                ("page[size]".to_string(), "100".to_string()),
                ("sort".to_string(), "scheduled_at".to_string()),
            ]
        );

        let url = c.upcoming_matches_url("lol", &[135916, 7]).unwrap();
        assert!(pairs(&url).contains(&("filter[opponent_id]".to_string(), "135916,7".to_string())));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = UpstreamConfig {
            base_url: "mailto:someone@example.com".to_string(),
            ..UpstreamConfig::default()
        };
        assert!(matches!(UpstreamClient::new(&config), Err(UpstreamError::Url(_))));
    }

    #[test]
    fn test_debug_hides_key() {
        let printed = format!("{:?}", client("https://api.pandascore.co"));
        assert!(!printed.contains("test-key"));
    }
}
