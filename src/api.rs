//! Blocking client for the Mahjong Tracker tournament API.
//!
//! Two endpoints are consumed, both nested under the configured base URL:
//!
//! * `GET {base}/tournaments/{id}` returning the tournament details
//! * `GET {base}/tournaments/{id}/ranking` returning the ordered ranking entries
//!
//! Any non-2xx status is reported as [`FetchError::Status`]; nothing is retried or cached.

use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{RankingEntry, TournamentDetails};

/// Root of the public Mahjong Tracker API.
pub const DEFAULT_BASE_URL: &str = "https://mahjongtracker.com/api/v1";

const USER_AGENT: &str = concat!("ranking_pdf/", env!("CARGO_PKG_VERSION"));

pub type FetchResult<T> = Result<T, FetchError>;

/// Failures raised while talking to the tournament API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid API base URL '{base}': {reason}")]
    InvalidBaseUrl { base: String, reason: String },

    #[error("Failed to set up HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Network error for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("Unexpected response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// HTTP status code of a rejected request, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Location of the API the client talks to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl ApiConfig {
    /// Creates a configuration pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Thin wrapper around a blocking `reqwest` client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct TournamentApi {
    client: Client,
    base: Url,
}

impl TournamentApi {
    /// Creates a client for the public API.
    pub fn new() -> FetchResult<Self> {
        Self::with_config(&ApiConfig::default())
    }

    /// Creates a client for the API described by `config`.
    pub fn with_config(config: &ApiConfig) -> FetchResult<Self> {
        let base = parse_base_url(config.base_url())?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, base })
    }

    /// Fetches the tournament details for `tournament_id`.
    pub fn fetch_tournament_details(&self, tournament_id: &str) -> FetchResult<TournamentDetails> {
        let url = self.endpoint(&["tournaments", tournament_id]);
        info!("Fetching tournament details for {tournament_id}");
        self.get(url)
    }

    /// Fetches the ranking of `tournament_id` in the order returned by the API.
    pub fn fetch_ranking(&self, tournament_id: &str) -> FetchResult<Vec<RankingEntry>> {
        let url = self.endpoint(&["tournaments", tournament_id, "ranking"]);
        info!("Fetching ranking for {tournament_id}");
        let entries: Vec<RankingEntry> = self.get(url)?;
        info!("Received {} ranking entries", entries.len());
        Ok(entries)
    }

    /// Builds an endpoint URL, percent-encoding every segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // `parse_base_url` rejects bases that cannot carry a path.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get<T: DeserializeOwned>(&self, url: Url) -> FetchResult<T> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn parse_base_url(base: &str) -> FetchResult<Url> {
    let invalid = |reason: String| FetchError::InvalidBaseUrl {
        base: base.to_owned(),
        reason,
    };

    let url = Url::parse(base).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_owned()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::{ApiConfig, FetchError, TournamentApi, DEFAULT_BASE_URL};

    fn api(base: &str) -> TournamentApi {
        TournamentApi::with_config(&ApiConfig::new(base)).expect("valid base url")
    }

    #[test]
    fn endpoints_nest_under_the_base_path() {
        let api = api(DEFAULT_BASE_URL);
        assert_eq!(
            api.endpoint(&["tournaments", "42"]).as_str(),
            "https://mahjongtracker.com/api/v1/tournaments/42"
        );
        assert_eq!(
            api.endpoint(&["tournaments", "42", "ranking"]).as_str(),
            "https://mahjongtracker.com/api/v1/tournaments/42/ranking"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let api = api("http://localhost:8080/api/v1/");
        assert_eq!(
            api.endpoint(&["tournaments", "7"]).as_str(),
            "http://localhost:8080/api/v1/tournaments/7"
        );
    }

    #[test]
    fn identifier_is_a_single_encoded_segment() {
        let api = api(DEFAULT_BASE_URL);
        assert_eq!(
            api.endpoint(&["tournaments", "a/b c"]).as_str(),
            "https://mahjongtracker.com/api/v1/tournaments/a%2Fb%20c"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        for base in ["not a url", "mailto:someone@example.com"] {
            let err = TournamentApi::with_config(&ApiConfig::new(base)).unwrap_err();
            assert!(
                matches!(err, FetchError::InvalidBaseUrl { .. }),
                "unexpected error for {base}: {err}"
            );
        }
    }

    #[test]
    fn status_is_exposed_only_for_status_errors() {
        let err = FetchError::Status {
            url: "http://localhost/x".into(),
            status: 404,
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "Request to http://localhost/x failed with HTTP status 404"
        );
    }
}
