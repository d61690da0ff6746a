use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// A single movie returned by a search, in relevance order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MovieSearchResult {
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl MovieSearchResult {
    pub fn new(title: impl Into<String>, release_date: Option<&str>) -> Self {
        Self {
            title: title.into(),
            release_date: release_date.map(str::to_string),
        }
    }
}

/// Body of a `/search/movie` response
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<MovieSearchResult>,
}

/// Lookup client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// v4 read access tokens are JWTs; anything else is treated as a v3 API key
    pub fn is_access_token(&self) -> bool {
        self.api_key.starts_with("eyJ")
    }
}

/// Errors that can occur when querying the movie database
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid API key")]
    Unauthorized,

    #[error("Rate limited by TMDB")]
    RateLimited,

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("API returned error: {0}")]
    ServerError(String),

    #[error("Client not configured: TMDB_API_KEY must be set")]
    NotConfigured,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::ParseError(err.to_string())
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}
