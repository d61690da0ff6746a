use super::types::{ApiConfig, ApiError, MovieSearchResult, SearchResponse};
use super::MovieLookup;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info};

/// TMDB `/search/movie` client
pub struct TmdbClient {
    client: Client,
    config: ApiConfig,
}

impl TmdbClient {
    /// Create a new client with the given configuration
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        if !config.is_configured() {
            return Err(ApiError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn search_url(&self) -> String {
        format!("{}/search/movie", self.config.base_url)
    }

    fn query_params<'a>(&'a self, title: &'a str, year: Option<&'a str>) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![("query", title), ("include_adult", "false")];
        if let Some(year) = year {
            params.push(("year", year));
        }
        if !self.config.is_access_token() {
            params.push(("api_key", self.config.api_key.as_str()));
        }
        params
    }
}

impl MovieLookup for TmdbClient {
    fn search_movies(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Vec<MovieSearchResult>, ApiError> {
        info!("Searching TMDB for {:?} (year {:?})", title, year);

        let mut request = self
            .client
            .get(self.search_url())
            .query(&self.query_params(title, year));

        if self.config.is_access_token() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request.send()?;
        let status = response.status();

        debug!("Response status: {}", status);

        match status {
            StatusCode::UNAUTHORIZED => return Err(ApiError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(ApiError::RateLimited),
            s if !s.is_success() => {
                let body = response.text().unwrap_or_default();
                return Err(ApiError::ServerError(format!("{}: {}", s, body.trim())));
            }
            _ => {}
        }

        let body = response.text()?;
        let results = parse_search_response(&body)?;

        debug!("Search returned {} results", results.len());

        Ok(results)
    }
}

/// Decode a `/search/movie` JSON body, keeping the service's ordering
pub(crate) fn parse_search_response(body: &str) -> Result<Vec<MovieSearchResult>, ApiError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| ApiError::ParseError(e.to_string()))?;
    Ok(response.results)
}
