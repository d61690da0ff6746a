mod client;
mod types;

pub use client::TmdbClient;
pub use types::{ApiConfig, ApiError, MovieSearchResult, DEFAULT_BASE_URL};

use std::env;

/// Environment variable names for TMDB client configuration
pub const ENV_TMDB_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_TMDB_BASE_URL: &str = "TMDB_BASE_URL";

/// Movie search collaborator.
///
/// Results are ordered by relevance; an empty list means "no match" and is
/// not an error.
pub trait MovieLookup {
    fn search_movies(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Vec<MovieSearchResult>, ApiError>;
}

/// Load API configuration from environment variables
///
/// - `TMDB_API_KEY`: v3 API key or v4 read access token (required)
/// - `TMDB_BASE_URL`: override for the API root (optional)
///
/// These can be set in a `.env` file in the working directory.
pub fn config_from_env() -> ApiConfig {
    let api_key = env::var(ENV_TMDB_API_KEY).unwrap_or_default();
    let config = ApiConfig::new(api_key.trim());

    match env::var(ENV_TMDB_BASE_URL) {
        Ok(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
        _ => config,
    }
}
