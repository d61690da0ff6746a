use crate::api::{ApiError, MovieLookup};
use crate::parser::{ParsedCandidate, UNKNOWN_YEAR};
use tracing::{debug, info};

/// Metadata selected for a movie file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieMatch {
    pub canonical_title: String,
    /// Four digits, or [`UNKNOWN_YEAR`]
    pub release_year: String,
}

impl MovieMatch {
    pub fn new(canonical_title: impl Into<String>, release_year: impl Into<String>) -> Self {
        Self {
            canonical_title: canonical_title.into(),
            release_year: release_year.into(),
        }
    }

    pub fn has_known_year(&self) -> bool {
        self.release_year != UNKNOWN_YEAR
    }
}

/// Look up a parsed candidate and select the best match.
///
/// The lookup's ordering is trusted: the first result is always taken.
/// Returns `Ok(None)` when the lookup has no results.
pub fn resolve(
    candidate: &ParsedCandidate,
    lookup: &dyn MovieLookup,
) -> Result<Option<MovieMatch>, ApiError> {
    let results = lookup.search_movies(&candidate.title, candidate.year.as_deref())?;

    let Some(first) = results.into_iter().next() else {
        info!(
            "No results for {:?} ({})",
            candidate.title,
            candidate.year_or_unknown()
        );
        return Ok(None);
    };

    let release_year = match &candidate.year {
        Some(year) => year.clone(),
        None => year_from_release_date(first.release_date.as_deref())
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string()),
    };

    debug!(
        title = %first.title,
        release_year = %release_year,
        "Selected first search result"
    );

    Ok(Some(MovieMatch {
        canonical_title: first.title,
        release_year,
    }))
}

fn year_from_release_date(release_date: Option<&str>) -> Option<String> {
    let date = release_date?.trim();
    let year: String = date.chars().take(4).collect();
    (year.chars().count() == 4).then_some(year)
}
