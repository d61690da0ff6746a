/// Marker used wherever a release year could not be determined
pub const UNKNOWN_YEAR: &str = "unknown";

/// Best-effort (title, year) pair extracted from a release filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCandidate {
    /// Title-cased, whitespace-collapsed title section
    pub title: String,
    /// Leftmost 4-digit year in 1900-2099, if any
    pub year: Option<String>,
}

impl ParsedCandidate {
    pub fn new(title: impl Into<String>, year: Option<String>) -> Self {
        Self {
            title: title.into(),
            year,
        }
    }

    pub fn year_or_unknown(&self) -> &str {
        self.year.as_deref().unwrap_or(UNKNOWN_YEAR)
    }

    pub fn has_year(&self) -> bool {
        self.year.is_some()
    }
}
