mod types;

pub use types::*;

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::trace;

// Brackets are noise around tags like "[1080p]" or "(2009)"
static BRACKETS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\[\](){}]+").unwrap());

// Scene separators: "The.Matrix", "Avatar-2009", "Inception_2010"
static SEPARATORS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[._\-]+").unwrap());

// Leftmost match wins, no word boundaries; ASCII digits only
static YEAR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:19|20)[0-9]{2}").unwrap());

/// Parse a release filename into a (title, year) candidate.
///
/// Never fails: an input without a recognizable year yields a candidate whose
/// title is the whole normalized stem. Title-casing is a display heuristic only
/// and does not preserve acronyms or stylized capitalization.
pub fn parse_filename(filename: &str) -> ParsedCandidate {
    let stem = strip_extension(filename);

    let normalized = BRACKETS_REGEX.replace_all(stem, " ");
    let normalized = SEPARATORS_REGEX.replace_all(&normalized, " ");

    let (title_section, year) = match YEAR_REGEX.find(&normalized) {
        Some(m) => (&normalized[..m.start()], Some(m.as_str().to_string())),
        None => (normalized.as_ref(), None),
    };

    let title = title_case(&collapse_whitespace(title_section));

    trace!(filename, title = %title, year = ?year, "Parsed filename");

    ParsedCandidate { title, year }
}

fn strip_extension(filename: &str) -> &str {
    let name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
